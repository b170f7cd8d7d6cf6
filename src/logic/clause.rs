//! A disjunction of literals, stored in canonical (sorted, deduplicated) form.

use crate::logic::error::ParseError;
use crate::logic::expr::Expr;
use crate::logic::literal::{Literal, Symbol};
use crate::logic::parser::parse_formula;
use core::ops::Index;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Truth values for symbols. Symbols missing from the map are treated as false.
pub type Assignment = FxHashMap<Symbol, bool>;

/// Inline capacity of a clause; textbook clauses rarely exceed it.
const INLINE_LITERALS: usize = 4;

/// A set of literals read as their disjunction.
///
/// The literals are always sorted and free of duplicates, so the derived
/// `PartialEq`/`Hash` compare clauses as sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause {
    literals: SmallVec<[Literal; INLINE_LITERALS]>,
}

impl Clause {
    /// Builds a clause, sorting and deduplicating the literals.
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        let mut literals: SmallVec<[Literal; INLINE_LITERALS]> = literals.into_iter().collect();
        literals.sort_unstable();
        literals.dedup();
        Self { literals }
    }

    /// The empty clause, i.e. falsity.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of distinct literals.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// `true` for the empty clause.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// The literals in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// Membership test by binary search.
    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.binary_search(literal).is_ok()
    }

    /// Each symbol once, even when it occurs in both polarities.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.literals.iter().map(Literal::symbol).dedup()
    }

    /// A clause holding some literal and its complement is always true.
    ///
    /// Sorting places `!X` directly before `X`, so adjacent pairs suffice.
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .tuple_windows()
            .any(|(a, b)| a.is_complement_of(b))
    }

    /// `true` if every literal of `self` also occurs in `other`.
    pub fn subsumes(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.iter().all(|lit| other.contains(lit))
    }

    /// Disjunction of two clauses.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(self.iter().chain(other.iter()).cloned())
    }

    /// All binary resolvents of `self` and `other`, one per complementary symbol.
    ///
    /// Tautological resolvents are included; callers decide whether to keep them.
    pub fn resolvents_with<'a>(&'a self, other: &'a Self) -> impl Iterator<Item = Self> + 'a {
        self.iter()
            .filter(|lit| other.contains(&lit.negated()))
            .map(move |pivot| {
                let complement = pivot.negated();
                Self::new(
                    self.iter()
                        .filter(|lit| *lit != pivot)
                        .chain(other.iter().filter(|lit| **lit != complement))
                        .cloned(),
                )
            })
    }

    /// Reads `a | !b | ...` as a clause, or `None` if `expr` contains any other
    /// connective or a negated compound.
    pub fn from_disjunction(expr: &Expr) -> Option<Self> {
        let mut literals = Vec::new();
        collect_disjuncts(expr, &mut literals)?;
        Some(Self::new(literals))
    }

    /// `true` if some literal holds under `assignment`.
    pub fn evaluate(&self, assignment: &Assignment) -> bool {
        self.iter().any(|lit| {
            lit.evaluate(assignment.get(lit.symbol()).copied().unwrap_or(false))
        })
    }
}

fn collect_disjuncts(expr: &Expr, out: &mut Vec<Literal>) -> Option<()> {
    match expr {
        Expr::Var(s) => out.push(Literal::positive(s.clone())),
        Expr::Not(inner) => match &**inner {
            Expr::Var(s) => out.push(Literal::negative(s.clone())),
            _ => return None,
        },
        Expr::Or(a, b) => {
            collect_disjuncts(a, out)?;
            collect_disjuncts(b, out)?;
        }
        _ => return None,
    }
    Some(())
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl From<Literal> for Clause {
    fn from(literal: Literal) -> Self {
        Self::new([literal])
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;
    type IntoIter = core::slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("()");
        }
        write!(f, "{}", self.literals.iter().join(" | "))
    }
}

/// Parses `A | !B` with the formula grammar, so any balanced parenthesization is
/// accepted. `()` is the empty clause.
impl FromStr for Clause {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() || compact == "()" {
            return Ok(Self::empty());
        }
        let expr = parse_formula(s)?;
        Self::from_disjunction(&expr).ok_or_else(|| ParseError::NotAClause(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(text: &str) -> Clause {
        text.parse().unwrap()
    }

    #[test]
    fn test_new_is_canonical() {
        let a = clause("B | A | !C | A");
        let b = clause("!C | B | A");
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
        assert_eq!(a.to_string(), "A | B | !C");
    }

    #[test]
    fn test_parse_with_grouped_literals() {
        assert_eq!(clause("(A) | (B)"), clause("A | B"));
        assert_eq!(clause("((!A) | (B | C))"), clause("!A | B | C"));
        assert_eq!(clause(" ( ) "), Clause::empty());
        assert_eq!(
            "A & B".parse::<Clause>(),
            Err(ParseError::NotAClause("A & B".to_string()))
        );
        assert_eq!(
            "!(A | B)".parse::<Clause>(),
            Err(ParseError::NotAClause("!(A | B)".to_string()))
        );
        assert!(matches!(
            "(A) | B)".parse::<Clause>(),
            Err(ParseError::UnbalancedParenthesis { .. })
        ));
    }

    #[test]
    fn test_index() {
        let c = clause("(Q | !P)");
        assert_eq!(c[0].to_string(), "!P");
        assert_eq!(c[1].to_string(), "Q");
    }

    #[test]
    fn test_tautology() {
        assert!(clause("A | B | !A").is_tautology());
        assert!(!clause("A | B | !C").is_tautology());
        assert!(!Clause::empty().is_tautology());
    }

    #[test]
    fn test_subsumes() {
        let small = clause("A");
        let big = clause("A | B");
        assert!(small.subsumes(&big));
        assert!(!big.subsumes(&small));
        assert!(big.subsumes(&big.clone()));
        assert!(Clause::empty().subsumes(&small));
    }

    #[test]
    fn test_resolvents_single_pivot() {
        let a = clause("!B11 | P12 | P21");
        let b = clause("!P12");
        let resolvents: Vec<Clause> = a.resolvents_with(&b).collect();
        assert_eq!(resolvents, vec![clause("!B11 | P21")]);
    }

    #[test]
    fn test_resolvents_multiple_pivots() {
        let a = clause("A | B");
        let b = clause("!A | !B");
        let resolvents: Vec<Clause> = a.resolvents_with(&b).collect();
        assert_eq!(resolvents.len(), 2);
        assert!(resolvents.iter().all(Clause::is_tautology));
    }

    #[test]
    fn test_resolve_to_empty() {
        let a = clause("P");
        let b = clause("!P");
        let resolvents: Vec<Clause> = a.resolvents_with(&b).collect();
        assert_eq!(resolvents, vec![Clause::empty()]);
        assert_eq!(resolvents[0].to_string(), "()");
    }

    #[test]
    fn test_evaluate() {
        let c = clause("!A | B");
        let mut assignment = Assignment::default();
        assert!(c.evaluate(&assignment));
        assignment.insert(Symbol::new("A").unwrap(), true);
        assert!(!c.evaluate(&assignment));
        assert!(!Clause::empty().evaluate(&assignment));
    }
}
