//! Conjunctive normal form: the [`ClauseSet`] type and the conversion from [`Expr`].
//!
//! The conversion works structurally on the formula tree:
//!
//! - `a <=> b` becomes `(!a | b) & (!b | a)`, and `a => b` becomes `!a | b`.
//! - Negations are pushed inwards with De Morgan's laws. Double negations cancel.
//! - A disjunction of two CNFs distributes: every clause of one side is joined with
//!   every clause of the other.
//!
//! Intermediate results are normalized after each step. Subsumption and
//! tautology are both preserved when a clause is widened by a disjunction, so this
//! gives the same set as simplifying only at the end.

use crate::logic::clause::{Assignment, Clause};
use crate::logic::error::Result;
use crate::logic::expr::Expr;
use crate::logic::literal::{Literal, Symbol};
use crate::logic::parser::parse_formula;
use crate::logic::preprocessing::normalize;
use itertools::Itertools;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A conjunction of clauses with no tautologies, no duplicates and no subsumed
/// clauses.
///
/// The clauses are kept sorted, so the derived `PartialEq` is set equality. The
/// empty set is trivially true.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ClauseSet {
    clauses: Vec<Clause>,
}

impl ClauseSet {
    /// Builds a normalized set from arbitrary clauses.
    pub fn new(clauses: impl IntoIterator<Item = Clause>) -> Self {
        Self {
            clauses: normalize(clauses.into_iter().collect()),
        }
    }

    /// The clauses in sorted order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Iterates over the clauses.
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// `true` for the empty (valid) set.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Membership test by binary search.
    pub fn contains(&self, clause: &Clause) -> bool {
        self.clauses.binary_search(clause).is_ok()
    }

    /// Every symbol mentioned by some clause.
    pub fn symbols(&self) -> BTreeSet<Symbol> {
        self.iter().flat_map(Clause::symbols).cloned().collect()
    }

    /// Conjunction of two clause sets.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(self.iter().chain(other.iter()).cloned())
    }

    /// `true` if every clause holds under `assignment`.
    pub fn evaluate(&self, assignment: &Assignment) -> bool {
        self.iter().all(|clause| clause.evaluate(assignment))
    }
}

impl<'a> IntoIterator for &'a ClauseSet {
    type Item = &'a Clause;
    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

impl FromIterator<Clause> for ClauseSet {
    fn from_iter<T: IntoIterator<Item = Clause>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// Renders `(A | B) & (!C)`, which [`parse_cnf_sentence`] reads back to an equal set.
/// The empty set renders as an empty string.
impl fmt::Display for ClauseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.iter().map(|clause| format!("({clause})")).join(" & ")
        )
    }
}

impl FromStr for ClauseSet {
    type Err = crate::logic::error::LogicError;

    fn from_str(s: &str) -> Result<Self> {
        parse_cnf_sentence(s)
    }
}

/// Converts a formula to an equivalent normalized clause set.
pub fn to_cnf(expr: &Expr) -> ClauseSet {
    ClauseSet {
        clauses: convert(expr),
    }
}

fn convert(expr: &Expr) -> Vec<Clause> {
    match expr {
        Expr::Var(s) => vec![Clause::from(Literal::positive(s.clone()))],
        Expr::And(a, b) => {
            let mut clauses = convert(a);
            clauses.extend(convert(b));
            normalize(clauses)
        }
        Expr::Or(a, b) => distribute(&convert(a), &convert(b)),
        Expr::Implies(a, b) => convert(&Expr::or(Expr::not((**a).clone()), (**b).clone())),
        Expr::Iff(a, b) => convert(&expand_iff(a, b)),
        Expr::Not(inner) => convert_negation(inner),
    }
}

/// `(X1 & X2 & ..) | (Y1 & Y2 & ..)` = `(X1 | Y1) & (X1 | Y2) & ..`
fn distribute(lhs: &[Clause], rhs: &[Clause]) -> Vec<Clause> {
    normalize(
        lhs.iter()
            .cartesian_product(rhs)
            .map(|(x, y)| x.union(y))
            .collect(),
    )
}

fn expand_iff(a: &Expr, b: &Expr) -> Expr {
    Expr::and(
        Expr::or(Expr::not(a.clone()), b.clone()),
        Expr::or(Expr::not(b.clone()), a.clone()),
    )
}

fn convert_negation(inner: &Expr) -> Vec<Clause> {
    match inner {
        Expr::Var(s) => vec![Clause::from(Literal::negative(s.clone()))],
        Expr::Not(e) => convert(e),
        Expr::And(a, b) => convert(&Expr::or(
            Expr::not((**a).clone()),
            Expr::not((**b).clone()),
        )),
        Expr::Or(a, b) => convert(&Expr::and(
            Expr::not((**a).clone()),
            Expr::not((**b).clone()),
        )),
        Expr::Implies(a, b) => convert_negation(&Expr::or(Expr::not((**a).clone()), (**b).clone())),
        Expr::Iff(a, b) => convert_negation(&expand_iff(a, b)),
    }
}

/// Parses one formula and converts it to CNF. Blank text is the empty (true) set.
///
/// # Errors
///
/// `LogicError::Parse` if the text is not a well-formed formula.
pub fn parse_cnf_sentence(text: &str) -> Result<ClauseSet> {
    if text.trim().is_empty() {
        return Ok(ClauseSet::default());
    }
    Ok(to_cnf(&parse_formula(text)?))
}

/// Parses a knowledge base with one formula per line (blank lines ignored) into
/// the CNF of their conjunction.
///
/// # Errors
///
/// `LogicError::Parse` for the first malformed line.
pub fn parse_cnf_kb(text: &str) -> Result<ClauseSet> {
    let mut clauses = Vec::new();
    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        clauses.extend(to_cnf(&parse_formula(line)?).clauses);
    }
    Ok(ClauseSet::new(clauses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::error::LogicError;
    use crate::logic::error::ParseError;
    use proptest::prelude::*;

    fn cnf(text: &str) -> ClauseSet {
        parse_cnf_sentence(text).unwrap()
    }

    /// Reads the expected answer the way the textbook writes it: `&`-separated
    /// groups of `|`-separated literals.
    fn literal_sets(text: &str) -> ClauseSet {
        ClauseSet::new(
            text.split('&')
                .filter(|group| !group.trim().is_empty())
                .map(|group| group.replace(['(', ')'], "").parse::<Clause>().unwrap()),
        )
    }

    #[test]
    fn test_conversion() {
        let formula_equivalences = [
            ("!(A <=> B)", "(!A | !B) & (A | B)"),
            ("(A <=> B)", "(!A | B) & (A | !B)"),
            ("(A <=> B) => ((A => B) & (B => A))", ""),
            (
                "(P & !Q) | (R & S) | (Q & R & !S)",
                "(P | Q | S) & (P | R) & (!Q | R)",
            ),
            ("(A => (B & C)) => B", "A | B"),
            ("((!A | B) & (!A | C)) => B", "A | B"),
            ("!(A => (B & C))", "A & (!B | !C)"),
            ("(A => B) => C", "(A | C) & (!B | C)"),
            (
                "(B11 => (P12 | P21)) & ((P12 | P21) => B11)",
                "(!B11 | P12 | P21) & (!P12 | B11) & (!P21 | B11)",
            ),
            (
                "(B11 <=> (P12 | P21))",
                "(!B11 | P12 | P21) & (!P12 | B11) & (!P21 | B11)",
            ),
            ("(A | B) => C", "(!A | C) & (!B | C)"),
        ];

        for (formula, expected) in formula_equivalences {
            let result = cnf(formula);
            assert_eq!(result, cnf(expected), "{formula}");
            assert_eq!(result, literal_sets(expected), "{formula}");
        }
    }

    #[test]
    fn test_contradiction_has_no_satisfying_assignment() {
        let result = cnf("!((A <=> B) => ((A => B) & (B => A)))");
        let symbols: Vec<Symbol> = result.symbols().into_iter().collect();
        for bits in 0..(1u32 << symbols.len()) {
            let assignment: Assignment = symbols
                .iter()
                .enumerate()
                .map(|(i, s)| (s.clone(), bits & (1 << i) != 0))
                .collect();
            assert!(!result.evaluate(&assignment));
        }
        assert!(!result.is_empty());
    }

    #[test]
    fn test_tautology_is_empty_set() {
        assert!(cnf("A | !A").is_empty());
        assert!(cnf("(A <=> B) => ((A => B) & (B => A))").is_empty());
    }

    #[test]
    fn test_subsumption() {
        let set = ClauseSet::new(vec![
            "A | B".parse::<Clause>().unwrap(),
            "A".parse::<Clause>().unwrap(),
        ]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.to_string(), "(A)");
        assert_eq!(cnf("A & (A | B)"), cnf("A"));
    }

    #[test]
    fn test_display_round_trip() {
        let set = cnf("(B11 <=> (P12 | P21)) & !B11");
        assert_eq!(set.to_string(), "(!B11) & (B11 | !P12) & (B11 | !P21)");
        assert_eq!(cnf(&set.to_string()), set);

        let set = cnf("(A => B | D) & ((A & B) => C)");
        assert_eq!(set.to_string(), "(!A | !B | C) & (!A | B | D)");
        assert_eq!(set.to_string().parse::<ClauseSet>().unwrap(), set);
    }

    #[test]
    fn test_kb_parsing() {
        let formulae = ["(A => B | D)", "((A & B) => C)", "(C <=> !D)"];
        let kb = parse_cnf_kb(&formulae.join("\n")).unwrap();
        let expected = cnf("(!A | B | D) & (!A | !B | C) & (!C | !D) & (C | D)");
        assert_eq!(kb, expected);

        let and_concatenation = cnf(&formulae.join(" & "));
        assert_eq!(kb, and_concatenation);
    }

    #[test]
    fn test_kb_parsing_skips_blank_lines_and_reports_errors() {
        let kb = parse_cnf_kb("\n  A\n\n  A => B\n").unwrap();
        assert_eq!(kb, cnf("A & (A => B)"));
        assert_eq!(kb.to_string(), "(!A | B) & (A)");
        assert_ne!(kb, cnf("A & B"));

        let err = parse_cnf_kb("A\n(B &").unwrap_err();
        assert!(matches!(
            err,
            LogicError::Parse(ParseError::UnbalancedParenthesis { .. })
        ));
    }

    fn arb_expr() -> impl Strategy<Value = Expr> {
        let leaf = prop::sample::select(vec!["A", "B", "C", "D"])
            .prop_map(|name| Expr::var(Symbol::new(name).unwrap()));
        leaf.prop_recursive(4, 24, 2, |inner| {
            prop_oneof![
                inner.clone().prop_map(Expr::not),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Expr::and(a, b)),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Expr::or(a, b)),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Expr::implies(a, b)),
                (inner.clone(), inner).prop_map(|(a, b)| Expr::iff(a, b)),
            ]
        })
    }

    fn assignments(symbols: &[Symbol]) -> impl Iterator<Item = Assignment> + '_ {
        (0..(1u32 << symbols.len())).map(move |bits| {
            symbols
                .iter()
                .enumerate()
                .map(|(i, s)| (s.clone(), bits & (1 << i) != 0))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_cnf_is_equivalent(expr in arb_expr()) {
            let set = to_cnf(&expr);
            let symbols: Vec<Symbol> = expr.symbols().into_iter().collect();
            for assignment in assignments(&symbols) {
                prop_assert_eq!(expr.evaluate(&assignment), set.evaluate(&assignment));
            }
        }

        #[test]
        fn prop_cnf_is_simplified(expr in arb_expr()) {
            let set = to_cnf(&expr);
            for (i, a) in set.iter().enumerate() {
                prop_assert!(!a.is_tautology());
                for (j, b) in set.iter().enumerate() {
                    prop_assert!(i == j || !a.subsumes(b));
                }
            }
        }

        #[test]
        fn prop_cnf_is_idempotent(expr in arb_expr()) {
            let set = to_cnf(&expr);
            prop_assert_eq!(parse_cnf_sentence(&set.to_string()).unwrap(), set.clone());
            prop_assert_eq!(to_cnf(&parse_formula(&expr.to_string()).unwrap()), set);
        }
    }
}
