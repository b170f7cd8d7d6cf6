//! Definite (Horn) clauses: exactly one positive literal.
//!
//! A line such as `A & B => C` and the disjunction `!A | !B | C` describe the same
//! clause, with premises `{A, B}` and conclusion `C`. A clause without premises is a
//! fact.

use crate::logic::clause::Clause;
use crate::logic::cnf::ClauseSet;
use crate::logic::error::{LogicError, Result};
use crate::logic::expr::Expr;
use crate::logic::literal::{Literal, Symbol};
use crate::logic::parser::parse_formula;
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// `premises => conclusion`, or just `conclusion` for a fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefiniteClause {
    premises: BTreeSet<Symbol>,
    conclusion: Symbol,
}

impl DefiniteClause {
    /// A clause with the given premises; repeated premises collapse.
    pub fn new(premises: impl IntoIterator<Item = Symbol>, conclusion: Symbol) -> Self {
        Self {
            premises: premises.into_iter().collect(),
            conclusion,
        }
    }

    /// A clause without premises.
    pub const fn fact(conclusion: Symbol) -> Self {
        Self {
            premises: BTreeSet::new(),
            conclusion,
        }
    }

    /// The premises, sorted.
    pub const fn premises(&self) -> &BTreeSet<Symbol> {
        &self.premises
    }

    /// The single positive literal.
    pub const fn conclusion(&self) -> &Symbol {
        &self.conclusion
    }

    /// `true` if there are no premises.
    pub fn is_fact(&self) -> bool {
        self.premises.is_empty()
    }

    /// The clause as a disjunction: every premise negated, plus the conclusion.
    pub fn to_clause(&self) -> Clause {
        self.premises
            .iter()
            .cloned()
            .map(Literal::negative)
            .chain([Literal::positive(self.conclusion.clone())])
            .collect()
    }

    /// Parses one line. `line` is the 1-based line number used in errors.
    ///
    /// # Errors
    ///
    /// `LogicError::Parse` for malformed text, `LogicError::InvalidClause` if the
    /// formula is not a definite clause.
    pub fn parse_line(text: &str, line: usize) -> Result<Self> {
        let invalid = |reason: &str| LogicError::InvalidClause {
            line,
            reason: reason.to_string(),
        };

        match parse_formula(text)? {
            Expr::Implies(lhs, rhs) => {
                let Expr::Var(conclusion) = *rhs else {
                    return Err(invalid("the conclusion must be a single symbol"));
                };
                let mut premises = BTreeSet::new();
                collect_conjuncts(&lhs, &mut premises)
                    .ok_or_else(|| invalid("the premises must be a conjunction of symbols"))?;
                Ok(Self::new(premises, conclusion))
            }
            expr => {
                let clause = Clause::from_disjunction(&expr)
                    .ok_or_else(|| invalid("expected an implication or a disjunction of literals"))?;

                let (positive, negative): (Vec<&Literal>, Vec<&Literal>) =
                    clause.iter().partition(|lit| lit.polarity());
                match positive.as_slice() {
                    [conclusion] => Ok(Self::new(
                        negative.iter().map(|lit| lit.symbol().clone()),
                        conclusion.symbol().clone(),
                    )),
                    [] => Err(invalid("it has no positive literal")),
                    _ => Err(invalid("it has more than one positive literal")),
                }
            }
        }
    }
}

fn collect_conjuncts(expr: &Expr, out: &mut BTreeSet<Symbol>) -> Option<()> {
    match expr {
        Expr::Var(s) => {
            out.insert(s.clone());
            Some(())
        }
        Expr::And(a, b) => {
            collect_conjuncts(a, out)?;
            collect_conjuncts(b, out)
        }
        _ => None,
    }
}

impl fmt::Display for DefiniteClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fact() {
            write!(f, "{}", self.conclusion)
        } else {
            write!(f, "{} => {}", self.premises.iter().join(" & "), self.conclusion)
        }
    }
}

impl FromStr for DefiniteClause {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_line(s, 1)
    }
}

/// An ordered list of definite clauses.
///
/// Equality ignores order and repetition: two knowledge bases are equal when they
/// contain the same clauses, however each clause was written.
#[derive(Debug, Clone, Default)]
pub struct DefiniteKnowledgeBase {
    clauses: Vec<DefiniteClause>,
}

impl DefiniteKnowledgeBase {
    /// Wraps clauses in the given order.
    pub fn new(clauses: Vec<DefiniteClause>) -> Self {
        Self { clauses }
    }

    /// Parses one clause per line; blank lines are skipped.
    ///
    /// # Errors
    ///
    /// The first line that fails to parse, tagged with its line number for
    /// `InvalidClause`.
    pub fn parse(text: &str) -> Result<Self> {
        let clauses = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| DefiniteClause::parse_line(line, i + 1))
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Parsed {} definite clauses", clauses.len());
        Ok(Self { clauses })
    }

    /// The clauses in insertion order.
    pub fn clauses(&self) -> &[DefiniteClause] {
        &self.clauses
    }

    /// Iterates over the clauses in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DefiniteClause> {
        self.clauses.iter()
    }

    /// Number of clauses, counting repeats.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// `true` if there are no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Appends a clause.
    pub fn push(&mut self, clause: DefiniteClause) {
        self.clauses.push(clause);
    }

    /// Conclusions of every fact, in knowledge base order.
    pub fn facts(&self) -> impl Iterator<Item = &Symbol> {
        self.iter()
            .filter(|clause| clause.is_fact())
            .map(DefiniteClause::conclusion)
    }

    /// Clauses whose conclusion is `symbol`.
    pub fn clauses_concluding<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> impl Iterator<Item = &'a DefiniteClause> + 'a {
        self.iter().filter(move |clause| clause.conclusion() == symbol)
    }

    /// The same knowledge base in CNF, for use with the resolution prover.
    pub fn to_clause_set(&self) -> ClauseSet {
        self.iter().map(DefiniteClause::to_clause).collect()
    }
}

/// Parses a definite knowledge base, one clause per line.
///
/// # Errors
///
/// See [`DefiniteKnowledgeBase::parse`].
pub fn parse_definite_kb(text: &str) -> Result<DefiniteKnowledgeBase> {
    DefiniteKnowledgeBase::parse(text)
}

impl PartialEq for DefiniteKnowledgeBase {
    fn eq(&self, other: &Self) -> bool {
        let lhs: FxHashSet<&DefiniteClause> = self.clauses.iter().collect();
        let rhs: FxHashSet<&DefiniteClause> = other.clauses.iter().collect();
        lhs == rhs
    }
}

impl Eq for DefiniteKnowledgeBase {}

impl FromStr for DefiniteKnowledgeBase {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DefiniteKnowledgeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.clauses.iter().join("\n"))
    }
}
