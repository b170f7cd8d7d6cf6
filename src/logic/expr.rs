//! The formula tree produced by the parser.

use crate::logic::clause::Assignment;
use crate::logic::literal::Symbol;
use std::collections::BTreeSet;
use std::fmt;

/// The five connectives, ordered from the loosest-binding to the tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    /// `<=>`
    Equivalence,
    /// `=>`
    Implication,
    /// `|`
    Disjunction,
    /// `&`
    Conjunction,
    /// `!`
    Negation,
}

impl Operator {
    /// Binary connectives in the order the parser looks for them at the top level.
    pub const BINARY_BY_PRECEDENCE: [Self; 4] = [
        Self::Equivalence,
        Self::Implication,
        Self::Disjunction,
        Self::Conjunction,
    ];

    /// The operator as it is written in formula text.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equivalence => "<=>",
            Self::Implication => "=>",
            Self::Disjunction => "|",
            Self::Conjunction => "&",
            Self::Negation => "!",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A propositional formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Expr {
    /// A bare symbol.
    Var(Symbol),
    /// `!a`
    Not(Box<Expr>),
    /// `a & b`
    And(Box<Expr>, Box<Expr>),
    /// `a | b`
    Or(Box<Expr>, Box<Expr>),
    /// `a => b`
    Implies(Box<Expr>, Box<Expr>),
    /// `a <=> b`
    Iff(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Builds [`Expr::Var`].
    pub const fn var(symbol: Symbol) -> Self {
        Self::Var(symbol)
    }

    /// Builds [`Expr::Not`].
    #[allow(clippy::should_implement_trait)]
    pub fn not(e: Self) -> Self {
        Self::Not(Box::new(e))
    }

    /// Builds [`Expr::And`].
    pub fn and(a: Self, b: Self) -> Self {
        Self::And(Box::new(a), Box::new(b))
    }

    /// Builds [`Expr::Or`].
    pub fn or(a: Self, b: Self) -> Self {
        Self::Or(Box::new(a), Box::new(b))
    }

    /// Builds [`Expr::Implies`].
    pub fn implies(a: Self, b: Self) -> Self {
        Self::Implies(Box::new(a), Box::new(b))
    }

    /// Builds [`Expr::Iff`].
    pub fn iff(a: Self, b: Self) -> Self {
        Self::Iff(Box::new(a), Box::new(b))
    }

    /// The root connective, or `None` for a bare symbol.
    pub const fn operator(&self) -> Option<Operator> {
        match self {
            Self::Var(_) => None,
            Self::Not(_) => Some(Operator::Negation),
            Self::And(..) => Some(Operator::Conjunction),
            Self::Or(..) => Some(Operator::Disjunction),
            Self::Implies(..) => Some(Operator::Implication),
            Self::Iff(..) => Some(Operator::Equivalence),
        }
    }

    /// Every symbol mentioned in the formula, sorted.
    pub fn symbols(&self) -> BTreeSet<Symbol> {
        let mut symbols = BTreeSet::new();
        self.collect_symbols(&mut symbols);
        symbols
    }

    fn collect_symbols(&self, out: &mut BTreeSet<Symbol>) {
        match self {
            Self::Var(s) => {
                out.insert(s.clone());
            }
            Self::Not(e) => e.collect_symbols(out),
            Self::And(a, b) | Self::Or(a, b) | Self::Implies(a, b) | Self::Iff(a, b) => {
                a.collect_symbols(out);
                b.collect_symbols(out);
            }
        }
    }

    /// Truth value of the formula; unassigned symbols are false.
    pub fn evaluate(&self, assignment: &Assignment) -> bool {
        match self {
            Self::Var(s) => assignment.get(s).copied().unwrap_or(false),
            Self::Not(e) => !e.evaluate(assignment),
            Self::And(a, b) => a.evaluate(assignment) && b.evaluate(assignment),
            Self::Or(a, b) => a.evaluate(assignment) || b.evaluate(assignment),
            Self::Implies(a, b) => !a.evaluate(assignment) || b.evaluate(assignment),
            Self::Iff(a, b) => a.evaluate(assignment) == b.evaluate(assignment),
        }
    }
}

/// Prints every compound subformula in parentheses, so the output re-parses to the same tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(s) => write!(f, "{s}"),
            Self::Not(e) => match **e {
                Self::Var(_) | Self::Not(_) => write!(f, "!{e}"),
                _ => write!(f, "!({e})"),
            },
            Self::And(a, b) | Self::Or(a, b) | Self::Implies(a, b) | Self::Iff(a, b) => {
                let op = self.operator().map_or("", Operator::symbol);
                write_operand(f, a)?;
                write!(f, " {op} ")?;
                write_operand(f, b)
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, e: &Expr) -> fmt::Result {
    match e {
        Expr::Var(_) | Expr::Not(_) => write!(f, "{e}"),
        _ => write!(f, "({e})"),
    }
}
