//! Forward and backward chaining over definite clauses.
//!
//! Both procedures are sound and complete for definite knowledge bases, so they
//! agree on every query; they differ only in direction. Forward chaining derives
//! everything that follows from the facts until the query shows up. Backward
//! chaining starts from the query and looks for clauses concluding it.
//!
//! A query that is not a bare symbol (for instance `!Q`) can never be the
//! conclusion of a definite clause and is answered with `false`.

use crate::logic::definite::DefiniteKnowledgeBase;
use crate::logic::literal::Symbol;
use clap::ValueEnum;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use std::fmt::{Debug, Display};

/// An entailment procedure for definite knowledge bases.
pub trait Chaining: Debug {
    /// `true` if `kb` entails the symbol named by `query`.
    fn entails(&self, kb: &DefiniteKnowledgeBase, query: &str) -> bool;
}

fn query_symbol(query: &str) -> Option<Symbol> {
    let symbol = Symbol::new(query.trim()).ok();
    if symbol.is_none() {
        log::debug!("Query '{query}' is not a symbol; not entailed by definite clauses");
    }
    symbol
}

/// Agenda-based fixpoint from the facts towards the query.
///
/// Each clause keeps a count of premises not yet known to be true. Whenever a
/// symbol is inferred, the counts of the clauses using it drop by one; a clause
/// reaching zero adds its conclusion to the agenda. Linear in the total number of
/// premise occurrences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForwardChaining;

impl Chaining for ForwardChaining {
    fn entails(&self, kb: &DefiniteKnowledgeBase, query: &str) -> bool {
        let Some(query) = query_symbol(query) else {
            return false;
        };

        let mut remaining: Vec<usize> = kb.iter().map(|clause| clause.premises().len()).collect();
        let mut uses: FxHashMap<&Symbol, Vec<usize>> = FxHashMap::default();
        for (idx, clause) in kb.iter().enumerate() {
            for premise in clause.premises() {
                uses.entry(premise).or_default().push(idx);
            }
        }

        let mut agenda: VecDeque<&Symbol> = kb.facts().collect();
        let mut inferred: FxHashSet<&Symbol> = FxHashSet::default();

        while let Some(symbol) = agenda.pop_front() {
            log::trace!("Agenda: {symbol}");
            if *symbol == query {
                log::debug!("Forward chaining proved {query} after inferring {} symbols", inferred.len());
                return true;
            }

            if !inferred.insert(symbol) {
                continue;
            }

            for &idx in uses.get(symbol).into_iter().flatten() {
                remaining[idx] -= 1;
                if remaining[idx] == 0 {
                    agenda.push_back(kb.clauses()[idx].conclusion());
                }
            }
        }

        log::debug!("Forward chaining saturated with {} symbols; {query} not entailed", inferred.len());
        false
    }
}

/// Goal-directed AND/OR search from the query back to the facts.
///
/// The symbols on the current proof path are tracked; a premise that is already
/// being proved further up the path counts as unproven on that branch, which cuts
/// cycles such as `P => L`, `L => P`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackwardChaining;

impl BackwardChaining {
    fn prove<'a>(
        kb: &'a DefiniteKnowledgeBase,
        goal: &'a Symbol,
        facts: &FxHashSet<&Symbol>,
        path: &mut FxHashSet<&'a Symbol>,
    ) -> bool {
        if facts.contains(goal) {
            return true;
        }

        path.insert(goal);
        let proved = kb.clauses_concluding(goal).any(|clause| {
            clause
                .premises()
                .iter()
                .all(|premise| !path.contains(premise) && Self::prove(kb, premise, facts, path))
        });
        path.remove(goal);

        log::trace!("Goal {goal}: {proved}");
        proved
    }
}

impl Chaining for BackwardChaining {
    fn entails(&self, kb: &DefiniteKnowledgeBase, query: &str) -> bool {
        let Some(query) = query_symbol(query) else {
            return false;
        };

        let facts: FxHashSet<&Symbol> = kb.facts().collect();
        let mut path = FxHashSet::default();
        let proved = Self::prove(kb, &query, &facts, &mut path);

        log::debug!("Backward chaining: {query} entailed = {proved}");
        proved
    }
}

/// Selects a chaining procedure, e.g. from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, Default, ValueEnum)]
pub enum ChainingStrategy {
    /// Data-driven, from the facts.
    #[default]
    Forward,
    /// Goal-driven, from the query.
    Backward,
}

impl Display for ChainingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "forward"),
            Self::Backward => write!(f, "backward"),
        }
    }
}

impl ChainingStrategy {
    /// Converts the `ChainingStrategy` to its implementation.
    pub fn to_impl(self) -> Box<dyn Chaining> {
        match self {
            Self::Forward => Box::new(ForwardChaining),
            Self::Backward => Box::new(BackwardChaining),
        }
    }
}

/// Forward chaining entailment check.
pub fn forward_chain(kb: &DefiniteKnowledgeBase, query: &str) -> bool {
    ForwardChaining.entails(kb, query)
}

/// Backward chaining entailment check.
pub fn backward_chain(kb: &DefiniteKnowledgeBase, query: &str) -> bool {
    BackwardChaining.entails(kb, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMPLICATIONS: &str = "A
        B
        L & M => P
        B & L => M
        A & P => L
        A & B => L
        P => Q
    ";

    fn kb() -> DefiniteKnowledgeBase {
        IMPLICATIONS.parse().unwrap()
    }

    #[test]
    fn test_fc_sample() {
        let kb = kb();
        assert!(forward_chain(&kb, "Q"));
        assert!(!forward_chain(&kb, "!Q"));
    }

    #[test]
    fn test_bc_sample() {
        let kb = kb();
        assert!(backward_chain(&kb, "Q"));
        assert!(!backward_chain(&kb, "!Q"));
    }

    #[test]
    fn test_failure() {
        let kb = kb();
        assert!(!backward_chain(&kb, "T"));
        assert!(!forward_chain(&kb, "T"));
    }

    #[test]
    fn test_strategies_agree() {
        let kb = kb();
        for query in ["A", "B", "L", "M", "P", "Q", "T", "!A", "A & B", ""] {
            let forward = ChainingStrategy::Forward.to_impl().entails(&kb, query);
            let backward = ChainingStrategy::Backward.to_impl().entails(&kb, query);
            assert_eq!(forward, backward, "{query}");
        }
    }

    #[test]
    fn test_cycle_without_support() {
        let kb: DefiniteKnowledgeBase = "P => L\nL => P\nA".parse().unwrap();
        assert!(!backward_chain(&kb, "P"));
        assert!(!forward_chain(&kb, "P"));
        assert!(backward_chain(&kb, "A"));
    }

    #[test]
    fn test_cycle_with_support() {
        let kb: DefiniteKnowledgeBase = "P => L\nL => P\nA => L\nA".parse().unwrap();
        assert!(backward_chain(&kb, "P"));
        assert!(forward_chain(&kb, "P"));
    }

    #[test]
    fn test_empty_kb() {
        let kb = DefiniteKnowledgeBase::default();
        assert!(!forward_chain(&kb, "A"));
        assert!(!backward_chain(&kb, "A"));
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(ChainingStrategy::default().to_string(), "forward");
        assert_eq!(
            ChainingStrategy::from_str("backward", true).unwrap(),
            ChainingStrategy::Backward
        );
    }
}
