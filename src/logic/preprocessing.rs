//! Clause-set simplifications that preserve logical equivalence.
//!
//! Every [`ClauseSet`](crate::logic::cnf::ClauseSet) is run through
//! [`normalize`]: tautologies are dropped, then duplicate and subsumed clauses.

use crate::logic::clause::Clause;

/// A transformation of a clause list into an equivalent one.
pub trait Preprocessor {
    /// Returns the simplified clauses.
    fn preprocess(&self, clauses: Vec<Clause>) -> Vec<Clause>;
}

/// Removes clauses containing a literal and its complement.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct TautologyElimination;

impl Preprocessor for TautologyElimination {
    fn preprocess(&self, mut clauses: Vec<Clause>) -> Vec<Clause> {
        clauses.retain(|clause| !clause.is_tautology());
        clauses
    }
}

/// Removes duplicates and every clause that has a proper subset in the set.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct SubsumptionElimination;

impl Preprocessor for SubsumptionElimination {
    fn preprocess(&self, mut clauses: Vec<Clause>) -> Vec<Clause> {
        // Shorter clauses first: a clause can only be subsumed by one no longer than itself.
        clauses.sort_unstable_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        clauses.dedup();

        let mut kept: Vec<Clause> = Vec::with_capacity(clauses.len());
        for clause in clauses {
            if !kept.iter().any(|k| k.subsumes(&clause)) {
                kept.push(clause);
            }
        }
        kept
    }
}

/// Tautology then subsumption elimination, with the survivors in sorted order.
pub fn normalize(clauses: Vec<Clause>) -> Vec<Clause> {
    let mut clauses =
        SubsumptionElimination.preprocess(TautologyElimination.preprocess(clauses));
    clauses.sort_unstable();
    clauses
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clauses(texts: &[&str]) -> Vec<Clause> {
        texts.iter().map(|t| t.parse().unwrap()).collect()
    }

    #[test]
    fn test_tautology_elimination() {
        let result = TautologyElimination.preprocess(clauses(&["A | !A", "B", "!C | C | D"]));
        assert_eq!(result, clauses(&["B"]));
    }

    #[test]
    fn test_subsumption_elimination() {
        let result = SubsumptionElimination.preprocess(clauses(&["A | B", "A"]));
        assert_eq!(result, clauses(&["A"]));

        let result = SubsumptionElimination.preprocess(clauses(&["A | B", "B | A", "C"]));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_normalize_keeps_incomparable_clauses() {
        let result = normalize(clauses(&["B | C", "A | B", "A | B | C", "A | !A"]));
        assert_eq!(result, clauses(&["A | B", "B | C"]));
    }
}
