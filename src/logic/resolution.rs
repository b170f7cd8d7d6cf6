//! Refutation by resolution over arbitrary clause sets.
//!
//! To decide whether `kb` entails `query`, the clauses of `!query` are added to
//! `kb` and pairs of clauses are resolved until either the empty clause appears
//! (the premises are contradictory, so the query is entailed) or a whole pass adds
//! nothing new (the set is saturated, so it is not).
//!
//! Saturation proceeds in passes. Pass `n` resolves every pair that involves at
//! least one clause added in pass `n - 1`; older pairs were resolved before. The
//! answer therefore does not depend on the order in which pairs are visited.

use crate::logic::clause::Clause;
use crate::logic::cnf::{ClauseSet, to_cnf};
use crate::logic::config::ResolutionConfig;
use crate::logic::error::{LogicError, Result};
use crate::logic::expr::Expr;
use crate::logic::parser::parse_formula;
use rustc_hash::FxHashSet;

/// Outcome of a single saturation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The empty clause was derived.
    Refuted,
    /// The pass added this many clauses.
    Extended(usize),
    /// The pass added nothing.
    Saturated,
}

/// Stepwise resolution prover.
///
/// [`Resolution::run`] drives the passes to a verdict. Callers that want their own
/// stopping rule can call [`Resolution::step`] and inspect
/// [`Resolution::clause_count`] in between.
#[derive(Debug, Clone)]
pub struct Resolution {
    clauses: Vec<Clause>,
    seen: FxHashSet<Clause>,
    /// Index of the first clause added by the previous pass.
    frontier: usize,
    passes: usize,
    config: ResolutionConfig,
    refuted: bool,
}

impl Resolution {
    /// Sets up the refutation of `kb & !query`.
    ///
    /// # Errors
    ///
    /// `LogicError::InvalidArgument` if the configuration is invalid.
    pub fn new(kb: &ClauseSet, query: &Expr, config: ResolutionConfig) -> Result<Self> {
        config.validate()?;
        let negated = to_cnf(&Expr::not(query.clone()));
        let working = kb.union(&negated);

        log::debug!(
            "Resolution: {} knowledge base clauses, {} from the negated query",
            kb.len(),
            negated.len()
        );

        let clauses: Vec<Clause> = working.clauses().to_vec();
        let refuted = clauses.iter().any(Clause::is_empty);
        Ok(Self {
            seen: clauses.iter().cloned().collect(),
            clauses,
            frontier: 0,
            passes: 0,
            config,
            refuted,
        })
    }

    /// Current size of the working clause set.
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    /// Number of passes run so far.
    pub const fn passes(&self) -> usize {
        self.passes
    }

    /// The working clause set, in the order clauses were added.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Runs one saturation pass.
    pub fn step(&mut self) -> Step {
        if self.refuted {
            return Step::Refuted;
        }

        self.passes += 1;
        let end = self.clauses.len();
        let mut added: Vec<Clause> = Vec::new();

        for j in self.frontier..end {
            for i in 0..j {
                let (a, b) = (&self.clauses[i], &self.clauses[j]);
                for resolvent in a.resolvents_with(b) {
                    if resolvent.is_empty() {
                        log::debug!("Empty clause from ({a}) and ({b}) in pass {}", self.passes);
                        self.refuted = true;
                        return Step::Refuted;
                    }
                    if resolvent.is_tautology()
                        || !self.config.admits_len(resolvent.len())
                        || self.seen.contains(&resolvent)
                    {
                        continue;
                    }
                    let subsumed = self
                        .clauses
                        .iter()
                        .chain(added.iter())
                        .any(|existing| existing.subsumes(&resolvent));
                    if subsumed {
                        continue;
                    }

                    log::trace!("({a}) + ({b}) => ({resolvent})");
                    self.seen.insert(resolvent.clone());
                    added.push(resolvent);
                }
            }
        }

        self.frontier = end;
        if added.is_empty() {
            log::debug!("Saturated after {} passes with {end} clauses", self.passes);
            return Step::Saturated;
        }

        let count = added.len();
        self.clauses.extend(added);
        log::trace!("Pass {} added {count} clauses", self.passes);
        Step::Extended(count)
    }

    /// Saturates until a verdict: `true` if the query is entailed.
    ///
    /// # Errors
    ///
    /// `LogicError::ClauseLimitExceeded` if `max_clauses` is set and the working
    /// set exceeds it before a pass, including the first.
    pub fn run(&mut self) -> Result<bool> {
        loop {
            if !self.refuted {
                self.check_clause_limit()?;
            }
            match self.step() {
                Step::Refuted => return Ok(true),
                Step::Saturated => return Ok(false),
                Step::Extended(_) => {}
            }
        }
    }

    fn check_clause_limit(&self) -> Result<()> {
        match self.config.max_clauses {
            Some(limit) if self.clause_count() > limit => Err(LogicError::ClauseLimitExceeded {
                limit,
                clauses: self.clause_count(),
            }),
            _ => Ok(()),
        }
    }
}

/// Decides `kb |= query` with the given limits.
///
/// # Errors
///
/// `LogicError::Parse` for a malformed query, `LogicError::InvalidArgument` for an
/// empty query or invalid config, `LogicError::ClauseLimitExceeded` if the limit is
/// reached.
pub fn resolution_entails_with(
    kb: &ClauseSet,
    query: &str,
    config: ResolutionConfig,
) -> Result<bool> {
    if query.trim().is_empty() {
        return Err(LogicError::InvalidArgument("empty query".to_string()));
    }
    let query = parse_formula(query)?;
    Resolution::new(kb, &query, config)?.run()
}

/// Decides `kb |= query` by unbounded refutation resolution.
///
/// # Errors
///
/// See [`resolution_entails_with`].
pub fn resolution_entails(kb: &ClauseSet, query: &str) -> Result<bool> {
    resolution_entails_with(kb, query, ResolutionConfig::default())
}
