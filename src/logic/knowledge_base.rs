//! A CNF knowledge base that answers queries by resolution.

use crate::logic::cnf::{ClauseSet, parse_cnf_kb, parse_cnf_sentence};
use crate::logic::config::ResolutionConfig;
use crate::logic::error::{LogicError, Result};
use crate::logic::resolution::resolution_entails_with;
use std::fmt;
use std::str::FromStr;

/// Clauses accumulated from `tell`, queried with `ask`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    clauses: ClauseSet,
    config: ResolutionConfig,
}

impl KnowledgeBase {
    /// Parses one formula per line.
    ///
    /// # Errors
    ///
    /// `LogicError::Parse` for a malformed line.
    pub fn new(text: &str) -> Result<Self> {
        Self::with_config(text, ResolutionConfig::default())
    }

    /// Like [`KnowledgeBase::new`], with resolution limits applied to every `ask`.
    ///
    /// # Errors
    ///
    /// `LogicError::InvalidArgument` for an invalid config, `LogicError::Parse`
    /// for a malformed line.
    pub fn with_config(text: &str, config: ResolutionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            clauses: parse_cnf_kb(text)?,
            config,
        })
    }

    /// Adds a formula.
    ///
    /// # Errors
    ///
    /// `LogicError::Parse` if the formula is malformed; the knowledge base is left
    /// unchanged.
    pub fn tell(&mut self, formula: &str) -> Result<()> {
        let added = parse_cnf_sentence(formula)?;
        self.clauses = self.clauses.union(&added);
        Ok(())
    }

    /// `true` if the knowledge base entails `query`.
    ///
    /// # Errors
    ///
    /// See [`resolution_entails_with`].
    pub fn ask(&self, query: &str) -> Result<bool> {
        resolution_entails_with(&self.clauses, query, self.config)
    }

    /// Everything told so far, in CNF.
    pub const fn clauses(&self) -> &ClauseSet {
        &self.clauses
    }

    /// Limits applied by [`KnowledgeBase::ask`].
    pub const fn config(&self) -> &ResolutionConfig {
        &self.config
    }
}

impl FromStr for KnowledgeBase {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for KnowledgeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.clauses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WUMPUS_WORLD: &str = "!Breeze_0
        WumpusAlive_0
        !Stench_0
        L11_0
        !P11
        !W11
        B11 <=> (P12 | P21)
        S11 <=> (W21 | W12)
        L11_0 => (Stench_0 <=> S11)
        L11_0 => (Breeze_0 <=> B11)
        OK12_0 <=> !P12 & (!W12 | !WumpusAlive_0)
    ";

    #[test]
    fn test_prover_truth() {
        let kb: KnowledgeBase = "(B11 <=> (P12 | P21)) & !B11".parse().unwrap();
        assert!(kb.ask("!P12").unwrap());
        assert!(!kb.ask("P12").unwrap());
    }

    #[test]
    fn test_wumpus_sample_kb() {
        let kb = KnowledgeBase::new(WUMPUS_WORLD).unwrap();
        assert!(kb.ask("OK12_0").unwrap());
        assert!(!kb.ask("!OK12_0").unwrap());
    }

    #[test]
    fn test_wumpus_sample_kb_with_clause_length_limit() {
        let config = ResolutionConfig::default().with_max_clause_len(3);
        let kb = KnowledgeBase::with_config(WUMPUS_WORLD, config).unwrap();
        assert_eq!(kb.config().max_clause_len, Some(3));
        assert!(kb.ask("OK12_0").unwrap());
        assert!(!kb.ask("!OK12_0").unwrap());
    }

    #[test]
    fn test_tell() {
        let mut kb = KnowledgeBase::new("A => B").unwrap();
        assert!(!kb.ask("B").unwrap());
        kb.tell("A").unwrap();
        assert!(kb.ask("B").unwrap());
        assert_eq!(kb.to_string(), "(!A | B) & (A)");

        assert!(kb.tell("A &").is_err());
        assert_eq!(kb.clauses().len(), 2);
    }

    #[test]
    fn test_invalid_config() {
        let config = ResolutionConfig::default().with_max_clauses(0);
        assert!(matches!(
            KnowledgeBase::with_config("A", config),
            Err(LogicError::InvalidArgument(_))
        ));
    }
}
