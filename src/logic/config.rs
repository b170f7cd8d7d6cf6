//! Limits for the resolution prover.

use crate::logic::error::{LogicError, Result};

/// Resolution settings. The default is unbounded saturation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ResolutionConfig {
    /// Stop with `LogicError::ClauseLimitExceeded` once the working set grows past
    /// this many clauses. Checked between saturation passes.
    pub max_clauses: Option<usize>,

    /// Discard resolvents with more literals than this. Any limit makes the
    /// prover incomplete: it may answer `false` for an entailed query.
    pub max_clause_len: Option<usize>,
}

impl ResolutionConfig {
    /// Sets the working-set limit.
    #[must_use]
    pub const fn with_max_clauses(mut self, limit: usize) -> Self {
        self.max_clauses = Some(limit);
        self
    }

    /// Sets the resolvent length limit.
    #[must_use]
    pub const fn with_max_clause_len(mut self, limit: usize) -> Self {
        self.max_clause_len = Some(limit);
        self
    }

    /// Rejects zero limits, which would stop the prover before it starts.
    ///
    /// # Errors
    ///
    /// `LogicError::InvalidArgument` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.max_clauses == Some(0) {
            return Err(LogicError::InvalidArgument(
                "max_clauses must be at least 1".to_string(),
            ));
        }
        if self.max_clause_len == Some(0) {
            return Err(LogicError::InvalidArgument(
                "max_clause_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// `true` if a resolvent of this length may be kept.
    pub fn admits_len(&self, len: usize) -> bool {
        self.max_clause_len.is_none_or(|limit| len <= limit)
    }
}
