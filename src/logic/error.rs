//! Error types shared by the parser, the clause builders and the provers.
//!
//! Parsing failures are reported as [`ParseError`]; everything that can go wrong
//! above the level of a single formula is a [`LogicError`]. A query that simply is
//! not entailed is never an error: the inference procedures return `false`.

/// Failures raised while tokenizing or parsing formula text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The text (or a parenthesised group inside it) contains no tokens.
    #[error("Empty expression")]
    EmptyExpression,

    /// A character that is neither part of a symbol, an operator nor a parenthesis.
    #[error("Unexpected character '{character}' at offset {offset}")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Byte offset into the parsed text.
        offset: usize,
    },

    /// A parenthesis without a partner.
    #[error("Unbalanced parenthesis at offset {offset}")]
    UnbalancedParenthesis {
        /// Byte offset of the unmatched parenthesis.
        offset: usize,
    },

    /// A binary operator with nothing on one of its sides, or a dangling `!`.
    #[error("Operator '{operator}' at offset {offset} is missing an operand")]
    MissingOperand {
        /// Textual form of the operator.
        operator: &'static str,
        /// Byte offset of the operator.
        offset: usize,
    },

    /// Tokens that do not form a formula, e.g. two symbols side by side.
    #[error("Unexpected token '{token}' at offset {offset}")]
    UnexpectedToken {
        /// Text of the first token that could not be placed.
        token: String,
        /// Byte offset of that token.
        offset: usize,
    },

    /// A symbol built programmatically from text that is not `[A-Za-z0-9_]+`.
    #[error("Invalid symbol '{0}'")]
    InvalidSymbol(String),

    /// Text read as a clause that is a well-formed formula but not a disjunction of literals.
    #[error("'{0}' is not a disjunction of literals")]
    NotAClause(String),
}

/// Errors produced by knowledge base construction and inference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogicError {
    /// Malformed formula text.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A definite-clause line that does not have exactly one positive literal.
    #[error("Line {line} is not a definite clause: {reason}")]
    InvalidClause {
        /// 1-based line number in the knowledge base text.
        line: usize,
        /// Why the line was rejected.
        reason: String,
    },

    /// An argument outside the domain of the operation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Resolution grew the working clause set beyond the caller's limit.
    #[error("Resolution stopped after reaching {clauses} clauses (limit {limit})")]
    ClauseLimitExceeded {
        /// The configured maximum.
        limit: usize,
        /// Size of the working set when the limit was hit.
        clauses: usize,
    },
}

/// Result alias used across the `logic` module.
pub type Result<T> = std::result::Result<T, LogicError>;
