#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod chaining;
pub mod clause;
pub mod cnf;
pub mod config;
pub mod definite;
pub mod error;
pub mod expr;
pub mod knowledge_base;
pub mod literal;
pub mod parser;
pub mod preprocessing;
pub mod resolution;

pub use chaining::{BackwardChaining, Chaining, ChainingStrategy, ForwardChaining, backward_chain, forward_chain};
pub use clause::{Assignment, Clause};
pub use cnf::{ClauseSet, parse_cnf_kb, parse_cnf_sentence, to_cnf};
pub use config::ResolutionConfig;
pub use definite::{DefiniteClause, DefiniteKnowledgeBase, parse_definite_kb};
pub use error::{LogicError, ParseError, Result};
pub use expr::{Expr, Operator};
pub use knowledge_base::KnowledgeBase;
pub use literal::{Literal, Symbol};
pub use parser::parse_formula;
pub use resolution::{Resolution, Step, resolution_entails, resolution_entails_with};
