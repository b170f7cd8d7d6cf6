#![deny(missing_docs)]
//! This crate provides a propositional logic reasoning engine: a formula parser, conversion to
//! conjunctive normal form, and entailment checking by forward chaining, backward chaining and
//! resolution.

/// The `logic` module implements formulas, clauses and the inference procedures over them.
pub mod logic;
