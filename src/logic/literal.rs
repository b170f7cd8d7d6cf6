#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Propositional symbols and literals.
//!
//! A [`Symbol`] is an opaque name; its text is preserved exactly as written so it
//! round-trips through parsing and printing. A [`Literal`] pairs a symbol with a
//! polarity.

use crate::logic::error::ParseError;
use core::ops::Not;
use std::fmt;
use std::str::FromStr;

/// The textual prefix marking a negated literal.
pub const NEGATION: char = '!';

/// Returns `true` if `c` may appear inside a symbol name.
#[must_use]
pub const fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// A propositional variable name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a symbol, checking that `name` is a non-empty run of `[A-Za-z0-9_]`.
    ///
    /// # Errors
    ///
    /// `ParseError::InvalidSymbol` if the name is empty or contains other characters.
    pub fn new(name: impl Into<String>) -> Result<Self, ParseError> {
        let name = name.into();
        if name.is_empty() || !name.chars().all(is_symbol_char) {
            return Err(ParseError::InvalidSymbol(name));
        }
        Ok(Self(name))
    }

    /// Used by the tokenizer, which has already checked the characters.
    pub(crate) const fn new_unchecked(name: String) -> Self {
        Self(name)
    }

    /// The symbol's name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}

/// A symbol together with a polarity.
///
/// Ordering is by symbol first, then negative before positive, so a sorted clause
/// prints as `!A | A | B`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    symbol: Symbol,
    polarity: bool,
}

impl Literal {
    /// Creates a literal; `polarity == false` means negated.
    #[must_use]
    pub const fn new(symbol: Symbol, polarity: bool) -> Self {
        Self { symbol, polarity }
    }

    /// Shorthand for a positive literal.
    #[must_use]
    pub const fn positive(symbol: Symbol) -> Self {
        Self::new(symbol, true)
    }

    /// Shorthand for a negated literal.
    #[must_use]
    pub const fn negative(symbol: Symbol) -> Self {
        Self::new(symbol, false)
    }

    /// The underlying symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// `true` for a positive literal.
    #[must_use]
    pub const fn polarity(&self) -> bool {
        self.polarity
    }

    /// `true` for a negated literal.
    #[must_use]
    pub const fn is_negated(&self) -> bool {
        !self.polarity
    }

    /// The same symbol with the opposite polarity.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            symbol: self.symbol.clone(),
            polarity: !self.polarity,
        }
    }

    /// Two literals are complementary if they share a symbol and differ in polarity.
    #[must_use]
    pub fn is_complement_of(&self, other: &Self) -> bool {
        self.polarity != other.polarity && self.symbol == other.symbol
    }

    /// Truth value under an assignment of the symbol.
    #[must_use]
    pub const fn evaluate(&self, value: bool) -> bool {
        value == self.polarity
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self {
            symbol: self.symbol,
            polarity: !self.polarity,
        }
    }
}

impl Not for &Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.polarity {
            write!(f, "{}", self.symbol)
        } else {
            write!(f, "{NEGATION}{}", self.symbol)
        }
    }
}

impl FromStr for Literal {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        s.strip_prefix(NEGATION).map_or_else(
            || Ok(Self::positive(s.parse()?)),
            |rest| Ok(Self::negative(rest.parse()?)),
        )
    }
}
