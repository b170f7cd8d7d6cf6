//! Formula text to [`Expr`].
//!
//! The grammar has five connectives with fixed precedence, loosest first:
//! `<=>`, `=>`, `|`, `&`, `!`. Rather than a precedence-climbing parser, a formula
//! is split on its loosest connective that sits outside every parenthesised group:
//!
//! 1. The text is tokenized, remembering each token's byte offset.
//! 2. A first pass over the tokens pairs up parentheses with a stack of open
//!    positions, giving every token its nesting depth.
//! 3. A second pass looks for the connectives in precedence order at depth zero and
//!    splits on the leftmost match, so binary connectives associate to the right.
//!
//! Outer parentheses are peeled off first, but only when the opening one is matched
//! by the very last token; `(A) & (B)` keeps its parentheses.

use crate::logic::error::ParseError;
use crate::logic::expr::{Expr, Operator};
use crate::logic::literal::{Symbol, is_symbol_char};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    Symbol(String),
    Operator(Operator),
    LeftParen,
    RightParen,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol(s) => f.write_str(s),
            Self::Operator(op) => write!(f, "{op}"),
            Self::LeftParen => f.write_str("("),
            Self::RightParen => f.write_str(")"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    kind: TokenKind,
    offset: usize,
}

fn tokenize(text: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        let rest = &text[offset..];
        let (kind, width) = if c.is_whitespace() {
            chars.next();
            continue;
        } else if rest.starts_with("<=>") {
            (TokenKind::Operator(Operator::Equivalence), 3)
        } else if rest.starts_with("=>") {
            (TokenKind::Operator(Operator::Implication), 2)
        } else if c == '|' {
            (TokenKind::Operator(Operator::Disjunction), 1)
        } else if c == '&' {
            (TokenKind::Operator(Operator::Conjunction), 1)
        } else if c == '!' {
            (TokenKind::Operator(Operator::Negation), 1)
        } else if c == '(' {
            (TokenKind::LeftParen, 1)
        } else if c == ')' {
            (TokenKind::RightParen, 1)
        } else if is_symbol_char(c) {
            let len = rest.find(|ch: char| !is_symbol_char(ch)).unwrap_or(rest.len());
            (TokenKind::Symbol(rest[..len].to_string()), len)
        } else {
            return Err(ParseError::UnexpectedCharacter {
                character: c,
                offset,
            });
        };

        tokens.push(Token { kind, offset });
        // Every token consists of single-byte characters.
        for _ in 0..width {
            chars.next();
        }
    }

    Ok(tokens)
}

/// Result of the first pass: the depth of every token and, for each `(`, the index
/// of its matching `)`.
struct Nesting {
    depth: Vec<usize>,
    partner: Vec<Option<usize>>,
}

fn nesting(tokens: &[Token]) -> Result<Nesting, ParseError> {
    let mut depth = Vec::with_capacity(tokens.len());
    let mut partner = vec![None; tokens.len()];
    let mut open: Vec<usize> = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LeftParen => {
                depth.push(open.len());
                open.push(i);
            }
            TokenKind::RightParen => {
                let start = open
                    .pop()
                    .ok_or(ParseError::UnbalancedParenthesis {
                        offset: token.offset,
                    })?;
                partner[start] = Some(i);
                depth.push(open.len());
            }
            _ => depth.push(open.len()),
        }
    }

    if let Some(&start) = open.last() {
        return Err(ParseError::UnbalancedParenthesis {
            offset: tokens[start].offset,
        });
    }

    Ok(Nesting { depth, partner })
}

/// Parses a single formula.
///
/// # Errors
///
/// Returns a [`ParseError`] for empty text, unknown characters, unbalanced
/// parentheses or connectives lacking an operand.
pub fn parse_formula(text: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(text)?;
    // Validate the whole text up front so errors point at the outermost problem.
    nesting(&tokens)?;
    parse_tokens(&tokens)
}

fn parse_tokens(mut tokens: &[Token]) -> Result<Expr, ParseError> {
    let mut nest = nesting(tokens)?;

    while tokens.len() >= 2 && nest.partner[0] == Some(tokens.len() - 1) {
        tokens = &tokens[1..tokens.len() - 1];
        nest = nesting(tokens)?;
    }

    let Some(first) = tokens.first() else {
        return Err(ParseError::EmptyExpression);
    };

    for op in Operator::BINARY_BY_PRECEDENCE {
        let split = tokens
            .iter()
            .zip(&nest.depth)
            .position(|(t, &d)| d == 0 && t.kind == TokenKind::Operator(op));

        if let Some(at) = split {
            let (lhs, rhs) = (&tokens[..at], &tokens[at + 1..]);
            if lhs.is_empty() || rhs.is_empty() {
                return Err(ParseError::MissingOperand {
                    operator: op.symbol(),
                    offset: tokens[at].offset,
                });
            }
            let (a, b) = (parse_tokens(lhs)?, parse_tokens(rhs)?);
            return Ok(match op {
                Operator::Equivalence => Expr::iff(a, b),
                Operator::Implication => Expr::implies(a, b),
                Operator::Disjunction => Expr::or(a, b),
                Operator::Conjunction => Expr::and(a, b),
                Operator::Negation => unreachable!("negation is not a binary connective"),
            });
        }
    }

    match (&first.kind, tokens.len()) {
        (TokenKind::Operator(Operator::Negation), 1) => Err(ParseError::MissingOperand {
            operator: Operator::Negation.symbol(),
            offset: first.offset,
        }),
        (TokenKind::Operator(Operator::Negation), _) => Ok(Expr::not(parse_tokens(&tokens[1..])?)),
        (TokenKind::Symbol(name), 1) => Ok(Expr::var(Symbol::new_unchecked(name.clone()))),
        _ => {
            // Whatever is left over has no connective joining it to the first token.
            let stray = tokens.get(1).unwrap_or(first);
            Err(ParseError::UnexpectedToken {
                token: stray.kind.to_string(),
                offset: stray.offset,
            })
        }
    }
}
