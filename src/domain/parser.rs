//! Recursive-descent parser for the canonical tree text form.
//!
//! Grammar, informally:
//!
//! ```text
//! tree  := value [ "(" child+ ")" ]
//! child := value | value "(" child+ ")"
//! ```
//!
//! A bare value inside a block is only known to be a leaf once the token
//! after it has been read and found not to be `(`. Each block therefore
//! carries one pending value and commits it when the following token arrives.

use std::str::FromStr;

use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tokenizer::{Token, Tokenizer};
use crate::domain::tree::Tree;

/// Deepest accepted nesting of `(` blocks.
pub const MAX_DEPTH: usize = 1000;

/// Builds a `Tree<String>` from its canonical text form.
///
/// # Errors
/// - `UnexpectedToken` for a parenthesis where a value is required, or for
///   anything left over after the top-level tree
/// - `UnexpectedEnd` for empty input or input that stops inside a block
/// - `TooDeep` for blocks nested more than [`MAX_DEPTH`] levels
#[instrument(level = "debug")]
pub fn parse(input: &str) -> DomainResult<Tree<String>> {
    let mut tokenizer = Tokenizer::new(input);

    let root = expect_value(tokenizer.next())?;
    if !tokenizer.has_next() {
        debug!("single leaf: {}", root);
        return Ok(Tree::new(root.to_string()));
    }

    let tree = parse_block(&mut tokenizer, root, 1)?;

    if let Some(extra) = tokenizer.next() {
        return Err(DomainError::UnexpectedToken(extra.to_string()));
    }
    Ok(tree)
}

/// Parses the children block of `root`. The opening `(` is consumed here;
/// a non-parenthesis token in its place is taken as the first child.
fn parse_block<'a>(
    tokenizer: &mut Tokenizer<'a>,
    root: &'a str,
    depth: usize,
) -> DomainResult<Tree<String>> {
    if depth > MAX_DEPTH {
        debug!("nesting limit reached at {}", root);
        return Err(DomainError::TooDeep { limit: MAX_DEPTH });
    }
    trace!("block for {} at depth {}", root, depth);
    let mut tree = Tree::new(root.to_string());

    let first = match tokenizer.next() {
        Some(Token::Open) => tokenizer.next(),
        other => other,
    };
    let mut pending = Some(expect_value(first)?);

    loop {
        match tokenizer.next() {
            None => return Err(DomainError::UnexpectedEnd),
            Some(Token::Close) => {
                if let Some(value) = pending.take() {
                    tree.append_child(Tree::new(value.to_string()));
                }
                return Ok(tree);
            }
            Some(Token::Open) => {
                // `(` right after a finished subtree has no value to attach to
                let value = pending
                    .take()
                    .ok_or_else(|| DomainError::UnexpectedToken(Token::Open.to_string()))?;
                tokenizer.push_back(Token::Open);
                let subtree = parse_block(tokenizer, value, depth + 1)?;
                tree.append_child(subtree);
            }
            Some(Token::Value(next)) => {
                if let Some(value) = pending.replace(next) {
                    tree.append_child(Tree::new(value.to_string()));
                }
            }
        }
    }
}

fn expect_value(token: Option<Token<'_>>) -> DomainResult<&str> {
    match token {
        Some(Token::Value(text)) => Ok(text),
        Some(other) => Err(DomainError::UnexpectedToken(other.to_string())),
        None => Err(DomainError::UnexpectedEnd),
    }
}

impl Tree<String> {
    /// Parses the canonical text form; see [`parse`].
    pub fn parse(input: &str) -> DomainResult<Self> {
        parse(input)
    }
}

impl FromStr for Tree<String> {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
