//! Lexical analysis for the canonical tree text form.
//!
//! Input is split into `(`, `)` and maximal runs of characters that are
//! neither whitespace nor parentheses. Whitespace means space, tab, newline,
//! carriage return and form feed only. The whole input is lexed up front;
//! the parser then walks the token list with one token of pushback.

use std::fmt;

/// A single lexical token borrowed from the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Open,
    Close,
    Value(&'a str),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Open => write!(f, "("),
            Token::Close => write!(f, ")"),
            Token::Value(text) => write!(f, "{}", text),
        }
    }
}

fn is_delimiter(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c' | '(' | ')')
}

/// Lex the input into a flat vector of tokens. Whitespace is dropped.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in input.char_indices() {
        if is_delimiter(c) {
            if let Some(s) = start.take() {
                tokens.push(Token::Value(&input[s..i]));
            }
            match c {
                '(' => tokens.push(Token::Open),
                ')' => tokens.push(Token::Close),
                _ => {}
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(Token::Value(&input[s..]));
    }

    tokens
}

/// Token stream with a single pushback slot.
///
/// `next` returns `None` once the input is exhausted instead of failing, so
/// callers can look ahead past the end without special casing.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    pushed: Option<Token<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            tokens: tokenize(input),
            pos: 0,
            pushed: None,
        }
    }

    /// True if a pushed-back token is waiting or more input remains.
    pub fn has_next(&self) -> bool {
        self.pushed.is_some() || self.pos < self.tokens.len()
    }

    /// Return a token so that the next call to `next` yields it again.
    ///
    /// Only one token is kept: a second push back before reading replaces
    /// the first.
    pub fn push_back(&mut self, token: Token<'a>) {
        self.pushed = Some(token);
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pushed.take() {
            return Some(token);
        }
        let token = self.tokens.get(self.pos).copied()?;
        self.pos += 1;
        Some(token)
    }
}
