//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors cover everything the tree and expression core can reject.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unexpected token: {0}")]
    UnexpectedToken(String),

    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("nesting deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("invalid expression: {0}")]
    InvalidExpression(String),

    #[error("index {index} out of range for node with {len} children")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow")]
    Overflow,
}

impl DomainError {
    /// True for errors raised while tokenizing or parsing tree text.
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            DomainError::UnexpectedToken(_)
                | DomainError::UnexpectedEnd
                | DomainError::TooDeep { .. }
        )
    }

    /// True for errors raised while evaluating a valid expression.
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, DomainError::DivisionByZero | DomainError::Overflow)
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
