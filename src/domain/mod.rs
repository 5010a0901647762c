//! Domain layer: trees, their text form, and expressions built on them
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod expression;
pub mod parser;
pub mod tokenizer;
pub mod tree;

pub use error::{DomainError, DomainResult};
pub use expression::{Expression, Operator};
pub use parser::{parse, MAX_DEPTH};
pub use tokenizer::{tokenize, Token, Tokenizer};
pub use tree::{Tree, TreeIterator};
