//! Ordered n-ary trees with a canonical one-line text form, and a prefix
//! arithmetic evaluator built on them.
//!
//! ```
//! use arbor::domain::{Expression, Tree};
//!
//! let tree = Tree::parse("+ (5 10 -( *(15 20) 25) 30)").unwrap();
//! assert_eq!(tree.to_string(), "+ (5 10 - (* (15 20) 25) 30)");
//!
//! let expr = Expression::new("+ (5 10 -( *(15 20) 25) 30)").unwrap();
//! assert_eq!(expr.evaluate().unwrap(), 320);
//! assert_eq!(expr.to_string(), "(5 + 10 + ((15 * 20) - 25) + 30)");
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;

pub use domain::{DomainError, DomainResult, Expression, Tree};
