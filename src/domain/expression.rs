//! Prefix arithmetic expressions over `Tree<String>`.
//!
//! An expression is written in the canonical tree form with the operator as
//! the node value and the operands as its children, e.g.
//! `+ (5 10 -( *(15 20) 25) 30)`.
//!
//! Validity rules, checked once at construction:
//! - every value is `+`, `-`, `*`, `/` or an unsigned integer literal
//! - `+` and `*` take two or more operands
//! - `-` and `/` take exactly two operands
//! - integer literals are leaves

use std::fmt;
use std::str::FromStr;

use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::parser;
use crate::domain::tree::Tree;

/// The four supported operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "*" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }

    /// Whether `n` operands are acceptable for this operator.
    pub fn accepts(&self, n: usize) -> bool {
        match self {
            Operator::Add | Operator::Multiply => n >= 2,
            Operator::Subtract | Operator::Divide => n == 2,
        }
    }
}

/// Parses an unsigned integer literal: ASCII digits only, no sign.
fn parse_literal(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// A validated prefix arithmetic expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    tree: Tree<String>,
}

impl Expression {
    /// Parses and validates `text`.
    ///
    /// # Errors
    /// Syntax errors from the tree parser are passed through unchanged; a
    /// well-formed tree that breaks the validity rules gives
    /// `InvalidExpression` carrying `text`.
    #[instrument(level = "debug")]
    pub fn new(text: &str) -> DomainResult<Self> {
        let tree = parser::parse(text)?;
        Self::from_tree(tree).map_err(|_| DomainError::InvalidExpression(text.to_string()))
    }

    /// Validates an already built tree.
    ///
    /// On failure the error carries the tree's canonical form.
    pub fn from_tree(tree: Tree<String>) -> DomainResult<Self> {
        if !is_valid(&tree) {
            return Err(DomainError::InvalidExpression(tree.to_string()));
        }
        Ok(Self { tree })
    }

    pub fn tree(&self) -> &Tree<String> {
        &self.tree
    }

    pub fn into_tree(self) -> Tree<String> {
        self.tree
    }

    /// Reduces the expression to a single integer.
    ///
    /// Division truncates toward zero.
    ///
    /// # Errors
    /// `DivisionByZero` if a divisor evaluates to zero, `Overflow` if an
    /// intermediate result leaves the `i64` range.
    #[instrument(level = "debug", skip(self), fields(expression = %self.tree))]
    pub fn evaluate(&self) -> DomainResult<i64> {
        let result = evaluate(&self.tree)?;
        debug!("result: {}", result);
        Ok(result)
    }
}

fn is_valid(tree: &Tree<String>) -> bool {
    let n = tree.number_of_children();
    let value = tree.value();

    let node_ok = match Operator::from_symbol(value) {
        Some(op) => op.accepts(n),
        None => parse_literal(value).is_some() && n == 0,
    };
    if !node_ok {
        debug!("invalid node {:?} with {} children", value, n);
        return false;
    }

    tree.children().all(is_valid)
}

fn evaluate(tree: &Tree<String>) -> DomainResult<i64> {
    let op = match Operator::from_symbol(tree.value()) {
        Some(op) => op,
        None => {
            return parse_literal(tree.value())
                .ok_or_else(|| DomainError::InvalidExpression(tree.to_string()))
        }
    };

    match op {
        Operator::Add => tree.children().try_fold(0i64, |acc, child| {
            acc.checked_add(evaluate(child)?).ok_or(DomainError::Overflow)
        }),
        Operator::Multiply => tree.children().try_fold(1i64, |acc, child| {
            acc.checked_mul(evaluate(child)?).ok_or(DomainError::Overflow)
        }),
        Operator::Subtract => {
            let (left, right) = operands(tree)?;
            left.checked_sub(right).ok_or(DomainError::Overflow)
        }
        Operator::Divide => {
            let (left, right) = operands(tree)?;
            if right == 0 {
                return Err(DomainError::DivisionByZero);
            }
            left.checked_div(right).ok_or(DomainError::Overflow)
        }
    }
}

fn operands(tree: &Tree<String>) -> DomainResult<(i64, i64)> {
    Ok((evaluate(tree.child_at(0)?)?, evaluate(tree.child_at(1)?)?))
}

fn render(tree: &Tree<String>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let op = match Operator::from_symbol(tree.value()) {
        Some(op) => op,
        // Stand-alone numbers don't get parentheses
        None => return write!(f, "{}", tree.value()),
    };

    write!(f, "(")?;
    for (i, child) in tree.children().enumerate() {
        if i > 0 {
            write!(f, " {} ", op.symbol())?;
        }
        render(child, f)?;
    }
    write!(f, ")")
}

/// Fully parenthesized infix form, e.g. `(5 + 10 + ((15 * 20) - 25) + 30)`.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(&self.tree, f)
    }
}

impl FromStr for Expression {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<Tree<String>> for Expression {
    type Error = DomainError;

    fn try_from(tree: Tree<String>) -> Result<Self, Self::Error> {
        Self::from_tree(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", Some(0))]
    #[case("42", Some(42))]
    #[case("007", Some(7))]
    #[case("+5", None)]
    #[case("-5", None)]
    #[case("1a", None)]
    #[case("", None)]
    #[case("99999999999999999999", None)]
    fn test_parse_literal(#[case] text: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_literal(text), expected);
    }

    #[test]
    fn test_operator_symbols_round_trip() {
        for op in [
            Operator::Add,
            Operator::Subtract,
            Operator::Multiply,
            Operator::Divide,
        ] {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(Operator::from_symbol("%"), None);
    }

    #[test]
    fn test_operator_arity() {
        assert!(!Operator::Add.accepts(1));
        assert!(Operator::Add.accepts(5));
        assert!(Operator::Divide.accepts(2));
        assert!(!Operator::Divide.accepts(3));
    }

    #[test]
    fn test_from_tree_rejects_numeric_parent() {
        let tree = Tree::with_children("5".to_string(), [Tree::new("6".to_string())]);
        assert_eq!(
            Expression::from_tree(tree).unwrap_err(),
            DomainError::InvalidExpression("5 (6)".into())
        );
    }

    #[test]
    fn test_into_tree_returns_parsed_tree() {
        let expr = Expression::new("*(1 2)").unwrap();
        assert_eq!(expr.tree().to_string(), "* (1 2)");
        assert_eq!(expr.into_tree().number_of_children(), 2);
    }

    #[test]
    fn test_division_truncates_toward_zero() {
        assert_eq!(Expression::new("/(7 2)").unwrap().evaluate().unwrap(), 3);
        let negative = Expression::new("/( -(0 7) 2)").unwrap();
        assert_eq!(negative.evaluate().unwrap(), -3);
    }

    #[test]
    fn test_overflow_is_reported() {
        let expr = Expression::new("*(9223372036854775807 2)").unwrap();
        assert_eq!(expr.evaluate().unwrap_err(), DomainError::Overflow);
    }
}
