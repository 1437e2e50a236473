//! Abstract Syntax Tree (AST) for gcalc expressions.
//!
//! This crate defines the tree the parser produces and the evaluator
//! consumes, along with a visitor for traversals and, behind the default
//! `serde` feature, JSON (de)serialization.

pub mod ast;
pub mod visit;

// Re-export commonly used types
pub use ast::{AstNode, BinaryOpNode, BinaryOperator, CallNode, Constant, Function};
pub use visit::TreeStats;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::error::Error;

/// A result type for AST operations.
pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;

/// Serializes an AST node to a JSON string.
///
/// # Example
///
/// ```
/// use gcalc_ast::{to_json, AstNode, BinaryOperator};
///
/// let expr = AstNode::binary(AstNode::number("1"), BinaryOperator::Add, AstNode::Variable);
/// let json = to_json(&expr).unwrap();
/// assert!(json.contains(r#""type": "BinaryOp""#));
/// assert!(json.contains(r#""operator": "Add""#));
/// ```
#[cfg(feature = "serde")]
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Deserializes an AST node from a JSON string.
#[cfg(feature = "serde")]
pub fn from_json<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_serialization() -> Result<()> {
        let expr = AstNode::binary(
            AstNode::call(Function::Sqrt, AstNode::number("16")),
            BinaryOperator::Pow,
            AstNode::Constant(Constant::E),
        );

        let json = to_json(&expr)?;
        let deserialized: AstNode = from_json(&json)?;
        assert_eq!(expr, deserialized);
        Ok(())
    }

    #[test]
    fn variable_serializes_as_bare_tag() -> Result<()> {
        let json = to_json(&AstNode::Variable)?;
        assert!(json.contains(r#""type": "Variable""#));
        Ok(())
    }
}
