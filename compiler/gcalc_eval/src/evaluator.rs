//! Tree-walking evaluation.
//!
//! Evaluation is post-order and never mutates the tree, so one parsed tree
//! can be evaluated any number of times with different variable values.
//! Arithmetic edge cases are not errors: division by zero, `√` of a negative
//! number, `ln` of zero and friends produce `±inf` or `NaN` under IEEE 754
//! rules and are left for the caller to filter.

use std::fmt;

use gcalc_ast::{AstNode, BinaryOperator, Function};
use log::trace;

use crate::error::{EvalResult, EvaluationError};

/// Literals whose magnitude is below this evaluate to exactly `0.0`.
pub const ZERO_SNAP_THRESHOLD: f64 = 1e-10;

/// How the arguments of `sin`, `cos` and `tan` are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AngleMode {
    #[default]
    Radians,
    Degrees,
}

impl AngleMode {
    /// Map the classic "use radians" flag onto a mode
    pub fn from_radians_flag(use_radians: bool) -> Self {
        if use_radians {
            AngleMode::Radians
        } else {
            AngleMode::Degrees
        }
    }

    pub fn is_radians(self) -> bool {
        self == AngleMode::Radians
    }

    /// The other mode
    pub fn toggle(self) -> Self {
        match self {
            AngleMode::Radians => AngleMode::Degrees,
            AngleMode::Degrees => AngleMode::Radians,
        }
    }

    fn angle_to_radians(self, angle: f64) -> f64 {
        match self {
            AngleMode::Radians => angle,
            AngleMode::Degrees => angle.to_radians(),
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngleMode::Radians => f.write_str("Radians"),
            AngleMode::Degrees => f.write_str("Degrees"),
        }
    }
}

/// Evaluate a tree in standard calculator mode, with `X` bound to 0.
pub fn evaluate(tree: &AstNode, mode: AngleMode) -> EvalResult<f64> {
    evaluate_at(tree, mode, 0.0)
}

/// Evaluate a tree with the free variable bound to `x`.
pub fn evaluate_at(tree: &AstNode, mode: AngleMode, x: f64) -> EvalResult<f64> {
    match tree {
        AstNode::NumberLiteral(text) => parse_literal(text),
        AstNode::Constant(constant) => Ok(constant.value()),
        AstNode::Variable => Ok(x),
        AstNode::BinaryOp(node) => {
            let left = evaluate_at(&node.left, mode, x)?;
            let right = evaluate_at(&node.right, mode, x)?;
            Ok(apply_operator(node.operator, left, right))
        }
        AstNode::Call(node) => {
            let argument = evaluate_at(&node.argument, mode, x)?;
            Ok(apply_function(node.function, argument, mode))
        }
    }
}

/// Parse the text of a numeric literal, snapping near-zero values to zero.
///
/// Only ASCII digits and decimal points are accepted; the float parser then
/// rejects anything with more than one point.
pub fn parse_literal(text: &str) -> EvalResult<f64> {
    if !text.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return Err(EvaluationError::InvalidNumber(text.to_string()));
    }
    let value: f64 = text
        .parse()
        .map_err(|_| EvaluationError::InvalidNumber(text.to_string()))?;
    if value.abs() < ZERO_SNAP_THRESHOLD {
        trace!("literal {text:?} snapped to zero");
        return Ok(0.0);
    }
    Ok(value)
}

fn apply_operator(operator: BinaryOperator, left: f64, right: f64) -> f64 {
    match operator {
        BinaryOperator::Add => left + right,
        BinaryOperator::Sub => left - right,
        BinaryOperator::Mul => left * right,
        BinaryOperator::Div => left / right,
        BinaryOperator::Pow => left.powf(right),
    }
}

fn apply_function(function: Function, argument: f64, mode: AngleMode) -> f64 {
    // Only angles are converted; log, ln and √ see the raw value.
    let argument = if function.is_trigonometric() {
        mode.angle_to_radians(argument)
    } else {
        argument
    };
    match function {
        Function::Sin => argument.sin(),
        Function::Cos => argument.cos(),
        Function::Tan => argument.tan(),
        Function::Log => argument.log10(),
        Function::Ln => argument.ln(),
        Function::Sqrt => argument.sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcalc_ast::Constant;

    const EPS: f64 = 1e-12;

    fn num(text: &str) -> AstNode {
        AstNode::number(text)
    }

    #[test]
    fn literals_parse_as_decimals() {
        assert_eq!(parse_literal("123").unwrap(), 123.0);
        assert_eq!(parse_literal("3.25").unwrap(), 3.25);
        assert_eq!(parse_literal(".5").unwrap(), 0.5);
        assert_eq!(parse_literal("2.").unwrap(), 2.0);
    }

    #[test]
    fn tiny_literals_snap_to_zero() {
        crate::tests::init_test_logger();
        let value = parse_literal("0.000000000001").unwrap();
        assert_eq!(value.to_bits(), 0.0f64.to_bits());
        assert_eq!(parse_literal("0.0000000001").unwrap(), 1e-10);
    }

    #[test]
    fn malformed_literals_are_errors() {
        for text in ["1.2.3", ".", "", "1e5", "inf", "NaN", "-1"] {
            assert_eq!(
                parse_literal(text),
                Err(EvaluationError::InvalidNumber(text.to_string())),
                "literal {text:?}"
            );
        }
    }

    #[test]
    fn constants_resolve() {
        let e = evaluate(&AstNode::Constant(Constant::E), AngleMode::Radians).unwrap();
        assert_eq!(e, std::f64::consts::E);
        let pi = evaluate(&AstNode::Constant(Constant::Pi), AngleMode::Degrees).unwrap();
        assert_eq!(pi, std::f64::consts::PI);
    }

    #[test]
    fn degrees_apply_to_trig_only() {
        let sin = AstNode::call(Function::Sin, num("90"));
        assert!((evaluate(&sin, AngleMode::Degrees).unwrap() - 1.0).abs() < EPS);

        let sqrt = AstNode::call(Function::Sqrt, num("16"));
        assert_eq!(evaluate(&sqrt, AngleMode::Degrees).unwrap(), 4.0);

        let log = AstNode::call(Function::Log, num("1000"));
        assert!((evaluate(&log, AngleMode::Degrees).unwrap() - 3.0).abs() < EPS);
    }

    #[test]
    fn variable_defaults_to_zero() {
        let tree = AstNode::binary(AstNode::Variable, BinaryOperator::Add, num("5"));
        assert_eq!(evaluate(&tree, AngleMode::Radians).unwrap(), 5.0);
        assert_eq!(evaluate_at(&tree, AngleMode::Radians, 2.5).unwrap(), 7.5);
    }

    #[test]
    fn arithmetic_edge_cases_do_not_error() {
        let div = AstNode::binary(num("1"), BinaryOperator::Div, num("0"));
        assert_eq!(evaluate(&div, AngleMode::Radians).unwrap(), f64::INFINITY);

        let zero_over_zero = AstNode::binary(num("0"), BinaryOperator::Div, num("0"));
        assert!(evaluate(&zero_over_zero, AngleMode::Radians).unwrap().is_nan());

        let ln_zero = AstNode::call(Function::Ln, num("0"));
        assert_eq!(evaluate(&ln_zero, AngleMode::Radians).unwrap(), f64::NEG_INFINITY);

        // (0 - 8) ^ (1 ÷ 3)
        let cube_root = AstNode::binary(
            AstNode::binary(num("0"), BinaryOperator::Sub, num("8")),
            BinaryOperator::Pow,
            AstNode::binary(num("1"), BinaryOperator::Div, num("3")),
        );
        assert!(evaluate(&cube_root, AngleMode::Radians).unwrap().is_nan());
    }

    #[test]
    fn invalid_literal_aborts_whole_evaluation() {
        let tree = AstNode::binary(num("1"), BinaryOperator::Add, num("1.2.3"));
        assert_eq!(
            evaluate(&tree, AngleMode::Radians),
            Err(EvaluationError::InvalidNumber("1.2.3".to_string()))
        );
    }

    #[test]
    fn angle_mode_helpers() {
        assert_eq!(AngleMode::default(), AngleMode::Radians);
        assert_eq!(AngleMode::from_radians_flag(false), AngleMode::Degrees);
        assert_eq!(AngleMode::Degrees.toggle(), AngleMode::Radians);
        assert!(AngleMode::Radians.is_radians());
        assert_eq!(AngleMode::Degrees.to_string(), "Degrees");
    }
}
