// Abstract Syntax Tree (AST) definitions for gcalc expressions.
// Tokens and tree nodes are separate types: the parser builds these nodes from
// a token slice and never mutates the tokens themselves.

use std::f64::consts;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parsed expression.
///
/// Every node exclusively owns its children, so a tree is always acyclic and
/// is dropped as a whole.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value"))]
pub enum AstNode {
    /// A decimal literal, kept as text until evaluation
    NumberLiteral(String),
    /// One of the reserved constants
    Constant(Constant),
    /// The single free variable
    Variable,
    /// A binary operation
    BinaryOp(Box<BinaryOpNode>),
    /// A single-argument function application
    Call(Box<CallNode>),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinaryOpNode {
    pub left: AstNode,
    pub operator: BinaryOperator,
    pub right: AstNode,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CallNode {
    pub function: Function,
    pub argument: AstNode,
}

impl AstNode {
    /// A numeric literal node
    pub fn number<S: Into<String>>(text: S) -> Self {
        AstNode::NumberLiteral(text.into())
    }

    /// A binary operation node
    pub fn binary(left: AstNode, operator: BinaryOperator, right: AstNode) -> Self {
        AstNode::BinaryOp(Box::new(BinaryOpNode {
            left,
            operator,
            right,
        }))
    }

    /// A function application node
    pub fn call(function: Function, argument: AstNode) -> Self {
        AstNode::Call(Box::new(CallNode { function, argument }))
    }

    /// Binding strength of this node when printed, leaves bind tightest
    fn precedence(&self) -> u8 {
        match self {
            AstNode::BinaryOp(node) => node.operator.precedence(),
            _ => u8::MAX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOperator {
    /// Look an operator up by its keypad symbol
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinaryOperator::Add),
            "-" => Some(BinaryOperator::Sub),
            "×" => Some(BinaryOperator::Mul),
            "÷" => Some(BinaryOperator::Div),
            "^" => Some(BinaryOperator::Pow),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "×",
            BinaryOperator::Div => "÷",
            BinaryOperator::Pow => "^",
        }
    }

    /// Higher binds tighter
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Sub => 1,
            BinaryOperator::Mul | BinaryOperator::Div => 2,
            BinaryOperator::Pow => 3,
        }
    }

    pub fn is_right_associative(&self) -> bool {
        matches!(self, BinaryOperator::Pow)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Function {
    Sin,
    Cos,
    Tan,
    /// Base-10 logarithm
    Log,
    /// Natural logarithm
    Ln,
    Sqrt,
}

impl Function {
    /// Look a function up by its keypad name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Function::Sin),
            "cos" => Some(Function::Cos),
            "tan" => Some(Function::Tan),
            "log" => Some(Function::Log),
            "ln" => Some(Function::Ln),
            "√" => Some(Function::Sqrt),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Log => "log",
            Function::Ln => "ln",
            Function::Sqrt => "√",
        }
    }

    /// Whether the argument is an angle and so depends on the angle mode
    pub fn is_trigonometric(&self) -> bool {
        matches!(self, Function::Sin | Function::Cos | Function::Tan)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The reserved numeric constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Constant {
    /// Euler's number, written `e`
    E,
    /// Written `π`
    Pi,
}

impl Constant {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "e" => Some(Constant::E),
            "π" => Some(Constant::Pi),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Constant::E => "e",
            Constant::Pi => "π",
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Constant::E => consts::E,
            Constant::Pi => consts::PI,
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Prints the expression in keypad notation with only the parentheses the
/// grammar needs, so the output parses back to an equal tree.
impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::NumberLiteral(text) => f.write_str(text),
            AstNode::Constant(constant) => write!(f, "{constant}"),
            AstNode::Variable => f.write_str("X"),
            AstNode::Call(node) => write!(f, "{}({})", node.function, node.argument),
            AstNode::BinaryOp(node) => {
                let prec = node.operator.precedence();
                let right_assoc = node.operator.is_right_associative();

                let left_prec = node.left.precedence();
                let wrap_left = left_prec < prec || (left_prec == prec && right_assoc);
                let right_prec = node.right.precedence();
                let wrap_right = right_prec < prec || (right_prec == prec && !right_assoc);

                write_operand(f, &node.left, wrap_left)?;
                write!(f, "{}", node.operator)?;
                write_operand(f, &node.right, wrap_right)
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, node: &AstNode, wrap: bool) -> fmt::Result {
    if wrap {
        write!(f, "({node})")
    } else {
        write!(f, "{node}")
    }
}
