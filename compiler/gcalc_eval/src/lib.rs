//! gcalc evaluation
//!
//! Walks a parsed [`AstNode`](gcalc_ast::AstNode) to a floating-point value
//! under an [`AngleMode`], and samples trees containing `X` across a range
//! for plotting with [`Sweep`].

pub mod error;
pub mod evaluator;
pub mod sweep;

pub use error::{EvalResult, EvaluationError};
pub use evaluator::{evaluate, evaluate_at, parse_literal, AngleMode, ZERO_SNAP_THRESHOLD};
pub use sweep::{
    BoundsError, GraphBounds, Sample, Sweep, DEFAULT_GRAPH_WIDTH, DEFAULT_SAMPLES_PER_PIXEL,
};
