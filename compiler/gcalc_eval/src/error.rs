use thiserror::Error;

/// Failures that abort an evaluation.
///
/// Arithmetic never fails here; only a literal that cannot be read as a
/// decimal number does.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("invalid numeric literal: {0:?}")]
    InvalidNumber(String),
}

pub type EvalResult<T> = Result<T, EvaluationError>;
