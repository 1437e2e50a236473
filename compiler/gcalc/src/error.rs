use gcalc_eval::EvaluationError;
use gcalc_lexer::LexError;
use gcalc_parser::SyntaxError;
use thiserror::Error;

/// Any failure on the way from input to a value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),
}

pub type CalcResult<T> = Result<T, CalcError>;
