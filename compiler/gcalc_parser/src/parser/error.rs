use thiserror::Error;

/// What went wrong while parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    /// The tokens ran out where an operand was expected
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// A token that cannot appear at this point
    #[error("unexpected token: {0}")]
    UnexpectedToken(String),

    /// A parenthesized group was not closed
    #[error("missing closing parenthesis")]
    MissingClosingParenthesis,

    /// A function argument was not closed
    #[error("missing closing parenthesis after function argument")]
    MissingClosingParenthesisAfterArgument,

    /// A function name not followed by `(`
    #[error("function without parentheses: {0}")]
    FunctionWithoutParentheses(String),

    /// Groups, arguments or operators nested past the parser's limit
    #[error("expression nested too deeply")]
    NestingTooDeep,
}

/// A syntax error together with the cursor position it was raised at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} (at token {position})")]
pub struct SyntaxError {
    /// The error category
    pub kind: SyntaxErrorKind,
    /// Index of the offending token; equal to the token count when the input
    /// ended early
    pub position: usize,
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, SyntaxError>;
