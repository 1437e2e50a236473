use gcalc_lexer::Token;

use super::error::{SyntaxError, SyntaxErrorKind};

/// A user-facing description of a syntax error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    /// Token index the error points at
    pub position: usize,
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic for a syntax error, with a hint where one helps
    pub fn from_syntax_error(err: &SyntaxError) -> Self {
        Self {
            message: err.kind.to_string(),
            position: err.position,
            help: help_for(&err.kind),
        }
    }
}

impl From<&SyntaxError> for Diagnostic {
    fn from(err: &SyntaxError) -> Self {
        Self::from_syntax_error(err)
    }
}

fn help_for(kind: &SyntaxErrorKind) -> Option<String> {
    use SyntaxErrorKind::*;
    let help = match kind {
        UnexpectedEndOfInput => "The expression ends where a number, X, a function or '(' was expected",
        UnexpectedToken(text) if text == ")" => "Did you forget a matching '(' earlier?",
        UnexpectedToken(text) if text == "(" => "Put an operator between a value and '(', e.g. 2×(3+4)",
        UnexpectedToken(text) if is_operator(text) => {
            "An operator needs a value on both sides; negative numbers are written 0-n"
        }
        UnexpectedToken(_) => return None,
        MissingClosingParenthesis => "Add ')' to close the group",
        MissingClosingParenthesisAfterArgument => "Function arguments end with ')'",
        FunctionWithoutParentheses(_) => "Write the argument in parentheses, e.g. sin(30)",
        NestingTooDeep => "Split the expression into smaller parts",
    };
    Some(help.to_string())
}

fn is_operator(text: &str) -> bool {
    matches!(text, "+" | "-" | "×" | "÷" | "^")
}

/// Render the expression with a caret under the offending token.
///
/// ```text
/// error: missing closing parenthesis
///   (1+2
///       ^
///   help: Add ')' to close the group
/// ```
pub fn render_snippet(diag: &Diagnostic, tokens: &[Token]) -> String {
    let source: String = tokens.iter().map(Token::text).collect();
    let column: usize = tokens
        .iter()
        .take(diag.position)
        .map(|t| t.text().chars().count())
        .sum();
    render_at(diag, &source, column)
}

/// Render against the text the user typed, with the caret at byte `offset`.
///
/// The caller maps the token position to an offset, usually through the
/// lexer's spans. An offset past the end or inside a character puts the
/// caret after the last character.
pub fn render_source_snippet(diag: &Diagnostic, source: &str, offset: usize) -> String {
    let column = source
        .get(..offset)
        .unwrap_or(source)
        .chars()
        .count();
    render_at(diag, source, column)
}

fn render_at(diag: &Diagnostic, source: &str, column: usize) -> String {
    let mut out = format!("error: {}\n  {}\n  {}^", diag.message, source, " ".repeat(column));
    if let Some(help) = &diag.help {
        out.push_str("\n  help: ");
        out.push_str(help);
    }
    out
}
