// Recursive-descent parser for calculator expressions.
//
// expression := term (("+" | "-") term)*
// term       := factor (("×" | "÷") factor)*
// factor     := primary ("^" factor)?
// primary    := NUMBER | VARIABLE
//             | FUNCTION "(" expression ")"
//             | "(" expression ")"
//
// The left-associative tiers fold iteratively into a left-leaning chain; `^`
// re-enters `factor` on its right-hand side, which makes it right-associative.

use gcalc_ast::{AstNode, BinaryOperator, Constant, Function};
use gcalc_lexer::{Token, TokenKind};
use log::{debug, trace};

pub mod diagnostics;
pub mod error;
pub mod token_stream;

pub use diagnostics::{render_snippet, render_source_snippet, Diagnostic};
pub use error::{ParseResult, SyntaxError, SyntaxErrorKind};
pub use token_stream::{TokenStream, MAX_NESTING_DEPTH};

const ADDITIVE: &[BinaryOperator] = &[BinaryOperator::Add, BinaryOperator::Sub];
const MULTIPLICATIVE: &[BinaryOperator] = &[BinaryOperator::Mul, BinaryOperator::Div];
const POWER: &[BinaryOperator] = &[BinaryOperator::Pow];

/// Parses a whole token sequence into a tree.
///
/// Tokens left over after a complete expression are rejected, so `(1))`
/// fails on the second `)`. The input should already be normalized.
pub fn parse(tokens: &[Token]) -> ParseResult<AstNode> {
    debug!("=== parse ({} tokens) ===", tokens.len());
    let mut stream = TokenStream::new(tokens);
    let result = parse_expression(&mut stream).and_then(|tree| match stream.peek() {
        None => Ok(tree),
        Some(extra) => Err(stream.error(SyntaxErrorKind::UnexpectedToken(
            extra.text().to_string(),
        ))),
    });

    match &result {
        Ok(tree) => debug!("parse success: {tree}"),
        Err(e) => debug!("parse failed: {e}"),
    }
    result
}

/// Parses one expression starting at the cursor.
///
/// On success the cursor sits just past the last consumed token; anything
/// after it is left for the caller. On failure the cursor is left at the
/// offending token.
pub fn parse_expression(stream: &mut TokenStream<'_>) -> ParseResult<AstNode> {
    trace!("parse_expression at {}", stream.position());
    let depth = stream.depth();
    let result = fold_left(stream, ADDITIVE, parse_term);
    stream.restore_depth(depth);
    result
}

fn parse_term(stream: &mut TokenStream<'_>) -> ParseResult<AstNode> {
    let depth = stream.depth();
    let result = fold_left(stream, MULTIPLICATIVE, parse_factor);
    stream.restore_depth(depth);
    result
}

/// One left-associative tier. Each folded operator deepens the tree by one
/// level, so it is charged against the nesting limit until the tier ends.
fn fold_left<'a, F>(
    stream: &mut TokenStream<'a>,
    operators: &[BinaryOperator],
    operand: F,
) -> ParseResult<AstNode>
where
    F: Fn(&mut TokenStream<'a>) -> ParseResult<AstNode>,
{
    let mut left = operand(stream)?;
    while let Some(operator) = stream.peek_operator(operators) {
        stream.descend()?;
        stream.next();
        let right = operand(stream)?;
        left = AstNode::binary(left, operator, right);
    }
    Ok(left)
}

fn parse_factor(stream: &mut TokenStream<'_>) -> ParseResult<AstNode> {
    let base = parse_primary(stream)?;
    if let Some(operator) = stream.peek_operator(POWER) {
        let depth = stream.depth();
        stream.descend()?;
        stream.next();
        // Recurse into factor, not primary: 2^3^2 is 2^(3^2)
        let exponent = parse_factor(stream);
        stream.restore_depth(depth);
        return Ok(AstNode::binary(base, operator, exponent?));
    }
    Ok(base)
}

fn parse_primary(stream: &mut TokenStream<'_>) -> ParseResult<AstNode> {
    let token = stream
        .peek()
        .ok_or_else(|| stream.error(SyntaxErrorKind::UnexpectedEndOfInput))?;
    trace!("primary: {:?} {:?}", token.kind(), token.text());

    match token.kind() {
        TokenKind::Number => {
            stream.next();
            Ok(match Constant::from_symbol(token.text()) {
                Some(constant) => AstNode::Constant(constant),
                None => AstNode::number(token.text()),
            })
        }
        TokenKind::Variable => {
            stream.next();
            Ok(AstNode::Variable)
        }
        TokenKind::Function => {
            let function =
                Function::from_name(token.text()).ok_or_else(|| unexpected(stream, token))?;
            stream.next();
            if !stream.peek_paren('(') {
                return Err(stream.error(SyntaxErrorKind::FunctionWithoutParentheses(
                    token.text().to_string(),
                )));
            }
            let argument = parse_group(
                stream,
                SyntaxErrorKind::MissingClosingParenthesisAfterArgument,
            )?;
            Ok(AstNode::call(function, argument))
        }
        TokenKind::Parenthesis if token.is_paren('(') => {
            parse_group(stream, SyntaxErrorKind::MissingClosingParenthesis)
        }
        TokenKind::Parenthesis | TokenKind::Operator => Err(unexpected(stream, token)),
    }
}

/// `"(" expression ")"` with the cursor on the opening parenthesis
fn parse_group(stream: &mut TokenStream<'_>, missing: SyntaxErrorKind) -> ParseResult<AstNode> {
    let depth = stream.depth();
    stream.descend()?;
    stream.next();
    let inner = parse_expression(stream).and_then(|inner| {
        expect_close(stream, missing)?;
        Ok(inner)
    });
    stream.restore_depth(depth);
    inner
}

fn expect_close(stream: &mut TokenStream<'_>, missing: SyntaxErrorKind) -> ParseResult<()> {
    if stream.peek_paren(')') {
        stream.next();
        Ok(())
    } else {
        Err(stream.error(missing))
    }
}

fn unexpected(stream: &TokenStream<'_>, token: &Token) -> SyntaxError {
    stream.error(SyntaxErrorKind::UnexpectedToken(token.text().to_string()))
}
