use gcalc_ast::BinaryOperator;
use gcalc_lexer::{Token, TokenKind};

use super::error::{ParseResult, SyntaxError, SyntaxErrorKind};

/// Maximum nesting depth of a parsed tree, to prevent stack overflow.
///
/// Every group, function argument and operator the parser descends through
/// counts one level, so a long `1+1+1+...` chain is bounded along with
/// deeply parenthesized input.
pub const MAX_NESTING_DEPTH: usize = 256;

/// The parse cursor: a token slice plus the position of the next token.
///
/// One stream lives for exactly one parse. The position only moves forward.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    /// The tokens being parsed
    tokens: &'a [Token],
    /// Current position in the token stream
    position: usize,
    /// Levels currently entered through [`TokenStream::descend`]
    depth: usize,
}

impl<'a> TokenStream<'a> {
    /// Create a new token stream from a slice of tokens
    pub fn new(tokens: &'a [Token]) -> Self {
        TokenStream {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Get the current token without advancing
    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    /// Get the next token and advance the position
    pub fn next(&mut self) -> Option<&'a Token> {
        let token = self.peek();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Index of the next unconsumed token
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get the remaining tokens as a slice
    pub fn remaining(&self) -> &'a [Token] {
        &self.tokens[self.position..]
    }

    /// Check if we're at the end of input
    pub fn is_empty(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Whether the next token is the given parenthesis
    pub fn peek_paren(&self, paren: char) -> bool {
        matches!(self.peek(), Some(token) if token.is_paren(paren))
    }

    /// The operator at the cursor, if it is one of `accepted`
    pub fn peek_operator(&self, accepted: &[BinaryOperator]) -> Option<BinaryOperator> {
        let token = self.peek()?;
        if token.kind() != TokenKind::Operator {
            return None;
        }
        BinaryOperator::from_symbol(token.text()).filter(|op| accepted.contains(op))
    }

    /// Current nesting depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Enter one more level of nesting.
    ///
    /// Fails with [`SyntaxErrorKind::NestingTooDeep`] at the cursor once
    /// [`MAX_NESTING_DEPTH`] levels are already open.
    pub fn descend(&mut self) -> ParseResult<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(SyntaxErrorKind::NestingTooDeep));
        }
        self.depth += 1;
        Ok(())
    }

    /// Drop back to a depth previously read with [`TokenStream::depth`]
    pub fn restore_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    /// Build an error anchored at the current position
    pub fn error(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError {
            kind,
            position: self.position,
        }
    }
}
