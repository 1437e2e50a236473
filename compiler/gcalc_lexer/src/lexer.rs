//! Text lexer built on the 'logos' crate.
//!
//! Typed input is turned into the same keystroke-granular token stream the
//! keypad produces: every digit and decimal point becomes its own `Number`
//! token, so typed and keyed expressions both pass through digit
//! concatenation before parsing. Unlike the keypad, function names do not
//! open their parenthesis implicitly; `sin(90)` must be typed in full.

use std::ops::Range;

use logos::Logos;
use thiserror::Error;

use crate::token::{self, Token};

/// Raw token type used by the logos lexer
#[allow(missing_docs)]
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum LogosToken {
    #[regex("[0-9]")]
    Digit,
    #[token(".")]
    Point,

    // --- Constants and the variable ---
    #[token("e")]
    Euler,
    #[token("π")]
    #[token("pi")]
    Pi,
    #[token("X")]
    #[token("x")]
    Variable,

    // --- Operators ---
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("×")]
    #[token("*")]
    Times,
    #[token("÷")]
    #[token("/")]
    Divide,
    #[token("^")]
    Power,

    // --- Functions ---
    #[token("sin")]
    Sin,
    #[token("cos")]
    Cos,
    #[token("tan")]
    Tan,
    #[token("log")]
    Log,
    #[token("ln")]
    Ln,
    #[token("√")]
    #[token("sqrt")]
    Sqrt,

    // --- Delimiters ---
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
}

/// Input the lexer could not recognize.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized input {fragment:?} at offset {offset}")]
pub struct LexError {
    /// Byte offset of the fragment in the source
    pub offset: usize,
    /// The offending text
    pub fragment: String,
}

/// Result type for lexing operations
pub type LexResult<T> = Result<T, LexError>;

/// Iterator over the tokens of a typed expression
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source text
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(source),
        }
    }

    /// Byte range in the source of the token most recently returned
    pub fn span(&self) -> Range<usize> {
        self.inner.span()
    }

    fn convert(raw: LogosToken, slice: &str) -> Token {
        match raw {
            LogosToken::Digit => Token::number(slice),
            LogosToken::Point => Token::number("."),
            LogosToken::Euler => Token::number(token::EULER),
            LogosToken::Pi => Token::number(token::PI),
            LogosToken::Variable => Token::variable(),
            LogosToken::Plus => Token::operator("+"),
            LogosToken::Minus => Token::operator("-"),
            LogosToken::Times => Token::operator(token::TIMES),
            LogosToken::Divide => Token::operator(token::DIVIDE),
            LogosToken::Power => Token::operator("^"),
            LogosToken::Sin => Token::function("sin"),
            LogosToken::Cos => Token::function("cos"),
            LogosToken::Tan => Token::function("tan"),
            LogosToken::Log => Token::function("log"),
            LogosToken::Ln => Token::function("ln"),
            LogosToken::Sqrt => Token::function(token::SQRT),
            LogosToken::OpenParen => Token::open_paren(),
            LogosToken::CloseParen => Token::close_paren(),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = LexResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.inner.next()?;
        let slice = self.inner.slice();
        Some(match raw {
            Ok(raw) => Ok(Self::convert(raw, slice)),
            Err(()) => Err(LexError {
                offset: self.inner.span().start,
                fragment: slice.to_string(),
            }),
        })
    }
}

/// Lex a whole expression, stopping at the first unrecognized fragment.
pub fn tokenize(source: &str) -> LexResult<Vec<Token>> {
    Lexer::new(source).collect()
}

/// Like [`tokenize`], but pairs every token with its byte range in `source`.
pub fn tokenize_spanned(source: &str) -> LexResult<Vec<(Token, Range<usize>)>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        tokens.push((token?, lexer.span()));
    }
    Ok(tokens)
}
