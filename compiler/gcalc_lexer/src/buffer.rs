//! Keypad input collection.
//!
//! [`TokenBuffer`] is the in-progress expression as the user builds it one
//! key at a time. Every key press maps to zero, one or two tokens through
//! [`Key::tokens`]; the buffer itself never merges digits, that happens in
//! [`crate::normalize`] when the expression is submitted.

use log::trace;

use crate::token::{self, Token};

/// A key on the calculator keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A decimal digit, `0..=9`; build it with [`Key::digit`]. Larger
    /// values are not keys and press as nothing.
    Digit(u8),
    /// The decimal point
    Point,
    /// Euler's number `e`
    Euler,
    /// The constant `π`
    Pi,
    /// The free variable `X`
    Variable,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `×`
    Times,
    /// `÷`
    Divide,
    /// `^`
    Power,
    /// `sin(`
    Sin,
    /// `cos(`
    Cos,
    /// `tan(`
    Tan,
    /// `log(`, base 10
    Log,
    /// `ln(`
    Ln,
    /// `√(`
    Sqrt,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// Empty the buffer (`✖`)
    Clear,
    /// Drop the last token (`⌫`)
    Backspace,
    /// Submit the expression (`=`)
    Equals,
}

impl Key {
    /// The digit key for `value`, or `None` unless it is in `0..=9`
    pub fn digit(value: u8) -> Option<Key> {
        (value <= 9).then_some(Key::Digit(value))
    }

    /// Look a key up by the label printed on it.
    ///
    /// ASCII spellings are accepted for the symbols that have one.
    pub fn from_label(label: &str) -> Option<Key> {
        let key = match label {
            "." => Key::Point,
            "e" => Key::Euler,
            "π" | "pi" => Key::Pi,
            "X" | "x" => Key::Variable,
            "+" => Key::Plus,
            "-" => Key::Minus,
            "×" | "*" => Key::Times,
            "÷" | "/" => Key::Divide,
            "^" => Key::Power,
            "sin" => Key::Sin,
            "cos" => Key::Cos,
            "tan" => Key::Tan,
            "log" => Key::Log,
            "ln" => Key::Ln,
            "√" | "sqrt" => Key::Sqrt,
            "(" => Key::OpenParen,
            ")" => Key::CloseParen,
            "✖" | "C" => Key::Clear,
            "⌫" => Key::Backspace,
            "=" => Key::Equals,
            _ => {
                let mut chars = label.chars();
                return match (chars.next(), chars.next()) {
                    (Some(c), None) => c
                        .to_digit(10)
                        .and_then(|d| u8::try_from(d).ok())
                        .and_then(Key::digit),
                    _ => None,
                };
            }
        };
        Some(key)
    }

    /// Whether this key edits or submits the buffer instead of adding tokens.
    pub fn is_command(&self) -> bool {
        matches!(self, Key::Clear | Key::Backspace | Key::Equals)
    }

    /// The tokens appended to the buffer when this key is pressed.
    ///
    /// Function keys open their argument list immediately, so `sin` yields
    /// both the function token and `(`. Command keys yield nothing.
    pub fn tokens(&self) -> Vec<Token> {
        let function = |name: &str| vec![Token::function(name), Token::open_paren()];
        match self {
            Key::Digit(d) if *d <= 9 => vec![Token::number(d.to_string())],
            Key::Digit(_) => Vec::new(),
            Key::Point => vec![Token::number(".")],
            Key::Euler => vec![Token::number(token::EULER)],
            Key::Pi => vec![Token::number(token::PI)],
            Key::Variable => vec![Token::variable()],
            Key::Plus => vec![Token::operator("+")],
            Key::Minus => vec![Token::operator("-")],
            Key::Times => vec![Token::operator(token::TIMES)],
            Key::Divide => vec![Token::operator(token::DIVIDE)],
            Key::Power => vec![Token::operator("^")],
            Key::Sin => function("sin"),
            Key::Cos => function("cos"),
            Key::Tan => function("tan"),
            Key::Log => function("log"),
            Key::Ln => function("ln"),
            Key::Sqrt => function(token::SQRT),
            Key::OpenParen => vec![Token::open_paren()],
            Key::CloseParen => vec![Token::close_paren()],
            Key::Clear | Key::Backspace | Key::Equals => Vec::new(),
        }
    }
}

/// What a key press did to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The buffer contents changed (or were already empty for a backspace)
    Edited,
    /// `=` was pressed; the caller should evaluate a snapshot of the buffer
    Submit,
}

/// The ordered token buffer backing the calculator display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
}

impl TokenBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one token
    pub fn push(&mut self, token: Token) {
        trace!("buffer push {:?}", token.text());
        self.tokens.push(token);
    }

    /// Remove every token
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Remove and return the most recent token
    pub fn remove_last(&mut self) -> Option<Token> {
        self.tokens.pop()
    }

    /// Number of tokens in the buffer
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the buffer holds no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The buffered tokens in entry order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// A copy of the buffered tokens, taken at evaluation time
    pub fn snapshot(&self) -> Vec<Token> {
        self.tokens.clone()
    }

    /// The text the display field shows for this buffer
    pub fn display_text(&self) -> String {
        token::display_text(&self.tokens)
    }

    /// Apply a key press.
    pub fn press(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Clear => self.clear(),
            Key::Backspace => {
                self.remove_last();
            }
            Key::Equals => return KeyOutcome::Submit,
            _ => {
                for token in key.tokens() {
                    self.push(token);
                }
            }
        }
        KeyOutcome::Edited
    }
}

impl Extend<Token> for TokenBuffer {
    fn extend<I: IntoIterator<Item = Token>>(&mut self, iter: I) {
        for token in iter {
            self.push(token);
        }
    }
}
