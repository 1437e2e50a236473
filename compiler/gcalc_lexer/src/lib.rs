//! gcalc lexical layer
//!
//! This crate owns everything that happens before parsing: the [`Token`]
//! type, the keypad [`TokenBuffer`] that collects one token per key press,
//! the text [`Lexer`] for typed input, and [`normalize`], which merges
//! per-keystroke digits into multi-digit literals.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod lexer;
pub mod normalize;
pub mod token;

// Re-export the main types for convenience
pub use buffer::{Key, KeyOutcome, TokenBuffer};
pub use lexer::{tokenize, tokenize_spanned, LexError, LexResult, Lexer};
pub use normalize::{normalize, raw_position};
pub use token::{display_text, Token, TokenKind};
