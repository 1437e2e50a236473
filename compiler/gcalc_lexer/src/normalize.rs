//! Digit concatenation.
//!
//! The keypad and the text lexer emit one `Number` token per keystroke, so
//! `1`, `2`, `3` arrive as three tokens. Before parsing they are merged into a
//! single `123` literal. The reserved constants `e` and `π` never merge, and
//! every other token kind is copied through untouched.
//!
//! Validity of the merged text (for example a second decimal point) is not
//! checked here; the evaluator rejects malformed literals.

use log::{debug, trace};

use crate::token::Token;

/// Merge every maximal run of numeric literal tokens into one token.
///
/// Returns a fresh sequence; the input is not modified.
pub fn normalize(tokens: &[Token]) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut run = String::new();

    for token in tokens {
        if token.is_numeric_literal() {
            run.push_str(token.text());
            continue;
        }
        flush(&mut run, &mut out);
        out.push(token.clone());
    }
    flush(&mut run, &mut out);

    debug!("normalized {} tokens into {}", tokens.len(), out.len());
    out
}

/// Index in the un-normalized `tokens` of the token that starts normalized
/// token `position`, or `tokens.len()` when `position` is past the end.
///
/// Used to map a parser position back onto what was typed.
pub fn raw_position(tokens: &[Token], position: usize) -> usize {
    let mut index = 0;
    for _ in 0..position {
        if index >= tokens.len() {
            break;
        }
        if tokens[index].is_numeric_literal() {
            while index < tokens.len() && tokens[index].is_numeric_literal() {
                index += 1;
            }
        } else {
            index += 1;
        }
    }
    index.min(tokens.len())
}

fn flush(run: &mut String, out: &mut Vec<Token>) {
    if run.is_empty() {
        return;
    }
    trace!("merged numeric literal {run:?}");
    out.push(Token::number(std::mem::take(run)));
}
