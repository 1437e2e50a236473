//! Shared helpers for the workspace integration tests.

use std::sync::Once;

use gcalc_ast::AstNode;
use gcalc_lexer::{normalize, tokenize, Token};
use gcalc_parser::parse;

static INIT: Once = Once::new();

/// Initialize the logger for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .init();
    });
}

/// Lex and normalize typed text, panicking on bad test input.
pub fn tokens(source: &str) -> Vec<Token> {
    normalize(&tokenize(source).unwrap_or_else(|e| panic!("{source:?} should lex: {e}")))
}

/// Lex, normalize and parse typed text, panicking on bad test input.
pub fn compile(source: &str) -> AstNode {
    parse(&tokens(source)).unwrap_or_else(|e| panic!("{source:?} should parse: {e}"))
}
