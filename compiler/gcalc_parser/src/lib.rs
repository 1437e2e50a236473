pub mod parser;

pub use parser::{
    parse, parse_expression, ParseResult, SyntaxError, SyntaxErrorKind, TokenStream,
    MAX_NESTING_DEPTH,
};


// Integration tests are in the tests/ directory
