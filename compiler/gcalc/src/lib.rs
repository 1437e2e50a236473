//! gcalc: a graphing calculator engine
//!
//! Ties the lexer, parser and evaluator crates together behind a keypad
//! [`Calculator`] session and plain-text pipelines. The `gcalc` binary in
//! this crate is a command-line front end over the same API.

pub mod calculator;
pub mod config;
pub mod error;

pub use calculator::{
    compile, evaluate_str, format_result, sweep_str, Calculator, CalculatorMode, Response,
    ERROR_TEXT,
};
pub use config::CalculatorConfig;
pub use error::{CalcError, CalcResult};

pub use gcalc_eval::{AngleMode, GraphBounds, Sample, Sweep};
pub use gcalc_lexer::Key;
