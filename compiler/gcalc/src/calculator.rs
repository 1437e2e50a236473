//! A keypad-driven calculator session.
//!
//! [`Calculator`] plays the part of the calculator face: it collects key
//! presses into a [`TokenBuffer`], and on `=` runs the buffer through
//! normalization, parsing and evaluation (or a sweep in graphing mode).
//! Whatever happens on `=`, the buffer starts empty afterwards.

use gcalc_ast::AstNode;
use gcalc_eval::{evaluate, AngleMode, GraphBounds, Sample, Sweep};
use gcalc_lexer::{normalize, tokenize, Key, KeyOutcome, TokenBuffer};
use gcalc_parser::parse;
use log::{debug, info};

use crate::config::CalculatorConfig;
use crate::error::CalcResult;

/// What the display shows after a failed or non-finite computation
pub const ERROR_TEXT: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalculatorMode {
    /// `=` evaluates the expression once
    #[default]
    Standard,
    /// `=` samples the expression across the graph window
    Graphing,
}

/// The result of one key press
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// The buffer changed; nothing was computed
    Edited,
    /// Standard mode produced a value
    Value(f64),
    /// Graphing mode produced one sample per abscissa, in order
    Plot(Vec<Sample>),
}

/// Render a result for the display.
///
/// Finite values use the shortest representation that reads back to the
/// same float (`14.0`, `0.5`, `1e-7`); infinities and `NaN` show as `Error`.
pub fn format_result(value: f64) -> String {
    if value.is_finite() {
        format!("{value:?}")
    } else {
        ERROR_TEXT.to_string()
    }
}

/// Lex, normalize and parse typed text.
pub fn compile(text: &str) -> CalcResult<AstNode> {
    let tokens = normalize(&tokenize(text)?);
    Ok(parse(&tokens)?)
}

/// Evaluate typed text once, with `X` bound to 0.
pub fn evaluate_str(text: &str, mode: AngleMode) -> CalcResult<f64> {
    let tree = compile(text)?;
    Ok(evaluate(&tree, mode)?)
}

/// Sample typed text across `sweep`.
pub fn sweep_str(text: &str, mode: AngleMode, sweep: &Sweep) -> CalcResult<Vec<Sample>> {
    let tree = compile(text)?;
    Ok(sweep.run(&tree, mode))
}

#[derive(Debug, Default)]
pub struct Calculator {
    buffer: TokenBuffer,
    config: CalculatorConfig,
    mode: CalculatorMode,
    display: String,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CalculatorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn mode(&self) -> CalculatorMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CalculatorMode) {
        debug!("calculator mode: {mode:?}");
        self.mode = mode;
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.config.angle_mode
    }

    pub fn set_angle_mode(&mut self, angle_mode: AngleMode) {
        self.config.angle_mode = angle_mode;
    }

    /// Flip between radians and degrees, returning the new mode
    pub fn toggle_angle_mode(&mut self) -> AngleMode {
        self.config.angle_mode = self.config.angle_mode.toggle();
        self.config.angle_mode
    }

    pub fn set_bounds(&mut self, bounds: GraphBounds) {
        self.config.bounds = bounds;
    }

    pub fn buffer(&self) -> &TokenBuffer {
        &self.buffer
    }

    /// The text currently on the display
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Feed one key press.
    ///
    /// Editing keys update the display with the buffer contents. `=` runs the
    /// pipeline for the current mode; on failure the display shows `Error`
    /// and the error is returned.
    pub fn press(&mut self, key: Key) -> CalcResult<Response> {
        match self.buffer.press(key) {
            KeyOutcome::Edited => {
                self.display = self.buffer.display_text();
                Ok(Response::Edited)
            }
            KeyOutcome::Submit => self.submit(),
        }
    }

    /// Press a sequence of keys, stopping at the first error
    pub fn press_all<I>(&mut self, keys: I) -> CalcResult<Response>
    where
        I: IntoIterator<Item = Key>,
    {
        let mut last = Response::Edited;
        for key in keys {
            last = self.press(key)?;
        }
        Ok(last)
    }

    fn submit(&mut self) -> CalcResult<Response> {
        let tokens = normalize(self.buffer.tokens());
        self.buffer.clear();
        debug!("submit {} tokens in {:?} mode", tokens.len(), self.mode);

        let result = parse(&tokens).map_err(Into::into).and_then(|tree| match self.mode {
            CalculatorMode::Standard => {
                Ok(Response::Value(evaluate(&tree, self.config.angle_mode)?))
            }
            CalculatorMode::Graphing => Ok(Response::Plot(
                self.config.sweep().run(&tree, self.config.angle_mode),
            )),
        });

        self.display = match &result {
            Ok(Response::Value(value)) => format_result(*value),
            Ok(_) => String::new(),
            Err(e) => {
                info!("calculation failed: {e}");
                ERROR_TEXT.to_string()
            }
        };
        result
    }
}
