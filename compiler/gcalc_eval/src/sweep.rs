//! Sampling an expression over a range of `X` for plotting.

use gcalc_ast::{AstNode, TreeStats};
use log::{debug, trace, warn};
use thiserror::Error;

use crate::evaluator::{evaluate_at, AngleMode};

/// Width in pixels of the default plotting surface.
pub const DEFAULT_GRAPH_WIDTH: usize = 400;
/// Samples taken per horizontal pixel.
pub const DEFAULT_SAMPLES_PER_PIXEL: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoundsError {
    #[error("graph bounds must be finite numbers")]
    NotFinite,
    #[error("minimum values must be less than maximum values")]
    Inverted,
    #[error("a sweep needs at least one step")]
    NoSteps,
}

/// The visible window of a graph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphBounds {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Default for GraphBounds {
    fn default() -> Self {
        Self {
            min_x: -10.0,
            max_x: 10.0,
            min_y: -10.0,
            max_y: 10.0,
        }
    }
}

impl GraphBounds {
    /// Validated bounds: all four values finite and each minimum strictly
    /// below its maximum.
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Result<Self, BoundsError> {
        if ![min_x, max_x, min_y, max_y].iter().all(|v| v.is_finite()) {
            return Err(BoundsError::NotFinite);
        }
        if min_x >= max_x || min_y >= max_y {
            return Err(BoundsError::Inverted);
        }
        Ok(Self {
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Whether `y` falls inside the vertical window, edges included
    pub fn contains_y(&self, y: f64) -> bool {
        (self.min_y..=self.max_y).contains(&y)
    }
}

/// One evaluated point. `y` is `NaN` when the point has no value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn is_finite(&self) -> bool {
        self.y.is_finite()
    }

    /// Whether the point should be drawn inside `bounds`
    pub fn is_plottable(&self, bounds: &GraphBounds) -> bool {
        self.is_finite() && bounds.contains_y(self.y)
    }
}

/// Evenly spaced `X` values from `min_x` to `max_x` inclusive.
///
/// The i-th abscissa is computed from `min_x` and `i` rather than by
/// repeated addition, and the last sample is pinned to `max_x`. The
/// arithmetic runs on halved values, so ranges wider than `f64::MAX` still
/// produce finite, increasing samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    min_x: f64,
    max_x: f64,
    steps: usize,
}

impl Sweep {
    pub fn new(min_x: f64, max_x: f64, steps: usize) -> Result<Self, BoundsError> {
        if !min_x.is_finite() || !max_x.is_finite() {
            return Err(BoundsError::NotFinite);
        }
        if min_x >= max_x {
            return Err(BoundsError::Inverted);
        }
        if steps == 0 {
            return Err(BoundsError::NoSteps);
        }
        Ok(Self {
            min_x,
            max_x,
            steps,
        })
    }

    /// A sweep across the horizontal extent of `bounds`, with
    /// `samples_per_pixel` steps for every pixel of a surface `width_px` wide.
    pub fn for_width(bounds: &GraphBounds, width_px: usize, samples_per_pixel: usize) -> Self {
        Self {
            min_x: bounds.min_x,
            max_x: bounds.max_x,
            steps: width_px.saturating_mul(samples_per_pixel).max(1),
        }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Distance between neighbouring samples.
    ///
    /// Infinite only when a single step spans more than `f64::MAX`.
    pub fn step(&self) -> f64 {
        self.half_step() * 2.0
    }

    fn half_step(&self) -> f64 {
        (self.max_x / 2.0 - self.min_x / 2.0) / self.steps as f64
    }

    /// Number of samples produced, both endpoints included
    pub fn len(&self) -> usize {
        self.steps + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// The abscissae this sweep visits, in increasing order
    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        let half_step = self.half_step();
        let half_min = self.min_x / 2.0;
        (0..=self.steps).map(move |i| match i {
            0 => self.min_x,
            i if i == self.steps => self.max_x,
            i => ((half_min + i as f64 * half_step) * 2.0).min(self.max_x),
        })
    }

    /// Evaluate `tree` at every abscissa.
    ///
    /// A sample whose evaluation fails carries `NaN` instead of aborting the
    /// sweep; the failures are counted and reported once.
    pub fn run(&self, tree: &AstNode, mode: AngleMode) -> Vec<Sample> {
        let stats = TreeStats::of(tree);
        debug!(
            "sweeping {} samples over [{}, {}] ({} nodes, depth {}, {})",
            self.len(),
            self.min_x,
            self.max_x,
            stats.nodes,
            stats.depth,
            if stats.uses_variable { "varies with X" } else { "constant" },
        );

        let mut failures = 0usize;
        let samples: Vec<Sample> = self
            .xs()
            .map(|x| {
                let y = match evaluate_at(tree, mode, x) {
                    Ok(y) => y,
                    Err(e) => {
                        trace!("sample at x={x} failed: {e}");
                        failures += 1;
                        f64::NAN
                    }
                };
                Sample { x, y }
            })
            .collect();

        if failures > 0 {
            warn!("{failures} of {} samples failed to evaluate", samples.len());
        }
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcalc_ast::{BinaryOperator, Function};
    use pretty_assertions::assert_eq;

    fn x_squared() -> AstNode {
        AstNode::binary(AstNode::Variable, BinaryOperator::Pow, AstNode::number("2"))
    }

    #[test]
    fn default_bounds_are_ten_each_way() {
        let bounds = GraphBounds::default();
        assert_eq!(
            (bounds.min_x(), bounds.max_x(), bounds.min_y(), bounds.max_y()),
            (-10.0, 10.0, -10.0, 10.0)
        );
    }

    #[test]
    fn bounds_validation() {
        assert_eq!(
            GraphBounds::new(1.0, 1.0, -1.0, 1.0),
            Err(BoundsError::Inverted)
        );
        assert_eq!(
            GraphBounds::new(-1.0, 1.0, 5.0, -5.0),
            Err(BoundsError::Inverted)
        );
        assert_eq!(
            GraphBounds::new(f64::NAN, 1.0, -1.0, 1.0),
            Err(BoundsError::NotFinite)
        );
        assert!(GraphBounds::new(-0.5, 0.5, 0.0, 100.0).is_ok());
        assert_eq!(
            BoundsError::Inverted.to_string(),
            "minimum values must be less than maximum values"
        );
    }

    #[test]
    fn sweep_hits_both_endpoints() {
        let sweep = Sweep::new(-1.0, 1.0, 4).unwrap();
        let xs: Vec<f64> = sweep.xs().collect();
        assert_eq!(xs, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(sweep.len(), 5);
        assert_eq!(sweep.step(), 0.5);
    }

    #[test]
    fn last_sample_is_exact_for_awkward_steps() {
        let sweep = Sweep::new(-10.0, 10.0, 2000).unwrap();
        let xs: Vec<f64> = sweep.xs().collect();
        assert_eq!(xs.len(), 2001);
        assert_eq!(xs[0], -10.0);
        assert_eq!(xs[2000], 10.0);
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn ranges_wider_than_f64_max_stay_finite() {
        let bounds = GraphBounds::new(-1e308, 1e308, -1.0, 1.0).unwrap();
        let sweep = Sweep::for_width(&bounds, 4, 1);
        let xs: Vec<f64> = sweep.xs().collect();
        assert_eq!(xs, vec![-1e308, -5e307, 0.0, 5e307, 1e308]);
        assert_eq!(sweep.step(), 5e307);

        let extreme = Sweep::new(f64::MIN, f64::MAX, 3).unwrap();
        let xs: Vec<f64> = extreme.xs().collect();
        assert_eq!(xs.first(), Some(&f64::MIN));
        assert_eq!(xs.last(), Some(&f64::MAX));
        assert!(xs.iter().all(|x| x.is_finite()));
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn sweep_rejects_degenerate_ranges() {
        assert_eq!(Sweep::new(2.0, 1.0, 10), Err(BoundsError::Inverted));
        assert_eq!(Sweep::new(0.0, 1.0, 0), Err(BoundsError::NoSteps));
        assert_eq!(
            Sweep::new(0.0, f64::INFINITY, 10),
            Err(BoundsError::NotFinite)
        );
    }

    #[test]
    fn for_width_uses_samples_per_pixel() {
        let sweep = Sweep::for_width(
            &GraphBounds::default(),
            DEFAULT_GRAPH_WIDTH,
            DEFAULT_SAMPLES_PER_PIXEL,
        );
        assert_eq!(sweep.steps(), 2000);
        assert_eq!(sweep.step(), 0.01);

        let degenerate = Sweep::for_width(&GraphBounds::default(), 0, 5);
        assert_eq!(degenerate.steps(), 1);
    }

    #[test]
    fn run_evaluates_each_abscissa() {
        crate::tests::init_test_logger();
        let sweep = Sweep::new(-2.0, 3.0, 5).unwrap();
        let ys: Vec<f64> = sweep
            .run(&x_squared(), AngleMode::Radians)
            .iter()
            .map(|s| s.y)
            .collect();
        assert_eq!(ys, vec![4.0, 1.0, 0.0, 1.0, 4.0, 9.0]);
    }

    #[test]
    fn failed_samples_become_nan() {
        crate::tests::init_test_logger();
        let tree = AstNode::binary(AstNode::Variable, BinaryOperator::Add, AstNode::number("1..2"));
        let samples = Sweep::new(0.0, 1.0, 2).unwrap().run(&tree, AngleMode::Radians);
        assert_eq!(samples.len(), 3);
        assert!(samples.iter().all(|s| s.y.is_nan()));
    }

    #[test]
    fn plottable_filters_nan_and_out_of_window() {
        let bounds = GraphBounds::default();
        // √X is NaN left of zero
        let tree = AstNode::call(Function::Sqrt, AstNode::Variable);
        let samples = Sweep::new(-1.0, 1.0, 2).unwrap().run(&tree, AngleMode::Radians);
        let plotted: Vec<f64> = samples
            .iter()
            .filter(|s| s.is_plottable(&bounds))
            .map(|s| s.x)
            .collect();
        assert_eq!(plotted, vec![0.0, 1.0]);

        assert!(!Sample { x: 0.0, y: 10.5 }.is_plottable(&bounds));
        assert!(Sample { x: 0.0, y: 10.0 }.is_plottable(&bounds));
        assert!(!Sample { x: 0.0, y: f64::INFINITY }.is_finite());
    }
}
