use gcalc_eval::{AngleMode, GraphBounds, Sweep, DEFAULT_GRAPH_WIDTH, DEFAULT_SAMPLES_PER_PIXEL};

/// Settings for a [`Calculator`](crate::Calculator) session
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorConfig {
    /// How trigonometric arguments are read
    pub angle_mode: AngleMode,
    /// Visible window used in graphing mode
    pub bounds: GraphBounds,
    /// Width of the plotting surface in pixels
    pub width_px: usize,
    /// Evaluations per horizontal pixel
    pub samples_per_pixel: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            angle_mode: AngleMode::Radians,
            bounds: GraphBounds::default(),
            width_px: DEFAULT_GRAPH_WIDTH,
            samples_per_pixel: DEFAULT_SAMPLES_PER_PIXEL,
        }
    }
}

impl CalculatorConfig {
    /// The sweep a graph drawn with these settings evaluates
    pub fn sweep(&self) -> Sweep {
        Sweep::for_width(&self.bounds, self.width_px, self.samples_per_pixel)
    }
}
