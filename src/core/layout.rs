use serde::{Deserialize, Serialize};

/// Pixel bounds of the plot area plus the top of the value-axis lines.
///
/// Normalized coordinates run `0..=1` left to right and bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PlotArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Value-axis lines extend above the plot into the bar-label headroom.
    pub axis_top_y: f64,
}

impl PlotArea {
    #[must_use]
    pub fn to_chart_x(&self, x: f64) -> f64 {
        self.x + x * self.width
    }

    #[must_use]
    pub fn to_chart_y(&self, y: f64) -> f64 {
        self.y + (1.0 - y) * self.height
    }

    #[must_use]
    pub fn to_chart_width(&self, width: f64) -> f64 {
        width * self.width
    }

    #[must_use]
    pub fn to_chart_height(&self, height: f64) -> f64 {
        height * self.height
    }
}
