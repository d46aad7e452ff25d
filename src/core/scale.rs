use serde::{Deserialize, Serialize};

use crate::core::formatter::{format_fixed, format_plain};

/// Above this ceiling, tick labels are shown divided by
/// [`PRESENTATION_MULTIPLIER`] and the axis units carry the multiplier.
pub const PRESENTATION_THRESHOLD: f64 = 1000.0;
pub const PRESENTATION_MULTIPLIER: u32 = 1000;

/// Rounded-up value-axis ceiling derived from the true data maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustedMax {
    /// `c * 10^k` with `c` in `{5, 10}`, never below the input maximum.
    pub adjusted_max: f64,
    /// `adjusted_max` divided by `presentation_multiplier`.
    pub presentation_max: f64,
    /// Either 1 or [`PRESENTATION_MULTIPLIER`].
    pub presentation_multiplier: u32,
    /// Decimal places used by tick labels; 0 once the ceiling is at least 1.
    pub fixed_digits: usize,
}

impl AdjustedMax {
    /// Formats one tick value using this axis' precision.
    #[must_use]
    pub fn format_tick(&self, value: f64) -> String {
        if self.fixed_digits != 0 {
            format_fixed(value, self.fixed_digits)
        } else {
            format_plain(value)
        }
    }
}

/// Computes the "nice" axis ceiling for a maximum raw value.
///
/// `None` means no series uses the axis and yields `None`. A zero maximum skips
/// normalization and lands on a ceiling of 5.
#[must_use]
pub fn calculate_adjusted_max(max: Option<f64>) -> Option<AdjustedMax> {
    let max = max?;

    let mut curr = max;
    let mut factor = 1.0_f64;
    let mut iterations = 0usize;
    if max > 0.0 && max.is_finite() {
        while !(1.0..=10.0).contains(&curr) {
            if curr < 1.0 {
                curr *= 10.0;
                factor /= 10.0;
            } else {
                curr /= 10.0;
                factor *= 10.0;
            }
            iterations += 1;
        }
    }

    let rounded = if curr <= 5.0 { 5.0 } else { 10.0 };
    let fixed_digits = if factor >= 1.0 { 0 } else { iterations };
    let adjusted_max = factor * rounded;

    let (presentation_max, presentation_multiplier) = if adjusted_max > PRESENTATION_THRESHOLD {
        (
            adjusted_max / f64::from(PRESENTATION_MULTIPLIER),
            PRESENTATION_MULTIPLIER,
        )
    } else {
        (adjusted_max, 1)
    };

    Some(AdjustedMax {
        adjusted_max,
        presentation_max,
        presentation_multiplier,
        fixed_digits,
    })
}
