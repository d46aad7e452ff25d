use serde::{Deserialize, Serialize};

use crate::core::scale::AdjustedMax;
use crate::core::types::{PerSide, ValueAxisSide};

/// Share of the plot width reserved for gaps between groups, in percent.
pub const GROUP_GAP_PERCENT: f64 = 6.0;
/// Per-side inset of each bar, in percent of the bar slot width.
pub const BAR_GAP_PERCENT: f64 = 2.0;

/// Transformed samples of one series together with its value axis.
#[derive(Debug, Clone, Copy)]
pub struct SeriesValues<'a> {
    pub side: ValueAxisSide,
    pub values: &'a [f64],
}

/// One bar in normalized plot space.
///
/// `top` is the normalized height of the bar's upper edge; the bar spans
/// `top - height ..= top` vertically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BarRect {
    pub x: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Anchor of one value label, centered above its bar (or stack).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarLabelAnchor {
    pub x: f64,
    pub y: f64,
    pub value: f64,
    pub side: ValueAxisSide,
}

/// Normalized bar geometry for one update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BarLayout {
    pub group_count: usize,
    pub vertical_bar_count: usize,
    pub group_gap: f64,
    /// Horizontal slot per vertical bar, including its insets.
    pub bar_width: f64,
    pub bar_gap: f64,
    /// Drawn bar width, `bar_width` minus both insets.
    pub adjusted_bar_width: f64,
    /// Indexed `[series][sample]`, parallel to the input series.
    pub bars: Vec<Vec<BarRect>>,
    pub labels: Vec<BarLabelAnchor>,
    /// Center of each group's horizontal span.
    pub tick_xs: Vec<f64>,
}

/// Largest value the given axis must show.
///
/// Stacked mode maximizes the per-index sum over the axis' series; grouped
/// mode takes the largest single sample. `None` when no series uses the axis.
#[must_use]
pub fn series_maximum(series: &[SeriesValues<'_>], side: ValueAxisSide, stacked: bool) -> Option<f64> {
    let on_side: Vec<&[f64]> = series
        .iter()
        .filter(|entry| entry.side == side)
        .map(|entry| entry.values)
        .collect();
    if on_side.is_empty() {
        return None;
    }

    let mut max = 0.0_f64;
    if stacked {
        let longest = on_side.iter().map(|values| values.len()).max().unwrap_or(0);
        for index in 0..longest {
            let sum: f64 = on_side
                .iter()
                .filter_map(|values| values.get(index))
                .sum();
            max = max.max(sum);
        }
    } else {
        for value in on_side.iter().flat_map(|values| values.iter()) {
            max = max.max(*value);
        }
    }
    Some(max)
}

/// Lays out every bar, value-label anchor and category tick in normalized space.
///
/// Grouped mode places each series side by side inside a group; stacked mode
/// places one stack per value axis in each group, accumulating series from
/// the highest index to the lowest.
#[must_use]
pub fn compute_bar_layout(
    series: &[SeriesValues<'_>],
    adjusted: PerSide<Option<AdjustedMax>>,
    axes_present: PerSide<bool>,
    stacked: bool,
) -> BarLayout {
    let group_count = series
        .iter()
        .map(|entry| entry.values.len())
        .max()
        .unwrap_or(0);
    let data_point_count: usize = series.iter().map(|entry| entry.values.len()).sum();
    let axes_used = ValueAxisSide::ALL
        .iter()
        .filter(|side| *axes_present.get(**side))
        .count();

    let (bar_count, vertical_bar_count) = if stacked {
        (group_count, axes_used * group_count)
    } else {
        (series.len(), data_point_count)
    };

    let mut layout = BarLayout {
        group_count,
        vertical_bar_count,
        bars: series
            .iter()
            .map(|entry| vec![BarRect::default(); entry.values.len()])
            .collect(),
        ..BarLayout::default()
    };
    if group_count == 0 || vertical_bar_count == 0 {
        return layout;
    }

    let (group_gap_total, group_gap) = if group_count > 1 && bar_count > 1 {
        let total = GROUP_GAP_PERCENT / 100.0;
        (total, total / (group_count + 1) as f64)
    } else {
        (0.0, 0.0)
    };
    let bar_width = (1.0 - group_gap_total) / vertical_bar_count as f64;
    let bar_gap = bar_width * BAR_GAP_PERCENT / 100.0;
    let adjusted_bar_width = bar_width - 2.0 * bar_gap;

    layout.group_gap = group_gap;
    layout.bar_width = bar_width;
    layout.bar_gap = bar_gap;
    layout.adjusted_bar_width = adjusted_bar_width;

    let ceiling = |side: ValueAxisSide| {
        adjusted
            .get(side)
            .as_ref()
            .map(|adjusted| adjusted.adjusted_max)
            .filter(|max| *max > 0.0)
    };
    let bar_height = |value: f64, side: ValueAxisSide| ceiling(side).map_or(0.0, |max| value / max);

    let mut x = group_gap;
    for index in 0..group_count {
        let group_start = x;
        if stacked {
            for side in ValueAxisSide::ALL {
                if !*axes_present.get(side) {
                    continue;
                }
                let bar_x = x + bar_gap;
                let mut top = 0.0;
                let mut sum = 0.0;
                for (series_index, entry) in series.iter().enumerate().rev() {
                    if entry.side != side {
                        continue;
                    }
                    let Some(value) = entry.values.get(index).copied() else {
                        continue;
                    };
                    sum += value;
                    let height = bar_height(value, side);
                    top += height;
                    layout.bars[series_index][index] = BarRect {
                        x: bar_x,
                        top,
                        width: adjusted_bar_width,
                        height,
                    };
                }
                layout.labels.push(BarLabelAnchor {
                    x: bar_x + adjusted_bar_width / 2.0,
                    y: top,
                    value: sum,
                    side,
                });
                x += bar_width;
            }
        } else {
            for (series_index, entry) in series.iter().enumerate() {
                let Some(value) = entry.values.get(index).copied() else {
                    continue;
                };
                let height = bar_height(value, entry.side);
                let bar_x = x + bar_gap;
                layout.bars[series_index][index] = BarRect {
                    x: bar_x,
                    top: height,
                    width: adjusted_bar_width,
                    height,
                };
                layout.labels.push(BarLabelAnchor {
                    x: bar_x + adjusted_bar_width / 2.0,
                    y: height,
                    value,
                    side: entry.side,
                });
                x += bar_width;
            }
        }
        layout.tick_xs.push(group_start + (x - group_start) / 2.0);
        x += group_gap;
    }

    layout
}

#[cfg(test)]
mod tests {
    use super::{SeriesValues, compute_bar_layout, series_maximum};
    use crate::core::scale::calculate_adjusted_max;
    use crate::core::types::{PerSide, ValueAxisSide};

    #[test]
    fn maximum_is_none_for_unused_axis() {
        let values = [1.0, 2.0];
        let series = [SeriesValues {
            side: ValueAxisSide::Left,
            values: &values,
        }];
        assert_eq!(series_maximum(&series, ValueAxisSide::Right, false), None);
        assert_eq!(series_maximum(&series, ValueAxisSide::Left, false), Some(2.0));
    }

    #[test]
    fn stacked_maximum_handles_ragged_series() {
        let a = [1.0, 2.0, 3.0];
        let b = [5.0];
        let series = [
            SeriesValues {
                side: ValueAxisSide::Left,
                values: &a,
            },
            SeriesValues {
                side: ValueAxisSide::Left,
                values: &b,
            },
        ];
        assert_eq!(series_maximum(&series, ValueAxisSide::Left, true), Some(6.0));
    }

    #[test]
    fn single_group_has_no_group_gap() {
        let a = [3.0];
        let b = [4.0];
        let series = [
            SeriesValues {
                side: ValueAxisSide::Left,
                values: &a,
            },
            SeriesValues {
                side: ValueAxisSide::Left,
                values: &b,
            },
        ];
        let adjusted = PerSide::new(calculate_adjusted_max(Some(4.0)), None);
        let layout = compute_bar_layout(&series, adjusted, PerSide::new(true, false), false);
        assert_eq!(layout.group_gap, 0.0);
        assert_eq!(layout.bar_width, 0.5);
        assert_eq!(layout.tick_xs, vec![0.5]);
    }

    #[test]
    fn empty_input_yields_empty_layout() {
        let layout = compute_bar_layout(&[], PerSide::default(), PerSide::new(true, true), true);
        assert_eq!(layout.group_count, 0);
        assert_eq!(layout.bar_width, 0.0);
        assert!(layout.tick_xs.is_empty());
        assert!(layout.labels.is_empty());
    }
}
