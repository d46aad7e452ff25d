use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{Formatter, ValueAxisSide};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

pub const DEFAULT_FONT_FAMILY: &str = "Arial";
pub const DEFAULT_FONT_SIZE: f64 = 10.0;
pub const MAIN_TITLE_FONT_SIZE: f64 = 14.0;
pub const SUB_TITLE_FONT_SIZE: f64 = 13.0;
pub const AXIS_TITLE_FONT_SIZE: f64 = 13.0;
pub const AXIS_UNITS_FONT_SIZE: f64 = 12.0;
pub const AXIS_TICK_LABEL_FONT_SIZE: f64 = DEFAULT_FONT_SIZE;
pub const BAR_LABEL_FONT_SIZE: f64 = DEFAULT_FONT_SIZE;

pub const BORDER_PADDING: f64 = 8.0;
pub const AXIS_STROKE_WIDTH: f64 = 2.0;
pub const AXIS_TICK_NUM: usize = 5;
pub const AXIS_TICK_LENGTH: f64 = 4.0;
pub const GRID_LINES_STROKE_WIDTH: f64 = 1.0;

pub const LEGEND_WIDTH: f64 = 200.0;
pub const LEGEND_BOX_SIZE: f64 = 16.0;
pub const LEGEND_FONT_SIZE: f64 = DEFAULT_FONT_SIZE;

/// Series fill colors, assigned by series index (wrapping).
pub const SERIES_COLORS: [Color; 15] = [
    Color::DARK_RED,
    Color::DARK_GREEN,
    Color::DARK_BLUE,
    Color::TOMATO,
    Color::ORANGE,
    Color::MAGENTA,
    Color::SALMON,
    Color::GOLD,
    Color::DEEP_SKY_BLUE,
    Color::FIRE_BRICK,
    Color::KHAKI,
    Color::DEEP_PINK,
    Color::PLUM,
    Color::LEMON_CHIFFON,
    Color::LAVENDER,
];

/// One plotted series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub name: String,
    #[serde(default)]
    pub axis: ValueAxisSide,
}

impl SeriesConfig {
    #[must_use]
    pub fn new(name: impl Into<String>, axis: ValueAxisSide) -> Self {
        Self {
            name: name.into(),
            axis,
        }
    }

    #[must_use]
    pub fn left(name: impl Into<String>) -> Self {
        Self::new(name, ValueAxisSide::Left)
    }

    #[must_use]
    pub fn right(name: impl Into<String>) -> Self {
        Self::new(name, ValueAxisSide::Right)
    }
}

/// Static configuration of one axis.
///
/// Category axes ignore `units_enabled`, `grid_lines_enabled` and `tick_num`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    pub title: Option<String>,
    pub formatter: Option<Formatter>,
    pub units_enabled: bool,
    /// `None` resolves to enabled on value axes and disabled on the category axis.
    pub ticks_enabled: Option<bool>,
    /// `None` resolves like `ticks_enabled`.
    pub tick_labels_enabled: Option<bool>,
    pub grid_lines_enabled: bool,
    pub font_family: String,
    pub title_font_size: f64,
    pub units_font_size: f64,
    pub tick_label_font_size: f64,
    pub stroke_width: f64,
    pub tick_num: usize,
    pub tick_length: f64,
    pub grid_lines_stroke_width: f64,
    pub axis_color: Color,
    pub title_color: Color,
    pub units_color: Color,
    pub tick_color: Color,
    pub tick_label_color: Color,
    pub grid_lines_color: Color,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            title: None,
            formatter: None,
            units_enabled: true,
            ticks_enabled: None,
            tick_labels_enabled: None,
            grid_lines_enabled: false,
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            title_font_size: AXIS_TITLE_FONT_SIZE,
            units_font_size: AXIS_UNITS_FONT_SIZE,
            tick_label_font_size: AXIS_TICK_LABEL_FONT_SIZE,
            stroke_width: AXIS_STROKE_WIDTH,
            tick_num: AXIS_TICK_NUM,
            tick_length: AXIS_TICK_LENGTH,
            grid_lines_stroke_width: GRID_LINES_STROKE_WIDTH,
            axis_color: Color::BLACK,
            title_color: Color::BLACK,
            units_color: Color::BLACK,
            tick_color: Color::BLACK,
            tick_label_color: Color::BLACK,
            grid_lines_color: Color::LIGHT_GRAY,
        }
    }
}

impl AxisConfig {
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: impl Into<Formatter>) -> Self {
        self.formatter = Some(formatter.into());
        self
    }

    #[must_use]
    pub fn with_ticks(mut self, ticks_enabled: bool, tick_labels_enabled: bool) -> Self {
        self.ticks_enabled = Some(ticks_enabled);
        self.tick_labels_enabled = Some(tick_labels_enabled);
        self
    }

    #[must_use]
    pub fn with_grid_lines(mut self, enabled: bool) -> Self {
        self.grid_lines_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_tick_num(mut self, tick_num: usize) -> Self {
        self.tick_num = tick_num;
        self
    }

    pub fn validate(&self, name: &str) -> ChartResult<()> {
        for (field, value) in [
            ("title_font_size", self.title_font_size),
            ("units_font_size", self.units_font_size),
            ("tick_label_font_size", self.tick_label_font_size),
            ("stroke_width", self.stroke_width),
            ("grid_lines_stroke_width", self.grid_lines_stroke_width),
        ] {
            require_positive(&format!("{name}.{field}"), value)?;
        }
        if !self.tick_length.is_finite() || self.tick_length < 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "{name}.tick_length must be finite and >= 0"
            )));
        }
        for color in [
            self.axis_color,
            self.title_color,
            self.units_color,
            self.tick_color,
            self.tick_label_color,
            self.grid_lines_color,
        ] {
            color.validate()?;
        }
        Ok(())
    }
}

/// Side panel listing series swatches and names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    pub enabled: bool,
    pub width: f64,
    pub box_size: f64,
    pub font_size: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            width: LEGEND_WIDTH,
            box_size: LEGEND_BOX_SIZE,
            font_size: LEGEND_FONT_SIZE,
        }
    }
}

/// Construction-time configuration of a [`super::BarChart`].
///
/// Every key has a default so hosts can load sparse JSON documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarChartConfig {
    pub series: Vec<SeriesConfig>,
    pub stacked: bool,
    pub x_axis: Option<AxisConfig>,
    pub left_axis: Option<AxisConfig>,
    pub right_axis: Option<AxisConfig>,
    pub main_title: Option<String>,
    pub sub_title: Option<String>,
    pub border_padding: f64,
    pub font_family: String,
    pub main_title_font_size: f64,
    pub sub_title_font_size: f64,
    pub main_title_color: Color,
    pub sub_title_color: Color,
    pub series_colors: Vec<Color>,
    pub legend: LegendConfig,
    pub bar_label_font_size: f64,
    pub bar_label_color: Color,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            series: Vec::new(),
            stacked: false,
            x_axis: None,
            left_axis: None,
            right_axis: None,
            main_title: None,
            sub_title: None,
            border_padding: BORDER_PADDING,
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            main_title_font_size: MAIN_TITLE_FONT_SIZE,
            sub_title_font_size: SUB_TITLE_FONT_SIZE,
            main_title_color: Color::BLACK,
            sub_title_color: Color::BLACK,
            series_colors: SERIES_COLORS.to_vec(),
            legend: LegendConfig::default(),
            bar_label_font_size: BAR_LABEL_FONT_SIZE,
            bar_label_color: Color::BLACK,
        }
    }
}

impl BarChartConfig {
    /// Creates a grouped chart with a category axis and a left value axis.
    #[must_use]
    pub fn new(series: Vec<SeriesConfig>) -> Self {
        Self {
            series,
            x_axis: Some(AxisConfig::default()),
            left_axis: Some(AxisConfig::default()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn stacked(mut self, stacked: bool) -> Self {
        self.stacked = stacked;
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, axis: Option<AxisConfig>) -> Self {
        self.x_axis = axis;
        self
    }

    #[must_use]
    pub fn with_left_axis(mut self, axis: Option<AxisConfig>) -> Self {
        self.left_axis = axis;
        self
    }

    #[must_use]
    pub fn with_right_axis(mut self, axis: Option<AxisConfig>) -> Self {
        self.right_axis = axis;
        self
    }

    #[must_use]
    pub fn with_titles(mut self, main_title: Option<&str>, sub_title: Option<&str>) -> Self {
        self.main_title = main_title.map(str::to_owned);
        self.sub_title = sub_title.map(str::to_owned);
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: LegendConfig) -> Self {
        self.legend = legend;
        self
    }

    #[must_use]
    pub fn value_axis(&self, side: ValueAxisSide) -> Option<&AxisConfig> {
        match side {
            ValueAxisSide::Left => self.left_axis.as_ref(),
            ValueAxisSide::Right => self.right_axis.as_ref(),
        }
    }

    /// Fill color of the series at `index`.
    #[must_use]
    pub fn series_color(&self, index: usize) -> Color {
        if self.series_colors.is_empty() {
            return SERIES_COLORS[index % SERIES_COLORS.len()];
        }
        self.series_colors[index % self.series_colors.len()]
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.validate_series(&self.series)?;
        if !self.border_padding.is_finite() || self.border_padding < 0.0 {
            return Err(ChartError::InvalidConfig(
                "border_padding must be finite and >= 0".to_owned(),
            ));
        }
        for (field, value) in [
            ("main_title_font_size", self.main_title_font_size),
            ("sub_title_font_size", self.sub_title_font_size),
            ("bar_label_font_size", self.bar_label_font_size),
            ("legend.width", self.legend.width),
            ("legend.box_size", self.legend.box_size),
            ("legend.font_size", self.legend.font_size),
        ] {
            require_positive(field, value)?;
        }
        for color in self
            .series_colors
            .iter()
            .chain([&self.main_title_color, &self.sub_title_color, &self.bar_label_color])
        {
            color.validate()?;
        }
        for (name, axis) in [
            ("x_axis", &self.x_axis),
            ("left_axis", &self.left_axis),
            ("right_axis", &self.right_axis),
        ] {
            if let Some(axis) = axis {
                axis.validate(name)?;
            }
        }
        Ok(())
    }

    /// Checks that every series is plotted against a configured value axis.
    pub fn validate_series(&self, series: &[SeriesConfig]) -> ChartResult<()> {
        for entry in series {
            if self.value_axis(entry.axis).is_none() {
                return Err(ChartError::InvalidConfig(format!(
                    "series `{}` uses the {:?} value axis, which is not configured",
                    entry.name, entry.axis
                )));
            }
        }
        Ok(())
    }
}

/// Sparse update of an axis' title and formatter.
///
/// Outer `None` leaves the field unchanged; `Some(None)` clears it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AxisConfigUpdate {
    #[serde(deserialize_with = "deserialize_present")]
    pub title: Option<Option<String>>,
    #[serde(deserialize_with = "deserialize_present")]
    pub formatter: Option<Option<Formatter>>,
}

impl AxisConfigUpdate {
    #[must_use]
    pub fn with_title(mut self, title: Option<&str>) -> Self {
        self.title = Some(title.map(str::to_owned));
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Option<Formatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Merges the present fields into `config`.
    pub fn apply_to(&self, config: &mut AxisConfig) {
        if let Some(title) = &self.title {
            config.title.clone_from(title);
        }
        if let Some(formatter) = &self.formatter {
            config.formatter.clone_from(formatter);
        }
    }
}

/// Sparse update merged into a live chart by `BarChart::update_config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BarChartConfigUpdate {
    pub series: Option<Vec<SeriesConfig>>,
    #[serde(deserialize_with = "deserialize_present")]
    pub main_title: Option<Option<String>>,
    #[serde(deserialize_with = "deserialize_present")]
    pub sub_title: Option<Option<String>>,
    pub x_axis: Option<AxisConfigUpdate>,
    pub left_axis: Option<AxisConfigUpdate>,
    pub right_axis: Option<AxisConfigUpdate>,
}

impl BarChartConfigUpdate {
    #[must_use]
    pub fn with_series(mut self, series: Vec<SeriesConfig>) -> Self {
        self.series = Some(series);
        self
    }

    #[must_use]
    pub fn with_main_title(mut self, title: Option<&str>) -> Self {
        self.main_title = Some(title.map(str::to_owned));
        self
    }

    #[must_use]
    pub fn with_sub_title(mut self, title: Option<&str>) -> Self {
        self.sub_title = Some(title.map(str::to_owned));
        self
    }

    #[must_use]
    pub fn with_value_axis(mut self, side: ValueAxisSide, update: AxisConfigUpdate) -> Self {
        match side {
            ValueAxisSide::Left => self.left_axis = Some(update),
            ValueAxisSide::Right => self.right_axis = Some(update),
        }
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, update: AxisConfigUpdate) -> Self {
        self.x_axis = Some(update);
        self
    }

    #[must_use]
    pub fn value_axis(&self, side: ValueAxisSide) -> Option<&AxisConfigUpdate> {
        match side {
            ValueAxisSide::Left => self.left_axis.as_ref(),
            ValueAxisSide::Right => self.right_axis.as_ref(),
        }
    }
}

/// Maps a present JSON value (including `null`) to `Some`, so a missing key
/// and an explicit `null` stay distinguishable.
fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn require_positive(field: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ChartError::InvalidConfig(format!(
            "{field} must be finite and > 0"
        )));
    }
    Ok(())
}
