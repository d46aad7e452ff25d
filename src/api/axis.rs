use std::iter;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::api::config::{AxisConfig, AxisConfigUpdate};
use crate::core::{AdjustedMax, Formatter, PlotArea, SlotPool, ValueAxisSide, ValueFormatter};
use crate::render::{BaselineShift, Color, LabelStyle, ObjectId, Stroke, Surface, TextHAlign};

/// Band reserved per label row, as a multiple of its font size.
pub const LABEL_MULT: f64 = 1.5;
/// Width reserved for value-axis tick labels, as a multiple of their font size.
pub const TICK_LABEL_FONT_MULT: f64 = 3.5;
/// Category axes with more groups than this draw no ticks at all.
pub const MAX_CATEGORY_TICK_NUM: usize = 25;
/// Horizontal budget of one category label, as a multiple of its font size.
pub const FONT_MULT_FOR_TICK_LABEL: f64 = 6.0;

/// Which edge of the plot an axis is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisKind {
    /// Bottom axis with one tick per bar group.
    Category,
    /// Numeric axis on the left or right edge.
    Value(ValueAxisSide),
}

impl AxisKind {
    /// Direction in which the axis' bands move the layout cursor.
    fn growth(self) -> f64 {
        match self {
            Self::Value(ValueAxisSide::Left) => 1.0,
            Self::Value(ValueAxisSide::Right) | Self::Category => -1.0,
        }
    }
}

/// How many category ticks and labels fit for one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CategoryTickPlan {
    pub tick_count: usize,
    pub label_count: usize,
}

/// Decides category tick density.
///
/// More than [`MAX_CATEGORY_TICK_NUM`] groups suppress everything; labels are
/// dropped when their budget exceeds the pixels available per group or when
/// the caller has no labels.
#[must_use]
pub fn plan_category_ticks(
    group_count: usize,
    plot_width: f64,
    tick_label_font_size: f64,
    has_labels: bool,
) -> CategoryTickPlan {
    if group_count > MAX_CATEGORY_TICK_NUM {
        return CategoryTickPlan {
            tick_count: 0,
            label_count: 0,
        };
    }
    let fits = group_count > 0
        && FONT_MULT_FOR_TICK_LABEL * tick_label_font_size <= plot_width / group_count as f64;
    CategoryTickPlan {
        tick_count: group_count,
        label_count: if has_labels && fits { group_count } else { 0 },
    }
}

/// Tick label texts `0, step, 2·step, ..` up to the presentation ceiling.
#[must_use]
pub fn value_tick_texts(adjusted: &AdjustedMax, tick_num: usize) -> SmallVec<[String; 8]> {
    let gap = if tick_num == 0 {
        0.0
    } else {
        adjusted.presentation_max / tick_num as f64
    };
    let mut curr = 0.0;
    let mut texts = SmallVec::new();
    for _ in 0..=tick_num {
        texts.push(adjusted.format_tick(curr));
        curr += gap;
    }
    texts
}

/// Units caption: formatter unit plus the presentation multiplier, if any.
#[must_use]
pub fn units_text(formatter: Option<&Formatter>, adjusted: &AdjustedMax) -> String {
    let mut text = formatter
        .and_then(|formatter| formatter.unit_label())
        .unwrap_or_default()
        .to_owned();
    if adjusted.presentation_multiplier != 1 {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&format!("(x{})", adjusted.presentation_multiplier));
    }
    text
}

/// One chart axis and the surface objects it owns.
///
/// Category axes ignore units, grid lines and `tick_num`; their ticks follow
/// the bar groups instead.
#[derive(Debug)]
pub struct Axis {
    kind: AxisKind,
    config: AxisConfig,
    ticks_enabled: bool,
    tick_labels_enabled: bool,
    axis_line: ObjectId,
    title_label: Option<ObjectId>,
    units_label: Option<ObjectId>,
    tick_lines: SlotPool<ObjectId>,
    tick_labels: SlotPool<ObjectId>,
    grid_lines: SlotPool<ObjectId>,
    title_pos: f64,
    units_pos: f64,
}

impl Axis {
    pub fn new<S: Surface>(surface: &mut S, kind: AxisKind, config: &AxisConfig) -> Self {
        let mut config = config.clone();
        let is_category = kind == AxisKind::Category;
        if is_category {
            config.units_enabled = false;
            config.grid_lines_enabled = false;
            config.tick_num = 0;
        }
        let ticks_enabled = config.ticks_enabled.unwrap_or(!is_category);
        // Tick labels hang off the ticks.
        let tick_labels_enabled =
            ticks_enabled && config.tick_labels_enabled.unwrap_or(!is_category);

        let mut grid_lines = SlotPool::new();
        if config.grid_lines_enabled {
            let stroke = Stroke::new(config.grid_lines_stroke_width, config.grid_lines_color);
            grid_lines.resize_with(
                config.tick_num,
                surface,
                |surface, _| surface.create_line(stroke),
                |surface, id| surface.remove_object(id),
            );
        }

        let axis_line = surface.create_line(Stroke::new(config.stroke_width, config.axis_color));
        let mut axis = Self {
            kind,
            config,
            ticks_enabled,
            tick_labels_enabled,
            axis_line,
            title_label: None,
            units_label: None,
            tick_lines: SlotPool::new(),
            tick_labels: SlotPool::new(),
            grid_lines,
            title_pos: 0.0,
            units_pos: 0.0,
        };
        if axis.config.title.is_some() {
            axis.title_label = Some(surface.create_label(axis.title_style()));
        }
        if axis.config.units_enabled {
            axis.units_label = Some(surface.create_label(axis.units_style()));
        }
        if !is_category {
            let tick_count = axis.config.tick_num + 1;
            axis.size_ticks(surface, tick_count, tick_count);
        }
        axis.update_title(surface);
        axis
    }

    #[must_use]
    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    /// Effective configuration, with category overrides applied.
    #[must_use]
    pub fn config(&self) -> &AxisConfig {
        &self.config
    }

    #[must_use]
    pub fn formatter(&self) -> Option<&Formatter> {
        self.config.formatter.as_ref()
    }

    #[must_use]
    pub fn ticks_enabled(&self) -> bool {
        self.ticks_enabled
    }

    #[must_use]
    pub fn tick_labels_enabled(&self) -> bool {
        self.tick_labels_enabled
    }

    #[must_use]
    pub fn axis_line(&self) -> ObjectId {
        self.axis_line
    }

    #[must_use]
    pub fn title_label(&self) -> Option<ObjectId> {
        self.title_label
    }

    #[must_use]
    pub fn units_label(&self) -> Option<ObjectId> {
        self.units_label
    }

    #[must_use]
    pub fn tick_lines(&self) -> &[ObjectId] {
        self.tick_lines.as_slice()
    }

    #[must_use]
    pub fn tick_labels(&self) -> &[ObjectId] {
        self.tick_labels.as_slice()
    }

    #[must_use]
    pub fn grid_lines(&self) -> &[ObjectId] {
        self.grid_lines.as_slice()
    }

    /// Reserves this axis' bands starting at `cursor` and returns the new cursor.
    ///
    /// The left axis advances rightwards from the left border; the right axis
    /// and the category axis retreat from the right and bottom borders.
    pub fn calc_sizes(&mut self, cursor: f64) -> f64 {
        let mult = self.kind.growth();
        let mut cursor = cursor;
        if self.title_label.is_some() {
            self.title_pos = cursor;
            cursor += mult * LABEL_MULT * self.config.title_font_size;
        }
        if self.units_label.is_some() {
            self.units_pos = cursor;
            cursor += mult * LABEL_MULT * self.config.units_font_size;
        }
        if self.ticks_enabled {
            if self.tick_labels_enabled {
                let band = match self.kind {
                    AxisKind::Category => LABEL_MULT,
                    AxisKind::Value(_) => TICK_LABEL_FONT_MULT,
                };
                cursor += mult * band * self.config.tick_label_font_size;
            }
            cursor += mult * 2.0 * self.config.tick_length;
        }
        cursor
    }

    /// Positions the axis line, captions, value ticks and grid lines.
    ///
    /// Category ticks depend on the bar groups and are placed by
    /// [`Axis::update_category`].
    pub fn resize<S: Surface>(&self, surface: &mut S, plot: &PlotArea) {
        self.place_caption(surface, self.title_label, self.title_pos, plot);
        self.place_caption(surface, self.units_label, self.units_pos, plot);

        let side = match self.kind {
            AxisKind::Category => {
                let y = plot.to_chart_y(0.0);
                surface.set_line_limits(
                    self.axis_line,
                    plot.to_chart_x(0.0),
                    y,
                    plot.to_chart_x(1.0),
                    y,
                );
                return;
            }
            AxisKind::Value(side) => side,
        };

        let (x, tick_dir) = match side {
            ValueAxisSide::Left => (plot.to_chart_x(0.0), -1.0),
            ValueAxisSide::Right => (plot.to_chart_x(1.0), 1.0),
        };
        surface.set_line_limits(self.axis_line, x, plot.to_chart_y(0.0), x, plot.axis_top_y);

        let tick_num = self.config.tick_num;
        let gap = if tick_num == 0 {
            0.0
        } else {
            1.0 / tick_num as f64
        };
        let tick_length = self.config.tick_length;
        let mut curr = 0.0;
        for index in 0..=tick_num {
            let y = plot.to_chart_y(curr);
            if let Some(&tick) = self.tick_lines.get(index) {
                surface.set_line_limits(tick, x, y, x + tick_dir * tick_length, y);
            }
            if let Some(&label) = self.tick_labels.get(index) {
                surface.set_position(label, x + 2.0 * tick_length * tick_dir, y);
            }
            if let Some(&grid) = index.checked_sub(1).and_then(|slot| self.grid_lines.get(slot)) {
                surface.set_line_limits(grid, plot.to_chart_x(0.0), y, plot.to_chart_x(1.0), y);
            }
            curr += gap;
        }
    }

    /// Relabels units and ticks for a new ceiling.
    ///
    /// With no ceiling (no series on this axis) only the title is resynced.
    pub fn update<S: Surface>(&mut self, surface: &mut S, adjusted: Option<&AdjustedMax>) {
        self.update_title(surface);
        let Some(adjusted) = adjusted else {
            return;
        };

        if let Some(units) = self.units_label {
            surface.set_text(units, &units_text(self.formatter(), adjusted));
        }
        if self.kind == AxisKind::Category {
            return;
        }
        let texts = value_tick_texts(adjusted, self.config.tick_num);
        for (&label, text) in self.tick_labels.iter().zip(&texts) {
            surface.set_text(label, text);
        }
        trace!(
            axis = ?self.kind,
            presentation_max = adjusted.presentation_max,
            multiplier = adjusted.presentation_multiplier,
            tick_labels = self.tick_labels.len(),
            "axis ticks relabeled"
        );
    }

    /// Applies a sparse title/formatter change.
    ///
    /// Adding or clearing a title creates or removes its label, so the caller
    /// must lay the chart out again.
    pub fn update_attributes<S: Surface>(&mut self, surface: &mut S, update: &AxisConfigUpdate) {
        if let Some(title) = &update.title {
            self.config.title.clone_from(title);
            match (self.title_label, title.is_some()) {
                (None, true) => self.title_label = Some(surface.create_label(self.title_style())),
                (Some(id), false) => {
                    surface.remove_object(id);
                    self.title_label = None;
                }
                _ => {}
            }
        }
        if let Some(formatter) = &update.formatter {
            self.config.formatter.clone_from(formatter);
        }
        self.update_title(surface);
    }

    /// Places one tick per group center, subject to [`plan_category_ticks`].
    ///
    /// Returns the ticks and labels actually drawn, which are zero when this
    /// axis has ticks disabled.
    pub fn update_category<S: Surface>(
        &mut self,
        surface: &mut S,
        plot: &PlotArea,
        tick_xs: &[f64],
        labels: Option<&[String]>,
    ) -> CategoryTickPlan {
        let plan = plan_category_ticks(
            tick_xs.len(),
            plot.width,
            self.config.tick_label_font_size,
            labels.is_some(),
        );
        self.size_ticks(surface, plan.tick_count, plan.label_count);

        let y = plot.to_chart_y(0.0);
        let tick_length = self.config.tick_length;
        for (&tick, &tick_x) in self.tick_lines.iter().zip(tick_xs) {
            let x = plot.to_chart_x(tick_x);
            surface.set_line_limits(tick, x, y, x, y + tick_length);
        }
        for (index, (&label, &tick_x)) in self.tick_labels.iter().zip(tick_xs).enumerate() {
            let text = labels
                .and_then(|labels| labels.get(index))
                .map_or("", String::as_str);
            surface.set_position(label, plot.to_chart_x(tick_x), y + 2.0 * tick_length);
            surface.set_text(label, text);
        }
        CategoryTickPlan {
            tick_count: self.tick_lines.len(),
            label_count: self.tick_labels.len(),
        }
    }

    /// Raises every axis object except the grid lines above the bars.
    pub fn bring_to_front<S: Surface>(&self, surface: &mut S) {
        let raised = iter::once(self.axis_line)
            .chain(self.tick_lines.iter().copied())
            .chain(self.tick_labels.iter().copied())
            .chain(self.title_label)
            .chain(self.units_label);
        for id in raised {
            surface.bring_to_front(id);
        }
    }

    fn update_title<S: Surface>(&self, surface: &mut S) {
        if let (Some(id), Some(title)) = (self.title_label, &self.config.title) {
            surface.set_text(id, title);
        }
    }

    fn size_ticks<S: Surface>(&mut self, surface: &mut S, tick_count: usize, label_count: usize) {
        let tick_count = if self.ticks_enabled { tick_count } else { 0 };
        let label_count = if self.tick_labels_enabled {
            label_count
        } else {
            0
        };

        let stroke = Stroke::new(self.config.stroke_width, self.config.tick_color);
        self.tick_lines.resize_with(
            tick_count,
            surface,
            |surface, _| surface.create_line(stroke),
            |surface, id| surface.remove_object(id),
        );
        let style = self.tick_label_style();
        self.tick_labels.resize_with(
            label_count,
            surface,
            |surface, _| surface.create_label(style.clone()),
            |surface, id| surface.remove_object(id),
        );
    }

    fn place_caption<S: Surface>(
        &self,
        surface: &mut S,
        label: Option<ObjectId>,
        pos: f64,
        plot: &PlotArea,
    ) {
        let Some(id) = label else {
            return;
        };
        match self.kind {
            AxisKind::Category => surface.set_position(id, plot.to_chart_x(0.5), pos),
            AxisKind::Value(side) => {
                let y = plot.to_chart_y(0.5);
                let degrees = match side {
                    ValueAxisSide::Left => -90.0,
                    ValueAxisSide::Right => 90.0,
                };
                surface.set_position(id, pos, y);
                surface.rotate(id, pos, y, degrees);
            }
        }
    }

    fn caption_baseline(&self) -> BaselineShift {
        match self.kind {
            AxisKind::Category => BaselineShift::Baseline,
            AxisKind::Value(_) => BaselineShift::Sub,
        }
    }

    fn title_style(&self) -> LabelStyle {
        self.label_style(
            self.config.title_font_size,
            self.config.title_color,
            TextHAlign::Center,
            self.caption_baseline(),
        )
    }

    fn units_style(&self) -> LabelStyle {
        self.label_style(
            self.config.units_font_size,
            self.config.units_color,
            TextHAlign::Center,
            self.caption_baseline(),
        )
    }

    fn tick_label_style(&self) -> LabelStyle {
        let (h_align, baseline) = match self.kind {
            AxisKind::Category => (TextHAlign::Center, BaselineShift::Sub),
            AxisKind::Value(ValueAxisSide::Left) => (TextHAlign::Right, BaselineShift::Baseline),
            AxisKind::Value(ValueAxisSide::Right) => (TextHAlign::Left, BaselineShift::Baseline),
        };
        self.label_style(
            self.config.tick_label_font_size,
            self.config.tick_label_color,
            h_align,
            baseline,
        )
    }

    fn label_style(
        &self,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
        baseline: BaselineShift,
    ) -> LabelStyle {
        LabelStyle {
            font_family: self.config.font_family.clone(),
            font_size_px,
            color,
            h_align,
            baseline,
        }
    }
}
