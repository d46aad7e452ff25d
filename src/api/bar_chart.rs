use tracing::{debug, trace, warn};

use crate::api::axis::{Axis, AxisKind, CategoryTickPlan, LABEL_MULT};
use crate::api::config::{BarChartConfig, BarChartConfigUpdate};
use crate::api::legend::Legend;
use crate::api::snapshot::BarChartSnapshot;
use crate::core::formatter::{format_value, transform_value};
use crate::core::{
    AdjustedMax, BarLayout, PerSide, PlotArea, SeriesValues, SlotPool, ValueAxisSide, Viewport,
    calculate_adjusted_max, compute_bar_layout, series_maximum,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    BaselineShift, Color, LabelStyle, ObjectId, RecordingSurface, Renderer, Surface, TextHAlign,
};

/// Bars narrower than this many bar-label font sizes get no value labels.
pub const FONT_MULT_FOR_BAR_LABEL: f64 = 4.0;

/// Bar chart bound to one drawing surface.
///
/// The chart owns every object it creates on the surface. `resize` lays out
/// the frame, `update` recomputes scales and bar geometry, and
/// `update_config` merges sparse configuration changes into the live chart.
#[derive(Debug)]
pub struct BarChart<S: Surface> {
    surface: S,
    config: BarChartConfig,
    main_title_label: Option<ObjectId>,
    sub_title_label: Option<ObjectId>,
    x_axis: Option<Axis>,
    value_axes: PerSide<Option<Axis>>,
    legend: Option<Legend>,
    /// One pool per configured series.
    bars: Vec<SlotPool<ObjectId>>,
    bar_labels: SlotPool<ObjectId>,
    viewport: Option<Viewport>,
    plot: PlotArea,
    /// Raw samples of the last update, one entry per configured series.
    data: Vec<Vec<f64>>,
    category_labels: Option<Vec<String>>,
    has_data: bool,
    maxima: PerSide<Option<f64>>,
    adjusted: PerSide<Option<AdjustedMax>>,
    layout: BarLayout,
    category_ticks: CategoryTickPlan,
}

impl<S: Surface> BarChart<S> {
    pub fn new(mut surface: S, config: BarChartConfig) -> ChartResult<Self> {
        config.validate()?;

        let main_title_label = config.main_title.as_ref().map(|_| {
            surface.create_label(title_style(
                &config,
                config.main_title_font_size,
                config.main_title_color,
            ))
        });
        let sub_title_label = config.sub_title.as_ref().map(|_| {
            surface.create_label(title_style(
                &config,
                config.sub_title_font_size,
                config.sub_title_color,
            ))
        });
        let x_axis = config
            .x_axis
            .as_ref()
            .map(|axis| Axis::new(&mut surface, AxisKind::Category, axis));
        let mut value_axes = PerSide::new(None, None);
        for side in ValueAxisSide::ALL {
            *value_axes.get_mut(side) = config
                .value_axis(side)
                .map(|axis| Axis::new(&mut surface, AxisKind::Value(side), axis));
        }
        let legend = config
            .legend
            .enabled
            .then(|| Legend::new(config.legend, &config.font_family));

        let mut chart = Self {
            surface,
            main_title_label,
            sub_title_label,
            x_axis,
            value_axes,
            legend,
            bars: config.series.iter().map(|_| SlotPool::new()).collect(),
            bar_labels: SlotPool::new(),
            viewport: None,
            plot: PlotArea::default(),
            data: vec![Vec::new(); config.series.len()],
            category_labels: None,
            has_data: false,
            maxima: PerSide::default(),
            adjusted: PerSide::default(),
            layout: BarLayout::default(),
            category_ticks: CategoryTickPlan::default(),
            config,
        };
        chart.update_labels();
        debug!(
            series = chart.config.series.len(),
            stacked = chart.config.stacked,
            legend = chart.legend.is_some(),
            "bar chart created"
        );
        Ok(chart)
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Tears the chart down, handing back the surface with its objects.
    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    #[must_use]
    pub fn config(&self) -> &BarChartConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.plot
    }

    #[must_use]
    pub fn x_axis(&self) -> Option<&Axis> {
        self.x_axis.as_ref()
    }

    #[must_use]
    pub fn value_axis(&self, side: ValueAxisSide) -> Option<&Axis> {
        self.value_axes.get(side).as_ref()
    }

    #[must_use]
    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    #[must_use]
    pub fn main_title_label(&self) -> Option<ObjectId> {
        self.main_title_label
    }

    #[must_use]
    pub fn sub_title_label(&self) -> Option<ObjectId> {
        self.sub_title_label
    }

    /// Ceiling of a value axis from the last update.
    #[must_use]
    pub fn adjusted_max(&self, side: ValueAxisSide) -> Option<AdjustedMax> {
        *self.adjusted.get(side)
    }

    #[must_use]
    pub fn layout(&self) -> &BarLayout {
        &self.layout
    }

    /// Bar rectangles of one series, parallel to its samples.
    #[must_use]
    pub fn bar_objects(&self, series: usize) -> &[ObjectId] {
        self.bars.get(series).map(SlotPool::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn bar_label_objects(&self) -> &[ObjectId] {
        self.bar_labels.as_slice()
    }

    #[must_use]
    pub fn category_ticks(&self) -> CategoryTickPlan {
        self.category_ticks
    }

    #[must_use]
    pub fn snapshot(&self) -> BarChartSnapshot {
        BarChartSnapshot {
            viewport: self.viewport,
            plot_area: self.plot,
            stacked: self.config.stacked,
            series: self.config.series.clone(),
            maxima: self.maxima,
            adjusted: self.adjusted,
            layout: self.layout.clone(),
            bar_labels_visible: !self.bar_labels.is_empty(),
            category_ticks: self.category_ticks,
        }
    }

    /// Lays the chart out for a new outer size.
    ///
    /// The geometry of the last update is re-applied, so repeated calls with
    /// the same size are idempotent.
    pub fn resize(&mut self, width: f64, height: f64) -> ChartResult<()> {
        let viewport = Viewport::new(width, height);
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport { width, height });
        }
        self.viewport = Some(viewport);
        self.layout_frame(viewport);
        if self.has_data {
            self.redraw();
        }
        debug!(
            width,
            height,
            plot_x = self.plot.x,
            plot_y = self.plot.y,
            plot_width = self.plot.width,
            plot_height = self.plot.height,
            "bar chart resized"
        );
        Ok(())
    }

    /// Replots the chart from raw series samples.
    ///
    /// `series_data` is parallel to the configured series; missing entries
    /// plot as empty series and extra entries are ignored.
    pub fn update<D: AsRef<[f64]>>(&mut self, series_data: &[D]) {
        self.apply_data(series_data, None);
    }

    /// Like [`BarChart::update`], with one category-axis label per group.
    pub fn update_with_labels<D, L>(&mut self, series_data: &[D], labels: &[L])
    where
        D: AsRef<[f64]>,
        L: AsRef<str>,
    {
        let labels = labels.iter().map(|label| label.as_ref().to_owned()).collect();
        self.apply_data(series_data, Some(labels));
    }

    /// Merges a sparse configuration change into the live chart.
    ///
    /// The chart keeps its surface objects where it can; titles, axis
    /// captions, legend rows and bar pools are resynced and the last data is
    /// replotted.
    pub fn update_config(&mut self, mut update: BarChartConfigUpdate) -> ChartResult<()> {
        if let Some(series) = &update.series {
            self.config.validate_series(series)?;
        }

        if let Some(series) = update.series.take() {
            let count = series.len();
            while self.bars.len() > count {
                if let Some(mut pool) = self.bars.pop() {
                    pool.clear_with(&mut self.surface, |surface, id| surface.remove_object(id));
                }
            }
            self.bars.resize_with(count, SlotPool::new);
            self.data.resize(count, Vec::new());
            self.config.series = series;
        }

        if let Some(title) = update.main_title.take() {
            let style = title_style(
                &self.config,
                self.config.main_title_font_size,
                self.config.main_title_color,
            );
            sync_title_label(&mut self.surface, &mut self.main_title_label, title.is_some(), style);
            self.config.main_title = title;
        }
        if let Some(title) = update.sub_title.take() {
            let style = title_style(
                &self.config,
                self.config.sub_title_font_size,
                self.config.sub_title_color,
            );
            sync_title_label(&mut self.surface, &mut self.sub_title_label, title.is_some(), style);
            self.config.sub_title = title;
        }

        if let Some(axis_update) = &update.x_axis {
            if let Some(axis) = &mut self.x_axis {
                axis.update_attributes(&mut self.surface, axis_update);
            }
            if let Some(config) = &mut self.config.x_axis {
                axis_update.apply_to(config);
            }
        }
        for side in ValueAxisSide::ALL {
            let Some(axis_update) = update.value_axis(side) else {
                continue;
            };
            if let Some(axis) = self.value_axes.get_mut(side) {
                axis.update_attributes(&mut self.surface, axis_update);
            }
            let config = match side {
                ValueAxisSide::Left => &mut self.config.left_axis,
                ValueAxisSide::Right => &mut self.config.right_axis,
            };
            if let Some(config) = config {
                axis_update.apply_to(config);
            }
        }

        self.update_labels();
        if let Some(viewport) = self.viewport {
            self.layout_frame(viewport);
        }
        if self.has_data {
            self.redraw();
        }
        debug!(series = self.config.series.len(), "bar chart config updated");
        Ok(())
    }

    fn apply_data<D: AsRef<[f64]>>(&mut self, series_data: &[D], labels: Option<Vec<String>>) {
        let series_count = self.config.series.len();
        if series_data.len() > series_count {
            warn!(
                supplied = series_data.len(),
                configured = series_count,
                "ignoring data arrays beyond the configured series"
            );
        }
        self.data = (0..series_count)
            .map(|index| {
                series_data
                    .get(index)
                    .map_or_else(Vec::new, |values| values.as_ref().to_vec())
            })
            .collect();
        self.category_labels = labels;
        self.has_data = true;
        self.redraw();
    }

    /// Resyncs chart titles and legend rows with the configuration.
    fn update_labels(&mut self) {
        if let (Some(id), Some(title)) = (self.main_title_label, &self.config.main_title) {
            self.surface.set_text(id, title);
        }
        if let (Some(id), Some(title)) = (self.sub_title_label, &self.config.sub_title) {
            self.surface.set_text(id, title);
        }
        if let Some(legend) = &mut self.legend {
            let config = &self.config;
            let names: Vec<&str> = config.series.iter().map(|series| series.name.as_str()).collect();
            legend.sync(&mut self.surface, &names, |index| config.series_color(index));
        }
    }

    fn layout_frame(&mut self, viewport: Viewport) {
        let Viewport { width, height } = viewport;
        self.surface.set_size(width, height);

        let config = &self.config;
        let padding = config.border_padding;
        let mut start_x = padding;
        let mut start_y = padding;
        let mut end_x = width - padding;
        let mut end_y = height - padding;

        if let Some(legend) = &mut self.legend {
            let (legend_width, _) = legend.panel_size();
            let legend_x = end_x - legend_width;
            legend.set_origin(&mut self.surface, legend_x, start_y);
            end_x = legend_x - padding;
        }

        let center_x = width / 2.0;
        if let Some(id) = self.main_title_label {
            self.surface.set_position(id, center_x, start_y);
            start_y += LABEL_MULT * config.main_title_font_size;
        }
        if let Some(id) = self.sub_title_label {
            self.surface.set_position(id, center_x, start_y);
            start_y += LABEL_MULT * config.sub_title_font_size;
        }

        // Value-axis lines reach into the headroom kept for bar labels.
        let axis_top_y = start_y;
        start_y += LABEL_MULT * config.bar_label_font_size;

        if let Some(axis) = &mut self.x_axis {
            end_y = axis.calc_sizes(end_y);
        }
        if let Some(axis) = &mut self.value_axes.left {
            start_x = axis.calc_sizes(start_x);
        }
        if let Some(axis) = &mut self.value_axes.right {
            end_x = axis.calc_sizes(end_x);
        }

        self.plot = PlotArea {
            x: start_x,
            y: start_y,
            width: (end_x - start_x).max(0.0),
            height: (end_y - start_y).max(0.0),
            axis_top_y,
        };
        let plot = self.plot;
        for axis in [&self.x_axis, &self.value_axes.left, &self.value_axes.right]
            .into_iter()
            .flatten()
        {
            axis.resize(&mut self.surface, &plot);
        }
    }

    /// Recomputes scales and bar geometry from the stored data.
    fn redraw(&mut self) {
        self.update_labels();
        let stacked = self.config.stacked;
        let plot = self.plot;

        let transformed: Vec<Vec<f64>> = self
            .config
            .series
            .iter()
            .zip(&self.data)
            .map(|(series, raw)| {
                let formatter = self.value_axes.get(series.axis).as_ref().and_then(Axis::formatter);
                raw.iter()
                    .map(|&value| plottable(transform_value(value, formatter)))
                    .collect()
            })
            .collect();
        let series_values: Vec<SeriesValues<'_>> = self
            .config
            .series
            .iter()
            .zip(&transformed)
            .map(|(series, values)| SeriesValues {
                side: series.axis,
                values,
            })
            .collect();

        for side in ValueAxisSide::ALL {
            let max = series_maximum(&series_values, side, stacked);
            let adjusted = calculate_adjusted_max(max);
            trace!(
                ?side,
                max,
                adjusted_max = adjusted.map(|adjusted| adjusted.adjusted_max),
                "value axis scale"
            );
            *self.maxima.get_mut(side) = max;
            *self.adjusted.get_mut(side) = adjusted;
            if let Some(axis) = self.value_axes.get_mut(side) {
                axis.update(&mut self.surface, adjusted.as_ref());
            }
        }

        let axes_present = PerSide::new(
            self.value_axes.left.is_some(),
            self.value_axes.right.is_some(),
        );
        let layout = compute_bar_layout(&series_values, self.adjusted, axes_present, stacked);

        for (index, (pool, rects)) in self.bars.iter_mut().zip(&layout.bars).enumerate() {
            let color = self.config.series_color(index);
            pool.resize_with(
                rects.len(),
                &mut self.surface,
                |surface, _| surface.create_rect(color),
                |surface, id| surface.remove_object(id),
            );
            for (&id, rect) in pool.iter().zip(rects) {
                self.surface
                    .set_position(id, plot.to_chart_x(rect.x), plot.to_chart_y(rect.top));
                self.surface.set_dimensions(
                    id,
                    plot.to_chart_width(rect.width),
                    plot.to_chart_height(rect.height),
                );
            }
        }

        let labels_visible = layout.vertical_bar_count > 0
            && plot.to_chart_width(layout.bar_width)
                >= FONT_MULT_FOR_BAR_LABEL * self.config.bar_label_font_size;
        let label_count = if labels_visible { layout.labels.len() } else { 0 };
        let style = LabelStyle {
            font_family: self.config.font_family.clone(),
            font_size_px: self.config.bar_label_font_size,
            color: self.config.bar_label_color,
            h_align: TextHAlign::Center,
            baseline: BaselineShift::Super,
        };
        self.bar_labels.resize_with(
            label_count,
            &mut self.surface,
            |surface, _| surface.create_label(style.clone()),
            |surface, id| surface.remove_object(id),
        );
        for (&id, anchor) in self.bar_labels.iter().zip(&layout.labels) {
            let formatter = self.value_axes.get(anchor.side).as_ref().and_then(Axis::formatter);
            self.surface.set_text(id, &format_value(anchor.value, formatter));
            self.surface
                .set_position(id, plot.to_chart_x(anchor.x), plot.to_chart_y(anchor.y));
        }

        self.category_ticks = match &mut self.x_axis {
            Some(axis) => {
                axis.update(&mut self.surface, None);
                axis.update_category(
                    &mut self.surface,
                    &plot,
                    &layout.tick_xs,
                    self.category_labels.as_deref(),
                )
            }
            None => CategoryTickPlan::default(),
        };

        for axis in [&self.x_axis, &self.value_axes.left, &self.value_axes.right]
            .into_iter()
            .flatten()
        {
            axis.bring_to_front(&mut self.surface);
        }

        debug!(
            series = self.config.series.len(),
            groups = layout.group_count,
            vertical_bars = layout.vertical_bar_count,
            bar_labels = label_count,
            category_ticks = self.category_ticks.tick_count,
            "bar chart updated"
        );
        self.layout = layout;
    }
}

impl BarChart<RecordingSurface> {
    /// Draws the recorded scene with any renderer.
    pub fn render<R: Renderer>(&self, renderer: &mut R) -> ChartResult<()> {
        let frame = self.surface.frame()?;
        renderer.render(&frame)
    }
}

/// Bars cannot be drawn from negative or non-finite values.
fn plottable(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn title_style(config: &BarChartConfig, font_size_px: f64, color: Color) -> LabelStyle {
    LabelStyle {
        font_family: config.font_family.clone(),
        font_size_px,
        color,
        h_align: TextHAlign::Center,
        baseline: BaselineShift::Sub,
    }
}

fn sync_title_label<S: Surface>(
    surface: &mut S,
    label: &mut Option<ObjectId>,
    present: bool,
    style: LabelStyle,
) {
    match (*label, present) {
        (None, true) => *label = Some(surface.create_label(style)),
        (Some(id), false) => {
            surface.remove_object(id);
            *label = None;
        }
        _ => {}
    }
}
