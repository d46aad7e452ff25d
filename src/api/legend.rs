use crate::api::config::LegendConfig;
use crate::core::SlotPool;
use crate::render::{BaselineShift, Color, LabelStyle, ObjectId, Surface, TextHAlign};

/// Inner padding of the legend panel.
pub const LEGEND_BORDER_PADDING: f64 = 5.0;
/// Gap between rows, in percent of the swatch size.
pub const LEGEND_ROW_GAP_PERCENT: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LegendRow {
    swatch: ObjectId,
    label: ObjectId,
}

/// Series legend drawn as one swatch and name per row.
#[derive(Debug)]
pub struct Legend {
    config: LegendConfig,
    label_style: LabelStyle,
    rows: SlotPool<LegendRow>,
    origin: (f64, f64),
}

impl Legend {
    #[must_use]
    pub fn new(config: LegendConfig, font_family: &str) -> Self {
        Self {
            config,
            label_style: LabelStyle {
                font_family: font_family.to_owned(),
                font_size_px: config.font_size,
                color: Color::BLACK,
                h_align: TextHAlign::Left,
                baseline: BaselineShift::Super,
            },
            rows: SlotPool::new(),
            origin: (0.0, 0.0),
        }
    }

    #[must_use]
    pub fn config(&self) -> &LegendConfig {
        &self.config
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn row_gap(&self) -> f64 {
        LEGEND_ROW_GAP_PERCENT * self.config.box_size / 100.0
    }

    /// Panel size for the current rows.
    #[must_use]
    pub fn panel_size(&self) -> (f64, f64) {
        let rows = self.rows.len();
        let mut height = 2.0 * LEGEND_BORDER_PADDING + rows as f64 * self.config.box_size;
        if rows > 1 {
            height += (rows - 1) as f64 * self.row_gap();
        }
        (self.config.width, height)
    }

    /// Swatch and label objects of row `index`.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<(ObjectId, ObjectId)> {
        self.rows.get(index).map(|row| (row.swatch, row.label))
    }

    /// Matches the rows to the series names and colors.
    pub fn sync<S: Surface>(
        &mut self,
        surface: &mut S,
        names: &[&str],
        color_of: impl Fn(usize) -> Color,
    ) {
        let style = &self.label_style;
        self.rows.resize_with(
            names.len(),
            surface,
            |surface, index| LegendRow {
                swatch: surface.create_rect(color_of(index)),
                label: surface.create_label(style.clone()),
            },
            |surface, row| {
                surface.remove_object(row.swatch);
                surface.remove_object(row.label);
            },
        );
        for (index, (row, name)) in self.rows.iter().zip(names).enumerate() {
            surface.set_fill(row.swatch, color_of(index));
            surface.set_text(row.label, name);
        }
        self.place_rows(surface);
    }

    /// Moves the panel's top-left corner.
    pub fn set_origin<S: Surface>(&mut self, surface: &mut S, x: f64, y: f64) {
        self.origin = (x, y);
        self.place_rows(surface);
    }

    fn place_rows<S: Surface>(&self, surface: &mut S) {
        let (origin_x, origin_y) = self.origin;
        let box_size = self.config.box_size;
        let step = box_size + self.row_gap();
        for (index, row) in self.rows.iter().enumerate() {
            let x = origin_x + LEGEND_BORDER_PADDING;
            let y = origin_y + LEGEND_BORDER_PADDING + index as f64 * step;
            surface.set_position(row.swatch, x, y);
            surface.set_dimensions(row.swatch, box_size, box_size);
            surface.set_position(row.label, x + 1.5 * box_size, y + box_size);
        }
    }
}
