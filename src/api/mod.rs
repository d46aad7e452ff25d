mod axis;
mod bar_chart;
mod config;
mod legend;
mod snapshot;

pub use axis::{
    Axis, AxisKind, CategoryTickPlan, FONT_MULT_FOR_TICK_LABEL, LABEL_MULT, MAX_CATEGORY_TICK_NUM,
    TICK_LABEL_FONT_MULT, plan_category_ticks, units_text, value_tick_texts,
};
pub use bar_chart::{BarChart, FONT_MULT_FOR_BAR_LABEL};
pub use config::{
    AxisConfig, AxisConfigUpdate, BarChartConfig, BarChartConfigUpdate, LegendConfig,
    SERIES_COLORS, SeriesConfig,
};
pub use legend::{LEGEND_BORDER_PADDING, LEGEND_ROW_GAP_PERCENT, Legend};
pub use snapshot::{
    BAR_CHART_SNAPSHOT_JSON_SCHEMA_V1, BarChartSnapshot, BarChartSnapshotJsonContractV1,
};
