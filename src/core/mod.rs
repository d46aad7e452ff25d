pub mod bar_layout;
pub mod formatter;
pub mod layout;
pub mod pool;
pub mod scale;
pub mod types;

pub use bar_layout::{
    BarLabelAnchor, BarLayout, BarRect, SeriesValues, compute_bar_layout, series_maximum,
};
pub use formatter::{BuiltinFormatter, Formatter, ValueFormatter};
pub use layout::PlotArea;
pub use pool::SlotPool;
pub use scale::{AdjustedMax, calculate_adjusted_max};
pub use types::{PerSide, ValueAxisSide, Viewport};
