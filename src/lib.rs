//! gcview-chart: bar-chart engine for garbage-collection trace inspection.
//!
//! The crate splits pure layout math (`core`) from the retained-mode drawing
//! boundary (`render`) and the chart orchestration that ties them together
//! (`api`). Nothing here touches a windowing system; hosts plug in a
//! [`render::Surface`] implementation.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{BarChart, BarChartConfig, BarChartConfigUpdate};
pub use error::{ChartError, ChartResult};
