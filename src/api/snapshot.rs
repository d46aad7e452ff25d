use serde::{Deserialize, Serialize};

use crate::api::axis::CategoryTickPlan;
use crate::api::config::SeriesConfig;
use crate::core::{AdjustedMax, BarLayout, PerSide, PlotArea, Viewport};
use crate::error::{ChartError, ChartResult};

pub const BAR_CHART_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable view of a chart after its last resize/update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartSnapshot {
    pub viewport: Option<Viewport>,
    pub plot_area: PlotArea,
    pub stacked: bool,
    pub series: Vec<SeriesConfig>,
    pub maxima: PerSide<Option<f64>>,
    pub adjusted: PerSide<Option<AdjustedMax>>,
    pub layout: BarLayout,
    pub bar_labels_visible: bool,
    pub category_ticks: CategoryTickPlan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: BarChartSnapshot,
}

impl BarChartSnapshot {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot json: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = BarChartSnapshotJsonContractV1 {
            schema_version: BAR_CHART_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<BarChartSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: BarChartSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != BAR_CHART_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
