use approx::assert_relative_eq;
use gcview_chart::api::{
    AxisConfig, BAR_CHART_SNAPSHOT_JSON_SCHEMA_V1, BarChart, BarChartConfig, BarChartSnapshot,
    SeriesConfig,
};
use gcview_chart::core::{BuiltinFormatter, Viewport};
use gcview_chart::render::RecordingSurface;
use gcview_chart::ChartError;

fn two_axis_snapshot() -> BarChartSnapshot {
    let config = BarChartConfig::new(vec![
        SeriesConfig::left("Used"),
        SeriesConfig::left("Free"),
        SeriesConfig::right("Objects"),
    ])
    .stacked(true)
    .with_right_axis(Some(
        AxisConfig::titled("Objects").with_formatter(BuiltinFormatter::Count),
    ));
    let mut chart = BarChart::new(RecordingSurface::new(), config).expect("chart");
    chart.resize(1024.0, 480.0).expect("resize");
    chart.update_with_labels(
        &[vec![120.0, 80.0], vec![30.0, 60.0], vec![12_000.0, 9_000.0]],
        &["GC 1", "GC 2"],
    );
    chart.snapshot()
}

#[test]
fn snapshot_records_scales_and_layout() {
    let snapshot = two_axis_snapshot();
    assert_eq!(snapshot.viewport, Some(Viewport::new(1024.0, 480.0)));
    assert!(snapshot.stacked);
    assert_eq!(snapshot.series.len(), 3);

    assert_eq!(snapshot.maxima.left, Some(150.0));
    assert_eq!(snapshot.maxima.right, Some(12_000.0));
    let left = snapshot.adjusted.left.expect("left scale");
    assert_eq!(left.adjusted_max, 500.0);
    let right = snapshot.adjusted.right.expect("right scale");
    assert_eq!(right.adjusted_max, 50_000.0);
    assert_eq!(right.presentation_multiplier, 1000);

    // One stack per axis in each group.
    assert_eq!(snapshot.layout.group_count, 2);
    assert_eq!(snapshot.layout.vertical_bar_count, 4);
    assert_eq!(snapshot.layout.tick_xs.len(), 2);
}

#[test]
fn contract_payload_round_trips() {
    let snapshot = two_axis_snapshot();
    let json = snapshot.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains("\"schema_version\": 1"));

    let restored = BarChartSnapshot::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(restored.series, snapshot.series);
    assert_eq!(restored.stacked, snapshot.stacked);
    assert_eq!(restored.category_ticks, snapshot.category_ticks);
    assert_eq!(restored.bar_labels_visible, snapshot.bar_labels_visible);
    assert_eq!(restored.layout.bars.len(), snapshot.layout.bars.len());
    assert_relative_eq!(
        restored.layout.bar_width,
        snapshot.layout.bar_width,
        max_relative = 1e-12
    );
    assert_relative_eq!(
        restored.plot_area.width,
        snapshot.plot_area.width,
        max_relative = 1e-12
    );
}

#[test]
fn bare_snapshot_json_is_accepted() {
    let snapshot = two_axis_snapshot();
    let json = snapshot.to_json_pretty().expect("serialize");
    let restored = BarChartSnapshot::from_json_compat_str(&json).expect("parse bare");
    assert_eq!(restored.series, snapshot.series);
    assert_eq!(restored.adjusted.left.map(|scale| scale.adjusted_max), Some(500.0));
}

#[test]
fn unknown_schema_version_is_rejected() {
    let snapshot = two_axis_snapshot();
    let json = snapshot.to_json_contract_v1_pretty().expect("serialize");
    let bumped = json.replacen(
        &format!("\"schema_version\": {BAR_CHART_SNAPSHOT_JSON_SCHEMA_V1}"),
        "\"schema_version\": 2",
        1,
    );
    let err = BarChartSnapshot::from_json_compat_str(&bumped).expect_err("future schema");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn garbage_input_is_an_error() {
    assert!(BarChartSnapshot::from_json_compat_str("not json").is_err());
}
