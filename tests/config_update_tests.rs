use gcview_chart::api::{
    AxisConfig, AxisConfigUpdate, BarChart, BarChartConfig, BarChartConfigUpdate, LegendConfig,
    SeriesConfig,
};
use gcview_chart::core::{BuiltinFormatter, Formatter, ValueAxisSide};
use gcview_chart::render::RecordingSurface;
use gcview_chart::ChartError;

fn titled_chart() -> BarChart<RecordingSurface> {
    let config = BarChartConfig::new(vec![SeriesConfig::left("Used"), SeriesConfig::left("Free")])
        .with_titles(Some("Space Info"), None)
        .with_left_axis(Some(AxisConfig::titled("Size")))
        .with_legend(LegendConfig {
            enabled: true,
            ..LegendConfig::default()
        });
    let mut chart = BarChart::new(RecordingSurface::new(), config).expect("chart");
    chart.resize(900.0, 400.0).expect("resize");
    chart
}

#[test]
fn clearing_the_main_title_frees_its_band() {
    let mut chart = titled_chart();
    let label = chart.main_title_label().expect("title label");
    assert_eq!(chart.surface().label_text(label), Some("Space Info"));
    // Border 8 + title band 21 + bar-label headroom 15.
    assert_eq!(chart.plot_area().y, 44.0);

    chart
        .update_config(BarChartConfigUpdate::default().with_main_title(None))
        .expect("update");
    assert_eq!(chart.main_title_label(), None);
    assert!(chart.surface().object(label).is_none());
    assert_eq!(chart.plot_area().y, 23.0);

    chart
        .update_config(BarChartConfigUpdate::default().with_main_title(Some("Pauses")))
        .expect("update");
    let label = chart.main_title_label().expect("new title label");
    assert_eq!(chart.surface().label_text(label), Some("Pauses"));
    assert_eq!(chart.config().main_title.as_deref(), Some("Pauses"));
}

#[test]
fn sub_title_can_be_added_later() {
    let mut chart = titled_chart();
    assert_eq!(chart.sub_title_label(), None);

    chart
        .update_config(BarChartConfigUpdate::default().with_sub_title(Some("GC #7")))
        .expect("update");
    let label = chart.sub_title_label().expect("sub title");
    assert_eq!(chart.surface().label_text(label), Some("GC #7"));
    assert_eq!(chart.plot_area().y, 44.0 + 19.5);
}

#[test]
fn axis_title_resyncs_on_update() {
    let mut chart = titled_chart();
    let update = BarChartConfigUpdate::default().with_value_axis(
        ValueAxisSide::Left,
        AxisConfigUpdate::default().with_title(Some("Bytes")),
    );
    chart.update_config(update).expect("update");

    let axis = chart.value_axis(ValueAxisSide::Left).expect("left axis");
    let title = axis.title_label().expect("title label");
    assert_eq!(chart.surface().label_text(title), Some("Bytes"));
    assert_eq!(
        chart
            .config()
            .left_axis
            .as_ref()
            .and_then(|axis| axis.title.as_deref()),
        Some("Bytes")
    );
}

#[test]
fn formatter_change_rescales_existing_data() {
    let mut chart = titled_chart();
    chart.update(&[vec![3.0 * 1024.0 * 1024.0], vec![1024.0 * 1024.0]]);
    let before = chart.adjusted_max(ValueAxisSide::Left).expect("left");
    assert_eq!(before.adjusted_max, 5_000_000.0);

    let update = BarChartConfigUpdate::default().with_value_axis(
        ValueAxisSide::Left,
        AxisConfigUpdate::default()
            .with_formatter(Some(Formatter::from(BuiltinFormatter::MegabytesFromBytes))),
    );
    chart.update_config(update).expect("update");

    let after = chart.adjusted_max(ValueAxisSide::Left).expect("left");
    assert_eq!(after.adjusted_max, 5.0);
    let axis = chart.value_axis(ValueAxisSide::Left).expect("left axis");
    let units = axis.units_label().expect("units");
    assert_eq!(chart.surface().label_text(units), Some("MB"));
}

#[test]
fn added_series_gain_legend_rows() {
    let mut chart = titled_chart();
    assert_eq!(chart.legend().map(|legend| legend.row_count()), Some(2));

    let update = BarChartConfigUpdate::default().with_series(vec![
        SeriesConfig::left("Used"),
        SeriesConfig::left("Free"),
        SeriesConfig::left("Committed"),
    ]);
    chart.update_config(update).expect("update");

    let legend = chart.legend().expect("legend");
    assert_eq!(legend.row_count(), 3);
    let (_, label) = legend.row(2).expect("third row");
    assert_eq!(chart.surface().label_text(label), Some("Committed"));
    assert!(chart.bar_objects(2).is_empty());

    chart.update(&[vec![1.0], vec![2.0], vec![3.0]]);
    assert_eq!(chart.bar_objects(2).len(), 1);
}

#[test]
fn removed_series_release_their_bars() {
    let mut chart = titled_chart();
    chart.update(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
    let released = chart.bar_objects(1).to_vec();

    chart
        .update_config(BarChartConfigUpdate::default().with_series(vec![SeriesConfig::left("Used")]))
        .expect("update");
    assert!(chart.bar_objects(1).is_empty());
    for id in released {
        assert!(chart.surface().object(id).is_none());
    }
    assert_eq!(chart.layout().bars.len(), 1);
    assert_eq!(chart.legend().map(|legend| legend.row_count()), Some(1));
}

#[test]
fn series_on_missing_axis_leave_chart_unchanged() {
    let mut chart = titled_chart();
    let err = chart
        .update_config(BarChartConfigUpdate::default().with_series(vec![SeriesConfig::right("X")]))
        .expect_err("right axis missing");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
    assert_eq!(chart.config().series.len(), 2);
}

#[test]
fn legend_band_narrows_the_plot() {
    let chart = titled_chart();
    let plot = chart.plot_area();
    // Right border 8, legend 200, gap 8.
    assert_eq!(plot.x + plot.width, 900.0 - 8.0 - 200.0 - 8.0);
}
