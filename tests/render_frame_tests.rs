use gcview_chart::api::{BarChart, BarChartConfig, LegendConfig, SeriesConfig};
use gcview_chart::core::Viewport;
use gcview_chart::render::{
    Color, LinePrimitive, NullRenderer, RecordingSurface, RectPrimitive, RenderFrame, Renderer,
};
use gcview_chart::ChartError;

fn grouped_config() -> BarChartConfig {
    BarChartConfig::new(vec![SeriesConfig::left("Used"), SeriesConfig::left("Free")])
}

#[test]
fn grouped_chart_renders_axes_bars_and_labels() {
    let mut chart = BarChart::new(RecordingSurface::new(), grouped_config()).expect("chart");
    chart.resize(800.0, 400.0).expect("resize");
    chart.update(&[vec![1.0, 2.0], vec![3.0, 4.0]]);

    let mut renderer = NullRenderer::default();
    chart.render(&mut renderer).expect("render");

    // Left axis line + 6 ticks, category axis line.
    assert_eq!(renderer.last_line_count, 8);
    assert_eq!(renderer.last_rect_count, 4);
    // 6 tick labels + 4 bar labels; the units label is blank at x1.
    assert_eq!(renderer.last_text_count, 10);
}

#[test]
fn legend_rows_add_swatches_and_names() {
    let config = grouped_config().with_legend(LegendConfig {
        enabled: true,
        ..LegendConfig::default()
    });
    let mut chart = BarChart::new(RecordingSurface::new(), config).expect("chart");
    chart.resize(800.0, 400.0).expect("resize");
    chart.update(&[vec![1.0, 2.0], vec![3.0, 4.0]]);

    let mut renderer = NullRenderer::default();
    chart.render(&mut renderer).expect("render");
    assert_eq!(renderer.last_line_count, 8);
    assert_eq!(renderer.last_rect_count, 6);
    assert_eq!(renderer.last_text_count, 12);
}

#[test]
fn chart_without_size_cannot_render() {
    let chart = BarChart::new(RecordingSurface::new(), grouped_config()).expect("chart");
    let mut renderer = NullRenderer::default();
    let err = chart.render(&mut renderer).expect_err("no viewport yet");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
}

#[test]
fn frame_with_zero_height_bar_is_valid() {
    let mut chart = BarChart::new(RecordingSurface::new(), grouped_config()).expect("chart");
    chart.resize(640.0, 320.0).expect("resize");
    chart.update(&[vec![0.0, 2.0], vec![-1.0, f64::NAN]]);

    let frame = chart.surface().frame().expect("frame");
    assert_eq!(frame.rects().count(), 4);
    assert!(frame.rects().any(|rect| rect.height == 0.0));
}

#[test]
fn null_renderer_rejects_invalid_geometry() {
    let frame = RenderFrame::new(Viewport::new(100.0, 100.0)).with_line(LinePrimitive::new(
        0.0,
        0.0,
        f64::NAN,
        10.0,
        1.0,
        Color::BLACK,
    ));
    let mut renderer = NullRenderer::default();
    assert!(renderer.render(&frame).is_err());

    let frame = RenderFrame::new(Viewport::new(100.0, 100.0)).with_rect(RectPrimitive::new(
        0.0,
        0.0,
        -1.0,
        10.0,
        Color::BLACK,
    ));
    assert!(renderer.render(&frame).is_err());
}
