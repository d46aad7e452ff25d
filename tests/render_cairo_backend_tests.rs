#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use gcview_chart::ChartError;
use gcview_chart::api::{BarChart, BarChartConfig, SeriesConfig};
use gcview_chart::render::{CairoContextRenderer, CairoRenderer, RecordingSurface};

fn grouped_chart(width: f64, height: f64) -> BarChart<RecordingSurface> {
    let config = BarChartConfig::new(vec![SeriesConfig::left("Used"), SeriesConfig::left("Free")]);
    let mut chart = BarChart::new(RecordingSurface::new(), config).expect("chart");
    chart.resize(width, height).expect("resize");
    chart.update(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
    chart
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_bars_axes_and_labels() {
    let chart = grouped_chart(800.0, 400.0);
    let mut renderer = CairoRenderer::new(800, 400).expect("renderer");
    chart.render(&mut renderer).expect("render");

    let stats = renderer.last_stats();
    assert_eq!(stats.lines_drawn, 8);
    assert_eq!(stats.rects_drawn, 4);
    assert_eq!(stats.texts_drawn, 10);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let chart = grouped_chart(600.0, 320.0);
    let frame = chart.surface().frame().expect("frame");

    let surface = ImageSurface::create(Format::ARgb32, 600, 320).expect("surface");
    let context = Context::new(&surface).expect("context");
    let mut renderer = CairoRenderer::new(600, 320).expect("renderer");
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("external context render");
    assert_eq!(renderer.last_stats().rects_drawn, 4);
}
