use gcview_chart::api::{BarChart, BarChartConfig, SeriesConfig};
use gcview_chart::core::{
    PerSide, SeriesValues, ValueAxisSide, calculate_adjusted_max, compute_bar_layout,
    series_maximum,
};
use gcview_chart::render::RecordingSurface;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn generated_series(count: usize, len: usize) -> Vec<Vec<f64>> {
    (0..count)
        .map(|series| {
            (0..len)
                .map(|i| ((i * 37 + series * 11) % 997) as f64 * 1_024.0)
                .collect()
        })
        .collect()
}

fn bench_adjusted_max_sweep(c: &mut Criterion) {
    let maxima: Vec<f64> = (0..1_000).map(|i| 0.0003 * 1.7_f64.powi(i % 40)).collect();

    c.bench_function("adjusted_max_sweep_1k", |b| {
        b.iter(|| {
            for &max in &maxima {
                let _ = calculate_adjusted_max(black_box(Some(max)));
            }
        })
    });
}

fn bench_stacked_layout_3x2k(c: &mut Criterion) {
    let data = generated_series(3, 2_000);
    let series: Vec<SeriesValues<'_>> = data
        .iter()
        .enumerate()
        .map(|(index, values)| SeriesValues {
            side: if index == 2 {
                ValueAxisSide::Right
            } else {
                ValueAxisSide::Left
            },
            values,
        })
        .collect();
    let adjusted = PerSide::new(
        calculate_adjusted_max(series_maximum(&series, ValueAxisSide::Left, true)),
        calculate_adjusted_max(series_maximum(&series, ValueAxisSide::Right, true)),
    );

    c.bench_function("stacked_layout_3x2k", |b| {
        b.iter(|| {
            let _ = compute_bar_layout(
                black_box(&series),
                black_box(adjusted),
                PerSide::new(true, true),
                true,
            );
        })
    });
}

fn bench_chart_update_4x500(c: &mut Criterion) {
    let series = (0..4)
        .map(|i| SeriesConfig::left(format!("space-{i}")))
        .collect();
    let mut chart = BarChart::new(RecordingSurface::new(), BarChartConfig::new(series))
        .expect("chart init");
    chart.resize(1600.0, 900.0).expect("resize");
    let data = generated_series(4, 500);

    c.bench_function("chart_update_4x500", |b| {
        b.iter(|| chart.update(black_box(&data)))
    });
}

criterion_group!(
    benches,
    bench_adjusted_max_sweep,
    bench_stacked_layout_3x2k,
    bench_chart_update_4x500
);
criterion_main!(benches);
