#[cfg(feature = "cairo-backend")]
use gcview_chart::core::Viewport;
#[cfg(feature = "cairo-backend")]
use gcview_chart::{BarChart, BarChartConfig};
#[cfg(feature = "cairo-backend")]
use serde::Deserialize;
#[cfg(feature = "cairo-backend")]
use std::fs::{self, File};
#[cfg(feature = "cairo-backend")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cairo-backend")]
const DEFAULT_MANIFEST_PATH: &str = "tests/fixtures/bar_chart/gc_chart_corpus.json";
#[cfg(feature = "cairo-backend")]
const DEFAULT_OUTPUT_ROOT: &str = "tests/fixtures/bar_chart/reference_png";

#[cfg(feature = "cairo-backend")]
#[derive(Debug, Deserialize)]
struct FixtureCorpus {
    schema_version: u32,
    fixtures: Vec<BarChartFixture>,
}

#[cfg(feature = "cairo-backend")]
#[derive(Debug, Deserialize)]
struct BarChartFixture {
    id: String,
    description: String,
    input: FixtureInput,
    #[serde(default)]
    artifacts: FixtureArtifacts,
}

#[cfg(feature = "cairo-backend")]
#[derive(Debug, Deserialize, Default)]
struct FixtureArtifacts {
    reference_png_relpath: Option<String>,
}

#[cfg(feature = "cairo-backend")]
#[derive(Debug, Deserialize)]
struct FixtureInput {
    viewport: Viewport,
    config: BarChartConfig,
    series_data: Vec<Vec<f64>>,
    #[serde(default)]
    category_labels: Option<Vec<String>>,
}

#[cfg(feature = "cairo-backend")]
#[derive(Debug)]
struct CliArgs {
    manifest_path: PathBuf,
    output_root: PathBuf,
    only_fixture_id: Option<String>,
}

#[cfg(feature = "cairo-backend")]
fn main() {
    let _ = gcview_chart::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn main() {
    eprintln!("this tool requires feature `cairo-backend`");
    std::process::exit(1);
}

#[cfg(feature = "cairo-backend")]
fn run() -> Result<(), String> {
    use gcview_chart::render::{CairoRenderer, Renderer};

    let args = parse_args()?;
    let raw = fs::read_to_string(&args.manifest_path).map_err(|err| {
        format!(
            "failed to read manifest `{}`: {err}",
            args.manifest_path.display()
        )
    })?;
    let corpus: FixtureCorpus = serde_json::from_str(&raw)
        .map_err(|err| format!("failed to parse manifest json: {err}"))?;
    if corpus.schema_version != 1 {
        return Err(format!(
            "unsupported fixture schema version: {}",
            corpus.schema_version
        ));
    }

    let mut generated_count = 0usize;
    for fixture in &corpus.fixtures {
        if args
            .only_fixture_id
            .as_ref()
            .is_some_and(|id| id != &fixture.id)
        {
            continue;
        }

        let frame = build_frame_from_fixture(fixture)
            .map_err(|err| format!("fixture `{}` frame build failed: {err}", fixture.id))?;
        let viewport = fixture.input.viewport;
        let width = pixel_extent(viewport.width)
            .ok_or_else(|| format!("fixture `{}` viewport width is not a pixel size", fixture.id))?;
        let height = pixel_extent(viewport.height).ok_or_else(|| {
            format!("fixture `{}` viewport height is not a pixel size", fixture.id)
        })?;

        let mut renderer = CairoRenderer::new(width, height)
            .map_err(|err| format!("fixture `{}` renderer init failed: {err}", fixture.id))?;
        renderer
            .render(&frame)
            .map_err(|err| format!("fixture `{}` render failed: {err}", fixture.id))?;

        let output_path = resolve_output_path(fixture, &args.output_root);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                format!("failed to create output dir `{}`: {err}", parent.display())
            })?;
        }
        let mut file = File::create(&output_path).map_err(|err| {
            format!(
                "failed to create png `{}` for fixture `{}`: {err}",
                output_path.display(),
                fixture.id
            )
        })?;
        renderer
            .surface()
            .write_to_png(&mut file)
            .map_err(|err| format!("failed to write png `{}`: {err}", output_path.display()))?;

        generated_count += 1;
        let stats = renderer.last_stats();
        println!(
            "generated {} [{}] -> {} ({} rects, {} lines, {} texts)",
            fixture.id,
            fixture.description,
            output_path.display(),
            stats.rects_drawn,
            stats.lines_drawn,
            stats.texts_drawn
        );
    }

    println!("done: generated {generated_count} fixture png(s)");
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn parse_args() -> Result<CliArgs, String> {
    let mut manifest_path = PathBuf::from(DEFAULT_MANIFEST_PATH);
    let mut output_root = PathBuf::from(DEFAULT_OUTPUT_ROOT);
    let mut only_fixture_id: Option<String> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--manifest" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --manifest".to_owned())?;
                manifest_path = PathBuf::from(value);
            }
            "--output-root" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output-root".to_owned())?;
                output_root = PathBuf::from(value);
            }
            "--only" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --only".to_owned())?;
                only_fixture_id = Some(value);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(CliArgs {
        manifest_path,
        output_root,
        only_fixture_id,
    })
}

#[cfg(feature = "cairo-backend")]
fn print_usage() {
    println!("{}", usage_message());
}

#[cfg(feature = "cairo-backend")]
fn usage_message() -> String {
    format!(
        "Usage: cargo run --features cairo-backend --bin render_bar_chart_fixtures -- [options]\n\nOptions:\n  --manifest <path>      Fixture manifest path (default: {DEFAULT_MANIFEST_PATH})\n  --output-root <path>   Output root when fixture has no artifact path (default: {DEFAULT_OUTPUT_ROOT})\n  --only <fixture-id>    Render a single fixture by id\n  -h, --help             Show this message"
    )
}

#[cfg(feature = "cairo-backend")]
fn pixel_extent(value: f64) -> Option<i32> {
    if value.is_finite() && value >= 1.0 && value <= f64::from(i32::MAX) {
        Some(value.round() as i32)
    } else {
        None
    }
}

#[cfg(feature = "cairo-backend")]
fn resolve_output_path(fixture: &BarChartFixture, output_root: &Path) -> PathBuf {
    if let Some(relpath) = &fixture.artifacts.reference_png_relpath {
        PathBuf::from(relpath)
    } else {
        output_root.join(format!("{}.png", fixture.id))
    }
}

#[cfg(feature = "cairo-backend")]
fn build_frame_from_fixture(
    fixture: &BarChartFixture,
) -> gcview_chart::ChartResult<gcview_chart::render::RenderFrame> {
    let input = &fixture.input;
    let surface = gcview_chart::render::RecordingSurface::new();
    let mut chart = BarChart::new(surface, input.config.clone())?;
    chart.resize(input.viewport.width, input.viewport.height)?;
    match &input.category_labels {
        Some(labels) => chart.update_with_labels(&input.series_data, labels),
        None => chart.update(&input.series_data),
    }
    chart.surface().frame()
}
