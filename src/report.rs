//! Report runner
//!
//! Each chart is an independent load, layout and render job. Jobs run on the
//! rayon pool; a failed job leaves its chart out of the page without stopping
//! the others.

use crate::charts::{
    write_index, BarChartLayout, BoxPlotLayout, ChartKind, LineChartLayout, OutputFormat,
    RenderError, Scene, StaticChartRenderer,
};
use crate::config::{ConfigError, ReportConfig};
use crate::data::{DailyAverage, LikeObservation, LoaderError, PostTypeAverage};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{error, info, info_span};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A chart written to disk. `svg` holds the document for SVG output.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub kind: ChartKind,
    pub path: PathBuf,
    pub svg: Option<String>,
}

/// Outcome of a report run.
#[derive(Debug)]
pub struct ReportOutcome {
    pub rendered: Vec<RenderedChart>,
    pub failed: Vec<(ChartKind, ReportError)>,
    pub index: Option<PathBuf>,
}

/// Load the chart's input file and lay it out.
pub fn build_scene(kind: ChartKind, config: &ReportConfig) -> Result<Scene, ReportError> {
    let scene = match kind {
        ChartKind::Boxplot => {
            let rows = LikeObservation::load(&config.boxplot.input)?;
            BoxPlotLayout::new(&rows, &config.boxplot).scene(&config.boxplot)?
        }
        ChartKind::Barplot => {
            let rows = PostTypeAverage::load(&config.barplot.input)?;
            BarChartLayout::new(&rows, &config.barplot)?.scene(&config.barplot)?
        }
        ChartKind::Lineplot => {
            let rows = DailyAverage::load(&config.lineplot.input)?;
            LineChartLayout::new(&rows, &config.lineplot).scene(&config.lineplot)?
        }
    };
    Ok(scene)
}

/// Build and write one chart into `out_dir`.
pub fn render_chart(
    kind: ChartKind,
    config: &ReportConfig,
    out_dir: &Path,
    format: OutputFormat,
) -> Result<RenderedChart, ReportError> {
    let _span = info_span!("chart", chart = kind.name()).entered();
    let started = Instant::now();

    let scene = build_scene(kind, config)?;
    let path = out_dir.join(format!("{}.{}", kind.name(), format.extension()));
    let svg = match format {
        OutputFormat::Svg => Some(StaticChartRenderer::save_svg(&scene, &path)?),
        OutputFormat::Png => {
            StaticChartRenderer::save_png(&scene, &path)?;
            None
        }
    };

    info!(
        path = %path.display(),
        shapes = scene.shapes.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "rendered chart"
    );
    Ok(RenderedChart { kind, path, svg })
}

/// Render `kinds` in parallel, then write the HTML page for SVG output.
pub fn render_report(
    kinds: &[ChartKind],
    config: &ReportConfig,
    out_dir: &Path,
    format: OutputFormat,
) -> ReportOutcome {
    let results: Vec<(ChartKind, Result<RenderedChart, ReportError>)> = kinds
        .par_iter()
        .map(|&kind| (kind, render_chart(kind, config, out_dir, format)))
        .collect();

    let mut rendered = Vec::new();
    let mut failed = Vec::new();
    for (kind, result) in results {
        match result {
            Ok(chart) => rendered.push(chart),
            Err(err) => {
                error!(chart = kind.name(), error = %err, "chart failed");
                failed.push((kind, err));
            }
        }
    }

    let index = match format {
        OutputFormat::Svg => {
            let inline: Vec<(ChartKind, String)> = rendered
                .iter()
                .filter_map(|c| c.svg.clone().map(|svg| (c.kind, svg)))
                .collect();
            match write_index(out_dir, &inline) {
                Ok(path) => {
                    info!(path = %path.display(), "wrote report page");
                    Some(path)
                }
                Err(err) => {
                    error!(error = %err, "failed to write report page");
                    None
                }
            }
        }
        OutputFormat::Png => None,
    };

    ReportOutcome {
        rendered,
        failed,
        index,
    }
}
