//! Social Charts - Box, grouped-bar and time-series charts of social media likes
//!
//! Reads three CSV files and writes one chart per file plus an HTML page that
//! inlines all three.

mod charts;
mod config;
mod data;
mod report;
mod stats;

use anyhow::{bail, Context, Result};
use charts::{ChartKind, OutputFormat};
use clap::{Parser, Subcommand};
use config::ReportConfig;
use data::LikeObservation;
use stats::{GroupSummary, StatsCalculator};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "social_charts",
    version,
    about = "Render box, grouped-bar and time-series charts of social media likes",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file overriding file names, sizes and colours
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the charts and the HTML report page
    Render {
        /// Directory holding the input CSV files
        #[arg(short, long, default_value = ".")]
        data_dir: PathBuf,

        /// Directory the charts are written to
        #[arg(short, long, default_value = "charts")]
        out_dir: PathBuf,

        /// Output image format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
        format: OutputFormat,

        /// Render a single chart
        #[arg(long, value_enum)]
        only: Option<ChartKind>,
    },

    /// Print per-platform five-number summaries of likes as JSON
    Summary {
        /// Observations file (Platform, Likes)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Write the JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    let config = match &cli.config {
        Some(path) => ReportConfig::from_file(path)?,
        None => ReportConfig::default(),
    };

    match cli.command {
        Commands::Render {
            data_dir,
            out_dir,
            format,
            only,
        } => render(config, data_dir, out_dir, format, only),
        Commands::Summary { input, output } => summary(config, input, output),
    }
}

fn render(
    config: ReportConfig,
    data_dir: PathBuf,
    out_dir: PathBuf,
    format: OutputFormat,
    only: Option<ChartKind>,
) -> Result<()> {
    let config = config.with_data_dir(&data_dir);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let kinds: Vec<ChartKind> = match only {
        Some(kind) => vec![kind],
        None => ChartKind::ALL.to_vec(),
    };
    tracing::info!(
        charts = kinds.len(),
        data_dir = %data_dir.display(),
        out_dir = %out_dir.display(),
        "rendering report"
    );

    let outcome = report::render_report(&kinds, &config, &out_dir, format);
    if !outcome.failed.is_empty() {
        let names: Vec<&str> = outcome.failed.iter().map(|(k, _)| k.name()).collect();
        bail!("{} chart(s) failed: {}", names.len(), names.join(", "));
    }

    for chart in &outcome.rendered {
        tracing::debug!(chart = chart.kind.name(), path = %chart.path.display(), "chart written");
    }
    match &outcome.index {
        Some(index) => tracing::info!(
            rendered = outcome.rendered.len(),
            page = %index.display(),
            "report complete"
        ),
        None => tracing::info!(rendered = outcome.rendered.len(), "report complete"),
    }
    Ok(())
}

fn summary(config: ReportConfig, input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let input = input.unwrap_or(config.boxplot.input);
    let (json, groups) = summary_json(&input)?;

    match output {
        Some(path) => {
            std::fs::write(&path, json + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), groups, "wrote summary");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Per-platform summaries of `input` as pretty JSON, with the group count.
fn summary_json(input: &Path) -> Result<(String, usize)> {
    let rows = LikeObservation::load(input)
        .with_context(|| format!("Failed to load observations from {}", input.display()))?;

    let summaries: Vec<GroupSummary> = StatsCalculator::summarize_by_platform(&rows);
    let json = serde_json::to_string_pretty(&summaries)?;
    Ok((json, summaries.len()))
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("social_charts=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("social_charts=info,warn")
    };

    // logs go to stderr so `summary` output stays clean JSON
    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIKES: &str = "Platform,PostType,Date,Likes\n\
        Twitter,Image,3/1/2024,10\n\
        Facebook,Video,3/1/2024,5\n\
        Twitter,Link,3/2/2024,30\n\
        LinkedIn,Image,3/2/2024,n/a\n\
        Twitter,Video,3/3/2024,20\n";

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("socialMedia.csv"), LIKES).unwrap();
        dir
    }

    #[test]
    fn summary_json_lists_platforms_in_order() {
        let dir = fixture();
        let (json, groups) = summary_json(&dir.path().join("socialMedia.csv")).unwrap();
        assert_eq!(groups, 3);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entries = value.as_array().unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e["group"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Twitter", "Facebook", "LinkedIn"]);

        assert_eq!(entries[0]["count"], 3);
        assert_eq!(entries[0]["summary"]["median"], 20.0);
        assert_eq!(entries[0]["summary"]["min"], 10.0);
        assert_eq!(entries[1]["summary"]["max"], 5.0);
        assert_eq!(entries[2]["count"], 1);
        assert!(entries[2]["summary"].is_null());
    }

    #[test]
    fn summary_writes_output_file() {
        let dir = fixture();
        let output = dir.path().join("summary.json");
        let config = ReportConfig::default().with_data_dir(dir.path());

        summary(config, None, Some(output.clone())).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.ends_with("]\n"));
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
    }

    #[test]
    fn summary_of_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(summary_json(&dir.path().join("absent.csv")).is_err());
    }
}
