//! Report configuration
//!
//! Input file names, canvas sizes, margins and colours for the three charts.
//! Every field has a default, so a config file only needs the values it
//! overrides.

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid colour `{0}`, expected #rrggbb")]
    Colour(String),
}

/// Pixel margins around a plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 50.0,
            bottom: 50.0,
            left: 50.0,
            right: 150.0,
        }
    }
}

/// Box plot settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxPlotConfig {
    pub input: PathBuf,
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub background: String,
    pub box_fill: String,
    pub stroke: String,
    pub stroke_width: u32,
    pub band_padding: f64,
}

impl Default for BoxPlotConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("socialMedia.csv"),
            width: 680.0,
            height: 500.0,
            margin: Margin::default(),
            background: "#add8e6".into(), // lightblue
            box_fill: "#ee82ee".into(),   // violet
            stroke: "#000000".into(),
            stroke_width: 2,
            band_padding: 0.5,
        }
    }
}

/// Grouped bar chart settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarChartConfig {
    pub input: PathBuf,
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub background: String,
    pub palette: Vec<String>,
    pub outer_padding: f64,
    pub inner_padding: f64,
    /// Headroom above the tallest bar, as a multiple of the max value.
    pub headroom: f64,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("socialMediaAvg.csv"),
            width: 600.0,
            height: 400.0,
            margin: Margin::default(),
            background: "#ffffe0".into(), // lightyellow
            palette: vec!["#1f77b4".into(), "#ff7f0e".into(), "#2ca02c".into()],
            outer_padding: 0.2,
            inner_padding: 0.05,
            headroom: 1.2,
        }
    }
}

/// Time-series line chart settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineChartConfig {
    pub input: PathBuf,
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub background: String,
    pub stroke: String,
    pub stroke_width: u32,
    pub date_format: String,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("socialMediaTime.csv"),
            width: 600.0,
            height: 400.0,
            margin: Margin::default(),
            background: "#90ee90".into(), // lightgreen
            stroke: "#4682b4".into(),     // steelblue
            stroke_width: 2,
            date_format: "%m/%d/%y".into(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub boxplot: BoxPlotConfig,
    pub barplot: BarChartConfig,
    pub lineplot: LineChartConfig,
}

impl ReportConfig {
    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve relative input paths against the data directory.
    pub fn with_data_dir(mut self, data_dir: &Path) -> Self {
        for input in [
            &mut self.boxplot.input,
            &mut self.barplot.input,
            &mut self.lineplot.input,
        ] {
            if input.is_relative() {
                *input = data_dir.join(&*input);
            }
        }
        self
    }
}

/// Parse a `#rrggbb` colour.
pub fn parse_colour(raw: &str) -> Result<RGBColor, ConfigError> {
    let hex = raw.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(ConfigError::Colour(raw.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ConfigError::Colour(raw.to_string()))
    };
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}
