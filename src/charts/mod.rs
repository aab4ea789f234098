//! Charts module - Layout and rendering of the three report charts

mod axis;
mod barplot;
mod boxplot;
mod curve;
mod lineplot;
mod page;
mod renderer;
mod scale;
mod shape;

pub use barplot::BarChartLayout;
pub use boxplot::BoxPlotLayout;
pub use lineplot::LineChartLayout;
pub use page::write_index;
pub use renderer::{RenderError, StaticChartRenderer};
pub use shape::Scene;

use clap::ValueEnum;

/// The three charts of the report, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ChartKind {
    Boxplot,
    Barplot,
    Lineplot,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Boxplot, ChartKind::Barplot, ChartKind::Lineplot];

    /// Container id and output file stem.
    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Boxplot => "boxplot",
            ChartKind::Barplot => "barplot",
            ChartKind::Lineplot => "lineplot",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Boxplot => "Distribution of Likes by Platform",
            ChartKind::Barplot => "Average Likes by Platform and Post Type",
            ChartKind::Lineplot => "Average Likes over Time",
        }
    }
}

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Svg,
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}
