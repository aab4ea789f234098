//! Grouped bar chart of average likes per platform and post type.

use super::axis::{Axis, Orient};
use super::scale::{BandScale, LinearScale, OrdinalColorScale};
use super::shape::{HAlign, Rotation, Scene, Shape, TextStyle, VAlign};
use crate::config::{parse_colour, BarChartConfig, ConfigError};
use crate::data::{DataProcessor, PostTypeAverage};
use plotters::style::RGBColor;
use tracing::warn;

const SWATCH_SIZE: f64 = 15.0;
const LEGEND_ROW: f64 = 20.0;

/// One bar, in plot-area coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub platform: String,
    pub post_type: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: RGBColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: RGBColor,
    /// Top of the swatch, relative to the legend origin.
    pub y: f64,
}

#[derive(Debug, Clone)]
pub struct BarChartLayout {
    pub outer: BandScale,
    pub inner: BandScale,
    pub y: LinearScale,
    pub plot_bottom: f64,
    pub bars: Vec<Bar>,
    pub legend: Vec<LegendEntry>,
}

impl BarChartLayout {
    pub fn new(rows: &[PostTypeAverage], config: &BarChartConfig) -> Result<Self, ConfigError> {
        let margin = &config.margin;
        let palette = config
            .palette
            .iter()
            .map(|c| parse_colour(c))
            .collect::<Result<Vec<_>, _>>()?;

        let platforms = DataProcessor::unique_in_order(rows.iter().map(|r| r.platform.as_str()));
        let post_types = DataProcessor::unique_in_order(rows.iter().map(|r| r.post_type.as_str()));

        let outer = BandScale::new(platforms, (0.0, config.width - margin.right))
            .padding(config.outer_padding);
        let inner = BandScale::new(post_types.clone(), (0.0, outer.bandwidth()))
            .padding(config.inner_padding);
        let colors = OrdinalColorScale::new(post_types.clone(), palette);

        let plot_bottom = config.height - margin.bottom;
        let max = rows
            .iter()
            .map(|r| r.avg_likes)
            .filter(|v| v.is_finite())
            .fold(f64::NEG_INFINITY, f64::max);
        let top = if max > 0.0 { max * config.headroom } else { 1.0 };
        let y = LinearScale::new((0.0, top), (plot_bottom, 0.0));

        let mut clamped = 0usize;
        let bars = rows
            .iter()
            .filter_map(|row| {
                let x = outer.position(&row.platform)? + inner.position(&row.post_type)?;
                let value = if !row.avg_likes.is_finite() || row.avg_likes < 0.0 {
                    clamped += 1;
                    0.0
                } else {
                    row.avg_likes
                };
                let bar_y = y.map(value);
                Some(Bar {
                    platform: row.platform.clone(),
                    post_type: row.post_type.clone(),
                    x,
                    y: bar_y,
                    width: inner.bandwidth(),
                    height: plot_bottom - bar_y,
                    color: colors.color(&row.post_type),
                })
            })
            .collect();
        if clamped > 0 {
            warn!(clamped, "bars with missing or negative averages drawn at zero height");
        }

        let legend = post_types
            .iter()
            .enumerate()
            .map(|(i, label)| LegendEntry {
                label: label.clone(),
                color: colors.color(label),
                y: i as f64 * LEGEND_ROW,
            })
            .collect();

        Ok(Self {
            outer,
            inner,
            y,
            plot_bottom,
            bars,
            legend,
        })
    }

    pub fn scene(&self, config: &BarChartConfig) -> Result<Scene, ConfigError> {
        let background = parse_colour(&config.background)?;
        let margin = &config.margin;
        let origin = (margin.left, margin.top);

        let mut scene = Scene::new(
            config.width + 60.0,
            config.height + margin.top + margin.bottom,
            background,
        );
        let mut plot = Vec::new();

        let x_axis = Axis::band(
            &self.outer,
            Orient::Bottom,
            self.plot_bottom,
            (0.0, config.width - margin.right),
        );
        plot.extend(x_axis.shapes());
        plot.extend(Axis::linear(&self.y, Orient::Left, 0.0, 10).shapes());

        plot.push(Shape::Text {
            text: "Platforms".into(),
            at: (config.width / 2.5, config.height + margin.bottom - 40.0),
            style: TextStyle::new(16).align(HAlign::Middle, VAlign::Bottom),
        });
        plot.push(Shape::Text {
            text: "Average Likes".into(),
            at: (-margin.left + 15.0, config.height / 2.0),
            style: TextStyle::new(16)
                .align(HAlign::Middle, VAlign::Middle)
                .rotate(Rotation::Up),
        });

        for bar in &self.bars {
            plot.push(Shape::Rect {
                x: bar.x,
                y: bar.y,
                width: bar.width,
                height: bar.height,
                fill: Some(bar.color),
                stroke: None,
            });
        }

        let legend_origin = (config.width - 150.0, margin.top);
        for entry in &self.legend {
            let swatch = Shape::Rect {
                x: 0.0,
                y: entry.y,
                width: SWATCH_SIZE,
                height: SWATCH_SIZE,
                fill: Some(entry.color),
                stroke: None,
            };
            let label = Shape::Text {
                text: entry.label.clone(),
                at: (20.0, entry.y + 12.0),
                style: TextStyle::new(12).align(HAlign::Start, VAlign::Middle),
            };
            plot.push(swatch.translate(legend_origin));
            plot.push(label.translate(legend_origin));
        }

        scene.extend_at(origin, plot);
        Ok(scene)
    }
}
