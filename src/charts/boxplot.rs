//! Box plot of likes per platform.

use super::axis::{Axis, Orient};
use super::scale::{BandScale, LinearScale};
use super::shape::{HAlign, Rotation, Scene, Shape, TextStyle, VAlign};
use crate::config::{parse_colour, BoxPlotConfig, ConfigError};
use crate::data::{DataProcessor, LikeObservation};
use crate::stats::{FiveNumberSummary, StatsCalculator};
use tracing::{debug, warn};

/// Geometry for one platform's box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxGlyph {
    pub platform: String,
    pub summary: FiveNumberSummary,
    /// Left edge of the box.
    pub x: f64,
    pub width: f64,
    /// Whisker end points: y of `min` and y of `max`.
    pub whisker: (f64, f64),
    /// Top of the box, the y of Q3.
    pub box_top: f64,
    pub box_height: f64,
    pub median_y: f64,
}

impl BoxGlyph {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

#[derive(Debug, Clone)]
pub struct BoxPlotLayout {
    pub x: BandScale,
    pub y: LinearScale,
    pub boxes: Vec<BoxGlyph>,
}

impl BoxPlotLayout {
    pub fn new(rows: &[LikeObservation], config: &BoxPlotConfig) -> Self {
        let margin = &config.margin;

        let (lo, hi) = rows
            .iter()
            .map(|r| r.likes)
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        let domain = if lo.is_finite() { (lo, hi) } else { (0.0, 1.0) };
        let y = LinearScale::new(domain, (config.height - margin.bottom, margin.top));

        let platforms = DataProcessor::unique_in_order(rows.iter().map(|r| r.platform.as_str()));
        let x = BandScale::new(platforms, (margin.left + 10.0, config.width))
            .padding(config.band_padding);

        let mut boxes = Vec::new();
        for group in StatsCalculator::summarize_by_platform(rows) {
            let Some(summary) = group.summary else {
                warn!(platform = %group.group, "no numeric likes, skipping box");
                continue;
            };
            let Some(left) = x.position(&group.group) else {
                continue;
            };
            debug!(platform = %group.group, count = group.count, ?summary, "box summary");

            let box_top = y.map(summary.q3);
            boxes.push(BoxGlyph {
                platform: group.group,
                summary,
                x: left,
                width: x.bandwidth(),
                whisker: (y.map(summary.min), y.map(summary.max)),
                box_top,
                box_height: y.map(summary.q1) - box_top,
                median_y: y.map(summary.median),
            });
        }

        Self { x, y, boxes }
    }

    pub fn scene(&self, config: &BoxPlotConfig) -> Result<Scene, ConfigError> {
        let background = parse_colour(&config.background)?;
        let fill = parse_colour(&config.box_fill)?;
        let stroke = parse_colour(&config.stroke)?;
        let stroke_width = config.stroke_width;
        let margin = &config.margin;
        let axis_y = config.height - margin.bottom;
        let axis_x = margin.left + 10.0;

        let mut scene = Scene::new(config.width, config.height, background);

        let x_axis = Axis::band(&self.x, Orient::Bottom, axis_y, (axis_x, config.width));
        scene.shapes.extend(x_axis.shapes());
        scene.push(Shape::Text {
            text: "Platforms".into(),
            at: (config.width / 2.0, axis_y + 40.0),
            style: TextStyle::new(16).align(HAlign::Middle, VAlign::Bottom),
        });

        let y_axis = Axis::linear(&self.y, Orient::Left, axis_x, 10);
        scene.shapes.extend(y_axis.shapes());
        scene.push(Shape::Text {
            text: "Likes".into(),
            at: (axis_x - 40.0, config.height / 2.0),
            style: TextStyle::new(16)
                .align(HAlign::Middle, VAlign::Middle)
                .rotate(Rotation::Up),
        });

        for glyph in &self.boxes {
            let cx = glyph.center_x();
            scene.push(Shape::Line {
                from: (cx, glyph.whisker.0),
                to: (cx, glyph.whisker.1),
                color: stroke,
                width: stroke_width,
            });
            scene.push(Shape::Rect {
                x: glyph.x,
                y: glyph.box_top,
                width: glyph.width,
                height: glyph.box_height,
                fill: Some(fill),
                stroke: Some((stroke, stroke_width)),
            });
            scene.push(Shape::Line {
                from: (glyph.x, glyph.median_y),
                to: (glyph.x + glyph.width, glyph.median_y),
                color: stroke,
                width: stroke_width,
            });
        }

        Ok(scene)
    }
}
