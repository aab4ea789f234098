//! Time-series line chart of daily average likes.

use super::axis::{Axis, Orient};
use super::curve::{flatten, natural_spline};
use super::scale::{LinearScale, TimeScale};
use super::shape::{HAlign, Point, Rotation, Scene, Shape, TextStyle, VAlign};
use crate::config::{parse_colour, ConfigError, LineChartConfig};
use crate::data::DailyAverage;
use chrono::NaiveDate;
use tracing::warn;

/// Samples per spline segment when flattening the curve.
const CURVE_STEPS: usize = 16;

#[derive(Debug, Clone)]
pub struct LineChartLayout {
    /// `None` when no row has a usable date.
    pub x: Option<TimeScale>,
    pub y: LinearScale,
    /// Dates of the plotted rows, in input order.
    pub dates: Vec<NaiveDate>,
    /// One anchor point per plotted row, in input order.
    pub points: Vec<Point>,
    /// Flattened spline through `points`.
    pub path: Vec<Point>,
    pub skipped: usize,
}

impl LineChartLayout {
    pub fn new(rows: &[DailyAverage], config: &LineChartConfig) -> Self {
        let valid: Vec<(NaiveDate, f64)> = rows
            .iter()
            .filter_map(|r| match r.date {
                Some(date) if r.avg_likes.is_finite() => Some((date, r.avg_likes)),
                _ => None,
            })
            .collect();
        let skipped = rows.len() - valid.len();
        if skipped > 0 {
            warn!(skipped, "skipping rows with an invalid date or value");
        }

        let max = valid.iter().map(|(_, v)| *v).fold(0.0, f64::max);
        let y = LinearScale::new((0.0, max), (config.height, 0.0)).nice(10);

        let x = match (
            valid.iter().map(|(d, _)| *d).min(),
            valid.iter().map(|(d, _)| *d).max(),
        ) {
            (Some(first), Some(last)) => Some(TimeScale::new((first, last), (0.0, config.width))),
            _ => None,
        };

        let points: Vec<Point> = match &x {
            Some(x) => valid.iter().map(|(d, v)| (x.map(*d), y.map(*v))).collect(),
            None => Vec::new(),
        };
        let path = flatten(&natural_spline(&points), CURVE_STEPS);

        Self {
            x,
            y,
            dates: valid.into_iter().map(|(d, _)| d).collect(),
            points,
            path,
            skipped,
        }
    }

    pub fn scene(&self, config: &LineChartConfig) -> Result<Scene, ConfigError> {
        let background = parse_colour(&config.background)?;
        let stroke = parse_colour(&config.stroke)?;
        let margin = &config.margin;
        let origin = (margin.left, margin.top);

        let mut scene = Scene::new(
            config.width + 80.0,
            config.height + margin.top + margin.bottom + 50.0,
            background,
        );
        let mut plot = Vec::new();

        if let Some(x) = &self.x {
            let x_axis = Axis::time(x, config.height, self.points.len(), &config.date_format)
                .rotate_labels(Rotation::Up);
            plot.extend(x_axis.shapes());
        }
        plot.extend(Axis::linear(&self.y, Orient::Left, 0.0, 10).shapes());

        plot.push(Shape::Text {
            text: "Date".into(),
            at: (config.width / 2.0, config.height + margin.bottom + 30.0),
            style: TextStyle::new(16).align(HAlign::Middle, VAlign::Bottom),
        });
        plot.push(Shape::Text {
            text: "Average Likes".into(),
            at: (-margin.left + 15.0, config.height / 2.0),
            style: TextStyle::new(16)
                .align(HAlign::Middle, VAlign::Middle)
                .rotate(Rotation::Up),
        });

        if self.path.len() > 1 {
            plot.push(Shape::Path {
                points: self.path.clone(),
                color: stroke,
                width: config.stroke_width,
            });
        }

        scene.extend_at(origin, plot);
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 3, d)
    }

    fn rows() -> Vec<DailyAverage> {
        [(1, 480.0), (2, 512.0), (3, 455.0), (4, 530.0), (5, 610.0), (6, 575.0), (7, 590.0)]
            .into_iter()
            .map(|(d, avg_likes)| DailyAverage {
                date: day(d),
                avg_likes,
            })
            .collect()
    }

    #[test]
    fn one_point_per_row_in_input_order() {
        let data = rows();
        let layout = LineChartLayout::new(&data, &LineChartConfig::default());

        assert_eq!(layout.points.len(), data.len());
        assert_eq!(layout.points[0].0, 0.0);
        assert_eq!(layout.points[6].0, 600.0);
        assert!(layout.points.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(layout.path.len(), (data.len() - 1) * CURVE_STEPS + 1);
    }

    #[test]
    fn unsorted_input_keeps_input_order() {
        let mut data = rows();
        data.swap(0, 3);
        let layout = LineChartLayout::new(&data, &LineChartConfig::default());

        assert_eq!(layout.dates[0], day(4).unwrap());
        assert_eq!(layout.dates[3], day(1).unwrap());
        assert_eq!(layout.points[3].0, 0.0);
    }

    #[test]
    fn value_scale_is_nice_and_starts_at_zero() {
        let layout = LineChartLayout::new(&rows(), &LineChartConfig::default());
        assert_eq!(layout.y.domain, (0.0, 650.0));
        assert_eq!(layout.y.range, (400.0, 0.0));
    }

    #[test]
    fn invalid_rows_are_skipped() {
        let mut data = rows();
        data.push(DailyAverage {
            date: None,
            avg_likes: 100.0,
        });
        data.push(DailyAverage {
            date: day(8),
            avg_likes: f64::NAN,
        });
        let layout = LineChartLayout::new(&data, &LineChartConfig::default());

        assert_eq!(layout.skipped, 2);
        assert_eq!(layout.points.len(), 7);
    }

    #[test]
    fn empty_input_draws_no_path() {
        let config = LineChartConfig::default();
        let layout = LineChartLayout::new(&[], &config);
        assert!(layout.x.is_none());

        let scene = layout.scene(&config).unwrap();
        assert!(!scene.shapes.iter().any(|s| matches!(s, Shape::Path { .. })));
        assert_eq!((scene.width, scene.height), (680, 550));
    }

    #[test]
    fn scene_has_one_tick_label_per_day() {
        let config = LineChartConfig::default();
        let layout = LineChartLayout::new(&rows(), &config);
        let scene = layout.scene(&config).unwrap();

        let date_labels = scene
            .shapes
            .iter()
            .filter(|s| matches!(s, Shape::Text { text, .. } if text.starts_with("03/")))
            .count();
        assert_eq!(date_labels, 7);
        assert_eq!(
            scene.shapes.iter().filter(|s| matches!(s, Shape::Path { .. })).count(),
            1
        );
    }
}
