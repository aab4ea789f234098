//! Axis layout: domain line, tick marks and tick labels.

use super::scale::{BandScale, LinearScale, TimeScale};
use super::shape::{HAlign, Rotation, Shape, TextStyle, VAlign};
use plotters::style::RGBColor;

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
const TICK_FONT_SIZE: u32 = 10;
const AXIS_COLOR: RGBColor = RGBColor(0, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orient {
    Bottom,
    Left,
}

/// A laid-out axis. For `Bottom` the offset is the y of the domain line, for
/// `Left` it is the x.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub orient: Orient,
    pub offset: f64,
    pub range: (f64, f64),
    pub ticks: Vec<(f64, String)>,
    pub label_rotation: Rotation,
}

impl Axis {
    pub fn linear(scale: &LinearScale, orient: Orient, offset: f64, count: usize) -> Self {
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|v| (scale.map(v), format_tick(v)))
            .collect();
        Self {
            orient,
            offset,
            range: scale.range,
            ticks,
            label_rotation: Rotation::None,
        }
    }

    pub fn band(scale: &BandScale, orient: Orient, offset: f64, range: (f64, f64)) -> Self {
        let ticks = scale
            .domain()
            .iter()
            .filter_map(|key| scale.center(key).map(|pos| (pos, key.clone())))
            .collect();
        Self {
            orient,
            offset,
            range,
            ticks,
            label_rotation: Rotation::None,
        }
    }

    pub fn time(scale: &TimeScale, offset: f64, count: usize, format: &str) -> Self {
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|d| (scale.map(d), d.format(format).to_string()))
            .collect();
        Self {
            orient: Orient::Bottom,
            offset,
            range: scale.range,
            ticks,
            label_rotation: Rotation::None,
        }
    }

    pub fn rotate_labels(mut self, rotation: Rotation) -> Self {
        self.label_rotation = rotation;
        self
    }

    pub fn shapes(&self) -> Vec<Shape> {
        let mut shapes = Vec::with_capacity(1 + self.ticks.len() * 2);
        let line = |from, to| Shape::Line {
            from,
            to,
            color: AXIS_COLOR,
            width: 1,
        };
        let label_distance = TICK_SIZE + TICK_PADDING;

        match self.orient {
            Orient::Bottom => {
                let y = self.offset;
                shapes.push(line((self.range.0, y), (self.range.1, y)));
                for (x, label) in &self.ticks {
                    shapes.push(line((*x, y), (*x, y + TICK_SIZE)));
                    let style = match self.label_rotation {
                        Rotation::None => {
                            TextStyle::new(TICK_FONT_SIZE).align(HAlign::Middle, VAlign::Top)
                        }
                        Rotation::Up => TextStyle::new(TICK_FONT_SIZE)
                            .align(HAlign::End, VAlign::Middle)
                            .rotate(Rotation::Up),
                    };
                    shapes.push(Shape::Text {
                        text: label.clone(),
                        at: (*x, y + label_distance),
                        style,
                    });
                }
            }
            Orient::Left => {
                let x = self.offset;
                shapes.push(line((x, self.range.0), (x, self.range.1)));
                for (y, label) in &self.ticks {
                    shapes.push(line((x - TICK_SIZE, *y), (x, *y)));
                    shapes.push(Shape::Text {
                        text: label.clone(),
                        at: (x - label_distance, *y),
                        style: TextStyle::new(TICK_FONT_SIZE).align(HAlign::End, VAlign::Middle),
                    });
                }
            }
        }

        shapes
    }
}

/// Tick label with thousands separators and no trailing zeros.
pub fn format_tick(v: f64) -> String {
    // snap float noise such as 0.30000000000000004
    let v = (v * 1e9).round() / 1e9;
    let v = if v == 0.0 { 0.0 } else { v };
    let raw = v.abs().to_string();
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if v < 0.0 { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn formats_ticks() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(-0.0), "0");
        assert_eq!(format_tick(250.0), "250");
        assert_eq!(format_tick(1000.0), "1,000");
        assert_eq!(format_tick(1234567.5), "1,234,567.5");
        assert_eq!(format_tick(0.1 + 0.2), "0.3");
        assert_eq!(format_tick(-1500.0), "-1,500");
    }

    #[test]
    fn linear_axis_places_ticks_on_scale() {
        let scale = LinearScale::new((0.0, 100.0), (400.0, 0.0));
        let axis = Axis::linear(&scale, Orient::Left, 60.0, 5);

        assert_eq!(axis.ticks.first(), Some(&(400.0, "0".to_string())));
        assert_eq!(axis.ticks.last(), Some(&(0.0, "100".to_string())));

        // domain line plus a mark and a label per tick
        assert_eq!(axis.shapes().len(), 1 + axis.ticks.len() * 2);
    }

    #[test]
    fn band_axis_labels_band_centres() {
        let domain = vec!["A".to_string(), "B".to_string()];
        let scale = BandScale::new(domain, (0.0, 200.0));
        let axis = Axis::band(&scale, Orient::Bottom, 450.0, (0.0, 200.0));

        assert_eq!(
            axis.ticks,
            vec![(50.0, "A".to_string()), (150.0, "B".to_string())]
        );
    }

    #[test]
    fn time_axis_formats_dates() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let scale = TimeScale::new((start, end), (0.0, 600.0));
        let axis = Axis::time(&scale, 400.0, 7, "%m/%d/%y").rotate_labels(Rotation::Up);

        assert_eq!(axis.ticks.len(), 7);
        assert_eq!(axis.ticks[0], (0.0, "03/01/24".to_string()));

        let rotated = axis
            .shapes()
            .into_iter()
            .filter(|s| matches!(s, Shape::Text { style, .. } if style.rotation == Rotation::Up))
            .count();
        assert_eq!(rotated, 7);
    }
}
