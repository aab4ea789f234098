//! Pixel-space primitives produced by the chart layouts.

use plotters::style::RGBColor;

pub type Point = (f64, f64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}

/// Text orientation. `Up` reads bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    None,
    Up,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: u32,
    pub color: RGBColor,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub rotation: Rotation,
}

impl TextStyle {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            color: RGBColor(0, 0, 0),
            h_align: HAlign::Start,
            v_align: VAlign::Middle,
            rotation: Rotation::None,
        }
    }

    pub fn align(mut self, h_align: HAlign, v_align: VAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    pub fn rotate(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<RGBColor>,
        stroke: Option<(RGBColor, u32)>,
    },
    Line {
        from: Point,
        to: Point,
        color: RGBColor,
        width: u32,
    },
    Path {
        points: Vec<Point>,
        color: RGBColor,
        width: u32,
    },
    Text {
        text: String,
        at: Point,
        style: TextStyle,
    },
}

impl Shape {
    /// Move the shape by `(dx, dy)`.
    pub fn translate(self, (dx, dy): Point) -> Self {
        let shift = |(x, y): Point| (x + dx, y + dy);
        match self {
            Shape::Rect {
                x,
                y,
                width,
                height,
                fill,
                stroke,
            } => Shape::Rect {
                x: x + dx,
                y: y + dy,
                width,
                height,
                fill,
                stroke,
            },
            Shape::Line {
                from,
                to,
                color,
                width,
            } => Shape::Line {
                from: shift(from),
                to: shift(to),
                color,
                width,
            },
            Shape::Path {
                points,
                color,
                width,
            } => Shape::Path {
                points: points.into_iter().map(shift).collect(),
                color,
                width,
            },
            Shape::Text { text, at, style } => Shape::Text {
                text,
                at: shift(at),
                style,
            },
        }
    }
}

/// A complete chart: canvas size, background and shapes in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(width: f64, height: f64, background: RGBColor) -> Self {
        Self {
            width: width.round().max(1.0) as u32,
            height: height.round().max(1.0) as u32,
            background,
            shapes: Vec::new(),
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Append shapes drawn in a plot area offset by `origin`.
    pub fn extend_at<I>(&mut self, origin: Point, shapes: I)
    where
        I: IntoIterator<Item = Shape>,
    {
        self.shapes
            .extend(shapes.into_iter().map(|s| s.translate(origin)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_moves_every_point() {
        let path = Shape::Path {
            points: vec![(0.0, 0.0), (10.0, 5.0)],
            color: RGBColor(0, 0, 0),
            width: 1,
        };
        let moved = path.translate((50.0, 50.0));
        assert_eq!(
            moved,
            Shape::Path {
                points: vec![(50.0, 50.0), (60.0, 55.0)],
                color: RGBColor(0, 0, 0),
                width: 1,
            }
        );
    }

    #[test]
    fn scene_rounds_canvas_size() {
        let scene = Scene::new(679.6, 500.2, RGBColor(255, 255, 255));
        assert_eq!((scene.width, scene.height), (680, 500));
    }
}
