//! Static Chart Renderer
//! Draws a laid-out `Scene` with plotters, as an SVG document or a PNG file.
//!
//! Scenes are already in pixel space, so everything is drawn on the root
//! drawing area without a chart coordinate system.

use super::shape::{HAlign, Point, Rotation, Scene, Shape, TextStyle, VAlign};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle, FontTransform};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing backend failed: {0}")]
    Backend(String),
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn backend_error<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Backend(err.to_string())
}

fn px((x, y): Point) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the scene to an SVG document.
    pub fn render_svg(scene: &Scene) -> Result<String, RenderError> {
        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, (scene.width, scene.height))
                .into_drawing_area();
            Self::draw_scene(&root, scene)?;
            root.present().map_err(backend_error)?;
        }
        Ok(buffer)
    }

    /// Render the scene to an SVG file and return the document.
    pub fn save_svg(scene: &Scene, path: &Path) -> Result<String, RenderError> {
        let svg = Self::render_svg(scene)?;
        std::fs::write(path, &svg).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(svg)
    }

    /// Render the scene to a PNG file.
    pub fn save_png(scene: &Scene, path: &Path) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, (scene.width, scene.height)).into_drawing_area();
        Self::draw_scene(&root, scene)?;
        root.present().map_err(backend_error)?;
        Ok(())
    }

    fn draw_scene<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        scene: &Scene,
    ) -> Result<(), RenderError> {
        root.fill(&scene.background).map_err(backend_error)?;

        for shape in &scene.shapes {
            match shape {
                Shape::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                    stroke,
                } => {
                    let corners = [px((*x, *y)), px((x + width, y + height))];
                    if let Some(color) = fill {
                        root.draw(&Rectangle::new(corners, color.filled()))
                            .map_err(backend_error)?;
                    }
                    if let Some((color, stroke_width)) = stroke {
                        root.draw(&Rectangle::new(corners, color.stroke_width(*stroke_width)))
                            .map_err(backend_error)?;
                    }
                }
                Shape::Line {
                    from,
                    to,
                    color,
                    width,
                } => {
                    root.draw(&PathElement::new(
                        vec![px(*from), px(*to)],
                        color.stroke_width(*width),
                    ))
                    .map_err(backend_error)?;
                }
                Shape::Path {
                    points,
                    color,
                    width,
                } => {
                    let points: Vec<(i32, i32)> = points.iter().copied().map(px).collect();
                    root.draw(&PathElement::new(points, color.stroke_width(*width)))
                        .map_err(backend_error)?;
                }
                Shape::Text { text, at, style } => {
                    root.draw(&Text::new(text.as_str(), px(*at), Self::text_style(style)))
                        .map_err(backend_error)?;
                }
            }
        }

        debug!(
            shapes = scene.shapes.len(),
            width = scene.width,
            height = scene.height,
            "drew scene"
        );
        Ok(())
    }

    fn text_style(style: &TextStyle) -> plotters::style::TextStyle<'static> {
        let h_pos = match style.h_align {
            HAlign::Start => HPos::Left,
            HAlign::Middle => HPos::Center,
            HAlign::End => HPos::Right,
        };
        let v_pos = match style.v_align {
            VAlign::Top => VPos::Top,
            VAlign::Middle => VPos::Center,
            VAlign::Bottom => VPos::Bottom,
        };

        let mut font = FontDesc::new(
            FontFamily::SansSerif,
            f64::from(style.size),
            FontStyle::Normal,
        );
        if style.rotation == Rotation::Up {
            font = font.transform(FontTransform::Rotate270);
        }

        font.color(&style.color).pos(Pos::new(h_pos, v_pos))
    }
}
