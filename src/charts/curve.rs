//! Natural cubic spline through a sequence of points.
//!
//! Each coordinate is solved independently as a tridiagonal system, giving
//! one cubic Bezier segment per pair of neighbouring points with zero second
//! derivative at both ends.

use super::shape::Point;

/// Cubic Bezier segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl CubicSegment {
    pub fn at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let (b0, b1, b2, b3) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        (
            b0 * self.start.0 + b1 * self.control1.0 + b2 * self.control2.0 + b3 * self.end.0,
            b0 * self.start.1 + b1 * self.control1.1 + b2 * self.control2.1 + b3 * self.end.1,
        )
    }
}

/// Bezier control points for one coordinate. Needs at least three values.
fn control_points(x: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = x.len() - 1;
    let mut a = vec![0.0; n];
    let mut b = vec![0.0; n];
    let mut r = vec![0.0; n];

    a[0] = 0.0;
    b[0] = 2.0;
    r[0] = x[0] + 2.0 * x[1];
    for i in 1..n - 1 {
        a[i] = 1.0;
        b[i] = 4.0;
        r[i] = 4.0 * x[i] + 2.0 * x[i + 1];
    }
    a[n - 1] = 2.0;
    b[n - 1] = 7.0;
    r[n - 1] = 8.0 * x[n - 1] + x[n];

    // forward sweep
    for i in 1..n {
        let m = a[i] / b[i - 1];
        b[i] -= m;
        r[i] -= m * r[i - 1];
    }

    // back substitution; `a` now holds the first control points
    a[n - 1] = r[n - 1] / b[n - 1];
    for i in (0..n - 1).rev() {
        a[i] = (r[i] - a[i + 1]) / b[i];
    }

    // second control points
    b[n - 1] = (x[n] + a[n - 1]) / 2.0;
    for i in 0..n - 1 {
        b[i] = 2.0 * x[i + 1] - a[i + 1];
    }

    (a, b)
}

/// Segments of the natural spline through `points`, in input order.
/// Two points give one straight segment; fewer give none.
pub fn natural_spline(points: &[Point]) -> Vec<CubicSegment> {
    match points.len() {
        0 | 1 => Vec::new(),
        2 => {
            let (p0, p1) = (points[0], points[1]);
            let third = |t: f64| (p0.0 + (p1.0 - p0.0) * t, p0.1 + (p1.1 - p0.1) * t);
            vec![CubicSegment {
                start: p0,
                control1: third(1.0 / 3.0),
                control2: third(2.0 / 3.0),
                end: p1,
            }]
        }
        _ => {
            let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
            let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
            let (ax, bx) = control_points(&xs);
            let (ay, by) = control_points(&ys);

            points
                .windows(2)
                .enumerate()
                .map(|(i, pair)| CubicSegment {
                    start: pair[0],
                    control1: (ax[i], ay[i]),
                    control2: (bx[i], by[i]),
                    end: pair[1],
                })
                .collect()
        }
    }
}

/// Flatten segments into a polyline with `steps` samples per segment.
pub fn flatten(segments: &[CubicSegment], steps: usize) -> Vec<Point> {
    let steps = steps.max(1);
    let mut out = Vec::with_capacity(segments.len() * steps + 1);
    if let Some(first) = segments.first() {
        out.push(first.start);
    }
    for segment in segments {
        for s in 1..=steps {
            out.push(segment.at(s as f64 / steps as f64));
        }
    }
    out
}
