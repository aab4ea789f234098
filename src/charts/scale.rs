//! Scales mapping data domains onto pixel ranges.

use chrono::{Duration, NaiveDate};
use plotters::style::RGBColor;

/// Continuous scale: `map(v) = r0 + (v - d0) / (d1 - d0) * (r1 - r0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Widen the domain outward to round step boundaries.
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }

        let mut prestep = 0.0;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if step == prestep || !step.is_finite() || step == 0.0 {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            }
            prestep = step;
        }

        self.domain = if reversed { (stop, start) } else { (start, stop) };
        self
    }

    /// Round tick values inside the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut start, mut stop) = self.domain;
        if !start.is_finite() || !stop.is_finite() || count == 0 {
            return Vec::new();
        }
        if start == stop {
            return vec![start];
        }
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }

        let inc = tick_increment(start, stop, count);
        if !inc.is_finite() {
            return Vec::new();
        }
        let mut ticks: Vec<f64> = if inc > 0.0 {
            let i0 = (start / inc).ceil() as i64;
            let i1 = (stop / inc).floor() as i64;
            (i0..=i1).map(|i| i as f64 * inc).collect()
        } else if inc < 0.0 {
            let inv = -inc;
            let i0 = (start * inv).ceil() as i64;
            let i1 = (stop * inv).floor() as i64;
            (i0..=i1).map(|i| i as f64 / inv).collect()
        } else {
            Vec::new()
        };

        if reversed {
            ticks.reverse();
        }
        ticks
    }
}

/// Step between ticks using the 1/2/5 × 10^k rule. Steps below one come
/// back negated and inverted (`-10` for `0.1`) to keep tick values exact.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

/// Categorical scale splitting a pixel range into equal bands.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
}

impl BandScale {
    pub fn new(domain: Vec<String>, range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
        }
    }

    /// Set inner and outer padding together.
    pub fn padding(mut self, p: f64) -> Self {
        let p = p.clamp(0.0, 1.0);
        self.padding_inner = p;
        self.padding_outer = p;
        self
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    fn step(&self) -> f64 {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        (r1 - r0) / (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0)
    }

    fn first_band(&self) -> f64 {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        r0 + (r1 - r0 - self.step() * (n - self.padding_inner)) * self.align
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Start of the band for `key`, `None` when the key is not in the domain.
    pub fn position(&self, key: &str) -> Option<f64> {
        let index = self.domain.iter().position(|d| d == key)?;
        Some(self.first_band() + self.step() * index as f64)
    }

    /// Centre of the band for `key`.
    pub fn center(&self, key: &str) -> Option<f64> {
        self.position(key).map(|x| x + self.bandwidth() / 2.0)
    }
}

/// Maps categories to a fixed colour palette in domain order.
#[derive(Debug, Clone)]
pub struct OrdinalColorScale {
    domain: Vec<String>,
    palette: Vec<RGBColor>,
}

impl OrdinalColorScale {
    pub fn new(domain: Vec<String>, palette: Vec<RGBColor>) -> Self {
        Self { domain, palette }
    }

    pub fn color(&self, key: &str) -> RGBColor {
        if self.palette.is_empty() {
            return RGBColor(0, 0, 0);
        }
        let index = self.domain.iter().position(|d| d == key).unwrap_or(0);
        self.palette[index % self.palette.len()]
    }
}

/// Calendar scale, linear over whole days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    pub domain: (NaiveDate, NaiveDate),
    pub range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    fn span_days(&self) -> i64 {
        (self.domain.1 - self.domain.0).num_days()
    }

    pub fn map(&self, date: NaiveDate) -> f64 {
        let days = (date - self.domain.0).num_days() as f64;
        LinearScale::new((0.0, self.span_days() as f64), self.range).map(days)
    }

    /// Dates from the domain start, `ceil(span / count)` days apart.
    pub fn ticks(&self, count: usize) -> Vec<NaiveDate> {
        let span = self.span_days();
        if span < 0 {
            return Vec::new();
        }
        let count = count.max(1) as i64;
        let step = ((span + count - 1) / count).max(1);

        (0..=span / step)
            .map(|i| self.domain.0 + Duration::days(i * step))
            .collect()
    }
}
