//! Position scales for the chart.
//!
//! [`PointScale`] places ordinal categories (crash years) evenly across a pixel
//! range, [`LinearScale`] maps counts to pixels. The tick and "nice" rounding
//! rules follow the 1-2-5 stepping used by most charting libraries so the axes
//! read the same as the dashboards people already know.

use std::collections::HashSet;

/// Default number of ticks a linear axis aims for.
pub const DEFAULT_TICK_COUNT: usize = 10;

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Categorical scale mapping each distinct value to an evenly spaced point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointScale {
    domain: Vec<String>,
    range: (f64, f64),
    step: f64,
    offset: f64,
}

impl PointScale {
    /// Builds the scale from values in data order; duplicates keep their first position.
    pub fn new<I, S>(values: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let domain: Vec<String> = values
            .into_iter()
            .map(Into::into)
            .filter(|value| seen.insert(value.clone()))
            .collect();

        let (start, stop) = range;
        let gaps = domain.len().saturating_sub(1) as f64;
        let step = (stop - start) / gaps.max(1.0);
        // A single category is centered instead of pinned to the left edge
        let offset = start + (stop - start - step * gaps) * 0.5;

        Self {
            domain,
            range,
            step,
            offset,
        }
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn len(&self) -> usize {
        self.domain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    /// Distance between two neighbouring categories.
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn position(&self, value: &str) -> Option<f64> {
        self.domain
            .iter()
            .position(|candidate| candidate == value)
            .map(|index| self.offset + self.step * index as f64)
    }

    /// Every category with its position and, for every `every`-th one starting
    /// at the first, a label. The others keep their slot but stay unlabeled.
    pub fn thinned_ticks(&self, every: usize) -> Vec<(f64, Option<String>)> {
        let every = every.max(1);
        self.domain
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let position = self.offset + self.step * index as f64;
                let label = (index % every == 0).then(|| value.clone());
                (position, label)
            })
            .collect()
    }
}

/// Continuous scale mapping a numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Maps `value` to the range. A collapsed domain maps everything to the
    /// middle of the range.
    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d0 == d1 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Extends the domain outward so both ends land on a round tick increment.
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }

        let mut previous: Option<f64> = None;
        for _ in 0..10 {
            let Some(step) = tick_increment(start, stop, count) else {
                break;
            };
            if previous == Some(step) {
                // Avoid a "-0" lower bound from the negative-step branch
                let (start, stop) = (start + 0.0, stop + 0.0);
                self.domain = if reversed { (stop, start) } else { (start, stop) };
                break;
            } else if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            }
            previous = Some(step);
        }
        self
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (start, stop) = self.domain;
        let (low, high) = if stop < start { (stop, start) } else { (start, stop) };
        ticks(low, high, count)
    }

    /// Distance between two neighbouring ticks, used to pick label precision.
    pub fn tick_step(&self, count: usize) -> Option<f64> {
        let (start, stop) = self.domain;
        let (low, high) = if stop < start { (stop, start) } else { (start, stop) };
        tick_increment(low, high, count).map(|inc| if inc < 0.0 { -1.0 / inc } else { inc })
    }
}

struct TickSpec {
    first: f64,
    last: f64,
    /// Positive: the tick increment. Negative: the reciprocal of the increment, negated.
    increment: f64,
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<TickSpec> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let spec = if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let mut first = (start * inc).round();
        let mut last = (stop * inc).round();
        if first / inc < start {
            first += 1.0;
        }
        if last / inc > stop {
            last -= 1.0;
        }
        TickSpec {
            first,
            last,
            increment: -inc,
        }
    } else {
        let inc = 10f64.powf(power) * factor;
        let mut first = (start / inc).round();
        let mut last = (stop / inc).round();
        if first * inc < start {
            first += 1.0;
        }
        if last * inc > stop {
            last -= 1.0;
        }
        TickSpec {
            first,
            last,
            increment: inc,
        }
    };

    if spec.last < spec.first && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some(spec)
}

/// Round tick increment for `[start, stop]` aiming at `count` ticks.
///
/// Sub-unit increments come back negated and inverted (`-10.0` means `0.1`) so
/// callers can divide instead of multiplying by an inexact fraction.
pub fn tick_increment(start: f64, stop: f64, count: usize) -> Option<f64> {
    tick_spec(start, stop, count as f64).map(|spec| spec.increment)
}

/// Round tick values covering `[start, stop]`.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let Some(spec) = tick_spec(start, stop, count as f64) else {
        return Vec::new();
    };
    if spec.last < spec.first {
        return Vec::new();
    }

    let n = (spec.last - spec.first) as usize + 1;
    (0..n)
        .map(|i| {
            let index = spec.first + i as f64;
            if spec.increment < 0.0 {
                index / -spec.increment
            } else {
                index * spec.increment
            }
        })
        .collect()
}
