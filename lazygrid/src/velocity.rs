//! Pointer velocity estimation.
//!
//! Keeps a short history of `(time, position)` samples and fits a quadratic
//! to the ones inside the horizon by least squares; the fitted slope at the
//! newest sample is the release velocity. Fewer than three samples fall back
//! to a straight line.

use std::collections::VecDeque;

use crate::primitives::Point;

/// Samples kept at most, regardless of the horizon.
const HISTORY_SIZE: usize = 20;
/// A gap this long between samples means the pointer had stopped.
const ASSUME_STOPPED_MS: u64 = 40;

#[derive(Debug, Clone, Copy)]
struct Sample {
    time_ms: u64,
    position: Point,
}

/// Two-axis velocity tracker fed with absolute pointer positions.
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    samples: VecDeque<Sample>,
    horizon_ms: u64,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new(100)
    }
}

impl VelocityTracker {
    pub fn new(horizon_ms: u64) -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_SIZE),
            horizon_ms,
        }
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Record a pointer position. Samples must arrive in time order; an older
    /// timestamp than the newest sample restarts the history.
    pub fn add_position(&mut self, time_ms: u64, position: Point) {
        if self.samples.back().is_some_and(|last| time_ms < last.time_ms) {
            self.samples.clear();
        }
        if self.samples.len() == HISTORY_SIZE {
            self.samples.pop_front();
        }
        self.samples.push_back(Sample { time_ms, position });
    }

    /// Estimated velocity in px/s on both axes.
    pub fn velocity(&self) -> Point {
        let Some(newest) = self.samples.back() else {
            return Point::ORIGIN;
        };

        // Walk back from the newest sample while inside the horizon and
        // without a stall between consecutive samples.
        let mut times = Vec::with_capacity(self.samples.len());
        let mut xs = Vec::with_capacity(self.samples.len());
        let mut ys = Vec::with_capacity(self.samples.len());
        let mut previous = newest.time_ms;
        for sample in self.samples.iter().rev() {
            let age = newest.time_ms - sample.time_ms;
            let gap = previous - sample.time_ms;
            if age > self.horizon_ms || gap > ASSUME_STOPPED_MS {
                break;
            }
            previous = sample.time_ms;
            // Milliseconds relative to the newest sample (<= 0).
            times.push(-(age as f64));
            xs.push(f64::from(sample.position.x));
            ys.push(f64::from(sample.position.y));
        }

        // px/ms -> px/s
        Point::new(
            (slope(&times, &xs) * 1000.0) as f32,
            (slope(&times, &ys) * 1000.0) as f32,
        )
    }
}

/// Derivative at `t = 0` of the least-squares polynomial through the samples.
fn slope(times: &[f64], values: &[f64]) -> f64 {
    match times.len() {
        0 | 1 => 0.0,
        2 => linear_slope(times, values),
        _ => quadratic_slope(times, values).unwrap_or_else(|| linear_slope(times, values)),
    }
}

fn linear_slope(times: &[f64], values: &[f64]) -> f64 {
    let n = times.len() as f64;
    let mean_t = times.iter().sum::<f64>() / n;
    let mean_v = values.iter().sum::<f64>() / n;
    let mut num = 0.0;
    let mut den = 0.0;
    for (t, v) in times.iter().zip(values) {
        num += (t - mean_t) * (v - mean_v);
        den += (t - mean_t) * (t - mean_t);
    }
    if den.abs() < f64::EPSILON { 0.0 } else { num / den }
}

/// Fit `v = a + b t + c t^2`; returns `b`, or `None` if the system is singular.
fn quadratic_slope(times: &[f64], values: &[f64]) -> Option<f64> {
    let (mut s0, mut s1, mut s2, mut s3, mut s4) = (0.0, 0.0, 0.0, 0.0, 0.0);
    let (mut y0, mut y1, mut y2) = (0.0, 0.0, 0.0);
    for (&t, &v) in times.iter().zip(values) {
        let t2 = t * t;
        s0 += 1.0;
        s1 += t;
        s2 += t2;
        s3 += t2 * t;
        s4 += t2 * t2;
        y0 += v;
        y1 += v * t;
        y2 += v * t2;
    }

    // Normal equations, solved for b by Cramer's rule.
    let det = s0 * (s2 * s4 - s3 * s3) - s1 * (s1 * s4 - s3 * s2) + s2 * (s1 * s3 - s2 * s2);
    if det.abs() < f64::EPSILON {
        return None;
    }
    let det_b = s0 * (y1 * s4 - s3 * y2) - y0 * (s1 * s4 - s3 * s2) + s2 * (s1 * y2 - y1 * s2);
    Some(det_b / det)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_samples_is_zero() {
        let tracker = VelocityTracker::default();
        assert_eq!(tracker.velocity(), Point::ORIGIN);
    }

    #[test]
    fn constant_speed_is_recovered() {
        let mut tracker = VelocityTracker::new(100);
        // 0.5 px/ms right, 1 px/ms up
        for i in 0..8u64 {
            let t = i * 10;
            tracker.add_position(t, Point::new(t as f32 * 0.5, -(t as f32)));
        }
        let v = tracker.velocity();
        assert!((v.x - 500.0).abs() < 1.0, "vx = {}", v.x);
        assert!((v.y + 1000.0).abs() < 1.0, "vy = {}", v.y);
    }

    #[test]
    fn two_samples_use_a_line() {
        let mut tracker = VelocityTracker::new(100);
        tracker.add_position(0, Point::new(0.0, 0.0));
        tracker.add_position(16, Point::new(0.0, 32.0));
        let v = tracker.velocity();
        assert!((v.y - 2000.0).abs() < 1.0);
    }

    #[test]
    fn samples_past_the_horizon_are_ignored() {
        let mut tracker = VelocityTracker::new(100);
        // fast, long ago
        for i in 0..5u64 {
            tracker.add_position(i * 10, Point::new(0.0, i as f32 * 100.0));
        }
        // slow and recent, with no stall in between
        for i in 0..15u64 {
            let t = 50 + i * 10;
            tracker.add_position(t, Point::new(0.0, 400.0 + i as f32));
        }
        let v = tracker.velocity();
        assert!((v.y - 100.0).abs() < 1.0, "vy = {}", v.y);
    }

    #[test]
    fn a_stall_before_release_means_no_fling() {
        let mut tracker = VelocityTracker::new(100);
        tracker.add_position(0, Point::new(0.0, 0.0));
        tracker.add_position(10, Point::new(0.0, 50.0));
        tracker.add_position(80, Point::new(0.0, 50.0));
        assert_eq!(tracker.velocity(), Point::ORIGIN);
    }

    #[test]
    fn reset_clears_history() {
        let mut tracker = VelocityTracker::new(100);
        tracker.add_position(0, Point::new(0.0, 0.0));
        tracker.add_position(10, Point::new(10.0, 0.0));
        tracker.reset();
        assert!(tracker.is_empty());
        assert_eq!(tracker.velocity(), Point::ORIGIN);
    }
}
