//! A single animatable scalar.
//!
//! Holds a value plus at most one running animation (fling decay or spring).
//! Time only moves when the host calls [`Animatable::tick`]; starting a new
//! animation or snapping replaces whatever was running.

use std::time::Duration;

use crate::decay::{Fling, SplineDecay};
use crate::spring::SpringSpec;

#[derive(Debug, Clone)]
enum Animation {
    Decay { fling: Fling, elapsed: f64 },
    Spring { spec: SpringSpec, target: f32 },
}

/// A value that can be snapped, flung or sprung toward a target.
#[derive(Debug, Clone)]
pub struct Animatable {
    value: f32,
    velocity: f32,
    lower_bound: Option<f32>,
    upper_bound: Option<f32>,
    animation: Option<Animation>,
}

impl Default for Animatable {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Animatable {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
            lower_bound: None,
            upper_bound: None,
            animation: None,
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether the running animation (if any) is a fling.
    pub fn is_decaying(&self) -> bool {
        matches!(self.animation, Some(Animation::Decay { .. }))
    }

    /// Whether the running animation (if any) is a spring.
    pub fn is_springing(&self) -> bool {
        matches!(self.animation, Some(Animation::Spring { .. }))
    }

    /// Stop the running animation, keeping the current value.
    pub fn stop(&mut self) {
        self.animation = None;
        self.velocity = 0.0;
    }

    /// Jump to `value` (clamped to the bounds), cancelling any animation.
    pub fn snap_to(&mut self, value: f32) {
        self.stop();
        self.value = self.clamp(value);
    }

    /// Set new bounds and clamp the current value into them.
    pub fn update_bounds(&mut self, lower: Option<f32>, upper: Option<f32>) {
        self.lower_bound = lower;
        self.upper_bound = match (lower, upper) {
            (Some(lo), Some(hi)) if hi < lo => Some(lo),
            _ => upper,
        };
        let clamped = self.clamp(self.value);
        if clamped != self.value {
            self.value = clamped;
            if self.is_decaying() {
                self.stop();
            }
        }
    }

    /// Start a fling from the current value with an initial velocity (px/s).
    pub fn animate_decay(&mut self, initial_velocity: f32, decay: &SplineDecay) {
        let into_bound = (initial_velocity < 0.0
            && self.lower_bound.is_some_and(|lo| self.value <= lo))
            || (initial_velocity > 0.0 && self.upper_bound.is_some_and(|hi| self.value >= hi));
        if initial_velocity == 0.0 || into_bound {
            self.stop();
            return;
        }
        self.velocity = initial_velocity;
        self.animation = Some(Animation::Decay {
            fling: decay.fling(self.value, initial_velocity),
            elapsed: 0.0,
        });
    }

    /// Start a spring toward `target`, carrying over the current velocity.
    pub fn animate_to(&mut self, target: f32, spec: SpringSpec) {
        if spec.is_settled(self.value, self.velocity, target) {
            self.value = target;
            self.stop();
            return;
        }
        self.animation = Some(Animation::Spring { spec, target });
    }

    /// Advance the running animation. Returns `true` while still running.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };

        let finished = match animation {
            Animation::Decay { fling, elapsed } => {
                *elapsed += dt.as_secs_f64();
                let value = fling.value_at(*elapsed);
                self.velocity = fling.velocity_at(*elapsed);
                let clamped = clamp_to(value, self.lower_bound, self.upper_bound);
                self.value = clamped;
                // Hitting a bound ends the fling there.
                clamped != value || fling.is_finished(*elapsed)
            }
            Animation::Spring { spec, target } => {
                let (value, velocity) =
                    spec.step(self.value, self.velocity, *target, dt.as_secs_f32());
                if spec.is_settled(value, velocity, *target) {
                    self.value = *target;
                    true
                } else {
                    self.value = value;
                    self.velocity = velocity;
                    false
                }
            }
        };

        if finished {
            self.stop();
        }
        !finished
    }

    fn clamp(&self, value: f32) -> f32 {
        clamp_to(value, self.lower_bound, self.upper_bound)
    }
}

fn clamp_to(value: f32, lower: Option<f32>, upper: Option<f32>) -> f32 {
    let value = lower.map_or(value, |lo| value.max(lo));
    upper.map_or(value, |hi| value.min(hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn run(anim: &mut Animatable) -> usize {
        let mut frames = 0;
        while anim.tick(FRAME) {
            frames += 1;
            assert!(frames < 10_000, "animation never finished");
        }
        frames
    }

    #[test]
    fn snap_clamps_to_bounds() {
        let mut anim = Animatable::new(0.0);
        anim.update_bounds(Some(0.0), Some(100.0));
        anim.snap_to(250.0);
        assert_eq!(anim.value(), 100.0);
        anim.snap_to(-5.0);
        assert_eq!(anim.value(), 0.0);
    }

    #[test]
    fn unbounded_snap_keeps_value() {
        let mut anim = Animatable::new(0.0);
        anim.snap_to(-42.0);
        assert_eq!(anim.value(), -42.0);
    }

    #[test]
    fn shrinking_bounds_clamps_value() {
        let mut anim = Animatable::new(500.0);
        anim.update_bounds(Some(0.0), Some(200.0));
        assert_eq!(anim.value(), 200.0);
    }

    #[test]
    fn fling_stops_at_upper_bound() {
        let decay = SplineDecay::new(0.015, 1.0);
        let mut anim = Animatable::new(90.0);
        anim.update_bounds(Some(0.0), Some(100.0));
        anim.animate_decay(5000.0, &decay);
        assert!(anim.is_decaying());
        run(&mut anim);
        assert_eq!(anim.value(), 100.0);
        assert!(!anim.is_running());
    }

    #[test]
    fn fling_runs_to_its_target_when_unbounded() {
        let decay = SplineDecay::new(0.015, 1.0);
        let target = decay.fling(0.0, -1500.0).target();
        let mut anim = Animatable::new(0.0);
        anim.animate_decay(-1500.0, &decay);
        run(&mut anim);
        assert!((anim.value() - target).abs() < 1e-2);
    }

    #[test]
    fn stop_keeps_value_mid_fling() {
        let decay = SplineDecay::new(0.015, 1.0);
        let mut anim = Animatable::new(0.0);
        anim.animate_decay(3000.0, &decay);
        for _ in 0..5 {
            anim.tick(FRAME);
        }
        let value = anim.value();
        assert!(value > 0.0);
        anim.stop();
        assert_eq!(anim.value(), value);
        assert!(!anim.tick(FRAME));
        assert_eq!(anim.value(), value);
    }

    #[test]
    fn spring_lands_on_target() {
        let mut anim = Animatable::new(-150.0);
        anim.animate_to(0.0, SpringSpec::new(400.0, 1.0, 0.01));
        assert!(anim.is_springing());
        run(&mut anim);
        assert_eq!(anim.value(), 0.0);
    }

    #[test]
    fn spring_to_current_value_is_immediate() {
        let mut anim = Animatable::new(0.0);
        anim.animate_to(0.0, SpringSpec::new(400.0, 1.0, 0.01));
        assert!(!anim.is_running());
    }

    #[test]
    fn zero_velocity_fling_does_nothing() {
        let decay = SplineDecay::new(0.015, 1.0);
        let mut anim = Animatable::new(10.0);
        anim.animate_decay(0.0, &decay);
        assert!(!anim.is_running());
        assert_eq!(anim.value(), 10.0);
    }
}
