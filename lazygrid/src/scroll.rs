//! Per-axis scroll state.
//!
//! Each axis owns two animatables: the settled offset, bounded to
//! `[0, max_offset]`, and a transient overscroll displacement that is pulled
//! out while dragging past a bound and springs back to zero afterwards. The
//! layout engine scrolls by their sum.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::Animatable;
use crate::decay::SplineDecay;
use crate::spring::SpringSpec;

/// What an axis is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisPhase {
    Idle,
    Dragging,
    Flinging,
    SpringingBack,
}

/// Scroll state for one axis.
#[derive(Debug, Clone)]
pub struct AxisScroll {
    settled: Animatable,
    overscroll: Animatable,
    /// Published by the layout pass; infinite until the first pass.
    max_offset: f32,
    dragging: bool,
}

impl Default for AxisScroll {
    fn default() -> Self {
        Self::new()
    }
}

impl AxisScroll {
    pub fn new() -> Self {
        let mut settled = Animatable::new(0.0);
        settled.update_bounds(Some(0.0), None);
        Self {
            settled,
            overscroll: Animatable::new(0.0),
            max_offset: f32::INFINITY,
            dragging: false,
        }
    }

    // =====================================================================
    // Accessors
    // =====================================================================

    #[inline]
    pub fn settled(&self) -> f32 {
        self.settled.value()
    }

    #[inline]
    pub fn overscroll(&self) -> f32 {
        self.overscroll.value()
    }

    /// Settled offset plus overscroll; what the layout pass scrolls by.
    #[inline]
    pub fn effective(&self) -> f32 {
        self.settled.value() + self.overscroll.value()
    }

    #[inline]
    pub fn max_offset(&self) -> f32 {
        self.max_offset
    }

    pub fn phase(&self) -> AxisPhase {
        if self.dragging {
            AxisPhase::Dragging
        } else if self.settled.is_decaying() {
            AxisPhase::Flinging
        } else if self.overscroll.is_running() {
            AxisPhase::SpringingBack
        } else {
            AxisPhase::Idle
        }
    }

    pub fn is_animating(&self) -> bool {
        self.settled.is_running() || self.overscroll.is_running()
    }

    // =====================================================================
    // Bounds
    // =====================================================================

    /// Publish a new maximum offset and clamp the settled offset into range.
    pub fn set_max_offset(&mut self, max_offset: f32) {
        let max_offset = max_offset.max(0.0);
        self.max_offset = max_offset;
        self.settled.update_bounds(Some(0.0), Some(max_offset));
    }

    /// Put the settled offset back to a saved value. The upper bound is
    /// lifted until the next layout pass publishes a fresh one, so a value
    /// saved under a larger viewport is not cut short.
    pub fn restore(&mut self, settled: f32) {
        self.stop();
        self.max_offset = f32::INFINITY;
        self.settled.update_bounds(Some(0.0), None);
        self.settled.snap_to(settled);
        self.overscroll.snap_to(0.0);
    }

    // =====================================================================
    // Gesture
    // =====================================================================

    /// Freeze both animatables at their current values.
    pub fn stop(&mut self) {
        self.settled.stop();
        self.overscroll.stop();
    }

    pub fn begin_drag(&mut self) {
        self.stop();
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Apply one drag delta. In range it moves the settled offset; past a
    /// bound a fraction of it goes into overscroll instead.
    pub fn apply_drag_delta(&mut self, delta: f32, pull_multiplier: f32, max_overscroll: f32) {
        let candidate = self.settled.value() - delta;
        if (0.0..=self.max_offset).contains(&candidate) {
            if self.overscroll.value() != 0.0 {
                self.overscroll.snap_to(0.0);
            }
            self.settled.snap_to(candidate);
        } else {
            let pulled = (self.overscroll.value() - delta * pull_multiplier)
                .clamp(-max_overscroll, max_overscroll);
            self.overscroll.snap_to(pulled);
        }
    }

    /// Fling the settled offset with an initial velocity in px/s.
    pub fn fling(&mut self, velocity: f32, decay: &SplineDecay) {
        self.settled.animate_decay(velocity, decay);
    }

    /// Spring the overscroll back to zero.
    pub fn spring_back(&mut self, spec: SpringSpec) {
        self.overscroll.animate_to(0.0, spec);
    }

    /// Advance both animations. Returns `true` while either is running.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let settled = self.settled.tick(dt);
        let overscroll = self.overscroll.tick(dt);
        settled || overscroll
    }
}
