//! Drag gesture handling for both scroll axes.
//!
//! The host feeds [`DragEvent`]s in; the controller classifies the gesture
//! axis on the first movement, routes deltas into the matching
//! [`AxisScroll`], estimates release velocity and kicks off fling and
//! spring-back animations that [`ScrollController::tick`] advances.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::GridConfig;
use crate::decay::SplineDecay;
use crate::error::Result;
use crate::primitives::Point;
use crate::scroll::{AxisPhase, AxisScroll};
use crate::spring::SpringSpec;
use crate::velocity::VelocityTracker;

/// Pointer drag input from the host's gesture primitive.
///
/// `position` is the pointer location in viewport coordinates; `delta` is
/// the movement since the previous event (positive = pointer moved right /
/// down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DragEvent {
    Start { position: Point, time_ms: u64 },
    Move { position: Point, delta: Point, time_ms: u64 },
    End { time_ms: u64 },
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Saved settled offsets. Overscroll is transient and never saved.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollSnapshot {
    pub horizontal: f32,
    pub vertical: f32,
}

/// Two-axis scroll controller.
#[derive(Debug, Clone)]
pub struct ScrollController {
    horizontal: AxisScroll,
    vertical: AxisScroll,
    tracker: VelocityTracker,
    decay: SplineDecay,
    spring: SpringSpec,
    pull_multiplier: f32,
    max_overscroll: f32,
    /// Axis of the current gesture, fixed on its first movement.
    gesture_axis: Option<Axis>,
    horizontal_allowed: bool,
    /// Top decoration height from the last layout pass.
    top_height: f32,
    /// Table body height from the last layout pass.
    table_height: f32,
}

impl ScrollController {
    /// Build a controller from validated physics tunables.
    pub fn new(config: &GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            horizontal: AxisScroll::new(),
            vertical: AxisScroll::new(),
            tracker: VelocityTracker::new(config.velocity_horizon_ms),
            decay: SplineDecay::new(config.scroll_friction, config.density),
            spring: SpringSpec::new(
                config.spring_stiffness,
                config.spring_damping_ratio,
                config.spring_visibility_threshold,
            ),
            pull_multiplier: config.overscroll_pull_multiplier,
            max_overscroll: config.max_overscroll,
            gesture_axis: None,
            horizontal_allowed: true,
            top_height: 0.0,
            table_height: 0.0,
        })
    }

    // =====================================================================
    // State
    // =====================================================================

    #[inline]
    pub fn horizontal(&self) -> &AxisScroll {
        &self.horizontal
    }

    #[inline]
    pub fn vertical(&self) -> &AxisScroll {
        &self.vertical
    }

    pub fn axis(&self, axis: Axis) -> &AxisScroll {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut AxisScroll {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    pub fn phase(&self, axis: Axis) -> AxisPhase {
        self.axis(axis).phase()
    }

    /// Effective scroll `(horizontal, vertical)`: settled plus overscroll.
    pub fn effective_offsets(&self) -> (f32, f32) {
        (self.horizontal.effective(), self.vertical.effective())
    }

    /// Axis the current (or last) gesture was classified as.
    pub fn gesture_axis(&self) -> Option<Axis> {
        self.gesture_axis
    }

    /// Whether the current gesture may scroll columns.
    pub fn horizontal_allowed(&self) -> bool {
        self.horizontal_allowed
    }

    pub fn is_animating(&self) -> bool {
        self.horizontal.is_animating() || self.vertical.is_animating()
    }

    // =====================================================================
    // Layout feedback
    // =====================================================================

    /// Publish new maximum offsets, clamping settled offsets into range.
    pub fn update_bounds(&mut self, max_horizontal: f32, max_vertical: f32) {
        self.horizontal.set_max_offset(max_horizontal);
        self.vertical.set_max_offset(max_vertical);
    }

    /// Record where the table body sits, for the horizontal-scroll band check.
    pub fn set_layout_extent(&mut self, top_height: f32, table_height: f32) {
        self.top_height = top_height;
        self.table_height = table_height;
    }

    pub fn snapshot(&self) -> ScrollSnapshot {
        ScrollSnapshot {
            horizontal: self.horizontal.settled(),
            vertical: self.vertical.settled(),
        }
    }

    pub fn restore(&mut self, snapshot: ScrollSnapshot) {
        self.horizontal.restore(snapshot.horizontal);
        self.vertical.restore(snapshot.vertical);
        self.gesture_axis = None;
        self.tracker.reset();
    }

    // =====================================================================
    // Input
    // =====================================================================

    pub fn handle_drag(&mut self, event: DragEvent) {
        tracing::trace!(?event, "drag event");
        match event {
            DragEvent::Start { position, time_ms } => self.drag_start(position, time_ms),
            DragEvent::Move {
                position,
                delta,
                time_ms,
            } => self.drag_move(position, delta, time_ms),
            DragEvent::End { time_ms } => self.drag_end(time_ms),
            DragEvent::Cancel => self.drag_cancel(),
        }
    }

    fn drag_start(&mut self, position: Point, time_ms: u64) {
        self.horizontal.begin_drag();
        self.vertical.begin_drag();
        self.tracker.reset();
        self.tracker.add_position(time_ms, position);
        self.gesture_axis = None;

        let start_y = position.y + self.vertical.settled();
        self.horizontal_allowed =
            self.top_height <= start_y && start_y <= self.top_height + self.table_height;
        tracing::trace!(
            start_y,
            top_height = self.top_height,
            table_height = self.table_height,
            horizontal_allowed = self.horizontal_allowed,
            "drag started"
        );
    }

    fn drag_move(&mut self, position: Point, delta: Point, time_ms: u64) {
        let axis = *self.gesture_axis.get_or_insert(if delta.x.abs() > delta.y.abs() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        });

        if axis == Axis::Horizontal && !self.horizontal_allowed {
            return;
        }

        self.tracker.add_position(time_ms, position);
        let (pull, max_overscroll) = (self.pull_multiplier, self.max_overscroll);
        let component = match axis {
            Axis::Horizontal => delta.x,
            Axis::Vertical => delta.y,
        };
        self.axis_mut(axis)
            .apply_drag_delta(component, pull, max_overscroll);
    }

    fn drag_end(&mut self, time_ms: u64) {
        self.finish_drag();

        let velocity = self.tracker.velocity();
        match self.gesture_axis {
            Some(Axis::Horizontal) if self.horizontal_allowed => {
                self.horizontal.fling(-velocity.x, &self.decay);
            }
            Some(Axis::Horizontal) => {}
            Some(Axis::Vertical) | None => {
                self.vertical.fling(-velocity.y, &self.decay);
            }
        }
        tracing::trace!(
            time_ms,
            vx = velocity.x,
            vy = velocity.y,
            axis = ?self.gesture_axis,
            "drag ended"
        );

        self.spring_back();
    }

    fn drag_cancel(&mut self) {
        self.finish_drag();
        self.spring_back();
    }

    fn finish_drag(&mut self) {
        self.horizontal.end_drag();
        self.vertical.end_drag();
    }

    fn spring_back(&mut self) {
        self.horizontal.spring_back(self.spring);
        self.vertical.spring_back(self.spring);
    }

    // =====================================================================
    // Animation
    // =====================================================================

    /// Advance every running animation by `dt`. Returns `true` while any
    /// animation is still running.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let horizontal = self.horizontal.tick(dt);
        let vertical = self.vertical.tick(dt);
        horizontal || vertical
    }
}
