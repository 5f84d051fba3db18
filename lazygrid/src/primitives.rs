//! Core geometry types for lazygrid.
//!
//! Scroll math runs in `f32`; everything handed to the host for measuring and
//! placing is snapped to integer pixels.

use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A point in 2D space (pointer positions, drag deltas).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

/// A 2D size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An integer pixel size, as reported by the host after measuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IntSize {
    pub width: i32,
    pub height: i32,
}

impl IntSize {
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// An integer pixel position relative to the viewport's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IntPoint {
    pub x: i32,
    pub y: i32,
}

impl IntPoint {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Snap a float position to the pixel grid, rounding halves up.
    #[inline]
    pub fn rounded(x: f32, y: f32) -> Self {
        Self {
            x: round_half_up(x),
            y: round_half_up(y),
        }
    }
}

/// Round to the nearest integer, with `.5` going towards positive infinity.
///
/// `f32::round` rounds halves away from zero, which makes items that sit
/// exactly half a pixel above the viewport jump by one pixel compared to
/// items below it.
#[inline]
pub fn round_half_up(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}
