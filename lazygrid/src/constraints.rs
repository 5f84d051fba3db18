//! Layout constraints handed to the host when measuring an item.
//!
//! Mirrors the usual box-constraints model: the host must return a size
//! inside `[min, max]` on both axes. Sizes it reports outside the range are
//! coerced with [`LayoutConstraints::constrain_int`].

use crate::primitives::{IntSize, Size};

/// Min/max bounds for a measured item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConstraints {
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
}

impl LayoutConstraints {
    /// Unbounded constraints (infinite max, zero min).
    pub const UNBOUNDED: Self = Self {
        min_width: 0.0,
        max_width: f32::INFINITY,
        min_height: 0.0,
        max_height: f32::INFINITY,
    };

    /// Create tight constraints (exact size required).
    #[inline]
    pub fn tight(width: f32, height: f32) -> Self {
        Self {
            min_width: width,
            max_width: width,
            min_height: height,
            max_height: height,
        }
    }

    /// Tight constraints for an integer cell size.
    #[inline]
    pub fn fixed(size: IntSize) -> Self {
        Self::tight(size.width as f32, size.height as f32)
    }

    /// Create loose constraints with maximum bounds.
    #[inline]
    pub fn loose(max_width: f32, max_height: f32) -> Self {
        Self {
            min_width: 0.0,
            max_width,
            min_height: 0.0,
            max_height,
        }
    }

    /// Same width bounds, height released: `min_height = 0`, no upper bound.
    #[inline]
    pub fn with_unbounded_height(&self) -> Self {
        Self {
            min_height: 0.0,
            max_height: f32::INFINITY,
            ..*self
        }
    }

    /// Constrain a size to these bounds.
    #[inline]
    pub fn constrain(&self, size: Size) -> Size {
        debug_assert!(!size.width.is_nan(), "NaN width in layout");
        debug_assert!(!size.height.is_nan(), "NaN height in layout");
        Size {
            width: size.width.clamp(self.min_width, self.max_width),
            height: size.height.clamp(self.min_height, self.max_height),
        }
    }

    /// Constrain an integer size, keeping it on the pixel grid.
    pub fn constrain_int(&self, size: IntSize) -> IntSize {
        let c = self.constrain(Size::new(size.width as f32, size.height as f32));
        IntSize::new(c.width.round() as i32, c.height.round() as i32)
    }

    /// Check if max_width is finite (bounded).
    #[inline]
    pub fn has_bounded_width(&self) -> bool {
        self.max_width.is_finite()
    }

    /// Check if max_height is finite (bounded).
    #[inline]
    pub fn has_bounded_height(&self) -> bool {
        self.max_height.is_finite()
    }

    /// Get the biggest size that satisfies these constraints.
    #[inline]
    pub fn biggest(&self) -> Size {
        Size {
            width: if self.max_width.is_finite() { self.max_width } else { 0.0 },
            height: if self.max_height.is_finite() { self.max_height } else { 0.0 },
        }
    }
}

impl Default for LayoutConstraints {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_constraints() {
        let c = LayoutConstraints::fixed(IntSize::new(120, 150));
        assert_eq!(c.min_width, 120.0);
        assert_eq!(c.max_width, 120.0);
        assert_eq!(c.min_height, 150.0);
    }

    #[test]
    fn test_constrain_int() {
        let c = LayoutConstraints::fixed(IntSize::new(80, 150));
        assert_eq!(c.constrain_int(IntSize::new(300, 20)), IntSize::new(80, 150));

        let unbounded = LayoutConstraints::UNBOUNDED;
        assert_eq!(unbounded.constrain_int(IntSize::new(73, 41)), IntSize::new(73, 41));
    }

    #[test]
    fn test_unbounded_height_keeps_width() {
        let viewport = LayoutConstraints::tight(400.0, 600.0);
        let deco = viewport.with_unbounded_height();
        assert_eq!(deco.min_width, 400.0);
        assert_eq!(deco.max_width, 400.0);
        assert_eq!(deco.min_height, 0.0);
        assert!(!deco.has_bounded_height());
    }

    #[test]
    fn test_bounded_checks() {
        let unbounded = LayoutConstraints::UNBOUNDED;
        assert!(!unbounded.has_bounded_width());
        assert!(!unbounded.has_bounded_height());

        let bounded = LayoutConstraints::loose(100.0, 50.0);
        assert!(bounded.has_bounded_width());
        assert!(bounded.has_bounded_height());
        assert_eq!(bounded.biggest(), Size::new(100.0, 50.0));
    }
}
