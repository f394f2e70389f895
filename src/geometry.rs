//! Horizontal geometry of a managed element relative to the viewport.
//!
//! All values are CSS pixels. Bounds are `f64` because hosts report
//! fractional positions; offsets are whole pixels.
//!
//! # Example
//!
//! ```
//! use keepinside::Bounds;
//!
//! let b = Bounds::new(-12.0, 188.0);
//! assert_eq!(b.width(), 200.0);
//! assert!(b.overflows_left());
//! assert!(!b.is_inside(800.0));
//! ```

use num_traits::Float;

/// Horizontal extent of an element's bounding box, relative to the viewport.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds {
    /// Left edge. Negative means the element sticks out past the left side.
    pub left: f64,
    /// Right edge.
    pub right: f64,
}

impl Bounds {
    /// Create bounds from the left and right edges.
    pub const fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Create bounds from the left edge and a width.
    pub fn from_left_width(left: f64, width: f64) -> Self {
        Self {
            left,
            right: left + width,
        }
    }

    /// Rendered width. Never negative.
    pub fn width(&self) -> f64 {
        (self.right - self.left).max(0.0)
    }

    /// Whether the left edge is past the viewport's left side.
    pub fn overflows_left(&self) -> bool {
        self.left < 0.0
    }

    /// Whether the right edge is past the viewport's right side.
    pub fn overflows_right(&self, viewport_width: f64) -> bool {
        self.right > viewport_width
    }

    /// Whether the box fits horizontally inside `0..=viewport_width`.
    pub fn is_inside(&self, viewport_width: f64) -> bool {
        !self.overflows_left() && !self.overflows_right(viewport_width)
    }

    /// Whether the box can never fit, regardless of offset.
    pub fn wider_than(&self, viewport_width: f64) -> bool {
        self.width() > viewport_width
    }

    /// Same box moved horizontally by `dx`.
    pub fn shifted(self, dx: f64) -> Self {
        Self {
            left: self.left + dx,
            right: self.right + dx,
        }
    }
}

/// Offset that centers an element on its own natural width: `-(width / 2)`,
/// truncated toward zero.
///
/// Zero, negative, NaN, or infinite widths produce `0`.
pub fn centering_offset(natural_width: f64) -> i32 {
    if !natural_width.is_finite() || natural_width <= 0.0 {
        return 0;
    }
    let half = Float::trunc(natural_width / 2.0);
    if half >= i32::MAX as f64 {
        i32::MIN + 1
    } else {
        -(half as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_clamped() {
        assert_eq!(Bounds::new(10.0, 5.0).width(), 0.0);
        assert_eq!(Bounds::from_left_width(3.0, 4.5).width(), 4.5);
    }

    #[test]
    fn inside_edges_are_inclusive() {
        let b = Bounds::new(0.0, 800.0);
        assert!(b.is_inside(800.0));
        assert!(!b.shifted(0.5).is_inside(800.0));
        assert!(!b.shifted(-0.5).is_inside(800.0));
    }

    #[test]
    fn both_sides_can_overflow() {
        let b = Bounds::new(-10.0, 910.0);
        assert!(b.overflows_left());
        assert!(b.overflows_right(900.0));
        assert!(b.wider_than(900.0));
    }

    #[test]
    fn centering_even_and_odd() {
        assert_eq!(centering_offset(200.0), -100);
        assert_eq!(centering_offset(201.0), -100);
        assert_eq!(centering_offset(1.0), 0);
    }

    #[test]
    fn centering_degenerate_widths() {
        assert_eq!(centering_offset(0.0), 0);
        assert_eq!(centering_offset(-40.0), 0);
        assert_eq!(centering_offset(f64::NAN), 0);
        assert_eq!(centering_offset(f64::INFINITY), 0);
    }

    #[test]
    fn centering_huge_width_saturates() {
        assert_eq!(centering_offset(1e12), i32::MIN + 1);
    }
}
