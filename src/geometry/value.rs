use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::geometry::{Axis, Direction};

/// Anchors closer than this to 0 or 1 snap to exactly 0 or 1.
const ANCHOR_EPSILON: f64 = 0.0005;

/// One component of a position: `relative * container_size + absolute` units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Value {
    pub relative: f64,
    pub absolute: f64,
}

impl Value {
    pub const ZERO: Value = Value::new(0.0, 0.0);
    pub const FULL: Value = Value::new(1.0, 0.0);

    pub const fn new(relative: f64, absolute: f64) -> Value {
        Value { relative, absolute }
    }

    /// `100% - this`.
    pub fn complement(self) -> Value {
        Value::new(1.0 - self.relative, -self.absolute)
    }

    /// `0 - this`.
    pub fn negated(self) -> Value {
        -self
    }

    /// The anchor and offset pair for this value on the given edge.
    ///
    /// Far-side edges (top, right) measure from the opposite corner of the
    /// container, so they invert the relative part and negate the absolute.
    pub(crate) fn position_components(self, direction: Direction) -> (f64, f64) {
        match direction {
            Direction::Top | Direction::Right => {
                (snap_anchor(1.0 - self.relative), -self.absolute)
            }
            Direction::Bottom | Direction::Left => (snap_anchor(self.relative), self.absolute),
        }
    }
}

fn snap_anchor(value: f64) -> f64 {
    if value.abs() < ANCHOR_EPSILON {
        0.0
    } else if (value - 1.0).abs() < ANCHOR_EPSILON {
        1.0
    } else {
        value
    }
}

impl Add for Value {
    type Output = Value;

    fn add(self, rhs: Value) -> Value {
        Value::new(self.relative + rhs.relative, self.absolute + rhs.absolute)
    }
}

impl Sub for Value {
    type Output = Value;

    fn sub(self, rhs: Value) -> Value {
        Value::new(self.relative - rhs.relative, self.absolute - rhs.absolute)
    }
}

impl Mul<f64> for Value {
    type Output = Value;

    fn mul(self, scalar: f64) -> Value {
        Value::new(self.relative * scalar, self.absolute * scalar)
    }
}

impl Mul<Value> for f64 {
    type Output = Value;

    fn mul(self, value: Value) -> Value {
        value * self
    }
}

impl Div<f64> for Value {
    type Output = Value;

    fn div(self, scalar: f64) -> Value {
        Value::new(self.relative / scalar, self.absolute / scalar)
    }
}

impl Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        Value::new(-self.relative, -self.absolute)
    }
}

/// The reference surface, per axis, as both a relative and an absolute value.
pub fn screen_size(axis: Axis) -> Value {
    match axis {
        Axis::X => Value::new(1.0, 1280.0),
        Axis::Y => Value::new(1.0, 720.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complement_identity() {
        for v in [
            Value::ZERO,
            Value::FULL,
            Value::new(0.25, 10.0),
            Value::new(-0.5, 3.5),
            Value::new(1.5, -200.0),
        ] {
            assert_eq!(v + v.complement(), Value::FULL);
        }
    }

    #[test]
    fn arithmetic_is_componentwise() {
        let a = Value::new(0.5, 10.0);
        let b = Value::new(0.25, -4.0);
        assert_eq!(a + b, Value::new(0.75, 6.0));
        assert_eq!(a - b, Value::new(0.25, 14.0));
        assert_eq!(a * 2.0, Value::new(1.0, 20.0));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(a / 2.0, Value::new(0.25, 5.0));
        assert_eq!(-a, Value::new(-0.5, -10.0));
        assert_eq!(a.negated(), -a);
    }

    #[test]
    fn far_side_edges_invert() {
        let v = Value::new(0.25, 8.0);
        assert_eq!(v.position_components(Direction::Left), (0.25, 8.0));
        assert_eq!(v.position_components(Direction::Bottom), (0.25, 8.0));
        assert_eq!(v.position_components(Direction::Right), (0.75, -8.0));
        assert_eq!(v.position_components(Direction::Top), (0.75, -8.0));
    }

    #[test]
    fn anchors_snap_near_zero_and_one() {
        let near_zero = Value::new(0.0003, 5.0);
        assert_eq!(near_zero.position_components(Direction::Left), (0.0, 5.0));
        let near_one = Value::new(0.9997, 0.0);
        assert_eq!(near_one.position_components(Direction::Left), (1.0, 0.0));
        // Far side: 1 - 0.9997 snaps to 0.
        assert_eq!(near_one.position_components(Direction::Top), (0.0, -0.0));
    }
}
