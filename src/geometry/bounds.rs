use std::ops::{Add, Div, Mul, Sub};

use crate::geometry::{Direction, Value};
use crate::wire::RectTransform;

/// A rectangle as four edge offsets, each measured inwards from the
/// corresponding edge of the parent container.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub from_top: Value,
    pub from_right: Value,
    pub from_bottom: Value,
    pub from_left: Value,
    /// Pivot point, relative to the rectangle. Rotation happens around it.
    pub pivot: (f64, f64),
    /// Rotation around the pivot, in degrees.
    pub rotation: f32,
    /// Ordering override within the parent's hierarchy; -1 keeps the default.
    pub transform_index: i32,
}

impl Default for Bounds {
    fn default() -> Bounds {
        Bounds {
            from_top: Value::ZERO,
            from_right: Value::ZERO,
            from_bottom: Value::ZERO,
            from_left: Value::ZERO,
            pivot: (0.5, 0.5),
            rotation: 0.0,
            transform_index: -1,
        }
    }
}

impl Bounds {
    pub fn new() -> Bounds {
        Bounds::default()
    }

    /// Copy all fields from `source`.
    pub fn set_to(&mut self, source: &Bounds) {
        *self = source.clone();
    }

    /// Zero all edges so the rectangle fills its parent.
    pub fn maximize(&mut self) -> &mut Bounds {
        self.from_top = Value::ZERO;
        self.from_right = Value::ZERO;
        self.from_bottom = Value::ZERO;
        self.from_left = Value::ZERO;
        self
    }

    pub fn value(&self, direction: Direction) -> Value {
        match direction {
            Direction::Top => self.from_top,
            Direction::Right => self.from_right,
            Direction::Bottom => self.from_bottom,
            Direction::Left => self.from_left,
        }
    }

    pub fn add_value(&mut self, direction: Direction, value: Value) -> &mut Bounds {
        match direction {
            Direction::Top => self.from_top = self.from_top + value,
            Direction::Right => self.from_right = self.from_right + value,
            Direction::Bottom => self.from_bottom = self.from_bottom + value,
            Direction::Left => self.from_left = self.from_left + value,
        }
        self
    }

    pub fn sub_value(&mut self, direction: Direction, value: Value) -> &mut Bounds {
        self.add_value(direction, -value)
    }

    /// Convert to the wire rectangle.
    ///
    /// Returns `None` when the rectangle has zero size: the span between the
    /// near and far edge is non-positive in both the anchor and the offset
    /// component on either axis. Such rectangles are never emitted.
    pub fn rect_transform(&self) -> Option<RectTransform> {
        let (top_anchor, top_offset) = self.from_top.position_components(Direction::Top);
        let (right_anchor, right_offset) = self.from_right.position_components(Direction::Right);
        let (bottom_anchor, bottom_offset) = self.from_bottom.position_components(Direction::Bottom);
        let (left_anchor, left_offset) = self.from_left.position_components(Direction::Left);

        let x_anchor = right_anchor - left_anchor;
        let x_offset = right_offset - left_offset;
        let y_anchor = top_anchor - bottom_anchor;
        let y_offset = top_offset - bottom_offset;

        if (x_anchor <= 0.0 && x_offset <= 0.0) || (y_anchor <= 0.0 && y_offset <= 0.0) {
            return None;
        }

        Some(RectTransform {
            anchor_min: (left_anchor, bottom_anchor),
            anchor_max: (right_anchor, top_anchor),
            offset_min: (left_offset, bottom_offset),
            offset_max: (right_offset, top_offset),
            pivot: self.pivot,
            rotation: self.rotation,
            transform_index: self.transform_index,
        })
    }
}

impl Add for Bounds {
    type Output = Bounds;

    fn add(self, rhs: Bounds) -> Bounds {
        Bounds {
            from_top: self.from_top + rhs.from_top,
            from_right: self.from_right + rhs.from_right,
            from_bottom: self.from_bottom + rhs.from_bottom,
            from_left: self.from_left + rhs.from_left,
            ..self
        }
    }
}

impl Sub for Bounds {
    type Output = Bounds;

    fn sub(self, rhs: Bounds) -> Bounds {
        Bounds {
            from_top: self.from_top - rhs.from_top,
            from_right: self.from_right - rhs.from_right,
            from_bottom: self.from_bottom - rhs.from_bottom,
            from_left: self.from_left - rhs.from_left,
            ..self
        }
    }
}

impl Mul<f64> for Bounds {
    type Output = Bounds;

    fn mul(self, scalar: f64) -> Bounds {
        Bounds {
            from_top: self.from_top * scalar,
            from_right: self.from_right * scalar,
            from_bottom: self.from_bottom * scalar,
            from_left: self.from_left * scalar,
            ..self
        }
    }
}

impl Div<f64> for Bounds {
    type Output = Bounds;

    fn div(self, scalar: f64) -> Bounds {
        Bounds {
            from_top: self.from_top / scalar,
            from_right: self.from_right / scalar,
            from_bottom: self.from_bottom / scalar,
            from_left: self.from_left / scalar,
            ..self
        }
    }
}
