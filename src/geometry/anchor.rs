/// A screen axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// One of the four edges of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::X,
            Direction::Top | Direction::Bottom => Axis::Y,
        }
    }

    /// The opposite edge.
    pub fn reverse(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Top => "top",
            Direction::Right => "right",
            Direction::Bottom => "bottom",
            Direction::Left => "left",
        }
    }
}

/// Where to anchor an element within its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    #[default]
    UpperLeft,
    UpperCenter,
    UpperRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    LowerLeft,
    LowerCenter,
    LowerRight,
}

impl Anchor {
    /// Relative container factors for each edge, as `(top, right, bottom, left)`.
    pub fn edge_factors(self) -> (f64, f64, f64, f64) {
        match self {
            Anchor::UpperLeft => (0.0, 1.0, 1.0, 0.0),
            Anchor::UpperCenter => (0.0, 0.5, 1.0, 0.5),
            Anchor::UpperRight => (0.0, 0.0, 1.0, 1.0),
            Anchor::MiddleLeft => (0.5, 1.0, 0.5, 0.0),
            Anchor::MiddleCenter => (0.5, 0.5, 0.5, 0.5),
            Anchor::MiddleRight => (0.5, 0.0, 0.5, 1.0),
            Anchor::LowerLeft => (1.0, 1.0, 0.0, 0.0),
            Anchor::LowerCenter => (1.0, 0.5, 0.0, 0.5),
            Anchor::LowerRight => (1.0, 0.0, 0.0, 1.0),
        }
    }

    /// Is the anchor horizontally centered? Positions along x have no effect then.
    pub fn is_x_centered(self) -> bool {
        matches!(
            self,
            Anchor::UpperCenter | Anchor::MiddleCenter | Anchor::LowerCenter
        )
    }

    /// Is the anchor vertically centered? Positions along y have no effect then.
    pub fn is_y_centered(self) -> bool {
        matches!(
            self,
            Anchor::MiddleLeft | Anchor::MiddleCenter | Anchor::MiddleRight
        )
    }
}
