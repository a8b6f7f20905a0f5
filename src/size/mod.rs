mod context;
mod directional;

pub use context::*;
pub use directional::*;

use crate::error::ConfigError;
use crate::geometry::{Axis, Value, screen_size};
use crate::ui::ScreenMetrics;

/// A user-facing size specification.
///
/// The set is closed: resolution dispatches exhaustively over these variants.
/// The variants are public for matching; the checked constructors are the
/// validating surface, and building a variant directly skips the domain
/// check.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Size {
    /// Resolved from a fallback supplied by whatever consumes the size.
    #[default]
    Auto,
    /// A fixed number of reference-surface pixels.
    Pixels(f64),
    /// A fraction of the parent container's size.
    ContainerPercentage(f64),
    /// A fraction of the viewer's screen width.
    ScreenWidthPercentage(f64),
    /// A fraction of the viewer's screen height.
    ScreenHeightPercentage(f64),
}

impl Size {
    pub const ZERO: Size = Size::Pixels(0.0);

    pub fn pixels(value: f64) -> Result<Size, ConfigError> {
        checked(value).map(Size::Pixels)
    }

    pub fn container_percentage(value: f64) -> Result<Size, ConfigError> {
        checked(value).map(Size::ContainerPercentage)
    }

    pub fn screen_width_percentage(value: f64) -> Result<Size, ConfigError> {
        checked(value).map(Size::ScreenWidthPercentage)
    }

    pub fn screen_height_percentage(value: f64) -> Result<Size, ConfigError> {
        checked(value).map(Size::ScreenHeightPercentage)
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Size::Auto)
    }

    /// The numeric payload, if any.
    pub(crate) fn magnitude(&self) -> Option<f64> {
        match *self {
            Size::Auto => None,
            Size::Pixels(n) => Some(n),
            Size::ContainerPercentage(p)
            | Size::ScreenWidthPercentage(p)
            | Size::ScreenHeightPercentage(p) => Some(p),
        }
    }

    /// Resolve to a bounds value. Pure in the viewer's screen metrics.
    ///
    /// Panics on `Auto`; auto sizes resolve through their context's fallback.
    pub(crate) fn resolve(&self, metrics: ScreenMetrics) -> Value {
        match *self {
            Size::Auto => panic!("auto sizes cannot be resolved directly"),
            Size::Pixels(n) => Value::new(0.0, n),
            Size::ContainerPercentage(p) => Value::new(p, 0.0),
            Size::ScreenWidthPercentage(p) => {
                Value::new(0.0, screen_percentage_to_pixels(p, Axis::X, metrics))
            }
            Size::ScreenHeightPercentage(p) => {
                Value::new(0.0, screen_percentage_to_pixels(p, Axis::Y, metrics))
            }
        }
    }
}

fn checked(value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFiniteSize(value))
    }
}

/// Aspect ratio of the reference surface.
const REFERENCE_ASPECT: f64 = 1280.0 / 720.0;

/// Map a screen percentage onto reference-surface pixels.
///
/// Horizontal percentages scale with the reference width. Vertical ones are
/// corrected by how far the viewer's aspect ratio deviates from 16:9, since
/// the surface height shrinks as screens get wider.
pub(crate) fn screen_percentage_to_pixels(value: f64, axis: Axis, metrics: ScreenMetrics) -> f64 {
    let surface = screen_size(axis).absolute;
    match axis {
        Axis::X => value * surface,
        Axis::Y => value * surface / (metrics.aspect_ratio() / REFERENCE_ASPECT),
    }
}
