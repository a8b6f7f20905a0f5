use std::cell::Cell;

use smol_str::{SmolStr, format_smolstr};

use crate::tree::ViewerId;
use crate::wire::SyncBatch;

/// One viewer's display, as far as sizing is concerned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMetrics {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
}

impl ScreenMetrics {
    pub fn new(width: f64, height: f64, scale: f64) -> ScreenMetrics {
        ScreenMetrics { width, height, scale }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

impl Default for ScreenMetrics {
    /// The reference surface.
    fn default() -> ScreenMetrics {
        ScreenMetrics::new(1280.0, 720.0, 1.0)
    }
}

/// Where per-viewer screen metrics come from. `None` means the host has not
/// reported this viewer's screen yet; resolution then assumes the reference
/// surface.
pub trait ScreenMetricsSource {
    fn metrics(&self, viewer: ViewerId) -> Option<ScreenMetrics>;
}

/// The same metrics for every viewer. The default source.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedScreens(pub ScreenMetrics);

impl ScreenMetricsSource for FixedScreens {
    fn metrics(&self, _viewer: ViewerId) -> Option<ScreenMetrics> {
        Some(self.0)
    }
}

/// Source of state ids. Ids must never repeat within one [`Ui`]; wire names
/// derive from them.
///
/// [`Ui`]: crate::ui::Ui
pub trait IdGenerator {
    fn next_id(&self) -> SmolStr;
}

/// Counts up from one. The default generator.
#[derive(Debug, Default)]
pub struct SequentialIds(Cell<u64>);

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> SmolStr {
        let next = self.0.get() + 1;
        self.0.set(next);
        format_smolstr!("{next:06x}")
    }
}

/// Sink for synchronization batches.
pub trait Renderer {
    type Error;

    fn apply(&mut self, viewer: ViewerId, batch: &SyncBatch) -> Result<(), Self::Error>;
}
