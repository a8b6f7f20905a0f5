use std::cell::RefCell;
use std::rc::Rc;

use smol_str::{SmolStr, format_smolstr};

use crate::geometry::Bounds;
use crate::tree::{ElementKey, ViewerId};

/// Shared handle to a per-viewer state.
pub type StateRef = Rc<RefCell<ElementState>>;

/// One element's runtime instance for one viewer.
///
/// Created lazily on first access and cached on the element; demoted to
/// reclaimable when the viewer closes the element.
#[derive(Debug)]
pub struct ElementState {
    element: ElementKey,
    viewer: ViewerId,
    /// Globally unique; wire names are derived from it.
    id: SmolStr,
    /// The rectangle this element places itself within, as resolved by the
    /// parent's layout.
    pub bounds: Bounds,
    pub(crate) needs_sync: bool,
    pub(crate) open: bool,
    /// Wire names emitted by the last sync, in emission order.
    pub(crate) emitted: Vec<SmolStr>,
}

impl ElementState {
    pub(crate) fn new(element: ElementKey, viewer: ViewerId, id: SmolStr) -> ElementState {
        ElementState {
            element,
            viewer,
            id,
            bounds: Bounds::default(),
            needs_sync: false,
            open: false,
            emitted: Vec::new(),
        }
    }

    pub fn element(&self) -> ElementKey {
        self.element
    }

    pub fn viewer(&self) -> ViewerId {
        self.viewer
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Is the element currently displayed to this viewer?
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn needs_sync(&self) -> bool {
        self.needs_sync
    }

    /// Flag the previously emitted representation as stale. The next sync
    /// re-emits this state and, transitively, all its descendants.
    pub fn mark_needs_sync(&mut self) {
        self.needs_sync = true;
    }

    pub(crate) fn node_name(&self, label: &str, part: &str) -> SmolStr {
        format_smolstr!("{label}-{part}-{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_names_carry_label_part_and_id() {
        let state = ElementState::new(ElementKey::default(), 1, "00000a".into());
        assert_eq!(state.node_name("menu", "root"), "menu-root-00000a");
        assert_eq!(
            state.node_name("menu", "border-top"),
            "menu-border-top-00000a"
        );
    }
}
