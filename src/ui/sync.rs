use log::debug;
use smol_str::SmolStr;

use crate::layout::AbsoluteLayout;
use crate::tree::{ElementKey, ElementParent, StateRef, ViewerId};
use crate::ui::{Renderer, Ui};
use crate::wire::{SyncBatch, SyncOp, materialize};

impl Ui {
    /// Show the tree to a viewer and return the wire operations that bring
    /// the viewer's display up to date.
    ///
    /// The first open creates everything; an open while already open
    /// re-emits the whole tree as updates. Destroys always precede creates
    /// and updates, and creates and updates come parent before child.
    pub fn open(&mut self, viewer: ViewerId) -> SyncBatch {
        self.open_element(self.root(), viewer);
        self.sync_viewer(viewer)
    }

    /// Hide the tree from a viewer.
    ///
    /// Returns `None` when the viewer never saw this UI. With `sync` false
    /// the returned batch is empty; the caller is expected to tear the
    /// layer down wholesale instead.
    pub fn close(&mut self, viewer: ViewerId, sync: bool) -> Option<SyncBatch> {
        self.close_element(self.root(), viewer)?;
        if sync {
            Some(self.sync_viewer(viewer))
        } else {
            Some(SyncBatch::default())
        }
    }

    /// Open for the viewer and hand the resulting batch to the renderer.
    pub fn present<R: Renderer>(
        &mut self,
        viewer: ViewerId,
        renderer: &mut R,
    ) -> Result<(), R::Error> {
        let batch = self.open(viewer);
        renderer.apply(viewer, &batch)
    }

    fn sync_viewer(&self, viewer: ViewerId) -> SyncBatch {
        let mut pending = Vec::new();
        self.collect_needing_sync(self.root(), viewer, false, &mut pending);

        let mut destroys = Vec::new();
        let mut upserts = Vec::new();
        for state in &pending {
            self.sync_state(state, &mut destroys, &mut upserts);
        }
        if destroys.is_empty() && upserts.is_empty() {
            debug!("sync for viewer {viewer} produced no operations");
        }

        let mut ops = destroys;
        ops.append(&mut upserts);
        SyncBatch { ops }
    }

    /// Preorder walk over states whose emitted representation is stale.
    ///
    /// A stale ancestor forces every descendant along, since its geometry
    /// feeds theirs. Flags are cleared here, before any emission.
    fn collect_needing_sync(
        &self,
        element: ElementKey,
        viewer: ViewerId,
        force: bool,
        out: &mut Vec<StateRef>,
    ) {
        let existing = self.element(element).states.borrow_mut().get(&viewer);
        let Some(state) = existing else {
            return;
        };
        let include = force || state.borrow().needs_sync();
        if include {
            state.borrow_mut().needs_sync = false;
            out.push(state);
        }
        for child in self.children_of(element) {
            self.collect_needing_sync(child, viewer, include, out);
        }
    }

    fn sync_state(&self, state: &StateRef, destroys: &mut Vec<SyncOp>, upserts: &mut Vec<SyncOp>) {
        let (element_key, viewer, open) = {
            let s = state.borrow();
            (s.element(), s.viewer(), s.is_open())
        };
        if !open {
            for name in state.borrow_mut().emitted.drain(..) {
                destroys.push(SyncOp::Destroy(name));
            }
            return;
        }

        let element = self.element(element_key);
        match element.parent() {
            // The tree root fills its layer.
            ElementParent::Layer(_) => {
                AbsoluteLayout.position_child(self, &mut state.borrow_mut());
            }
            ElementParent::Element(parent) => {
                let parent_state = self.state(*parent, viewer);
                let parent_layout = self.element(*parent).layout();
                parent_layout.prepare(self, &parent_state.borrow());
                parent_layout.position_child(self, &mut state.borrow_mut());
            }
        }

        let directives = element.layout().prepare(self, &state.borrow()).unwrap_or_default();
        let nodes = materialize(self, &state.borrow(), &directives);
        let new_names: Vec<SmolStr> = nodes.iter().map(|node| node.name.clone()).collect();

        let mut s = state.borrow_mut();
        for name in &s.emitted {
            if !new_names.contains(name) {
                destroys.push(SyncOp::Destroy(name.clone()));
            }
        }
        let previous = std::mem::replace(&mut s.emitted, new_names);
        for node in nodes {
            if previous.contains(&node.name) {
                upserts.push(SyncOp::Update(node));
            } else {
                upserts.push(SyncOp::Create(node));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::Size;
    use crate::wire::{RendererDirective, WireNode};

    fn two_level_ui() -> Ui {
        let mut ui = Ui::new("overlay").unwrap();
        ui.panel(ui.root(), "child");
        ui
    }

    fn names(batch: &SyncBatch) -> Vec<String> {
        batch
            .iter()
            .map(|op| match op {
                SyncOp::Create(node) | SyncOp::Update(node) => node.name.to_string(),
                SyncOp::Destroy(name) => name.to_string(),
            })
            .collect()
    }

    fn node<'a>(batch: &'a SyncBatch, name: &str) -> &'a WireNode {
        batch
            .iter()
            .find_map(|op| match op {
                SyncOp::Create(node) | SyncOp::Update(node) if node.name == name => Some(node),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn first_open_creates_the_whole_tree() {
        let mut ui = two_level_ui();
        let batch = ui.open(1);

        assert!(batch.iter().all(|op| matches!(op, SyncOp::Create(_))));
        assert_eq!(
            names(&batch),
            vec!["root-root-000001", "root-content-000001", "child-root-000002"]
        );

        let root = node(&batch, "root-root-000001");
        assert_eq!(root.parent, "overlay");
        assert_eq!(
            root.directives,
            vec![RendererDirective::NeedsCursor, RendererDirective::NeedsKeyboard]
        );
        assert_eq!(node(&batch, "root-content-000001").parent, "root-root-000001");
        assert_eq!(node(&batch, "child-root-000002").parent, "root-content-000001");
    }

    #[test]
    fn reopening_updates_in_place() {
        let mut ui = two_level_ui();
        let first = ui.open(1);
        let second = ui.open(1);

        assert!(second.iter().all(|op| matches!(op, SyncOp::Update(_))));
        assert_eq!(names(&second), names(&first));
    }

    #[test]
    fn close_destroys_everything_emitted() {
        let mut ui = two_level_ui();
        ui.open(1);
        let batch = ui.close(1, true).unwrap();

        assert!(batch.iter().all(|op| matches!(op, SyncOp::Destroy(_))));
        assert_eq!(
            names(&batch),
            vec!["root-root-000001", "root-content-000001", "child-root-000002"]
        );

        // A second close has nothing left to destroy.
        assert!(ui.close(1, true).unwrap().is_empty());
    }

    #[test]
    fn close_without_sync_returns_an_empty_batch() {
        let mut ui = two_level_ui();
        ui.open(1);
        assert!(ui.close(1, false).unwrap().is_empty());
        // Nothing was torn down, so the next open patches in place.
        let batch = ui.open(1);
        assert!(!batch.is_empty());
        assert!(batch.iter().all(|op| matches!(op, SyncOp::Update(_))));
    }

    #[test]
    fn closing_a_viewer_that_never_opened_is_none() {
        let mut ui = two_level_ui();
        assert!(ui.close(7, true).is_none());
    }

    #[test]
    fn reopening_after_close_reuses_the_states() {
        let mut ui = two_level_ui();
        let first = ui.open(1);
        ui.close(1, true);

        let again = ui.open(1);
        assert!(again.iter().all(|op| matches!(op, SyncOp::Create(_))));
        assert_eq!(names(&again), names(&first));
    }

    #[test]
    fn collect_between_close_and_reopen_renames() {
        let mut ui = two_level_ui();
        let first = ui.open(1);
        ui.close(1, true);
        ui.collect();

        let again = ui.open(1);
        assert!(again.iter().all(|op| matches!(op, SyncOp::Create(_))));
        assert_ne!(names(&again), names(&first));
    }

    #[test]
    fn viewers_do_not_share_states() {
        let mut ui = two_level_ui();
        let one = ui.open(1);
        let two = ui.open(2);

        assert!(two.iter().all(|op| matches!(op, SyncOp::Create(_))));
        assert_ne!(names(&one), names(&two));

        // Closing one viewer leaves the other untouched.
        ui.close(1, true).unwrap();
        let still = ui.open(2);
        assert!(still.iter().all(|op| matches!(op, SyncOp::Update(_))));
    }

    #[test]
    fn zero_size_elements_emit_nothing() {
        let mut ui = Ui::new("overlay").unwrap();
        let child = ui.panel(ui.root(), "child");
        ui.element_mut(child).width.set(Size::Pixels(0.0));

        let batch = ui.open(1);
        assert_eq!(names(&batch), vec!["root-root-000001", "root-content-000001"]);
    }

    #[test]
    fn borders_emit_strips_inside_the_root_node() {
        let mut ui = Ui::new("overlay").unwrap();
        ui.element_mut(ui.root())
            .border
            .size
            .set_all(Size::Pixels(2.0));

        let batch = ui.open(1);
        let strip = node(&batch, "root-border-top-000001");
        assert_eq!(strip.parent, "root-root-000001");
        assert_eq!(strip.color, ui.element(ui.root()).border.color);
        // All four sides, between the root node and the end of the batch.
        for side in ["top", "right", "bottom", "left"] {
            node(&batch, &format!("root-border-{side}-000001"));
        }
    }

    #[test]
    fn vanished_names_are_destroyed_before_updates() {
        let mut ui = Ui::new("overlay").unwrap();
        ui.element_mut(ui.root())
            .border
            .size
            .set_all(Size::Pixels(2.0));
        let first = ui.open(1);
        assert_eq!(first.len(), 5);

        // The strips become zero-size rectangles and fall out of the
        // materialized set; the surviving root node is patched in place.
        ui.element_mut(ui.root()).border.size.set_all(Size::ZERO);
        let second = ui.open(1);

        let destroys: Vec<_> = second
            .iter()
            .take_while(|op| matches!(op, SyncOp::Destroy(_)))
            .collect();
        assert_eq!(destroys.len(), 4);
        for side in ["top", "right", "bottom", "left"] {
            let name = format!("root-border-{side}-000001");
            assert!(second.iter().any(|op| *op == SyncOp::Destroy(name.as_str().into())));
        }
        assert_eq!(second.len(), 5);
        assert!(matches!(
            &second.ops[4],
            SyncOp::Update(node) if node.name == "root-root-000001"
        ));
    }

    #[test]
    fn flex_containers_lay_out_their_children_during_sync() {
        let mut ui = Ui::new("overlay").unwrap();
        let row = ui.panel(ui.root(), "row");
        ui.element_mut(row)
            .use_flex()
            .set_justify(crate::layout::Justify::Start);
        let cell = ui.panel(row, "cell");
        ui.element_mut(cell).width.set(Size::ContainerPercentage(0.5));

        let batch = ui.open(1);
        let cell_node = node(&batch, "cell-root-000003");
        assert_eq!(cell_node.parent, "row-content-000002");
        assert_eq!(cell_node.rect.anchor_min, (0.0, 0.0));
        assert_eq!(cell_node.rect.anchor_max, (0.5, 1.0));
    }
}
