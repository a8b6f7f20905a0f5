mod renderer;
mod sync;

pub use renderer::*;

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use slotmap::SlotMap;
use smol_str::SmolStr;

use crate::error::ConfigError;
use crate::tree::{Element, ElementKey, ElementParent, ElementState, StateRef, ViewerId};

/// One UI definition: an element tree under a named host layer, shared by
/// any number of viewers.
///
/// The tree is built once through [`panel`](Ui::panel) and then shown to
/// viewers with [`open`](Ui::open) and [`close`](Ui::close). Per-viewer
/// state is created lazily and kept until [`collect`](Ui::collect).
pub struct Ui {
    elements: SlotMap<ElementKey, Element>,
    root: ElementKey,
    screens: Box<dyn ScreenMetricsSource>,
    ids: Box<dyn IdGenerator>,
}

impl Ui {
    /// A UI with a single root element under the named layer, using the
    /// default screen and id sources.
    pub fn new(layer: &str) -> Result<Ui, ConfigError> {
        Ui::with_sources(
            layer,
            Box::new(FixedScreens::default()),
            Box::new(SequentialIds::default()),
        )
    }

    pub fn with_sources(
        layer: &str,
        screens: Box<dyn ScreenMetricsSource>,
        ids: Box<dyn IdGenerator>,
    ) -> Result<Ui, ConfigError> {
        if layer.is_empty() {
            return Err(ConfigError::EmptyLayer);
        }
        let mut elements = SlotMap::with_key();
        let root = elements
            .insert_with_key(|key| Element::new(key, "root", ElementParent::Layer(layer.into())));
        Ok(Ui { elements, root, screens, ids })
    }

    pub fn root(&self) -> ElementKey {
        self.root
    }

    /// Add a child panel. The tree only grows; elements are never removed.
    pub fn panel(&mut self, parent: ElementKey, label: &str) -> ElementKey {
        let key = self
            .elements
            .insert_with_key(|key| Element::new(key, label, ElementParent::Element(parent)));
        self.elements[parent].push_child(key);
        key
    }

    pub fn element(&self, key: ElementKey) -> &Element {
        &self.elements[key]
    }

    pub fn element_mut(&mut self, key: ElementKey) -> &mut Element {
        &mut self.elements[key]
    }

    /// Children in display order: by weight, insertion order breaking ties.
    pub(crate) fn children_of(&self, element: ElementKey) -> Vec<ElementKey> {
        let mut children = self.elements[element].children().to_vec();
        children.sort_by(|a, b| {
            self.elements[*a]
                .weight
                .partial_cmp(&self.elements[*b].weight)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        children
    }

    pub(crate) fn has_children(&self, element: ElementKey) -> bool {
        !self.elements[element].children().is_empty()
    }

    /// The element's state for the viewer, created on first access.
    pub fn state(&self, element: ElementKey, viewer: ViewerId) -> StateRef {
        let existing = self.elements[element].states.borrow_mut().get(&viewer);
        match existing {
            Some(state) => state,
            None => self.create_state(element, viewer, false),
        }
    }

    fn create_state(&self, element: ElementKey, viewer: ViewerId, retained: bool) -> StateRef {
        let e = &self.elements[element];
        // A state may have been reclaimed for this viewer before; cached
        // resolutions from its lifetime must not leak into the new one.
        e.forget_viewer(viewer);
        let state = Rc::new(RefCell::new(ElementState::new(
            element,
            viewer,
            self.ids.next_id(),
        )));
        e.states.borrow_mut().insert(viewer, &state, retained);
        state
    }

    /// Open a subtree for the viewer: mark it displayed and stale, retain
    /// its states, parent before child. The wire is not touched until the
    /// next sync.
    pub fn open_element(&self, element: ElementKey, viewer: ViewerId) -> StateRef {
        let existing = self.elements[element].states.borrow_mut().get_and_retain(&viewer);
        let state = match existing {
            Some(state) => state,
            None => self.create_state(element, viewer, true),
        };
        {
            let mut s = state.borrow_mut();
            s.open = true;
            s.needs_sync = true;
        }
        for &child in self.elements[element].children() {
            self.open_element(child, viewer);
        }
        state
    }

    /// Close a subtree for the viewer, demoting its states to reclaimable.
    /// Returns the subtree root's state if the viewer ever had one.
    pub fn close_element(&self, element: ElementKey, viewer: ViewerId) -> Option<StateRef> {
        let released = self.elements[element].states.borrow_mut().get_and_release(&viewer);
        if let Some(state) = &released {
            let mut s = state.borrow_mut();
            s.open = false;
            s.needs_sync = true;
        }
        for &child in self.elements[element].children() {
            self.close_element(child, viewer);
        }
        released
    }

    /// Reclaim the states of elements no viewer holds open. Until this is
    /// called a closed viewer's states survive, so reopening reuses them.
    pub fn collect(&self) {
        for (_, element) in &self.elements {
            element.states.borrow_mut().collect();
        }
    }

    pub(crate) fn screen_metrics(&self, viewer: ViewerId) -> ScreenMetrics {
        match self.screens.metrics(viewer) {
            Some(metrics) => metrics,
            None => {
                warn!("no screen metrics for viewer {viewer}; assuming the reference surface");
                ScreenMetrics::default()
            }
        }
    }

    /// The wire name a state's root node parents onto: the host layer for
    /// the tree root, the parent's content node for everything else.
    pub(crate) fn parent_content_name(&self, state: &ElementState) -> SmolStr {
        match self.elements[state.element()].parent() {
            ElementParent::Layer(layer) => layer.clone(),
            ElementParent::Element(parent) => {
                let parent_state = self.state(*parent, state.viewer());
                let name = parent_state
                    .borrow()
                    .node_name(&self.elements[*parent].label, "content");
                name
            }
        }
    }
}
