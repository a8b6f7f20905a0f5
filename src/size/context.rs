use std::cell::RefCell;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::geometry::Value;
use crate::size::Size;
use crate::tree::{ElementKey, ElementState, ViewerId};
use crate::ui::Ui;

/// One size specification bound to one element property, together with its
/// per-viewer resolved-value cache.
///
/// Resolutions are referentially stable between `set` calls: once a value has
/// been resolved for a viewer it is served from the cache until the size is
/// replaced. Auto sizes cache the first fallback they are resolved with.
#[derive(Debug)]
pub struct SizeContext {
    label: SmolStr,
    element: ElementKey,
    size: Size,
    cache: RefCell<FxHashMap<ViewerId, Value>>,
}

impl SizeContext {
    pub(crate) fn new(label: impl Into<SmolStr>, element: ElementKey, initial: Size) -> SizeContext {
        SizeContext {
            label: label.into(),
            element,
            size: initial,
            cache: RefCell::new(FxHashMap::default()),
        }
    }

    /// A debugging label; carries no behavior.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn get(&self) -> Size {
        self.size
    }

    /// Is the size resolved from context-supplied fallbacks?
    pub fn is_implicit(&self) -> bool {
        self.size.is_auto()
    }

    /// Replace the size and drop every cached resolution, for all viewers.
    ///
    /// Sizes built through the checked constructors are always finite; a
    /// directly constructed non-finite variant trips a debug assertion here.
    pub fn set(&mut self, size: Size) {
        debug_assert!(
            size.magnitude().is_none_or(f64::is_finite),
            "non-finite size set on {:?}",
            self.label
        );
        self.cache.borrow_mut().clear();
        self.size = size;
    }

    /// Resolve for the given state, using `fallback` when the size is auto.
    ///
    /// Panics when the state belongs to a different element.
    pub(crate) fn resolve(&self, ui: &Ui, state: &ElementState, fallback: Value) -> Value {
        assert!(
            self.element == state.element(),
            "size context {:?} resolved against a state of a different element",
            self.label,
        );

        let viewer = state.viewer();
        if let Some(cached) = self.cache.borrow().get(&viewer) {
            return *cached;
        }

        let value = if self.size.is_auto() {
            fallback
        } else {
            self.size.resolve(ui.screen_metrics(viewer))
        };
        self.cache.borrow_mut().insert(viewer, value);
        value
    }

    /// Drop one viewer's cached resolution. Called when that viewer's state
    /// is recreated, so a fresh state never observes a stale value.
    pub(crate) fn forget_viewer(&self, viewer: ViewerId) {
        self.cache.borrow_mut().remove(&viewer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Ui;

    #[test]
    fn pixels_resolve_stably_per_viewer() {
        let mut ui = Ui::new("overlay").unwrap();
        let panel = ui.panel(ui.root(), "panel");
        ui.element_mut(panel).width.set(Size::Pixels(10.0));

        let a = ui.state(panel, 1);
        let b = ui.state(panel, 2);
        let expected = Value::new(0.0, 10.0);
        for state in [&a, &b] {
            let resolved = ui.element(panel).width.resolve(&ui, &state.borrow(), Value::ZERO);
            assert_eq!(resolved, expected);
        }
        // Stable on re-read.
        let again = ui.element(panel).width.resolve(&ui, &a.borrow(), Value::FULL);
        assert_eq!(again, expected);
    }

    #[test]
    fn set_invalidates_every_viewer() {
        let mut ui = Ui::new("overlay").unwrap();
        let panel = ui.panel(ui.root(), "panel");
        ui.element_mut(panel).width.set(Size::Pixels(10.0));

        let a = ui.state(panel, 1);
        let b = ui.state(panel, 2);
        ui.element(panel).width.resolve(&ui, &a.borrow(), Value::ZERO);
        ui.element(panel).width.resolve(&ui, &b.borrow(), Value::ZERO);

        ui.element_mut(panel).width.set(Size::Pixels(20.0));
        let expected = Value::new(0.0, 20.0);
        assert_eq!(
            ui.element(panel).width.resolve(&ui, &a.borrow(), Value::ZERO),
            expected
        );
        assert_eq!(
            ui.element(panel).width.resolve(&ui, &b.borrow(), Value::ZERO),
            expected
        );
    }

    #[test]
    fn auto_caches_the_first_fallback() {
        let mut ui = Ui::new("overlay").unwrap();
        let panel = ui.panel(ui.root(), "panel");
        let state = ui.state(panel, 1);

        let first = ui
            .element(panel)
            .width
            .resolve(&ui, &state.borrow(), Value::new(0.4, 0.0));
        assert_eq!(first, Value::new(0.4, 0.0));
        let second = ui
            .element(panel)
            .width
            .resolve(&ui, &state.borrow(), Value::new(0.9, 0.0));
        assert_eq!(second, Value::new(0.4, 0.0));

        // A fresh specification forgets the cached fallback.
        ui.element_mut(panel).width.set(Size::Auto);
        let third = ui
            .element(panel)
            .width
            .resolve(&ui, &state.borrow(), Value::new(0.9, 0.0));
        assert_eq!(third, Value::new(0.9, 0.0));
    }

    #[test]
    #[should_panic(expected = "non-finite size")]
    fn setting_a_non_finite_size_trips_the_assertion() {
        let mut ui = Ui::new("overlay").unwrap();
        let panel = ui.panel(ui.root(), "panel");
        ui.element_mut(panel).width.set(Size::Pixels(f64::NAN));
    }

    #[test]
    #[should_panic(expected = "different element")]
    fn resolving_against_a_foreign_state_panics() {
        let mut ui = Ui::new("overlay").unwrap();
        let a = ui.panel(ui.root(), "a");
        let b = ui.panel(ui.root(), "b");
        let state_b = ui.state(b, 1);
        ui.element(a).width.resolve(&ui, &state_b.borrow(), Value::ZERO);
    }
}
