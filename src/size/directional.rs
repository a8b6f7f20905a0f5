use smol_str::format_smolstr;

use crate::geometry::{Bounds, Direction};
use crate::size::{Size, SizeContext};
use crate::tree::{ElementKey, ElementState, ViewerId};
use crate::ui::Ui;

/// A size in each of the four directions; used for margin, padding and
/// border thickness.
#[derive(Debug)]
pub struct DirectionalSizes {
    top: SizeContext,
    right: SizeContext,
    bottom: SizeContext,
    left: SizeContext,
}

impl DirectionalSizes {
    pub(crate) fn new(label: &str, element: ElementKey, initial: Size) -> DirectionalSizes {
        DirectionalSizes {
            top: SizeContext::new(format_smolstr!("{label}.top"), element, initial),
            right: SizeContext::new(format_smolstr!("{label}.right"), element, initial),
            bottom: SizeContext::new(format_smolstr!("{label}.bottom"), element, initial),
            left: SizeContext::new(format_smolstr!("{label}.left"), element, initial),
        }
    }

    pub fn get(&self, direction: Direction) -> Size {
        self.context(direction).get()
    }

    pub fn set(&mut self, direction: Direction, size: Size) {
        self.context_mut(direction).set(size);
    }

    /// Set all four directions to the same size.
    pub fn set_all(&mut self, size: Size) {
        self.set_each(size, size, size, size);
    }

    /// Set the horizontal and vertical pairs.
    pub fn set_axes(&mut self, x: Size, y: Size) {
        self.set_each(y, x, y, x);
    }

    pub fn set_each(&mut self, top: Size, right: Size, bottom: Size, left: Size) {
        self.top.set(top);
        self.right.set(right);
        self.bottom.set(bottom);
        self.left.set(left);
    }

    pub(crate) fn context(&self, direction: Direction) -> &SizeContext {
        match direction {
            Direction::Top => &self.top,
            Direction::Right => &self.right,
            Direction::Bottom => &self.bottom,
            Direction::Left => &self.left,
        }
    }

    fn context_mut(&mut self, direction: Direction) -> &mut SizeContext {
        match direction {
            Direction::Top => &mut self.top,
            Direction::Right => &mut self.right,
            Direction::Bottom => &mut self.bottom,
            Direction::Left => &mut self.left,
        }
    }

    /// The bounds of a rectangle inset by these sizes.
    pub(crate) fn inner_bounds(&self, ui: &Ui, state: &ElementState) -> Bounds {
        let mut bounds = Bounds::default();
        for direction in Direction::ALL {
            let value = self
                .context(direction)
                .resolve(ui, state, crate::geometry::Value::ZERO);
            bounds.add_value(direction, value);
        }
        bounds
    }

    pub(crate) fn forget_viewer(&self, viewer: ViewerId) {
        for direction in Direction::ALL {
            self.context(direction).forget_viewer(viewer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Value;

    #[test]
    fn group_setters_fan_out() {
        let mut ui = crate::ui::Ui::new("overlay").unwrap();
        let panel = ui.panel(ui.root(), "panel");

        let margin = &mut ui.element_mut(panel).margin;
        margin.set_axes(Size::Pixels(4.0), Size::Pixels(8.0));
        assert_eq!(margin.get(Direction::Left), Size::Pixels(4.0));
        assert_eq!(margin.get(Direction::Right), Size::Pixels(4.0));
        assert_eq!(margin.get(Direction::Top), Size::Pixels(8.0));
        assert_eq!(margin.get(Direction::Bottom), Size::Pixels(8.0));

        margin.set(Direction::Top, Size::Pixels(1.0));
        assert_eq!(margin.get(Direction::Top), Size::Pixels(1.0));
        assert_eq!(margin.get(Direction::Bottom), Size::Pixels(8.0));
    }

    #[test]
    fn inner_bounds_inset_each_edge() {
        let mut ui = crate::ui::Ui::new("overlay").unwrap();
        let panel = ui.panel(ui.root(), "panel");
        ui.element_mut(panel)
            .padding
            .set_each(Size::Pixels(1.0), Size::Pixels(2.0), Size::Pixels(3.0), Size::Pixels(4.0));

        let state = ui.state(panel, 1);
        let bounds = ui.element(panel).padding.inner_bounds(&ui, &state.borrow());
        assert_eq!(bounds.from_top, Value::new(0.0, 1.0));
        assert_eq!(bounds.from_right, Value::new(0.0, 2.0));
        assert_eq!(bounds.from_bottom, Value::new(0.0, 3.0));
        assert_eq!(bounds.from_left, Value::new(0.0, 4.0));
    }
}
