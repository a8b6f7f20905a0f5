use crate::geometry::Value;
use crate::tree::ElementState;
use crate::ui::Ui;

/// Positions children from their own x, y, width, height and anchor,
/// independent of siblings. Stateless per call.
///
/// The anchor decides which container edge each position is measured from;
/// x has no effect when the anchor is horizontally centered, y none when it
/// is vertically centered.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsoluteLayout;

impl AbsoluteLayout {
    pub(crate) fn position_child(&self, ui: &Ui, child: &mut ElementState) {
        let element = ui.element(child.element());
        let anchor = element.anchor;

        let x = element.x.resolve(ui, child, Value::ZERO);
        let y = element.y.resolve(ui, child, Value::ZERO);

        let width_fallback = if anchor.is_x_centered() {
            Value::FULL
        } else {
            Value::FULL - x
        };
        let comp_width = element.width.resolve(ui, child, width_fallback).complement();

        let height_fallback = if anchor.is_y_centered() {
            Value::FULL
        } else {
            Value::FULL - y
        };
        let comp_height = element
            .height
            .resolve(ui, child, height_fallback)
            .complement();

        let (top_f, right_f, bottom_f, left_f) = anchor.edge_factors();
        child.bounds.from_top = (bottom_f - top_f) * y + top_f * comp_height;
        child.bounds.from_right = (left_f - right_f) * x + right_f * comp_width;
        child.bounds.from_bottom = (top_f - bottom_f) * y + bottom_f * comp_height;
        child.bounds.from_left = (right_f - left_f) * x + left_f * comp_width;
    }
}
