use smol_str::{SmolStr, format_smolstr};

use crate::geometry::{Bounds, Direction, Value};
use crate::tree::{ElementParent, ElementState};
use crate::ui::Ui;

/// An RGBA color, each channel in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color {
        Color { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Color {
        Color::rgba(r, g, b, 1.0)
    }
}

/// A resolved rectangle in the renderer's coordinate model: normalized
/// anchors plus pixel offsets per corner.
#[derive(Debug, Clone, PartialEq)]
pub struct RectTransform {
    pub anchor_min: (f64, f64),
    pub anchor_max: (f64, f64),
    pub offset_min: (f64, f64),
    pub offset_max: (f64, f64),
    pub pivot: (f64, f64),
    pub rotation: f32,
    pub transform_index: i32,
}

/// Host capabilities a rectangle cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererDirective {
    NeedsCursor,
    NeedsKeyboard,
}

/// The renderer-agnostic form of one visual primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct WireNode {
    pub name: SmolStr,
    pub parent: SmolStr,
    pub rect: RectTransform,
    pub color: Color,
    pub directives: Vec<RendererDirective>,
}

/// One step of a synchronization batch.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOp {
    Create(WireNode),
    Update(WireNode),
    Destroy(SmolStr),
}

/// The ordered operation list produced by one open/close call.
///
/// All destroys come before all creates and updates, and creates/updates are
/// strictly ancestor before descendant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncBatch {
    pub ops: Vec<SyncOp>,
}

impl SyncBatch {
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SyncOp> {
        self.ops.iter()
    }
}

/// Expand one positioned state into its wire-node fan-out.
///
/// A zero-size element produces no nodes at all; zero-size border strips and
/// content rectangles are skipped individually.
pub(crate) fn materialize(
    ui: &Ui,
    state: &ElementState,
    layout_directives: &[RendererDirective],
) -> Vec<WireNode> {
    let element = ui.element(state.element());
    let root_bounds = state.bounds.clone() + element.margin.inner_bounds(ui, state);
    let Some(root_rect) = root_bounds.rect_transform() else {
        return Vec::new();
    };

    let root_name = state.node_name(&element.label, "root");
    let is_ui_root = matches!(element.parent(), ElementParent::Layer(_));
    let root_directives = if is_ui_root {
        vec![
            RendererDirective::NeedsCursor,
            RendererDirective::NeedsKeyboard,
        ]
    } else {
        Vec::new()
    };

    let mut nodes = vec![WireNode {
        name: root_name.clone(),
        parent: ui.parent_content_name(state),
        rect: root_rect,
        color: element.bg_color,
        directives: root_directives,
    }];

    let border_inner = element.border.size.inner_bounds(ui, state);
    for side in Direction::ALL {
        let mut strip = Bounds::default();
        strip.add_value(side.reverse(), Value::FULL - border_inner.value(side));
        if let Some(rect) = strip.rect_transform() {
            nodes.push(WireNode {
                name: state.node_name(&element.label, &format_smolstr!("border-{}", side.name())),
                parent: root_name.clone(),
                rect,
                color: element.border.color,
                directives: Vec::new(),
            });
        }
    }

    // Content holds the children; a childless element does not allocate one.
    if ui.has_children(state.element()) {
        let content_bounds = border_inner + element.padding.inner_bounds(ui, state);
        if let Some(rect) = content_bounds.rect_transform() {
            nodes.push(WireNode {
                name: state.node_name(&element.label, "content"),
                parent: root_name.clone(),
                rect,
                color: Color::TRANSPARENT,
                directives: layout_directives.to_vec(),
            });
        }
    } else if !layout_directives.is_empty() {
        nodes[0].directives.extend_from_slice(layout_directives);
    }

    nodes
}
