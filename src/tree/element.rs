use std::cell::RefCell;

use smol_str::SmolStr;

use crate::cache::ReclaimableMap;
use crate::geometry::Anchor;
use crate::layout::{AbsoluteLayout, FlexLayout, Layout};
use crate::size::{DirectionalSizes, Size, SizeContext};
use crate::tree::{ElementKey, ElementState, ViewerId};

/// Link to whatever an element hangs under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementParent {
    Element(ElementKey),
    /// A top-level host layer, addressed by name.
    Layer(SmolStr),
}

/// Border paint: a thickness per side plus one color.
#[derive(Debug)]
pub struct Border {
    pub size: DirectionalSizes,
    pub color: crate::wire::Color,
}

/// An authoring-time tree node.
///
/// The tree's shape is fixed after construction; only field values (sizes,
/// colors, weight) mutate afterwards. Per-viewer runtime data lives in
/// [`ElementState`]s cached on the element.
#[derive(Debug)]
pub struct Element {
    key: ElementKey,
    parent: ElementParent,
    children: Vec<ElementKey>,

    /// Shown in wire names and diagnostics.
    pub label: SmolStr,
    /// Sibling ordering; lower weights come first.
    pub weight: f64,
    /// Used by some layouts, ignored by others.
    pub anchor: Anchor,
    pub x: SizeContext,
    pub y: SizeContext,
    pub width: SizeContext,
    pub height: SizeContext,
    pub margin: DirectionalSizes,
    pub padding: DirectionalSizes,
    pub border: Border,
    pub bg_color: crate::wire::Color,

    layout: Layout,
    pub(crate) states: RefCell<ReclaimableMap<ViewerId, RefCell<ElementState>>>,
}

impl Element {
    pub(crate) fn new(key: ElementKey, label: &str, parent: ElementParent) -> Element {
        Element {
            key,
            parent,
            children: Vec::new(),
            label: label.into(),
            weight: 0.0,
            anchor: Anchor::default(),
            x: SizeContext::new("x", key, Size::Auto),
            y: SizeContext::new("y", key, Size::Auto),
            width: SizeContext::new("width", key, Size::Auto),
            height: SizeContext::new("height", key, Size::Auto),
            margin: DirectionalSizes::new("margin", key, Size::ZERO),
            padding: DirectionalSizes::new("padding", key, Size::ZERO),
            border: Border {
                size: DirectionalSizes::new("border", key, Size::ZERO),
                color: crate::wire::Color::BLACK,
            },
            bg_color: crate::wire::Color::WHITE,
            layout: Layout::Absolute(AbsoluteLayout),
            states: RefCell::new(ReclaimableMap::new()),
        }
    }

    pub fn key(&self) -> ElementKey {
        self.key
    }

    pub fn parent(&self) -> &ElementParent {
        &self.parent
    }

    pub(crate) fn children(&self) -> &[ElementKey] {
        &self.children
    }

    pub(crate) fn push_child(&mut self, child: ElementKey) {
        self.children.push(child);
        if let Layout::Flex(flex) = &self.layout {
            flex.mark_dirty();
        }
    }

    /// Set both dimensions at once; handy for square elements.
    pub fn set_size(&mut self, size: Size) {
        self.width.set(size);
        self.height.set(size);
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Switch to a flex layout and return it for configuration.
    pub fn use_flex(&mut self) -> &mut FlexLayout {
        self.layout = Layout::Flex(FlexLayout::new(self.key));
        match &mut self.layout {
            Layout::Flex(flex) => flex,
            Layout::Absolute(_) => unreachable!(),
        }
    }

    pub fn use_absolute(&mut self) {
        self.layout = Layout::Absolute(AbsoluteLayout);
    }

    pub(crate) fn size_context(&self, axis: crate::geometry::Axis) -> &SizeContext {
        match axis {
            crate::geometry::Axis::X => &self.width,
            crate::geometry::Axis::Y => &self.height,
        }
    }

    pub fn flex_mut(&mut self) -> Option<&mut FlexLayout> {
        match &mut self.layout {
            Layout::Flex(flex) => Some(flex),
            Layout::Absolute(_) => None,
        }
    }

    /// Drop every resolution cached for the viewer, so a recreated state
    /// starts from scratch.
    pub(crate) fn forget_viewer(&self, viewer: ViewerId) {
        self.x.forget_viewer(viewer);
        self.y.forget_viewer(viewer);
        self.width.forget_viewer(viewer);
        self.height.forget_viewer(viewer);
        self.margin.forget_viewer(viewer);
        self.padding.forget_viewer(viewer);
        self.border.size.forget_viewer(viewer);
        if let Layout::Flex(flex) = &self.layout {
            flex.forget_viewer(viewer);
        }
    }
}
