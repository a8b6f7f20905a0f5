use std::cell::RefCell;

use log::warn;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::geometry::{Axis, Bounds, Value};
use crate::size::{Size, SizeContext};
use crate::tree::{ElementKey, ElementState, ViewerId};
use crate::ui::Ui;

/// Main-axis direction of a flex layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Row,
    Column,
    /// Like `Row`, with the children laid out in reverse order.
    RowReversed,
    /// Like `Column`, with the children laid out in reverse order.
    ColumnReversed,
}

impl FlexDirection {
    pub fn major_axis(self) -> Axis {
        match self {
            FlexDirection::Row | FlexDirection::RowReversed => Axis::X,
            FlexDirection::Column | FlexDirection::ColumnReversed => Axis::Y,
        }
    }

    pub fn axes(self) -> (Axis, Axis) {
        let major = self.major_axis();
        (major, major.other())
    }

    pub fn is_reversed(self) -> bool {
        matches!(self, FlexDirection::RowReversed | FlexDirection::ColumnReversed)
    }
}

/// Main-axis distribution of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    Start,
    #[default]
    Center,
    End,
    /// First child on the start edge, last on the end edge, free space
    /// split between them.
    SpaceBetween,
    /// Equal space on both sides of every child.
    SpaceAround,
    /// Equal space between any two children and towards both edges.
    SpaceEvenly,
}

impl Justify {
    fn distributes_space(self) -> bool {
        matches!(
            self,
            Justify::SpaceBetween | Justify::SpaceAround | Justify::SpaceEvenly
        )
    }
}

/// Cross-axis placement of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignItems {
    Start,
    Center,
    End,
    #[default]
    Stretch,
}

/// What implicitly sized children get under a space-distributing
/// justification, where free space normally becomes gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImplicitSizing {
    /// No size at all; a warning is logged.
    #[default]
    Zero,
    /// Keep the configured gap instead of a computed one and split the
    /// remaining space evenly among the implicit children.
    EvenShare,
}

/// Flexbox-style dynamic layout.
///
/// Computed bounds are cached per (viewer, child) and recomputed only after
/// [`mark_dirty`](FlexLayout::mark_dirty); adding a child or changing a
/// layout property through the setters marks the layout dirty implicitly.
#[derive(Debug)]
pub struct FlexLayout {
    owner: ElementKey,
    direction: FlexDirection,
    justify: Justify,
    align_items: AlignItems,
    implicit_sizing: ImplicitSizing,
    gap: SizeContext,
    computed: RefCell<FxHashSet<ViewerId>>,
    cache: RefCell<FxHashMap<(ViewerId, ElementKey), Bounds>>,
}

impl FlexLayout {
    pub(crate) fn new(owner: ElementKey) -> FlexLayout {
        FlexLayout {
            owner,
            direction: FlexDirection::default(),
            justify: Justify::default(),
            align_items: AlignItems::default(),
            implicit_sizing: ImplicitSizing::default(),
            gap: SizeContext::new("gap", owner, Size::ZERO),
            computed: RefCell::new(FxHashSet::default()),
            cache: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn direction(&self) -> FlexDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: FlexDirection) -> &mut Self {
        self.direction = direction;
        self.mark_dirty();
        self
    }

    pub fn justify(&self) -> Justify {
        self.justify
    }

    pub fn set_justify(&mut self, justify: Justify) -> &mut Self {
        self.justify = justify;
        self.mark_dirty();
        self
    }

    pub fn align_items(&self) -> AlignItems {
        self.align_items
    }

    pub fn set_align_items(&mut self, align_items: AlignItems) -> &mut Self {
        self.align_items = align_items;
        self.mark_dirty();
        self
    }

    pub fn implicit_sizing(&self) -> ImplicitSizing {
        self.implicit_sizing
    }

    pub fn set_implicit_sizing(&mut self, sizing: ImplicitSizing) -> &mut Self {
        self.implicit_sizing = sizing;
        self.mark_dirty();
        self
    }

    pub fn gap(&self) -> Size {
        self.gap.get()
    }

    pub fn set_gap(&mut self, gap: Size) -> &mut Self {
        self.gap.set(gap);
        self.mark_dirty();
        self
    }

    /// Throw away every cached result; the next prepare recomputes.
    pub fn mark_dirty(&self) {
        self.computed.borrow_mut().clear();
        self.cache.borrow_mut().clear();
    }

    pub(crate) fn forget_viewer(&self, viewer: ViewerId) {
        self.gap.forget_viewer(viewer);
        self.computed.borrow_mut().remove(&viewer);
        self.cache
            .borrow_mut()
            .retain(|(cached_viewer, _), _| *cached_viewer != viewer);
    }

    pub(crate) fn prepare(&self, ui: &Ui, state: &ElementState) {
        if self.computed.borrow().contains(&state.viewer()) {
            return;
        }
        self.compute(ui, state);
        self.computed.borrow_mut().insert(state.viewer());
    }

    pub(crate) fn position_child(&self, ui: &Ui, child: &mut ElementState) {
        let parent = ui.element(child.element()).parent();
        assert!(
            *parent == crate::tree::ElementParent::Element(self.owner),
            "cannot position a state of an element this layout does not track"
        );
        let bounds = self
            .cache
            .borrow()
            .get(&(child.viewer(), child.element()))
            .cloned();
        match bounds {
            Some(bounds) => child.bounds.set_to(&bounds),
            None => panic!("no bounds have been computed for this element"),
        }
    }

    fn compute(&self, ui: &Ui, state: &ElementState) {
        let viewer = state.viewer();
        let mut children = ui.children_of(self.owner);
        if children.is_empty() {
            return;
        }
        if self.direction.is_reversed() {
            children.reverse();
        }

        let (major, minor) = self.direction.axes();
        let child_states: Vec<(ElementKey, crate::tree::StateRef)> = children
            .iter()
            .map(|&child| (child, ui.state(child, viewer)))
            .collect();

        // Main-axis sizing: explicit sizes add up, implicit ones share
        // whatever is left.
        let mut explicit_total = Value::ZERO;
        let mut implicit_count = 0usize;
        for (key, child_state) in &child_states {
            let context = ui.element(*key).size_context(major);
            if context.is_implicit() {
                implicit_count += 1;
            } else {
                explicit_total =
                    explicit_total + context.resolve(ui, &child_state.borrow(), Value::ZERO);
            }
        }

        let gap_count = children.len() - 1;
        let free = Value::FULL - explicit_total;
        let even_share = implicit_count > 0
            && self.justify.distributes_space()
            && self.implicit_sizing == ImplicitSizing::EvenShare;

        let gap = if even_share || !self.justify.distributes_space() {
            self.gap.resolve(ui, state, Value::ZERO)
        } else {
            match self.justify {
                Justify::SpaceBetween if gap_count == 0 => Value::ZERO,
                Justify::SpaceBetween => free / gap_count as f64,
                Justify::SpaceAround => free / (gap_count + 1) as f64,
                Justify::SpaceEvenly => free / (gap_count + 2) as f64,
                _ => unreachable!(),
            }
        };

        let mut content = explicit_total + gap * gap_count as f64;
        let implicit_size = if implicit_count == 0 {
            Value::ZERO
        } else if self.justify.distributes_space() && !even_share {
            warn!(
                "children of {:?} have no explicit {:?} size and justification {:?} leaves \
                 them no space; give them a size, pick Start/Center/End, or opt into EvenShare",
                ui.element(self.owner).label,
                major,
                self.justify,
            );
            Value::ZERO
        } else {
            let remaining = Value::FULL - content;
            content = content + remaining;
            remaining / implicit_count as f64
        };

        let mut major_offset = match self.justify {
            Justify::Start | Justify::SpaceBetween => Value::ZERO,
            Justify::Center => (Value::FULL - content) / 2.0,
            Justify::End => Value::FULL - content,
            Justify::SpaceAround => gap / 2.0,
            Justify::SpaceEvenly => gap,
        };

        let mut cache = self.cache.borrow_mut();
        for (key, child_state) in &child_states {
            let element = ui.element(*key);
            let borrowed = child_state.borrow();
            let major_size = element
                .size_context(major)
                .resolve(ui, &borrowed, implicit_size);
            let minor_size = match self.align_items {
                AlignItems::Stretch => Value::FULL,
                _ => element
                    .size_context(minor)
                    .resolve(ui, &borrowed, Value::FULL),
            };
            let minor_offset = match self.align_items {
                AlignItems::Start | AlignItems::Stretch => Value::ZERO,
                AlignItems::Center => (Value::FULL - minor_size) / 2.0,
                AlignItems::End => Value::FULL - minor_size,
            };

            let mut bounds = Bounds::default();
            bounds.from_top = minor_offset;
            bounds.from_right = (major_offset + major_size).complement();
            bounds.from_bottom = (minor_offset + minor_size).complement();
            bounds.from_left = major_offset;
            if major == Axis::Y {
                std::mem::swap(&mut bounds.from_top, &mut bounds.from_left);
                std::mem::swap(&mut bounds.from_bottom, &mut bounds.from_right);
            }

            major_offset = major_offset + major_size + gap;
            cache.insert((viewer, *key), bounds);
        }
    }
}
