mod absolute;
mod flex;

pub use absolute::*;
pub use flex::*;

use crate::tree::ElementState;
use crate::ui::Ui;
use crate::wire::RendererDirective;

/// How an element positions its children.
///
/// The set is closed: static absolute positioning and the flexbox-style
/// dynamic layout. Dispatch is exhaustive matching.
#[derive(Debug)]
pub enum Layout {
    Absolute(AbsoluteLayout),
    Flex(FlexLayout),
}

impl Layout {
    /// Get the layout ready to position children, returning any directives
    /// the container's wire node should carry.
    ///
    /// Static layouts do nothing. Dynamic layouts recompute their cache for
    /// the state's viewer if it was marked dirty.
    pub(crate) fn prepare(
        &self,
        ui: &Ui,
        state: &ElementState,
    ) -> Option<Vec<RendererDirective>> {
        match self {
            Layout::Absolute(_) => None,
            Layout::Flex(flex) => {
                flex.prepare(ui, state);
                None
            }
        }
    }

    /// Write the child's bounds. Positioning a state of an element this
    /// layout does not track is a programming error.
    pub(crate) fn position_child(&self, ui: &Ui, child: &mut ElementState) {
        match self {
            Layout::Absolute(absolute) => absolute.position_child(ui, child),
            Layout::Flex(flex) => flex.position_child(ui, child),
        }
    }
}
