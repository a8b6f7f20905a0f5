mod element;
mod state;

pub use element::*;
pub use state::*;

/// The per-observer identity a UI is independently rendered and cached for.
pub type ViewerId = u64;

slotmap::new_key_type! {
    /// Stable arena key of an element within its [`Ui`](crate::ui::Ui).
    pub struct ElementKey;
}
