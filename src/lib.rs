//! Retained-mode UI trees shared by many viewers.
//!
//! A [`ui::Ui`] is an element tree built once and shown to any number of
//! viewers. Each viewer gets its own lazily created per-element state;
//! opening or closing the tree for a viewer produces an ordered
//! [`wire::SyncBatch`] of create, update and destroy operations against a
//! renderer's named node hierarchy.
//!
//! Geometry is hybrid: every coordinate is a [`geometry::Value`], a
//! container-relative fraction plus an absolute pixel part, so layout never
//! needs the container's pixel size to run.

pub mod cache;
mod error;
pub mod geometry;
pub mod layout;
pub mod size;
pub mod tree;
pub mod ui;
pub mod wire;

pub use error::ConfigError;
