//! Section descriptors and their items.
//!
//! This module provides the value types the host's data callback produces:
//!
//! - [`Item`]: identity + kind tag + opaque payload
//! - [`ItemKind`]: the closed set of renderer kinds
//! - [`Section`]: one independently-laid-out group of same-kind items
//! - [`Decoration`] / [`DecorationKind`]: header/footer/badge attachments
//!
//! Sections are immutable after construction and treated as value data by
//! the engine: each refresh produces a fresh ordered list, and the
//! reconciler compares them only by identity.

mod descriptor;
mod item;

pub use descriptor::{
    DEFAULT_DECORATION_EXTENT, Decoration, DecorationKind, Section, SectionId,
};
pub use item::{Item, ItemId, ItemKind};
