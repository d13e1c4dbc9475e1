//! Error types for the composition engine.
//!
//! Everything here is a *configuration* error: a host/engine contract
//! mismatch that should fail loudly during development. Transient data
//! conditions (failed loads, empty result sets) are not errors but
//! surface states, see [`SurfaceStatus`](crate::SurfaceStatus). Geometry
//! edge cases (empty sections, zero pages) are not errors either; they
//! resolve to degenerate geometry.

use thiserror::Error;

use crate::section::{DecorationKind, ItemId, ItemKind, SectionId};

/// Errors that can occur while composing or rendering sections.
#[derive(Error, Debug)]
pub enum CompositionError {
    /// An item's kind tag differs from its section's declared kind.
    #[error("section '{section}' declares kind '{expected}' but item {item} carries '{found}'")]
    KindMismatch {
        section: SectionId,
        expected: ItemKind,
        found: ItemKind,
        item: ItemId,
    },

    /// Two items in one section share an identity.
    #[error("duplicate item identity {item} in section '{section}'")]
    DuplicateItem { section: SectionId, item: ItemId },

    /// Two sections in one snapshot share an identity.
    #[error("duplicate section identity '{section}' in snapshot")]
    DuplicateSection { section: SectionId },

    /// No renderer was registered for an item kind.
    #[error("no renderer registered for item kind '{kind}'")]
    UnregisteredRenderer { kind: ItemKind },

    /// No renderer was registered for a decoration kind.
    #[error("no renderer registered for decoration kind '{kind}'")]
    UnregisteredDecoration { kind: DecorationKind },

    /// A section index was out of range.
    #[error("section index {index} out of range (section count {count})")]
    SectionOutOfRange { index: usize, count: usize },

    /// An item index was out of range within a section.
    #[error("item index {index} out of range in section '{section}' (item count {count})")]
    ItemOutOfRange {
        section: SectionId,
        index: usize,
        count: usize,
    },

    /// An operation list referenced a section the snapshot does not contain.
    #[error("operation references unknown section '{section}'")]
    UnknownSection { section: SectionId },

    /// A move operation's target had no matching source in the same batch.
    #[error("move of item {item} in section '{section}' has no matching source")]
    MoveWithoutSource { section: SectionId, item: ItemId },
}

/// Result type for composition operations.
pub type Result<T> = std::result::Result<T, CompositionError>;
