//! Identity snapshots of presented content.
//!
//! A [`Snapshot`] is an immutable capture of what a surface presents at one
//! instant: section identities in order, and for each section its item
//! identities in order, each paired with the content fingerprint the item
//! carried when it was built. Snapshots hold no payloads and no geometry,
//! which keeps them cheap to retain and cheap to compare; the reconciler in
//! [`crate::reconcile`] works entirely on pairs of them.

use std::collections::HashSet;

use crate::error::{CompositionError, Result};
use crate::section::{ItemId, Section, SectionId};

/// One item's identity row: who it is and what its content hashed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemState {
    /// Stable identity.
    pub id: ItemId,
    /// Content fingerprint captured when the item was built.
    pub fingerprint: u64,
}

impl ItemState {
    /// Capture an item's identity row.
    pub fn of(item: &crate::section::Item) -> Self {
        Self {
            id: item.id(),
            fingerprint: item.fingerprint(),
        }
    }
}

/// One section's identity row: its id and its items in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionState {
    /// Stable section identity.
    pub id: SectionId,
    /// Item rows in presentation order.
    pub items: Vec<ItemState>,
}

/// An immutable identity capture of a whole surface.
///
/// # Example
///
/// ```
/// use horizon_mosaic::{Item, ItemId, ItemKind, LayoutStrategy, Section, Snapshot};
///
/// let section = Section::new(
///     "people",
///     ItemKind::Person,
///     LayoutStrategy::plain_list(),
///     vec![Item::new(ItemId(1), ItemKind::Person, "ada")],
/// )?;
/// let snapshot = Snapshot::from_sections(std::slice::from_ref(&section))?;
/// assert_eq!(snapshot.section_count(), 1);
/// assert_eq!(snapshot.item_count(), 1);
/// # Ok::<(), horizon_mosaic::CompositionError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    sections: Vec<SectionState>,
}

impl Snapshot {
    /// The snapshot of a surface with nothing in it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Assemble a snapshot from already-validated section rows.
    pub(crate) fn from_states(sections: Vec<SectionState>) -> Self {
        Self { sections }
    }

    /// Capture the identity rows of `sections`, in order.
    ///
    /// Fails with [`CompositionError::DuplicateSection`] if two sections
    /// share an id, or [`CompositionError::DuplicateItem`] if one section
    /// presents the same item identity twice. Duplicates would make
    /// reconciliation ambiguous, so they are rejected at the boundary
    /// instead of detected mid-diff.
    pub fn from_sections(sections: &[Section]) -> Result<Self> {
        let mut seen_sections = HashSet::with_capacity(sections.len());
        let mut states = Vec::with_capacity(sections.len());

        for section in sections {
            if !seen_sections.insert(section.id().clone()) {
                return Err(CompositionError::DuplicateSection {
                    section: section.id().clone(),
                });
            }

            let mut seen_items = HashSet::with_capacity(section.items().len());
            let mut items = Vec::with_capacity(section.items().len());
            for item in section.items() {
                if !seen_items.insert(item.id()) {
                    return Err(CompositionError::DuplicateItem {
                        section: section.id().clone(),
                        item: item.id(),
                    });
                }
                items.push(ItemState::of(item));
            }

            states.push(SectionState {
                id: section.id().clone(),
                items,
            });
        }

        Ok(Self { sections: states })
    }

    /// Section rows in presentation order.
    #[inline]
    pub fn sections(&self) -> &[SectionState] {
        &self.sections
    }

    /// Number of sections.
    #[inline]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Total number of items across all sections.
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    /// Position of a section by id.
    pub fn section_index(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|s| &s.id == id)
    }
}
