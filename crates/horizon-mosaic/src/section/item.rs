//! Items: the atomic units a section lays out and renders.
//!
//! An [`Item`] is identity plus kind plus an opaque payload. The engine
//! never inspects the payload; it diffs by [`ItemId`] and decides
//! reload-in-place by comparing payload fingerprints, which are computed
//! once at construction from the payload's `Hash` implementation. Renderers
//! registered by the host downcast the payload back to its concrete type.

use std::any::Any;
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

/// Stable identity of an item, unique within its owning section.
///
/// Hosts derive this from their own data (a database id, a hash of a natural
/// key). Identity is what the reconciler tracks across snapshots; payload
/// changes under the same identity become reload operations rather than
/// remove/insert pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl From<u64> for ItemId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The closed set of renderer kinds.
///
/// Every item carries exactly one kind tag, every section declares exactly
/// one, and the renderer registry is keyed by this enum. Dispatch is an
/// exhaustive match with no fallback arm, so an unhandled kind is a
/// compile error in engine code and a loud
/// [`UnregisteredRenderer`](crate::CompositionError::UnregisteredRenderer)
/// error at the registry boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// A person entry (avatar-and-name style cells).
    Person,
    /// A task row.
    Task,
    /// A task-statistics card (title, subtitle, progress).
    TaskStatistics,
    /// A uniform grid cell.
    GridCell,
    /// A waterfall cell with variable extent.
    WaterfallCell,
    /// A cell inside a nested group.
    NestedCell,
}

impl ItemKind {
    /// All kinds, in declaration order.
    pub const ALL: [ItemKind; 6] = [
        ItemKind::Person,
        ItemKind::Task,
        ItemKind::TaskStatistics,
        ItemKind::GridCell,
        ItemKind::WaterfallCell,
        ItemKind::NestedCell,
    ];

    /// Stable kebab-case name, used in logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Person => "person",
            ItemKind::Task => "task",
            ItemKind::TaskStatistics => "task-statistics",
            ItemKind::GridCell => "grid-cell",
            ItemKind::WaterfallCell => "waterfall-cell",
            ItemKind::NestedCell => "nested-cell",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One renderable unit: stable identity, kind tag, opaque payload.
///
/// Items are value data. The engine clones them freely (the payload is
/// behind an `Arc`) and never mutates them.
///
/// # Example
///
/// ```
/// use horizon_mosaic::{Item, ItemId, ItemKind};
///
/// let item = Item::new(ItemId(7), ItemKind::Person, "Ada".to_string());
/// assert_eq!(item.kind(), ItemKind::Person);
/// assert_eq!(item.payload_as::<String>().map(String::as_str), Some("Ada"));
/// ```
#[derive(Clone)]
pub struct Item {
    id: ItemId,
    kind: ItemKind,
    fingerprint: u64,
    payload: Arc<dyn Any + Send + Sync>,
}

impl Item {
    /// Create an item, fingerprinting the payload.
    ///
    /// The fingerprint is a digest of the payload's `Hash` output. It is the
    /// only payload-derived value the reconciler ever reads: two snapshots
    /// containing this identity compare fingerprints to decide whether the
    /// item is reloaded in place.
    pub fn new<P>(id: impl Into<ItemId>, kind: ItemKind, payload: P) -> Self
    where
        P: Hash + Send + Sync + 'static,
    {
        let mut hasher = DefaultHasher::new();
        payload.hash(&mut hasher);
        let fingerprint = hasher.finish();
        Self {
            id: id.into(),
            kind,
            fingerprint,
            payload: Arc::new(payload),
        }
    }

    /// Create an item with a caller-supplied fingerprint.
    ///
    /// For payloads that are expensive to hash or not `Hash` at all; the
    /// caller owns the guarantee that equal payloads get equal fingerprints.
    pub fn with_fingerprint<P>(
        id: impl Into<ItemId>,
        kind: ItemKind,
        payload: P,
        fingerprint: u64,
    ) -> Self
    where
        P: Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            kind,
            fingerprint,
            payload: Arc::new(payload),
        }
    }

    /// The item's stable identity.
    #[inline]
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// The item's kind tag.
    #[inline]
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// The payload fingerprint computed at construction.
    #[inline]
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Downcast the payload to its concrete type.
    ///
    /// Returns `None` if the payload is not a `P`. Renderers know the
    /// payload type for their kind, so a `None` here is a host-side wiring
    /// bug.
    pub fn payload_as<P: 'static>(&self) -> Option<&P> {
        self.payload.downcast_ref::<P>()
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_exposes_identity_and_kind() {
        let item = Item::new(ItemId(3), ItemKind::Task, 11_u32);
        assert_eq!(item.id(), ItemId(3));
        assert_eq!(item.kind(), ItemKind::Task);
    }

    #[test]
    fn test_equal_payloads_get_equal_fingerprints() {
        let a = Item::new(ItemId(1), ItemKind::Person, "Grace".to_string());
        let b = Item::new(ItemId(2), ItemKind::Person, "Grace".to_string());
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_changed_payload_changes_fingerprint() {
        let before = Item::new(ItemId(1), ItemKind::Person, "Grace".to_string());
        let after = Item::new(ItemId(1), ItemKind::Person, "Grace H".to_string());
        assert_ne!(before.fingerprint(), after.fingerprint());
    }

    #[test]
    fn test_payload_downcast() {
        let item = Item::new(ItemId(1), ItemKind::GridCell, 42_u32);
        assert_eq!(item.payload_as::<u32>(), Some(&42));
        assert!(item.payload_as::<String>().is_none());
    }

    #[test]
    fn test_explicit_fingerprint_is_kept() {
        struct Unhashable;
        let item = Item::with_fingerprint(ItemId(9), ItemKind::NestedCell, Unhashable, 0xBEEF);
        assert_eq!(item.fingerprint(), 0xBEEF);
    }

    #[test]
    fn test_kind_names_are_kebab_case() {
        for kind in ItemKind::ALL {
            assert!(!kind.as_str().contains(' '));
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }
}
