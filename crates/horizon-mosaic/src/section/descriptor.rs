//! Section descriptors: the immutable specification of one section.
//!
//! A [`Section`] declares its identity, the one [`ItemKind`] all of its
//! items carry, its layout strategy, and optional decorations. Kind
//! consistency is checked at construction: a mismatched item is a
//! configuration error the moment the section is built, long before any
//! renderer could be asked for the wrong cell.

use std::fmt;
use std::sync::Arc;

use crate::error::{CompositionError, Result};
use crate::layout::LayoutStrategy;
use crate::pager::PagerChannel;
use crate::section::item::{Item, ItemKind};

/// Stable identity of a section (a title or key).
///
/// Cheap to clone and hash; the reconciler matches sections across
/// snapshots by this value.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(Arc<str>);

impl SectionId {
    /// The identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SectionId {
    fn from(key: &str) -> Self {
        Self(Arc::from(key))
    }
}

impl From<String> for SectionId {
    fn from(key: String) -> Self {
        Self(Arc::from(key))
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SectionId({:?})", self.as_str())
    }
}

/// The closed set of decoration kinds.
///
/// Decorations are supplementary visuals anchored to a section or its
/// items; like item kinds, they dispatch through the renderer registry by
/// this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    /// Section header (title strip).
    Header,
    /// Section footer.
    Footer,
    /// Per-item badge overlay.
    Badge,
    /// Footer hosting page dots for a paged section.
    PagerFooter,
}

impl DecorationKind {
    /// Stable kebab-case name, used in logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            DecorationKind::Header => "header",
            DecorationKind::Footer => "footer",
            DecorationKind::Badge => "badge",
            DecorationKind::PagerFooter => "pager-footer",
        }
    }
}

impl fmt::Display for DecorationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoration attached to a section: its kind plus main-axis extent.
///
/// The extent is what the layout engine reserves for headers and footers.
/// Badges carry no engine geometry (the host anchors them to item frames),
/// so their extent is advisory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    /// Which registered decoration renderer draws this.
    pub kind: DecorationKind,
    /// Main-axis size reserved by the layout engine.
    pub extent: f32,
}

/// Default main-axis extent for headers and footers.
pub const DEFAULT_DECORATION_EXTENT: f32 = 44.0;

impl Decoration {
    /// Create a decoration with an explicit extent.
    pub const fn new(kind: DecorationKind, extent: f32) -> Self {
        Self { kind, extent }
    }

    /// A header with the default extent.
    pub const fn header() -> Self {
        Self::new(DecorationKind::Header, DEFAULT_DECORATION_EXTENT)
    }

    /// A footer with the default extent.
    pub const fn footer() -> Self {
        Self::new(DecorationKind::Footer, DEFAULT_DECORATION_EXTENT)
    }

    /// A pager footer (page dots) with the default extent.
    pub const fn pager_footer() -> Self {
        Self::new(DecorationKind::PagerFooter, DEFAULT_DECORATION_EXTENT)
    }

    /// A per-item badge. The extent is advisory for badges.
    pub const fn badge() -> Self {
        Self::new(DecorationKind::Badge, 20.0)
    }
}

/// Immutable specification of one section.
///
/// Construction validates the kind invariant: every item must carry the
/// kind the section declares. Decorations and a pager channel can be
/// attached afterwards with the `with_*` methods; those do not touch the
/// item list, so the invariant established at construction holds for the
/// section's lifetime.
///
/// # Example
///
/// ```
/// use horizon_mosaic::{Decoration, Item, ItemId, ItemKind, LayoutStrategy, Section};
///
/// let section = Section::new(
///     "people",
///     ItemKind::Person,
///     LayoutStrategy::plain_list(),
///     vec![
///         Item::new(ItemId(1), ItemKind::Person, "Ada".to_string()),
///         Item::new(ItemId(2), ItemKind::Person, "Grace".to_string()),
///     ],
/// )
/// .unwrap()
/// .with_header(Decoration::header());
///
/// assert_eq!(section.items().len(), 2);
/// assert!(section.header().is_some());
/// ```
#[derive(Clone)]
pub struct Section {
    id: SectionId,
    kind: ItemKind,
    strategy: LayoutStrategy,
    items: Vec<Item>,
    header: Option<Decoration>,
    footer: Option<Decoration>,
    badge: Option<Decoration>,
    pager: Option<Arc<PagerChannel>>,
}

impl Section {
    /// Create a section, validating that every item carries `kind`.
    ///
    /// # Errors
    ///
    /// [`CompositionError::KindMismatch`] if any item's kind differs from
    /// the declared one. This is checked here, at composition time, so the
    /// mismatch fails loudly instead of surfacing as a wrong-renderer cast
    /// at render time.
    pub fn new(
        id: impl Into<SectionId>,
        kind: ItemKind,
        strategy: LayoutStrategy,
        items: Vec<Item>,
    ) -> Result<Self> {
        let id = id.into();
        for item in &items {
            if item.kind() != kind {
                return Err(CompositionError::KindMismatch {
                    section: id,
                    expected: kind,
                    found: item.kind(),
                    item: item.id(),
                });
            }
        }
        Ok(Self {
            id,
            kind,
            strategy,
            items,
            header: None,
            footer: None,
            badge: None,
            pager: None,
        })
    }

    /// Attach a header decoration.
    pub fn with_header(mut self, header: Decoration) -> Self {
        self.header = Some(header);
        self
    }

    /// Attach a footer decoration.
    pub fn with_footer(mut self, footer: Decoration) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Attach a per-item badge decoration.
    pub fn with_badge(mut self, badge: Decoration) -> Self {
        self.badge = Some(badge);
        self
    }

    /// Attach the pager sync channel for a paged section.
    pub fn with_pager(mut self, pager: Arc<PagerChannel>) -> Self {
        self.pager = Some(pager);
        self
    }

    /// The section's stable identity.
    #[inline]
    pub fn id(&self) -> &SectionId {
        &self.id
    }

    /// The kind every item in this section carries.
    #[inline]
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// The layout strategy geometry is computed with.
    #[inline]
    pub fn strategy(&self) -> &LayoutStrategy {
        &self.strategy
    }

    /// The items, in display order.
    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The header decoration, if any.
    #[inline]
    pub fn header(&self) -> Option<Decoration> {
        self.header
    }

    /// The footer decoration, if any.
    #[inline]
    pub fn footer(&self) -> Option<Decoration> {
        self.footer
    }

    /// The per-item badge decoration, if any.
    #[inline]
    pub fn badge(&self) -> Option<Decoration> {
        self.badge
    }

    /// The pager sync channel, if this section pages.
    #[inline]
    pub fn pager(&self) -> Option<&Arc<PagerChannel>> {
        self.pager.as_ref()
    }
}

impl fmt::Debug for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("items", &self.items.len())
            .field("header", &self.header)
            .field("footer", &self.footer)
            .field("badge", &self.badge)
            .field("paged", &self.pager.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::item::ItemId;

    fn person(id: u64, name: &str) -> Item {
        Item::new(ItemId(id), ItemKind::Person, name.to_string())
    }

    #[test]
    fn test_section_accepts_matching_kinds() {
        let section = Section::new(
            "people",
            ItemKind::Person,
            LayoutStrategy::plain_list(),
            vec![person(1, "Ada"), person(2, "Grace")],
        )
        .unwrap();
        assert_eq!(section.kind(), ItemKind::Person);
        assert_eq!(section.items().len(), 2);
    }

    #[test]
    fn test_section_rejects_mismatched_kind() {
        let stray = Item::new(ItemId(3), ItemKind::Task, 1_u8);
        let err = Section::new(
            "people",
            ItemKind::Person,
            LayoutStrategy::plain_list(),
            vec![person(1, "Ada"), stray],
        )
        .unwrap_err();

        match err {
            CompositionError::KindMismatch {
                expected,
                found,
                item,
                ..
            } => {
                assert_eq!(expected, ItemKind::Person);
                assert_eq!(found, ItemKind::Task);
                assert_eq!(item, ItemId(3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_section_is_valid() {
        let section = Section::new(
            "empty",
            ItemKind::GridCell,
            LayoutStrategy::grid(),
            Vec::new(),
        )
        .unwrap();
        assert!(section.items().is_empty());
    }

    #[test]
    fn test_decorations_attach() {
        let section = Section::new(
            "stats",
            ItemKind::TaskStatistics,
            LayoutStrategy::plain_list(),
            Vec::new(),
        )
        .unwrap()
        .with_header(Decoration::header())
        .with_footer(Decoration::footer())
        .with_badge(Decoration::badge());

        assert_eq!(section.header().map(|d| d.kind), Some(DecorationKind::Header));
        assert_eq!(section.footer().map(|d| d.kind), Some(DecorationKind::Footer));
        assert_eq!(section.badge().map(|d| d.kind), Some(DecorationKind::Badge));
    }

    #[test]
    fn test_section_id_round_trips() {
        let id = SectionId::from("tasks");
        assert_eq!(id.as_str(), "tasks");
        assert_eq!(id.to_string(), "tasks");
        assert_eq!(id, SectionId::from("tasks".to_string()));
    }
}
