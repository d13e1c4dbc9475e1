//! Renderer registry: kind-driven view construction.
//!
//! The engine never builds host views itself; it dispatches to renderers
//! the host registers per [`ItemKind`] and per [`DecorationKind`]. `V` is
//! whatever the host's view value is: a widget handle, a virtual-DOM
//! node, a test string. Lookup is by the item's kind tag, so a section
//! full of [`ItemKind::Person`] items can never reach the task renderer,
//! and a kind with no registered renderer fails loudly instead of
//! rendering nothing.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::environment::StyleHints;
use crate::error::{CompositionError, Result};
use crate::section::{DecorationKind, Item, ItemKind, Section};

/// Builds the host's view value for one item.
pub type ItemRenderer<V> = Arc<dyn Fn(&Item, &StyleHints) -> V + Send + Sync>;

/// Builds the host's view value for one decoration of a section.
pub type DecorationRenderer<V> = Arc<dyn Fn(&Section, &StyleHints) -> V + Send + Sync>;

/// Kind-to-renderer table for items and decorations.
///
/// # Example
///
/// ```
/// use horizon_mosaic::{Item, ItemId, ItemKind, RendererRegistry};
/// use horizon_mosaic::{LayoutEnvironment, Size};
///
/// let mut registry: RendererRegistry<String> = RendererRegistry::new();
/// registry.register_item(ItemKind::Person, |item, _hints| {
///     format!("person {}", item.id())
/// });
///
/// let hints = LayoutEnvironment::new(Size::new(320.0, 640.0)).style_hints();
/// let item = Item::new(ItemId(7), ItemKind::Person, "ada");
/// assert_eq!(registry.render_item(&item, &hints)?, "person #7");
/// # Ok::<(), horizon_mosaic::CompositionError>(())
/// ```
pub struct RendererRegistry<V> {
    items: HashMap<ItemKind, ItemRenderer<V>>,
    decorations: HashMap<DecorationKind, DecorationRenderer<V>>,
}

impl<V> RendererRegistry<V> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            decorations: HashMap::new(),
        }
    }

    /// Register the renderer for an item kind, replacing any previous one.
    pub fn register_item<F>(&mut self, kind: ItemKind, renderer: F)
    where
        F: Fn(&Item, &StyleHints) -> V + Send + Sync + 'static,
    {
        self.items.insert(kind, Arc::new(renderer));
    }

    /// Register the renderer for a decoration kind, replacing any previous
    /// one.
    pub fn register_decoration<F>(&mut self, kind: DecorationKind, renderer: F)
    where
        F: Fn(&Section, &StyleHints) -> V + Send + Sync + 'static,
    {
        self.decorations.insert(kind, Arc::new(renderer));
    }

    /// Whether an item kind has a renderer.
    pub fn has_item_renderer(&self, kind: ItemKind) -> bool {
        self.items.contains_key(&kind)
    }

    /// Whether a decoration kind has a renderer.
    pub fn has_decoration_renderer(&self, kind: DecorationKind) -> bool {
        self.decorations.contains_key(&kind)
    }

    /// Build the view for `item` by its kind tag.
    pub fn render_item(&self, item: &Item, hints: &StyleHints) -> Result<V> {
        let renderer = self
            .items
            .get(&item.kind())
            .ok_or(CompositionError::UnregisteredRenderer { kind: item.kind() })?;
        Ok(renderer(item, hints))
    }

    /// Build the view for one of `section`'s decorations.
    pub fn render_decoration(
        &self,
        kind: DecorationKind,
        section: &Section,
        hints: &StyleHints,
    ) -> Result<V> {
        let renderer = self
            .decorations
            .get(&kind)
            .ok_or(CompositionError::UnregisteredDecoration { kind })?;
        Ok(renderer(section, hints))
    }
}

impl<V> Default for RendererRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for RendererRegistry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("item_kinds", &self.items.len())
            .field("decoration_kinds", &self.decorations.len())
            .finish()
    }
}
