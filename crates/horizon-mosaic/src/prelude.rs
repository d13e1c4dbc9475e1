//! Prelude module for Horizon Mosaic.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use horizon_mosaic::prelude::*;
//! ```
//!
//! This provides access to:
//! - The composition surface (`CompositionSurface`, `SectionDataSource`)
//! - Sections and items (`Section`, `Item`, `ItemKind`, `Decoration`)
//! - Layout strategies (`LayoutStrategy`, `GridConfig`, `WaterfallConfig`, etc.)
//! - Snapshots and reconciliation (`Snapshot`, `ChangeOp`)
//! - Pager synchronization (`PagerChannel`, `PagerSubscription`)
//! - Core primitives (`Signal`, `Point`, `Size`, `Rect`)

// ============================================================================
// Composition Surface
// ============================================================================

pub use crate::surface::{
    CompositionSurface, RefreshOutcome, ScrollRequest, SectionDataSource, SurfaceStatus,
    UpdatePass,
};

// ============================================================================
// Sections and Items
// ============================================================================

pub use crate::section::{
    Decoration, DecorationKind, Item, ItemId, ItemKind, Section, SectionId,
};

// ============================================================================
// Layout
// ============================================================================

pub use crate::environment::{LayoutEnvironment, SizeClass, StyleHints};
pub use crate::layout::{
    compute_section_geometry, fixed_extent, ColumnRule, ExtentProvider, GridConfig,
    LayoutStrategy, ListConfig, Margins, NestedConfig, NestedOrientation, OrthogonalScroll,
    PagedConfig, RowExtent, SectionGeometry, WaterfallConfig, WaterfallStyle,
};

// ============================================================================
// Snapshots and Reconciliation
// ============================================================================

pub use crate::reconcile::{apply, diff, ChangeOp};
pub use crate::snapshot::{ItemState, SectionState, Snapshot};

// ============================================================================
// Rendering
// ============================================================================

pub use crate::registry::{DecorationRenderer, ItemRenderer, RendererRegistry};

// ============================================================================
// Pager Synchronization
// ============================================================================

pub use crate::pager::{PagerChannel, PagerEvent, PagerSubscription};

// ============================================================================
// Errors
// ============================================================================

pub use crate::error::CompositionError;

// ============================================================================
// Core Primitives
// ============================================================================

pub use horizon_mosaic_core::{ConnectionId, Point, Rect, Signal, Size};

#[cfg(test)]
mod tests {
    #![allow(unused)]
    use super::*;

    /// Verify that all prelude exports are accessible and the types exist.
    /// Instantiation only; real flows live in the integration tests.
    #[test]
    fn test_prelude_types_exist() {
        // Core primitives
        let _signal: Signal<usize> = Signal::new();
        let _point = Point::new(0.0, 0.0);
        let _size = Size::new(320.0, 640.0);
        let _rect = Rect::new(0.0, 0.0, 320.0, 44.0);

        // Environment and layout strategies
        let _environment = LayoutEnvironment::new(Size::new(320.0, 640.0));
        let _grid = LayoutStrategy::grid();
        let _waterfall = LayoutStrategy::waterfall(2, fixed_extent(80.0));
        let _paged = LayoutStrategy::paged_list();

        // Sections, items, decorations
        let item = Item::new(ItemId(1), ItemKind::Task, "triage the inbox");
        let _section = Section::new(
            "tasks",
            ItemKind::Task,
            LayoutStrategy::plain_list(),
            vec![item],
        );
        let _header = Decoration::header();

        // Rendering and pager sync
        let _registry: RendererRegistry<String> = RendererRegistry::new();
        let _channel = PagerChannel::new();
    }

    /// Verify the surface seams are accessible (compile-time check only).
    /// These functions verify the types exist without calling them.
    #[allow(dead_code)]
    fn _surface_types_check() {
        fn _takes_source<S: SectionDataSource>(_source: &S) {}

        fn _surface(
            source: std::sync::Arc<dyn SectionDataSource>,
        ) -> CompositionSurface<String> {
            CompositionSurface::new(
                source,
                RendererRegistry::new(),
                LayoutEnvironment::new(Size::new(320.0, 640.0)),
            )
        }
    }
}
