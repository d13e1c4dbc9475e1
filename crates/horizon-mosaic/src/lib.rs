//! Horizon Mosaic - a declarative sectioned-composition engine.
//!
//! Mosaic turns a host-supplied list of heterogeneous [`Section`]s into
//! geometry and views, and turns consecutive versions of that list into
//! minimal change operations. Each section declares its item kind and a
//! [`LayoutStrategy`]; the [`CompositionSurface`] diffs refreshes by
//! identity, caches per-section geometry, dispatches rendering through a
//! [`RendererRegistry`], and keeps paged sections in sync with their
//! indicators over [`PagerChannel`]s.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_mosaic::prelude::*;
//!
//! struct Board;
//!
//! impl SectionDataSource for Board {
//!     fn data(&self) -> Vec<Section> {
//!         let items = vec![
//!             Item::new(ItemId(1), ItemKind::Task, "write docs"),
//!             Item::new(ItemId(2), ItemKind::Task, "cut the release"),
//!         ];
//!         vec![
//!             Section::new("tasks", ItemKind::Task, LayoutStrategy::plain_list(), items)
//!                 .expect("uniform kinds"),
//!         ]
//!     }
//! }
//!
//! fn main() -> Result<(), CompositionError> {
//!     let mut registry = RendererRegistry::new();
//!     registry.register_item(ItemKind::Task, |item, _hints| format!("task {}", item.id()));
//!
//!     let mut surface = CompositionSurface::new(
//!         Arc::new(Board),
//!         registry,
//!         LayoutEnvironment::new(Size::new(375.0, 812.0)),
//!     );
//!
//!     if let RefreshOutcome::Applied(pass) = surface.refresh()? {
//!         // One section appears with its two items.
//!         assert_eq!(pass.ops.len(), 3);
//!         surface.updates_completed()?;
//!     }
//!
//!     let geometry = surface.section_geometry(0)?;
//!     assert_eq!(geometry.frames.len(), 2);
//!     assert_eq!(surface.render_item(0, 0)?, "task #1");
//!     Ok(())
//! }
//! ```
//!
//! # Crates
//!
//! The engine proper lives here; [`horizon_mosaic_core`] carries the
//! dependency-light primitives (signals, geometry, logging) and is
//! re-exported in full.

pub mod environment;
pub mod error;
pub mod layout;
pub mod pager;
pub mod prelude;
pub mod reconcile;
pub mod registry;
pub mod section;
pub mod snapshot;
pub mod surface;

pub use environment::{LayoutEnvironment, SizeClass, StyleHints, REGULAR_MIN_WIDTH};
pub use error::{CompositionError, Result};
pub use layout::{
    compute_section_geometry, fixed_extent, ColumnRule, ExtentProvider, GridConfig,
    LayoutStrategy, ListConfig, Margins, NestedConfig, NestedOrientation, OrthogonalScroll,
    PagedConfig, RowExtent, SectionGeometry, WaterfallConfig, WaterfallStyle,
    DEFAULT_BAND_EXTENT, DEFAULT_SPACING,
};
pub use pager::{PagerChannel, PagerEvent, PagerSubscription};
pub use reconcile::{apply, diff, ChangeOp};
pub use registry::{DecorationRenderer, ItemRenderer, RendererRegistry};
pub use section::{
    Decoration, DecorationKind, Item, ItemId, ItemKind, Section, SectionId,
    DEFAULT_DECORATION_EXTENT,
};
pub use snapshot::{ItemState, SectionState, Snapshot};
pub use surface::{
    CompositionSurface, RefreshOutcome, ScrollRequest, SectionDataSource, SurfaceStatus,
    UpdatePass,
};

pub use horizon_mosaic_core::*;
