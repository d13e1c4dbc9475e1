//! Layout engine: per-section geometry computation.
//!
//! This module provides the pure layout half of the engine:
//!
//! - [`LayoutStrategy`]: the closed enum of per-section layout algorithms
//! - [`SectionGeometry`]: the computed output (item frames, decoration
//!   frames, content size, scroll mode, page count)
//! - [`Margins`]: spacing between a section's content and its edges
//! - [`compute_section_geometry`]: the dispatch entry point
//!
//! # Built-in Strategies
//!
//! - [`GridConfig`] - uniform cells in environment-derived columns
//! - [`WaterfallConfig`] - shortest-lane flow, vertical / horizontal / stacked
//! - [`NestedConfig`] - repeating primary-plus-trailing groups
//! - [`PagedConfig`] - container-width pages with snapping
//! - [`ListConfig`] - single column, fixed or content-driven rows
//!
//! # Independence
//!
//! Geometry is a pure function of one section and the environment. No
//! strategy reads another section's items or output, which is what lets the
//! composition surface compute geometry lazily, section by section, and
//! throw all of it away on an environment change without ordering concerns.
//!
//! # Coordinates
//!
//! Item and decoration frames are section-local: `(0, 0)` is the section's
//! top-left corner. The host offsets them by the section's position in the
//! outer scroll. For orthogonally-scrolling strategies the content size
//! reports the full scrollable extent, while headers and footers always
//! span the container width (they do not travel with the strip).

mod grid;
mod list;
mod nested;
mod paged;
mod waterfall;

use std::fmt;
use std::sync::Arc;

use horizon_mosaic_core::{Rect, Size};

use crate::environment::LayoutEnvironment;
use crate::section::Section;

pub use grid::{ColumnRule, GridConfig};
pub use list::{ListConfig, RowExtent};
pub use nested::{NestedConfig, NestedOrientation};
pub use paged::PagedConfig;
pub use waterfall::{WaterfallConfig, WaterfallStyle};

/// Per-item main-axis extent callback.
///
/// Payloads are opaque to the engine, so strategies that need a measured
/// extent per item (waterfalls, content-driven lists) take it from the host
/// through this closure: `(item index, available breadth) -> extent`.
pub type ExtentProvider = Arc<dyn Fn(usize, f32) -> f32 + Send + Sync>;

/// An [`ExtentProvider`] that returns the same extent for every item.
pub fn fixed_extent(extent: f32) -> ExtentProvider {
    Arc::new(move |_, _| extent)
}

/// Content margins around a section's items.
///
/// Margins define the spacing between a section's items and its edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    /// Left margin.
    pub left: f32,
    /// Top margin.
    pub top: f32,
    /// Right margin.
    pub right: f32,
    /// Bottom margin.
    pub bottom: f32,
}

impl Margins {
    /// Create new margins.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create uniform margins (same value on all sides).
    pub const fn uniform(margin: f32) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// Zero margins.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Total horizontal margin (left + right).
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical margin (top + bottom).
    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Default spacing between items within a section.
pub const DEFAULT_SPACING: f32 = 8.0;

/// Default breadth of an orthogonally-scrolling strip.
pub const DEFAULT_BAND_EXTENT: f32 = 180.0;

/// How a section scrolls along its own sub-axis, independently of the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrthogonalScroll {
    /// The section does not scroll on its own; the root scroll carries it.
    None,
    /// Free continuous scrolling along the sub-axis.
    Continuous,
    /// Sub-axis scrolling that snaps to page boundaries.
    Paged,
}

/// The layout algorithm a section declares.
///
/// This is a closed enum: geometry dispatch is an exhaustive match, so a
/// new strategy cannot be added without every dispatch site being updated.
///
/// # Example
///
/// ```
/// use horizon_mosaic::{fixed_extent, LayoutStrategy};
///
/// let grid = LayoutStrategy::grid();
/// let feed = LayoutStrategy::waterfall(2, fixed_extent(140.0));
/// assert_eq!(grid.name(), "grid");
/// assert_eq!(feed.name(), "waterfall");
/// ```
#[derive(Clone, Debug)]
pub enum LayoutStrategy {
    /// Uniform cells in environment-derived columns.
    Grid(GridConfig),
    /// Shortest-lane flow with per-item extents.
    Waterfall(WaterfallConfig),
    /// Repeating groups of one primary plus trailing items.
    NestedGroup(NestedConfig),
    /// Container-width pages with snapping.
    PagedList(PagedConfig),
    /// Single-column flow.
    PlainList(ListConfig),
}

impl LayoutStrategy {
    /// A grid with the default column rule.
    pub fn grid() -> Self {
        Self::Grid(GridConfig::default())
    }

    /// A vertical waterfall with `lanes` columns.
    pub fn waterfall(lanes: usize, extent: ExtentProvider) -> Self {
        Self::Waterfall(WaterfallConfig::new(WaterfallStyle::Vertical, lanes, extent))
    }

    /// A horizontally-scrolling waterfall with `lanes` rows.
    pub fn horizontal_waterfall(lanes: usize, extent: ExtentProvider) -> Self {
        Self::Waterfall(WaterfallConfig::new(
            WaterfallStyle::Horizontal,
            lanes,
            extent,
        ))
    }

    /// A stack of overlapping full-width cards.
    pub fn stacked_waterfall(extent: ExtentProvider) -> Self {
        Self::Waterfall(WaterfallConfig::new(WaterfallStyle::Stacked, 1, extent))
    }

    /// Nested groups stacked vertically.
    pub fn nested_vertical() -> Self {
        Self::NestedGroup(NestedConfig::vertical())
    }

    /// Nested groups flowing horizontally in an orthogonal strip.
    pub fn nested_horizontal() -> Self {
        Self::NestedGroup(NestedConfig::horizontal())
    }

    /// A paged carousel, one page per item.
    pub fn paged_list() -> Self {
        Self::PagedList(PagedConfig::default())
    }

    /// A plain single-column list.
    pub fn plain_list() -> Self {
        Self::PlainList(ListConfig::default())
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Grid(_) => "grid",
            Self::Waterfall(_) => "waterfall",
            Self::NestedGroup(_) => "nested-group",
            Self::PagedList(_) => "paged-list",
            Self::PlainList(_) => "plain-list",
        }
    }
}

/// Computed geometry for one section.
///
/// All frames are section-local (see the module docs). An empty section
/// produces [`SectionGeometry::zero`]: no frames, no decorations, zero
/// content size. That degenerate case is not an error.
#[derive(Debug, Clone)]
pub struct SectionGeometry {
    /// One frame per item, in item order.
    pub frames: Vec<Rect>,
    /// Header frame, if the section declares a header.
    pub header: Option<Rect>,
    /// Footer frame, if the section declares a footer.
    pub footer: Option<Rect>,
    /// Total content size, including decorations. For orthogonally
    /// scrolling sections the width is the full scrollable extent.
    pub content_size: Size,
    /// How this section scrolls along its sub-axis.
    pub scroll: OrthogonalScroll,
    /// Number of pages (zero unless the strategy pages).
    pub page_count: usize,
}

impl SectionGeometry {
    /// The degenerate geometry of an empty section.
    pub fn zero() -> Self {
        Self {
            frames: Vec::new(),
            header: None,
            footer: None,
            content_size: Size::ZERO,
            scroll: OrthogonalScroll::None,
            page_count: 0,
        }
    }

    /// The page under a sub-axis scroll offset, if this section pages.
    ///
    /// Offsets between boundaries round to the nearest page; offsets beyond
    /// either end clamp. Returns `None` for non-paged geometry.
    pub fn page_at_offset(&self, offset: f32) -> Option<usize> {
        let stride = self.page_stride()?;
        Some(paged::page_at_offset(offset, stride, self.page_count))
    }

    /// The sub-axis scroll offset that puts `page` on screen.
    ///
    /// Returns `None` for non-paged geometry or an out-of-range page.
    pub fn offset_for_page(&self, page: usize) -> Option<f32> {
        if page >= self.page_count {
            return None;
        }
        let stride = self.page_stride()?;
        Some(stride * page as f32)
    }

    /// Distance between the left edges of adjacent pages.
    fn page_stride(&self) -> Option<f32> {
        if self.page_count == 0 {
            return None;
        }
        match self.frames.len() {
            0 => None,
            1 => Some(self.frames[0].width()),
            _ => Some(self.frames[1].left() - self.frames[0].left()),
        }
    }
}

/// Geometry of a section's item area, before decorations are added.
pub(crate) struct BodyGeometry {
    pub(crate) frames: Vec<Rect>,
    pub(crate) size: Size,
    pub(crate) scroll: OrthogonalScroll,
    pub(crate) page_count: usize,
}

impl BodyGeometry {
    /// A non-scrolling body.
    pub(crate) fn fixed(frames: Vec<Rect>, size: Size) -> Self {
        Self {
            frames,
            size,
            scroll: OrthogonalScroll::None,
            page_count: 0,
        }
    }
}

/// Compute the geometry of one section under the given environment.
///
/// Pure: reads only the section and the environment. Sections never
/// influence each other's geometry.
pub fn compute_section_geometry(
    section: &Section,
    env: &LayoutEnvironment,
) -> SectionGeometry {
    let item_count = section.items().len();
    if item_count == 0 {
        tracing::trace!(
            target: "horizon_mosaic::layout",
            section = %section.id(),
            "empty section, zero geometry"
        );
        return SectionGeometry::zero();
    }

    let body = match section.strategy() {
        LayoutStrategy::Grid(cfg) => grid::solve(cfg, item_count, env),
        LayoutStrategy::Waterfall(cfg) => waterfall::solve(cfg, item_count, env),
        LayoutStrategy::NestedGroup(cfg) => nested::solve(cfg, item_count, env),
        LayoutStrategy::PagedList(cfg) => paged::solve(cfg, item_count, env),
        LayoutStrategy::PlainList(cfg) => list::solve(cfg, item_count, env),
    };

    let header_extent = section.header().map_or(0.0, |d| d.extent);
    let footer_extent = section.footer().map_or(0.0, |d| d.extent);

    let mut frames = body.frames;
    if header_extent > 0.0 {
        for frame in &mut frames {
            *frame = frame.offset(0.0, header_extent);
        }
    }

    let header = (header_extent > 0.0)
        .then(|| Rect::new(0.0, 0.0, env.container.width, header_extent));
    let footer = (footer_extent > 0.0).then(|| {
        Rect::new(
            0.0,
            header_extent + body.size.height,
            env.container.width,
            footer_extent,
        )
    });

    // Non-scrolling sections span the container; scrolling ones report
    // their full scrollable extent.
    let content_width = match body.scroll {
        OrthogonalScroll::None => env.container.width,
        OrthogonalScroll::Continuous | OrthogonalScroll::Paged => body.size.width,
    };

    let geometry = SectionGeometry {
        frames,
        header,
        footer,
        content_size: Size::new(
            content_width,
            header_extent + body.size.height + footer_extent,
        ),
        scroll: body.scroll,
        page_count: body.page_count,
    };

    tracing::trace!(
        target: "horizon_mosaic::layout",
        section = %section.id(),
        strategy = section.strategy().name(),
        items = item_count,
        width = geometry.content_size.width,
        height = geometry.content_size.height,
        "computed section geometry"
    );

    geometry
}

impl fmt::Display for OrthogonalScroll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Continuous => "continuous",
            Self::Paged => "paged",
        };
        f.write_str(name)
    }
}
