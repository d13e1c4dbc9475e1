//! Paged layout: one container-width page per item.

use horizon_mosaic_core::{Rect, Size};

use crate::environment::LayoutEnvironment;
use crate::layout::{BodyGeometry, OrthogonalScroll, DEFAULT_BAND_EXTENT};

/// Configuration for [`LayoutStrategy::PagedList`](crate::LayoutStrategy::PagedList).
///
/// Every item becomes one page spanning the full container width, so the
/// page count equals the item count and scrolling snaps page to page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagedConfig {
    /// Gap between adjacent pages, visible mid-swipe.
    pub page_spacing: f32,
    /// Band breadth.
    pub band: f32,
}

impl Default for PagedConfig {
    fn default() -> Self {
        Self {
            page_spacing: 0.0,
            band: DEFAULT_BAND_EXTENT,
        }
    }
}

pub(crate) fn solve(
    cfg: &PagedConfig,
    item_count: usize,
    env: &LayoutEnvironment,
) -> BodyGeometry {
    let page_width = env.container.width;
    let mut frames = Vec::with_capacity(item_count);
    for index in 0..item_count {
        frames.push(Rect::new(
            index as f32 * (page_width + cfg.page_spacing),
            0.0,
            page_width,
            cfg.band,
        ));
    }

    let width = item_count as f32 * page_width
        + item_count.saturating_sub(1) as f32 * cfg.page_spacing;
    BodyGeometry {
        frames,
        size: Size::new(width, cfg.band),
        scroll: OrthogonalScroll::Paged,
        page_count: item_count,
    }
}

/// The page closest to a sub-axis offset, clamped into range.
pub(crate) fn page_at_offset(offset: f32, stride: f32, page_count: usize) -> usize {
    if page_count == 0 || stride <= 0.0 {
        return 0;
    }
    let page = (offset / stride).round().max(0.0) as usize;
    page.min(page_count - 1)
}
