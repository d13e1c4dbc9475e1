//! Waterfall layout: shortest-lane flow with per-item extents.

use std::fmt;

use horizon_mosaic_core::{Rect, Size};

use crate::environment::LayoutEnvironment;
use crate::layout::{
    BodyGeometry, ExtentProvider, Margins, OrthogonalScroll, DEFAULT_BAND_EXTENT,
    DEFAULT_SPACING,
};

/// Default vertical offset between consecutive stacked cards.
const DEFAULT_STACK_OFFSET: f32 = 32.0;

/// The three waterfall variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaterfallStyle {
    /// Columns fill downward; each item joins the currently shortest lane.
    Vertical,
    /// Rows fill rightward inside a fixed-height band that scrolls
    /// horizontally on its own.
    Horizontal,
    /// Full-width cards overlap, each offset a fixed amount below the one
    /// before it.
    Stacked,
}

/// Configuration for [`LayoutStrategy::Waterfall`](crate::LayoutStrategy::Waterfall).
///
/// The extent of each item along the flow axis comes from the host through
/// an [`ExtentProvider`]; the engine never inspects payloads.
#[derive(Clone)]
pub struct WaterfallConfig {
    /// Which variant to run.
    pub style: WaterfallStyle,
    /// Lane count. Columns for [`WaterfallStyle::Vertical`], rows for
    /// [`WaterfallStyle::Horizontal`]; ignored by [`WaterfallStyle::Stacked`].
    pub lanes: usize,
    /// Spacing between items and between lanes.
    pub spacing: f32,
    /// Margins around the whole flow.
    pub margins: Margins,
    /// Per-item extent along the flow axis.
    pub extent: ExtentProvider,
    /// Offset between consecutive cards, [`WaterfallStyle::Stacked`] only.
    pub stack_offset: f32,
    /// Band breadth, [`WaterfallStyle::Horizontal`] only.
    pub band: f32,
}

impl WaterfallConfig {
    /// A waterfall with default spacing, margins, stack offset and band.
    pub fn new(style: WaterfallStyle, lanes: usize, extent: ExtentProvider) -> Self {
        Self {
            style,
            lanes,
            spacing: DEFAULT_SPACING,
            margins: Margins::ZERO,
            extent,
            stack_offset: DEFAULT_STACK_OFFSET,
            band: DEFAULT_BAND_EXTENT,
        }
    }
}

impl fmt::Debug for WaterfallConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaterfallConfig")
            .field("style", &self.style)
            .field("lanes", &self.lanes)
            .field("spacing", &self.spacing)
            .field("margins", &self.margins)
            .field("stack_offset", &self.stack_offset)
            .field("band", &self.band)
            .finish_non_exhaustive()
    }
}

pub(crate) fn solve(
    cfg: &WaterfallConfig,
    item_count: usize,
    env: &LayoutEnvironment,
) -> BodyGeometry {
    match cfg.style {
        WaterfallStyle::Vertical => solve_vertical(cfg, item_count, env),
        WaterfallStyle::Horizontal => solve_horizontal(cfg, item_count),
        WaterfallStyle::Stacked => solve_stacked(cfg, item_count, env),
    }
}

fn solve_vertical(
    cfg: &WaterfallConfig,
    item_count: usize,
    env: &LayoutEnvironment,
) -> BodyGeometry {
    let lanes = cfg.lanes.max(1);
    let available = env.container.width - cfg.margins.horizontal();
    let spacing_total = cfg.spacing * (lanes - 1) as f32;
    let lane_width = ((available - spacing_total) / lanes as f32).max(0.0);

    // Per-lane y of the next item, spacing already included.
    let mut lane_bottoms = vec![cfg.margins.top; lanes];
    let mut frames = Vec::with_capacity(item_count);
    for index in 0..item_count {
        let extent = (cfg.extent)(index, lane_width).max(0.0);
        let lane = shortest_lane(&lane_bottoms);
        let x = cfg.margins.left + lane as f32 * (lane_width + cfg.spacing);
        let y = lane_bottoms[lane];
        frames.push(Rect::new(x, y, lane_width, extent));
        lane_bottoms[lane] = y + extent + cfg.spacing;
    }

    let width = cfg.margins.horizontal() + lanes as f32 * lane_width + spacing_total;
    let height = max_bottom(&frames) + cfg.margins.bottom;
    BodyGeometry::fixed(frames, Size::new(width, height))
}

fn solve_horizontal(cfg: &WaterfallConfig, item_count: usize) -> BodyGeometry {
    let lanes = cfg.lanes.max(1);
    let available = cfg.band - cfg.margins.vertical();
    let spacing_total = cfg.spacing * (lanes - 1) as f32;
    let lane_height = ((available - spacing_total) / lanes as f32).max(0.0);

    let mut lane_rights = vec![cfg.margins.left; lanes];
    let mut frames = Vec::with_capacity(item_count);
    for index in 0..item_count {
        let extent = (cfg.extent)(index, lane_height).max(0.0);
        let lane = shortest_lane(&lane_rights);
        let x = lane_rights[lane];
        let y = cfg.margins.top + lane as f32 * (lane_height + cfg.spacing);
        frames.push(Rect::new(x, y, extent, lane_height));
        lane_rights[lane] = x + extent + cfg.spacing;
    }

    let width = frames
        .iter()
        .map(Rect::right)
        .fold(0.0, f32::max)
        + cfg.margins.right;
    BodyGeometry {
        frames,
        size: Size::new(width, cfg.band),
        scroll: OrthogonalScroll::Continuous,
        page_count: 0,
    }
}

fn solve_stacked(
    cfg: &WaterfallConfig,
    item_count: usize,
    env: &LayoutEnvironment,
) -> BodyGeometry {
    let width = (env.container.width - cfg.margins.horizontal()).max(0.0);
    let offset = cfg.stack_offset.max(0.0);

    let mut frames = Vec::with_capacity(item_count);
    for index in 0..item_count {
        let extent = (cfg.extent)(index, width).max(0.0);
        let y = cfg.margins.top + index as f32 * offset;
        frames.push(Rect::new(cfg.margins.left, y, width, extent));
    }

    let height = max_bottom(&frames) + cfg.margins.bottom;
    BodyGeometry::fixed(frames, Size::new(env.container.width, height))
}

/// Index of the lane with the smallest fill; ties go to the lowest index.
fn shortest_lane(fills: &[f32]) -> usize {
    let mut lane = 0;
    for (index, fill) in fills.iter().enumerate().skip(1) {
        if *fill < fills[lane] {
            lane = index;
        }
    }
    lane
}

fn max_bottom(frames: &[Rect]) -> f32 {
    frames.iter().map(Rect::bottom).fold(0.0, f32::max)
}
