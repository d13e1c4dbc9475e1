//! Nested-group layout: repeating groups of one primary plus trailing items.

use horizon_mosaic_core::{Rect, Size};

use crate::environment::LayoutEnvironment;
use crate::layout::{
    BodyGeometry, Margins, OrthogonalScroll, DEFAULT_BAND_EXTENT, DEFAULT_SPACING,
};

/// Default extent of one group along the stacking axis.
const DEFAULT_GROUP_EXTENT: f32 = 240.0;

/// Default share of a group the primary item takes.
const DEFAULT_PRIMARY_FRACTION: f32 = 0.7;

/// Which way nested groups stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestedOrientation {
    /// Groups stack downward; the root scroll carries them.
    Vertical,
    /// Groups flow rightward in a band that scrolls on its own.
    Horizontal,
}

/// Configuration for [`LayoutStrategy::NestedGroup`](crate::LayoutStrategy::NestedGroup).
///
/// Items fill repeating groups in order: one primary, then
/// `trailing_count` trailing items. In a vertical group the primary takes
/// `primary_fraction` of the width with the trailing items stacked beside
/// it; a horizontal group is the transpose, primary on top and trailing
/// items side by side below. A short final group keeps the same slot
/// sizes and leaves the unused slots empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NestedConfig {
    /// Stacking axis for groups.
    pub orientation: NestedOrientation,
    /// Share of the group the primary item takes, `0.0..=1.0`.
    pub primary_fraction: f32,
    /// Trailing items per group.
    pub trailing_count: usize,
    /// Extent of one group along the stacking axis.
    pub group_extent: f32,
    /// Band breadth, [`NestedOrientation::Horizontal`] only.
    pub band: f32,
    /// Spacing between slots and between groups.
    pub spacing: f32,
    /// Margins around all groups.
    pub margins: Margins,
}

impl NestedConfig {
    /// Vertically stacked groups with the default shape.
    pub fn vertical() -> Self {
        Self {
            orientation: NestedOrientation::Vertical,
            primary_fraction: DEFAULT_PRIMARY_FRACTION,
            trailing_count: 2,
            group_extent: DEFAULT_GROUP_EXTENT,
            band: DEFAULT_BAND_EXTENT,
            spacing: DEFAULT_SPACING,
            margins: Margins::ZERO,
        }
    }

    /// Horizontally flowing groups with the default shape.
    pub fn horizontal() -> Self {
        Self {
            orientation: NestedOrientation::Horizontal,
            ..Self::vertical()
        }
    }

    /// Items per group.
    #[inline]
    fn group_size(&self) -> usize {
        1 + self.trailing_count
    }
}

impl Default for NestedConfig {
    fn default() -> Self {
        Self::vertical()
    }
}

pub(crate) fn solve(
    cfg: &NestedConfig,
    item_count: usize,
    env: &LayoutEnvironment,
) -> BodyGeometry {
    match cfg.orientation {
        NestedOrientation::Vertical => solve_vertical(cfg, item_count, env),
        NestedOrientation::Horizontal => solve_horizontal(cfg, item_count),
    }
}

fn solve_vertical(
    cfg: &NestedConfig,
    item_count: usize,
    env: &LayoutEnvironment,
) -> BodyGeometry {
    let available = env.container.width - cfg.margins.horizontal();
    let (primary_width, trailing_width) = split(cfg, available);
    let slots = cfg.trailing_count.max(1);
    let slot_height =
        ((cfg.group_extent - cfg.spacing * (slots - 1) as f32) / slots as f32).max(0.0);

    let mut frames = Vec::with_capacity(item_count);
    for index in 0..item_count {
        let group = index / cfg.group_size();
        let slot = index % cfg.group_size();
        let group_top = cfg.margins.top + group as f32 * (cfg.group_extent + cfg.spacing);
        if slot == 0 {
            frames.push(Rect::new(
                cfg.margins.left,
                group_top,
                primary_width,
                cfg.group_extent,
            ));
        } else {
            let row = (slot - 1) as f32;
            frames.push(Rect::new(
                cfg.margins.left + primary_width + cfg.spacing,
                group_top + row * (slot_height + cfg.spacing),
                trailing_width,
                slot_height,
            ));
        }
    }

    let groups = item_count.div_ceil(cfg.group_size());
    let height = cfg.margins.vertical()
        + groups as f32 * cfg.group_extent
        + groups.saturating_sub(1) as f32 * cfg.spacing;
    BodyGeometry::fixed(frames, Size::new(env.container.width, height))
}

fn solve_horizontal(cfg: &NestedConfig, item_count: usize) -> BodyGeometry {
    let available = cfg.band - cfg.margins.vertical();
    let (primary_height, trailing_height) = split(cfg, available);
    let slots = cfg.trailing_count.max(1);
    let slot_width =
        ((cfg.group_extent - cfg.spacing * (slots - 1) as f32) / slots as f32).max(0.0);

    let mut frames = Vec::with_capacity(item_count);
    for index in 0..item_count {
        let group = index / cfg.group_size();
        let slot = index % cfg.group_size();
        let group_left = cfg.margins.left + group as f32 * (cfg.group_extent + cfg.spacing);
        if slot == 0 {
            frames.push(Rect::new(
                group_left,
                cfg.margins.top,
                cfg.group_extent,
                primary_height,
            ));
        } else {
            let column = (slot - 1) as f32;
            frames.push(Rect::new(
                group_left + column * (slot_width + cfg.spacing),
                cfg.margins.top + primary_height + cfg.spacing,
                slot_width,
                trailing_height,
            ));
        }
    }

    let groups = item_count.div_ceil(cfg.group_size());
    let width = cfg.margins.horizontal()
        + groups as f32 * cfg.group_extent
        + groups.saturating_sub(1) as f32 * cfg.spacing;
    BodyGeometry {
        frames,
        size: Size::new(width, cfg.band),
        scroll: OrthogonalScroll::Continuous,
        page_count: 0,
    }
}

/// Split the cross-axis extent between the primary slot and the trailing
/// column. With no trailing items the primary takes everything.
fn split(cfg: &NestedConfig, available: f32) -> (f32, f32) {
    if cfg.trailing_count == 0 {
        return (available.max(0.0), 0.0);
    }
    let primary = ((available - cfg.spacing) * cfg.primary_fraction).max(0.0);
    let trailing = (available - cfg.spacing - primary).max(0.0);
    (primary, trailing)
}
