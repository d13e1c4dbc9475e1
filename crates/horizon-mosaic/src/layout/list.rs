//! Plain-list layout: a single column of full-width rows.

use std::fmt;

use horizon_mosaic_core::{Rect, Size};

use crate::environment::LayoutEnvironment;
use crate::layout::{BodyGeometry, ExtentProvider, Margins};

/// Default row height.
const DEFAULT_ROW_EXTENT: f32 = 44.0;

/// How list rows get their height.
#[derive(Clone)]
pub enum RowExtent {
    /// Every row is this tall.
    Fixed(f32),
    /// Row heights come from the host, per item.
    PerItem(ExtentProvider),
}

impl fmt::Debug for RowExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(extent) => f.debug_tuple("Fixed").field(extent).finish(),
            Self::PerItem(_) => f.write_str("PerItem(..)"),
        }
    }
}

/// Configuration for [`LayoutStrategy::PlainList`](crate::LayoutStrategy::PlainList).
#[derive(Debug, Clone)]
pub struct ListConfig {
    /// Row height rule.
    pub row_extent: RowExtent,
    /// Spacing between rows.
    pub spacing: f32,
    /// Margins around the whole list.
    pub margins: Margins,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            row_extent: RowExtent::Fixed(DEFAULT_ROW_EXTENT),
            spacing: 0.0,
            margins: Margins::ZERO,
        }
    }
}

pub(crate) fn solve(
    cfg: &ListConfig,
    item_count: usize,
    env: &LayoutEnvironment,
) -> BodyGeometry {
    let width = (env.container.width - cfg.margins.horizontal()).max(0.0);

    let mut frames = Vec::with_capacity(item_count);
    let mut y = cfg.margins.top;
    for index in 0..item_count {
        let extent = match &cfg.row_extent {
            RowExtent::Fixed(extent) => *extent,
            RowExtent::PerItem(provider) => provider(index, width),
        }
        .max(0.0);
        frames.push(Rect::new(cfg.margins.left, y, width, extent));
        y += extent + cfg.spacing;
    }

    let content_bottom = if item_count > 0 { y - cfg.spacing } else { y };
    BodyGeometry::fixed(
        frames,
        Size::new(env.container.width, content_bottom + cfg.margins.bottom),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn env(width: f32) -> LayoutEnvironment {
        LayoutEnvironment::new(Size::new(width, 800.0))
    }

    #[test]
    fn test_default_rows_are_forty_four_points() {
        let body = solve(&ListConfig::default(), 3, &env(320.0));
        assert_eq!(body.frames[0], Rect::new(0.0, 0.0, 320.0, 44.0));
        assert_eq!(body.frames[1].top(), 44.0);
        assert_eq!(body.frames[2].top(), 88.0);
        assert_eq!(body.size.height, 132.0);
    }

    #[test]
    fn test_per_item_extents() {
        let cfg = ListConfig {
            row_extent: RowExtent::PerItem(Arc::new(|index, _| 10.0 * (index + 1) as f32)),
            ..ListConfig::default()
        };
        let body = solve(&cfg, 3, &env(320.0));
        assert_eq!(body.frames[0].height(), 10.0);
        assert_eq!(body.frames[1].height(), 20.0);
        assert_eq!(body.frames[2].height(), 30.0);
        assert_eq!(body.size.height, 60.0);
    }

    #[test]
    fn test_spacing_separates_rows_without_trailing_gap() {
        let cfg = ListConfig {
            spacing: 6.0,
            ..ListConfig::default()
        };
        let body = solve(&cfg, 2, &env(320.0));
        assert_eq!(body.frames[1].top(), 50.0);
        assert_eq!(body.size.height, 94.0);
    }

    #[test]
    fn test_margins_inset_rows() {
        let cfg = ListConfig {
            margins: Margins::new(16.0, 8.0, 16.0, 8.0),
            ..ListConfig::default()
        };
        let body = solve(&cfg, 1, &env(320.0));
        assert_eq!(body.frames[0].left(), 16.0);
        assert_eq!(body.frames[0].top(), 8.0);
        assert_eq!(body.frames[0].width(), 288.0);
        assert_eq!(body.size.height, 60.0);
    }
}
