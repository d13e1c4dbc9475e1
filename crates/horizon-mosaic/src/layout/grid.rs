//! Uniform grid layout.

use horizon_mosaic_core::{Rect, Size};

use crate::environment::{LayoutEnvironment, SizeClass};
use crate::layout::{BodyGeometry, Margins, DEFAULT_SPACING};

/// How a grid decides its column count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnRule {
    /// Always exactly this many columns.
    Fixed(usize),
    /// As many columns as fit at `min_width` or wider.
    Adaptive {
        /// Minimum cell width.
        min_width: f32,
    },
    /// One count per size class.
    PerClass {
        /// Columns in [`SizeClass::Compact`] containers.
        compact: usize,
        /// Columns in [`SizeClass::Regular`] containers.
        regular: usize,
    },
}

impl ColumnRule {
    /// Resolve the rule to a concrete column count for the given available
    /// width. Never returns zero.
    pub fn resolve(&self, available: f32, spacing: f32, size_class: SizeClass) -> usize {
        let columns = match *self {
            Self::Fixed(count) => count,
            Self::Adaptive { min_width } => {
                if min_width <= 0.0 {
                    1
                } else {
                    // n cells fit when n * min + (n - 1) * spacing <= available.
                    ((available + spacing) / (min_width + spacing)).floor() as usize
                }
            }
            Self::PerClass { compact, regular } => match size_class {
                SizeClass::Compact => compact,
                SizeClass::Regular => regular,
            },
        };
        columns.max(1)
    }
}

/// Configuration for [`LayoutStrategy::Grid`](crate::LayoutStrategy::Grid).
///
/// Cells are uniform: the resolved column count divides the available width
/// (minus margins and inter-cell spacing) evenly, and cell height follows
/// from `aspect_ratio`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Column count rule.
    pub columns: ColumnRule,
    /// Cell width / height. `1.0` means square cells.
    pub aspect_ratio: f32,
    /// Spacing between adjacent cells, both axes.
    pub spacing: f32,
    /// Margins around the whole grid.
    pub margins: Margins,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: ColumnRule::PerClass {
                compact: 3,
                regular: 5,
            },
            aspect_ratio: 1.0,
            spacing: DEFAULT_SPACING,
            margins: Margins::ZERO,
        }
    }
}

pub(crate) fn solve(
    cfg: &GridConfig,
    item_count: usize,
    env: &LayoutEnvironment,
) -> BodyGeometry {
    let available = env.container.width - cfg.margins.horizontal();
    let columns = cfg.columns.resolve(available, cfg.spacing, env.size_class);
    let spacing_total = cfg.spacing * (columns - 1) as f32;
    let cell_width = ((available - spacing_total) / columns as f32).max(0.0);
    let cell_height = if cfg.aspect_ratio > 0.0 {
        cell_width / cfg.aspect_ratio
    } else {
        cell_width
    };

    let mut frames = Vec::with_capacity(item_count);
    for index in 0..item_count {
        let row = index / columns;
        let column = index % columns;
        frames.push(Rect::new(
            cfg.margins.left + column as f32 * (cell_width + cfg.spacing),
            cfg.margins.top + row as f32 * (cell_height + cfg.spacing),
            cell_width,
            cell_height,
        ));
    }

    let rows = item_count.div_ceil(columns);
    let height = cfg.margins.vertical()
        + rows as f32 * cell_height
        + rows.saturating_sub(1) as f32 * cfg.spacing;
    let width = cfg.margins.horizontal() + columns as f32 * cell_width + spacing_total;

    BodyGeometry::fixed(frames, Size::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(width: f32) -> LayoutEnvironment {
        LayoutEnvironment::new(Size::new(width, 800.0))
    }

    #[test]
    fn test_per_class_columns_follow_size_class() {
        let cfg = GridConfig::default();

        let compact = solve(&cfg, 6, &env(320.0));
        assert_eq!(compact.frames[0].width(), (320.0 - 16.0) / 3.0);
        // Row-major: item 3 starts the second row.
        assert_eq!(compact.frames[3].left(), 0.0);
        assert!(compact.frames[3].top() > compact.frames[2].top());

        let regular = solve(&cfg, 6, &env(768.0));
        assert_eq!(regular.frames[0].width(), (768.0 - 32.0) / 5.0);
        assert_eq!(regular.frames[4].top(), 0.0);
        assert_eq!(regular.frames[5].left(), 0.0);
    }

    #[test]
    fn test_fixed_columns_ignore_size_class() {
        let cfg = GridConfig {
            columns: ColumnRule::Fixed(2),
            ..GridConfig::default()
        };
        let narrow = solve(&cfg, 4, &env(320.0));
        let wide = solve(&cfg, 4, &env(1024.0));
        assert_eq!(narrow.frames[2].left(), 0.0);
        assert_eq!(wide.frames[2].left(), 0.0);
        assert!(wide.frames[0].width() > narrow.frames[0].width());
    }

    #[test]
    fn test_adaptive_fits_as_many_min_width_cells_as_possible() {
        let cfg = GridConfig {
            columns: ColumnRule::Adaptive { min_width: 100.0 },
            spacing: 10.0,
            ..GridConfig::default()
        };
        // 3 * 100 + 2 * 10 = 320 exactly.
        let body = solve(&cfg, 3, &env(320.0));
        assert_eq!(body.frames.len(), 3);
        assert_eq!(body.frames[0].width(), 100.0);
        assert_eq!(body.frames[2].left(), 220.0);
    }

    #[test]
    fn test_aspect_ratio_sets_cell_height() {
        let cfg = GridConfig {
            columns: ColumnRule::Fixed(4),
            aspect_ratio: 2.0,
            spacing: 0.0,
            ..GridConfig::default()
        };
        let body = solve(&cfg, 4, &env(400.0));
        assert_eq!(body.frames[0].width(), 100.0);
        assert_eq!(body.frames[0].height(), 50.0);
        assert_eq!(body.size.height, 50.0);
    }

    #[test]
    fn test_margins_inset_frames_and_grow_size() {
        let cfg = GridConfig {
            columns: ColumnRule::Fixed(2),
            spacing: 0.0,
            margins: Margins::uniform(10.0),
            ..GridConfig::default()
        };
        let body = solve(&cfg, 2, &env(220.0));
        assert_eq!(body.frames[0].left(), 10.0);
        assert_eq!(body.frames[0].top(), 10.0);
        assert_eq!(body.frames[0].width(), 100.0);
        assert_eq!(body.size.height, 100.0 + 20.0);
    }

    #[test]
    fn test_partial_last_row_only_adds_needed_height() {
        let cfg = GridConfig {
            columns: ColumnRule::Fixed(3),
            spacing: 6.0,
            ..GridConfig::default()
        };
        // 7 items in 3 columns: 3 rows.
        let body = solve(&cfg, 7, &env(306.0));
        let cell = body.frames[0].height();
        assert_eq!(body.frames[6].left(), 0.0);
        assert_eq!(body.size.height, 3.0 * cell + 2.0 * 6.0);
    }

    #[test]
    fn test_column_count_never_zero() {
        assert_eq!(ColumnRule::Fixed(0).resolve(300.0, 8.0, SizeClass::Compact), 1);
        assert_eq!(
            ColumnRule::Adaptive { min_width: 500.0 }.resolve(300.0, 8.0, SizeClass::Compact),
            1
        );
    }
}
