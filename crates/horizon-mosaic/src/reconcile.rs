//! Snapshot reconciliation: diffing and batch application.
//!
//! [`diff`] compares two [`Snapshot`]s and produces the change operations
//! that turn the first into the second. [`apply`] replays such a batch
//! against a snapshot and returns the result. The two are inverses by
//! construction: `apply(prev, &diff(prev, next))` reproduces `next`
//! exactly, which is also how the property tests pin the algorithm down.
//!
//! # Coordinate spaces
//!
//! A batch is interpreted as one atomic transition, so the two snapshots
//! give every index an unambiguous home: removal coordinates
//! ([`ChangeOp::RemoveSection`], [`ChangeOp::RemoveItem`], the `from` of
//! [`ChangeOp::MoveItem`]) point into the *previous* snapshot, insertion
//! coordinates ([`ChangeOp::InsertSection`], [`ChangeOp::InsertItem`],
//! [`ChangeOp::ReloadItem`], the `to` of a move) point into the *next*
//! one. Item operations address their section by id, never by index, so
//! section reordering cannot skew them.
//!
//! # Stability
//!
//! Surviving entries that keep their relative order are never touched.
//! The stable set is a longest increasing run of previous positions, so
//! the emitted move set is minimal: reordering `[1, 2, 3, 4]` into
//! `[4, 1, 2, 3]` moves only item 4. Sections have no move operation;
//! a displaced section is re-expressed as remove plus insert, items
//! riding along as inserts.

use std::collections::{HashMap, HashSet};

use horizon_mosaic_core::logging::span_names;
use horizon_mosaic_core::PerfSpan;

use crate::error::{CompositionError, Result};
use crate::section::{ItemId, SectionId};
use crate::snapshot::{ItemState, SectionState, Snapshot};

/// One step of a snapshot transition.
///
/// See the [module docs](self) for the coordinate-space contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOp {
    /// A section appears at `at` (next coordinates), empty; its items
    /// follow as [`ChangeOp::InsertItem`]s.
    InsertSection {
        /// Position in the next snapshot.
        at: usize,
        /// Identity of the inserted section.
        id: SectionId,
    },
    /// The section at `at` (previous coordinates) disappears with
    /// everything it still holds.
    RemoveSection {
        /// Position in the previous snapshot.
        at: usize,
        /// Identity of the removed section.
        id: SectionId,
    },
    /// `item` appears at `at` (next coordinates) in `section`.
    InsertItem {
        /// Section addressed by identity.
        section: SectionId,
        /// Position in the next snapshot.
        at: usize,
        /// Identity row, fingerprint included.
        item: ItemState,
    },
    /// The item at `at` (previous coordinates) leaves `section`.
    RemoveItem {
        /// Section addressed by identity.
        section: SectionId,
        /// Position in the previous snapshot.
        at: usize,
        /// Identity of the removed item.
        item: ItemId,
    },
    /// An item relocates within `section`, `from` in previous
    /// coordinates to `to` in next coordinates.
    MoveItem {
        /// Section addressed by identity.
        section: SectionId,
        /// Position in the previous snapshot.
        from: usize,
        /// Position in the next snapshot.
        to: usize,
        /// Identity of the moved item.
        item: ItemId,
    },
    /// The item at `at` (next coordinates) keeps its identity and place
    /// but its content fingerprint changed; hosts re-render it.
    ReloadItem {
        /// Section addressed by identity.
        section: SectionId,
        /// Position in the next snapshot.
        at: usize,
        /// The refreshed identity row.
        item: ItemState,
    },
}

impl ChangeOp {
    /// The section this operation touches.
    pub fn section_id(&self) -> &SectionId {
        match self {
            Self::InsertSection { id, .. } | Self::RemoveSection { id, .. } => id,
            Self::InsertItem { section, .. }
            | Self::RemoveItem { section, .. }
            | Self::MoveItem { section, .. }
            | Self::ReloadItem { section, .. } => section,
        }
    }
}

/// Diff two snapshots into the operations that turn `previous` into `next`.
///
/// Identity drives everything: entries present in both snapshots survive,
/// entries whose fingerprint changed reload, and only order-breaking
/// survivors move. Two identical snapshots diff to an empty batch.
pub fn diff(previous: &Snapshot, next: &Snapshot) -> Vec<ChangeOp> {
    let _span = PerfSpan::new(span_names::RECONCILE);

    let prev_positions: HashMap<SectionId, usize> = previous
        .sections()
        .iter()
        .enumerate()
        .map(|(index, section)| (section.id.clone(), index))
        .collect();

    // Sections present in both snapshots, walked in next order. The
    // longest increasing run of their previous positions is the stable
    // set; every other section is re-expressed as remove plus insert.
    let common: Vec<(usize, usize)> = next
        .sections()
        .iter()
        .enumerate()
        .filter_map(|(next_pos, section)| {
            prev_positions
                .get(&section.id)
                .map(|&prev_pos| (next_pos, prev_pos))
        })
        .collect();
    let prev_order: Vec<usize> = common.iter().map(|&(_, prev_pos)| prev_pos).collect();
    let stable: HashSet<SectionId> = longest_increasing_run(&prev_order)
        .into_iter()
        .map(|k| next.sections()[common[k].0].id.clone())
        .collect();

    let mut item_removals = Vec::new();
    let mut placements = Vec::new();
    let mut reloads = Vec::new();
    let mut section_insertions = Vec::new();

    // Previous coordinates, descending: sections that vanish or land
    // somewhere order-breaking.
    let section_removals: Vec<ChangeOp> = previous
        .sections()
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, section)| !stable.contains(&section.id))
        .map(|(at, section)| ChangeOp::RemoveSection {
            at,
            id: section.id.clone(),
        })
        .collect();

    // Next coordinates, ascending: insertions carry their items, stable
    // sections get an item-level diff.
    for (next_pos, section) in next.sections().iter().enumerate() {
        if stable.contains(&section.id) {
            let prev_pos = prev_positions[&section.id];
            let item_ops = diff_items(
                &section.id,
                &previous.sections()[prev_pos].items,
                &section.items,
            );
            item_removals.extend(item_ops.removals);
            placements.extend(item_ops.placements);
            reloads.extend(item_ops.reloads);
        } else {
            section_insertions.push(ChangeOp::InsertSection {
                at: next_pos,
                id: section.id.clone(),
            });
            for (at, item) in section.items.iter().enumerate() {
                section_insertions.push(ChangeOp::InsertItem {
                    section: section.id.clone(),
                    at,
                    item: *item,
                });
            }
        }
    }

    let mut ops = item_removals;
    ops.extend(section_removals);
    ops.extend(section_insertions);
    ops.extend(placements);
    ops.extend(reloads);

    tracing::debug!(
        target: "horizon_mosaic::reconcile",
        previous_sections = previous.section_count(),
        next_sections = next.section_count(),
        ops = ops.len(),
        "diffed snapshots"
    );

    ops
}

struct ItemOps {
    /// Removals, descending by previous position.
    removals: Vec<ChangeOp>,
    /// Inserts and moves, ascending by next position.
    placements: Vec<ChangeOp>,
    /// Reloads, ascending by next position.
    reloads: Vec<ChangeOp>,
}

fn diff_items(section: &SectionId, previous: &[ItemState], next: &[ItemState]) -> ItemOps {
    let prev_positions: HashMap<ItemId, usize> = previous
        .iter()
        .enumerate()
        .map(|(index, item)| (item.id, index))
        .collect();
    let next_ids: HashSet<ItemId> = next.iter().map(|item| item.id).collect();

    let removals = previous
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, item)| !next_ids.contains(&item.id))
        .map(|(at, item)| ChangeOp::RemoveItem {
            section: section.clone(),
            at,
            item: item.id,
        })
        .collect();

    // Survivors in next order; the longest increasing run of previous
    // positions stays put, the rest move.
    let common: Vec<(usize, usize)> = next
        .iter()
        .enumerate()
        .filter_map(|(next_pos, item)| {
            prev_positions
                .get(&item.id)
                .map(|&prev_pos| (next_pos, prev_pos))
        })
        .collect();
    let prev_order: Vec<usize> = common.iter().map(|&(_, prev_pos)| prev_pos).collect();
    let stable: HashSet<usize> = longest_increasing_run(&prev_order)
        .into_iter()
        .map(|k| common[k].0)
        .collect();

    let mut placements = Vec::new();
    let mut reloads = Vec::new();
    for (next_pos, item) in next.iter().enumerate() {
        match prev_positions.get(&item.id) {
            None => placements.push(ChangeOp::InsertItem {
                section: section.clone(),
                at: next_pos,
                item: *item,
            }),
            Some(&prev_pos) => {
                if !stable.contains(&next_pos) {
                    placements.push(ChangeOp::MoveItem {
                        section: section.clone(),
                        from: prev_pos,
                        to: next_pos,
                        item: item.id,
                    });
                }
                if previous[prev_pos].fingerprint != item.fingerprint {
                    reloads.push(ChangeOp::ReloadItem {
                        section: section.clone(),
                        at: next_pos,
                        item: *item,
                    });
                }
            }
        }
    }

    ItemOps {
        removals,
        placements,
        reloads,
    }
}

enum Placement {
    Insert(ItemState),
    MoveTarget(ItemId),
}

/// Replay a batch of operations against `previous`.
///
/// Application is phased, not sequential: sources come out first (item
/// removals and move sources by previous index, highest first, then
/// section removals the same way), then sections are inserted, then items
/// and move targets land in ascending next positions, then reloads
/// overwrite fingerprints in place. Replaying a batch produced by [`diff`]
/// therefore reconstructs the next snapshot exactly.
///
/// Batches are validated structurally as they apply: an operation
/// addressing a section the working snapshot does not contain fails with
/// [`CompositionError::UnknownSection`], and indices outside the working
/// bounds fail with [`CompositionError::SectionOutOfRange`] or
/// [`CompositionError::ItemOutOfRange`].
pub fn apply(previous: &Snapshot, ops: &[ChangeOp]) -> Result<Snapshot> {
    let _span = PerfSpan::new(span_names::RECONCILE);

    let mut sections: Vec<SectionState> = previous.sections().to_vec();

    let mut extractions: HashMap<SectionId, Vec<(usize, Option<ItemId>)>> = HashMap::new();
    let mut section_removals: Vec<usize> = Vec::new();
    let mut section_inserts: Vec<(usize, SectionId)> = Vec::new();
    let mut placements: Vec<(SectionId, usize, Placement)> = Vec::new();
    let mut reloads: Vec<(SectionId, usize, ItemState)> = Vec::new();

    for op in ops {
        match op {
            ChangeOp::RemoveItem { section, at, .. } => {
                extractions.entry(section.clone()).or_default().push((*at, None));
            }
            ChangeOp::MoveItem {
                section,
                from,
                to,
                item,
            } => {
                extractions
                    .entry(section.clone())
                    .or_default()
                    .push((*from, Some(*item)));
                placements.push((section.clone(), *to, Placement::MoveTarget(*item)));
            }
            ChangeOp::RemoveSection { at, .. } => section_removals.push(*at),
            ChangeOp::InsertSection { at, id } => section_inserts.push((*at, id.clone())),
            ChangeOp::InsertItem { section, at, item } => {
                placements.push((section.clone(), *at, Placement::Insert(*item)));
            }
            ChangeOp::ReloadItem { section, at, item } => {
                reloads.push((section.clone(), *at, *item));
            }
        }
    }

    // Item removals and move sources, per section, highest index first so
    // the lower ones keep their meaning.
    let mut stash: HashMap<(SectionId, ItemId), ItemState> = HashMap::new();
    for (section_id, mut indices) in extractions {
        let section = find_section_mut(&mut sections, &section_id)?;
        indices.sort_by(|a, b| b.0.cmp(&a.0));
        for (at, keep) in indices {
            if at >= section.items.len() {
                return Err(CompositionError::ItemOutOfRange {
                    section: section_id.clone(),
                    index: at,
                    count: section.items.len(),
                });
            }
            let item = section.items.remove(at);
            if let Some(id) = keep {
                stash.insert((section_id.clone(), id), item);
            }
        }
    }

    section_removals.sort_unstable_by(|a, b| b.cmp(a));
    for at in section_removals {
        if at >= sections.len() {
            return Err(CompositionError::SectionOutOfRange {
                index: at,
                count: sections.len(),
            });
        }
        sections.remove(at);
    }

    section_inserts.sort_by_key(|&(at, _)| at);
    for (at, id) in section_inserts {
        if at > sections.len() {
            return Err(CompositionError::SectionOutOfRange {
                index: at,
                count: sections.len(),
            });
        }
        sections.insert(
            at,
            SectionState {
                id,
                items: Vec::new(),
            },
        );
    }

    // Ascending targets reconstruct each section's next ordering; sorting
    // globally keeps every per-section subsequence ascending.
    placements.sort_by_key(|&(_, at, _)| at);
    for (section_id, at, placement) in placements {
        let item = match placement {
            Placement::Insert(item) => item,
            Placement::MoveTarget(id) => stash.remove(&(section_id.clone(), id)).ok_or(
                CompositionError::MoveWithoutSource {
                    section: section_id.clone(),
                    item: id,
                },
            )?,
        };
        let section = find_section_mut(&mut sections, &section_id)?;
        if at > section.items.len() {
            return Err(CompositionError::ItemOutOfRange {
                section: section_id,
                index: at,
                count: section.items.len(),
            });
        }
        section.items.insert(at, item);
    }

    for (section_id, at, item) in reloads {
        let section = find_section_mut(&mut sections, &section_id)?;
        if at >= section.items.len() {
            return Err(CompositionError::ItemOutOfRange {
                section: section_id,
                index: at,
                count: section.items.len(),
            });
        }
        section.items[at] = item;
    }

    Ok(Snapshot::from_states(sections))
}

fn find_section_mut<'a>(
    sections: &'a mut [SectionState],
    id: &SectionId,
) -> Result<&'a mut SectionState> {
    sections
        .iter_mut()
        .find(|section| &section.id == id)
        .ok_or_else(|| CompositionError::UnknownSection {
            section: id.clone(),
        })
}

/// Indices of one longest strictly increasing subsequence of `values`.
///
/// Patience piles with parent backtracking. Values are distinct positions,
/// so strict and non-strict agree; ties in length resolve toward the
/// later, smaller tail, which favors keeping low-position entries stable.
fn longest_increasing_run(values: &[usize]) -> Vec<usize> {
    let mut pile_tops: Vec<usize> = Vec::new();
    let mut parents: Vec<Option<usize>> = vec![None; values.len()];

    for (index, &value) in values.iter().enumerate() {
        let pile = pile_tops.partition_point(|&top| values[top] < value);
        if pile > 0 {
            parents[index] = Some(pile_tops[pile - 1]);
        }
        if pile == pile_tops.len() {
            pile_tops.push(index);
        } else {
            pile_tops[pile] = index;
        }
    }

    let mut run = Vec::with_capacity(pile_tops.len());
    let mut current = pile_tops.last().copied();
    while let Some(index) = current {
        run.push(index);
        current = parents[index];
    }
    run.reverse();
    run
}
