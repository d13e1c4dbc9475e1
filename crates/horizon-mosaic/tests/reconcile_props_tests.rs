//! Integration tests for reconciliation under randomized edits.
//!
//! Each test drives `diff`/`apply` with seeded random content models, so a
//! failure reproduces from the seed printed in the assertion message.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};

use horizon_mosaic::prelude::*;

/// An item is (identity, fingerprint); a section is a numbered item list.
type SectionModel = (u64, Vec<(u64, u64)>);

#[derive(Default)]
struct Ids {
    section: u64,
    item: u64,
}

impl Ids {
    fn next_section(&mut self) -> u64 {
        self.section += 1;
        self.section
    }

    fn next_item(&mut self) -> u64 {
        self.item += 1;
        self.item
    }
}

fn build(model: &[SectionModel]) -> Snapshot {
    let sections: Vec<Section> = model
        .iter()
        .map(|(section, items)| {
            let items = items
                .iter()
                .map(|&(id, fingerprint)| {
                    Item::with_fingerprint(ItemId(id), ItemKind::Task, id, fingerprint)
                })
                .collect();
            Section::new(
                format!("section-{section}"),
                ItemKind::Task,
                LayoutStrategy::plain_list(),
                items,
            )
            .expect("uniform kinds")
        })
        .collect();
    Snapshot::from_sections(&sections).expect("fresh identities are unique")
}

fn fresh_items(rng: &mut StdRng, ids: &mut Ids, count: usize) -> Vec<(u64, u64)> {
    (0..count).map(|_| (ids.next_item(), rng.next_u64())).collect()
}

fn seed_model(rng: &mut StdRng, ids: &mut Ids) -> Vec<SectionModel> {
    let sections = rng.gen_range(1..4);
    (0..sections)
        .map(|_| {
            let count = rng.gen_range(0..6);
            (ids.next_section(), fresh_items(rng, ids, count))
        })
        .collect()
}

/// Drop, reorder, refresh and grow items within one section.
fn mutate_items(rng: &mut StdRng, items: &mut Vec<(u64, u64)>, ids: &mut Ids) {
    items.retain(|_| rng.gen_bool(0.85));
    if rng.gen_bool(0.5) {
        items.shuffle(rng);
    }
    for item in items.iter_mut() {
        if rng.gen_bool(0.15) {
            item.1 = item.1.wrapping_add(1);
        }
    }
    let inserts = rng.gen_range(0..3);
    for _ in 0..inserts {
        let fingerprint = rng.next_u64();
        let at = rng.gen_range(0..=items.len());
        items.insert(at, (ids.next_item(), fingerprint));
    }
}

/// One random editing step: section-level churn plus per-section item churn.
fn evolve(rng: &mut StdRng, model: &[SectionModel], ids: &mut Ids) -> Vec<SectionModel> {
    let mut next = model.to_vec();

    if next.len() > 1 && rng.gen_bool(0.2) {
        let at = rng.gen_range(0..next.len());
        next.remove(at);
    }
    if rng.gen_bool(0.4) {
        next.shuffle(rng);
    }
    if rng.gen_bool(0.5) {
        let count = rng.gen_range(0..4);
        let section = (ids.next_section(), fresh_items(rng, ids, count));
        let at = rng.gen_range(0..=next.len());
        next.insert(at, section);
    }
    for (_, items) in &mut next {
        mutate_items(rng, items, ids);
    }
    next
}

#[test]
fn test_random_evolutions_round_trip() {
    for seed in 0..16 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ids = Ids::default();
        let mut model = seed_model(&mut rng, &mut ids);
        let mut prev = build(&model);

        for step in 0..6 {
            model = evolve(&mut rng, &model, &mut ids);
            let next = build(&model);
            let ops = diff(&prev, &next);
            let replayed = apply(&prev, &ops)
                .unwrap_or_else(|err| panic!("seed {seed} step {step}: {err}"));
            assert_eq!(replayed, next, "seed {seed} step {step}");
            prev = next;
        }
    }
}

#[test]
fn test_replayed_snapshot_has_nothing_left_to_diff() {
    for seed in 16..24 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ids = Ids::default();
        let model = seed_model(&mut rng, &mut ids);
        let prev = build(&model);
        let next = build(&evolve(&mut rng, &model, &mut ids));

        let replayed = apply(&prev, &diff(&prev, &next)).unwrap();
        assert!(diff(&replayed, &next).is_empty(), "seed {seed}");
    }
}

#[test]
fn test_single_section_survivors_only_move_or_reload() {
    for seed in 0..12 {
        let mut rng = StdRng::seed_from_u64(0xFEED + seed);
        let mut ids = Ids::default();
        let section = ids.next_section();
        let mut items = fresh_items(&mut rng, &mut ids, 8);
        let prev = build(&[(section, items.clone())]);

        mutate_items(&mut rng, &mut items, &mut ids);
        let next = build(&[(section, items.clone())]);

        let before: HashSet<u64> = prev.sections()[0].items.iter().map(|s| s.id.0).collect();
        let survivors: HashSet<u64> = items
            .iter()
            .map(|&(id, _)| id)
            .filter(|id| before.contains(id))
            .collect();

        for op in diff(&prev, &next) {
            match op {
                ChangeOp::InsertItem { item, .. } => {
                    assert!(!survivors.contains(&item.id.0), "seed {seed}: {item:?}");
                }
                ChangeOp::RemoveItem { item, .. } => {
                    assert!(!survivors.contains(&item.0), "seed {seed}: {item}");
                }
                ChangeOp::MoveItem { .. } | ChangeOp::ReloadItem { .. } => {}
                ChangeOp::InsertSection { .. } | ChangeOp::RemoveSection { .. } => {
                    panic!("seed {seed}: the only section never changed identity");
                }
            }
        }
    }
}

#[test]
fn test_pure_shuffle_needs_only_moves() {
    for seed in 0..12 {
        let mut rng = StdRng::seed_from_u64(0xD1CE + seed);
        let mut ids = Ids::default();
        let section = ids.next_section();
        let items = fresh_items(&mut rng, &mut ids, 7);
        let mut shuffled = items.clone();
        shuffled.shuffle(&mut rng);

        let prev = build(&[(section, items)]);
        let next = build(&[(section, shuffled)]);

        let ops = diff(&prev, &next);
        assert!(
            ops.iter().all(|op| matches!(op, ChangeOp::MoveItem { .. })),
            "seed {seed}: {ops:?}"
        );
        // Anchoring on the longest stable run never moves every item.
        assert!(ops.len() < 7, "seed {seed}: {ops:?}");
        assert_eq!(apply(&prev, &ops).unwrap(), next, "seed {seed}");
    }
}

#[test]
fn test_fingerprint_churn_reloads_in_place() {
    let mut rng = StdRng::seed_from_u64(0xCAFE);
    let mut ids = Ids::default();
    let section = ids.next_section();
    let items = fresh_items(&mut rng, &mut ids, 6);

    let mut refreshed = items.clone();
    refreshed[1].1 ^= 1;
    refreshed[4].1 ^= 1;

    let prev = build(&[(section, items)]);
    let next = build(&[(section, refreshed)]);

    let ops = diff(&prev, &next);
    assert_eq!(ops.len(), 2);
    assert!(matches!(
        ops[0],
        ChangeOp::ReloadItem { at: 1, .. }
    ));
    assert!(matches!(
        ops[1],
        ChangeOp::ReloadItem { at: 4, .. }
    ));
    assert_eq!(apply(&prev, &ops).unwrap(), next);
}
