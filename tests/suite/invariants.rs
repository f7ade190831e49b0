//! Property-style checks over long pseudo-random operation sequences.

use std::collections::HashMap;

use tabking_core::{Outcome, default_shortcuts};
use tabking_types::{Link, ShortcutEntry, ShortcutList};

use crate::common::{
    Lcg, MemorySession, all_ids, assert_invariants, id, link, memory_session, root_ids,
};

const SEEDS: [u64; 6] = [1, 7, 42, 1337, 0xDEAD_BEEF, 9_001];
const STEPS: usize = 400;

/// Ids the generator may reference: everything live plus one that never exists.
fn candidate_ids(list: &ShortcutList) -> Vec<String> {
    let mut ids = all_ids(list);
    ids.push("ghost".to_string());
    ids
}

fn folder_pairs(list: &ShortcutList) -> Vec<(String, String)> {
    list.iter()
        .filter_map(ShortcutEntry::as_folder)
        .flat_map(|folder| {
            folder
                .children()
                .iter()
                .map(move |child| (folder.id().to_string(), child.id().to_string()))
        })
        .collect()
}

fn random_step(session: &mut MemorySession, rng: &mut Lcg, fresh: &mut u32) {
    let ids = candidate_ids(session.shortcuts());
    let a = id(rng.pick(&ids).as_str());
    let b = id(rng.pick(&ids).as_str());

    match rng.below(7) {
        0 => {
            *fresh += 1;
            let new = link(&format!("n{fresh}"));
            assert_eq!(session.on_add_shortcut(new), Ok(Outcome::Changed));
        }
        1 => {
            let _ = session.on_remove_shortcut(&a);
        }
        2 => {
            let _ = session.on_reorder_shortcuts(&a, &b);
        }
        3 | 4 => {
            let _ = session.on_merge_shortcuts(&a, &b);
        }
        5 | 6 => {
            let pairs = folder_pairs(session.shortcuts());
            let (folder, item) = if pairs.is_empty() {
                ("ghost".to_string(), "ghost".to_string())
            } else {
                rng.pick(&pairs).clone()
            };
            if rng.below(2) == 0 {
                let _ = session.on_remove_from_folder(&id(&folder), &id(&item));
            } else {
                let _ = session.on_move_to_root(&id(&folder), &id(&item));
            }
        }
        _ => unreachable!(),
    }
}

#[test]
fn random_sequences_preserve_structure() {
    for seed in SEEDS {
        let mut rng = Lcg::new(seed);
        let mut session = memory_session(default_shortcuts().into_entries());
        let mut fresh = 0;

        for _ in 0..STEPS {
            random_step(&mut session, &mut rng, &mut fresh);
            assert_invariants(session.shortcuts());
        }
    }
}

#[test]
fn merge_and_unfold_never_lose_or_invent_links() {
    for seed in SEEDS {
        let mut rng = Lcg::new(seed);
        let start = default_shortcuts();
        let mut session = memory_session(start.clone().into_entries());
        let links: Vec<String> = root_ids(&start);

        for _ in 0..STEPS {
            let ids = candidate_ids(session.shortcuts());
            let a = id(rng.pick(&ids).as_str());
            let b = id(rng.pick(&ids).as_str());
            let _ = if rng.below(3) == 0 {
                let pairs = folder_pairs(session.shortcuts());
                match pairs.get(rng.below(pairs.len().max(1))) {
                    Some((folder, item)) => session.on_move_to_root(&id(folder), &id(item)),
                    None => Outcome::Unchanged,
                }
            } else {
                session.on_merge_shortcuts(&a, &b)
            };

            let mut live: Vec<String> = session
                .shortcuts()
                .iter()
                .flat_map(|entry| match entry {
                    ShortcutEntry::Link(link) => vec![link.id().to_string()],
                    ShortcutEntry::Folder(folder) => folder
                        .children()
                        .iter()
                        .map(|l: &Link| l.id().to_string())
                        .collect(),
                })
                .collect();
            live.sort();
            let mut expected = links.clone();
            expected.sort();
            assert_eq!(live, expected, "seed {seed}");
        }
    }
}

#[test]
fn reorder_is_a_permutation_landing_on_target_index() {
    let mut rng = Lcg::new(2024);
    let mut session = memory_session(default_shortcuts().into_entries());

    for _ in 0..STEPS {
        let before = session.shortcuts().clone();
        let roots = root_ids(&before);
        let drag = rng.pick(&roots).clone();
        let target = rng.pick(&roots).clone();
        let target_index = roots.iter().position(|r| *r == target).unwrap();

        let outcome = session.on_reorder_shortcuts(&id(&drag), &id(&target));
        let after = root_ids(session.shortcuts());

        if drag == target {
            assert_eq!(outcome, Outcome::Unchanged);
            assert_eq!(session.shortcuts(), &before);
            continue;
        }
        assert_eq!(outcome, Outcome::Changed);
        assert_eq!(after[target_index], drag);

        let count = |ids: &[String]| {
            ids.iter().fold(HashMap::new(), |mut acc, id| {
                *acc.entry(id.clone()).or_insert(0) += 1;
                acc
            })
        };
        assert_eq!(count(&after), count(&roots));
    }
}

#[test]
fn unknown_ids_leave_list_deep_equal() {
    let mut session = memory_session(default_shortcuts().into_entries());
    let _ = session.on_merge_shortcuts(&id("1"), &id("2"));
    let before = session.shortcuts().clone();
    let ghost = id("ghost");

    assert_eq!(session.on_remove_shortcut(&ghost), Outcome::Unchanged);
    assert_eq!(session.on_edit_shortcut(&ghost, "T", Some("t.example")), Outcome::Unchanged);
    assert_eq!(session.on_reorder_shortcuts(&ghost, &id("3")), Outcome::Unchanged);
    assert_eq!(session.on_reorder_shortcuts(&id("3"), &ghost), Outcome::Unchanged);
    assert_eq!(session.on_merge_shortcuts(&ghost, &id("3")), Outcome::Unchanged);
    assert_eq!(session.on_merge_shortcuts(&id("3"), &ghost), Outcome::Unchanged);
    assert_eq!(session.shortcuts(), &before);
    assert!(session.persistence().store().slot("aerotab_shortcuts").is_some());
}

#[test]
fn nested_ids_cannot_be_addressed_at_root() {
    let mut session = memory_session(default_shortcuts().into_entries());
    assert_eq!(session.on_merge_shortcuts(&id("1"), &id("2")), Outcome::Changed);
    let before = session.shortcuts().clone();

    // "1" and "2" now live inside the new folder.
    assert_eq!(session.on_remove_shortcut(&id("1")), Outcome::Unchanged);
    assert_eq!(session.on_reorder_shortcuts(&id("2"), &id("3")), Outcome::Unchanged);
    assert_eq!(session.on_merge_shortcuts(&id("3"), &id("1")), Outcome::Unchanged);
    assert_eq!(session.shortcuts(), &before);
}
