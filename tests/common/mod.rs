//! Shared test utilities and fixtures
//!
//! Builders for shortcut lists, sessions over in-memory slots, and a small
//! deterministic generator for operation sequences.

#![allow(dead_code)]

use tabking_config::{MemoryStore, StoragePersistence};
use tabking_core::{IdAllocator, Session, SessionSnapshot};
use tabking_types::{DragTracker, Folder, Link, ShortcutEntry, ShortcutId, ShortcutList};

pub type MemorySession = Session<StoragePersistence<MemoryStore>>;

pub fn id(value: &str) -> ShortcutId {
    ShortcutId::new(value).expect("non-blank id")
}

pub fn link(value: &str) -> Link {
    Link::new(id(value), value.to_uppercase(), format!("https://{value}.example"))
}

pub fn folder(value: &str, children: &[&str]) -> Folder {
    Folder::new(id(value), "Folder", children.iter().copied().map(link).collect())
}

pub fn list(entries: Vec<ShortcutEntry>) -> ShortcutList {
    ShortcutList::new(entries).expect("unique ids")
}

/// Session over an empty in-memory store with predictable folder ids.
pub fn memory_session(entries: Vec<ShortcutEntry>) -> MemorySession {
    let state = SessionSnapshot {
        shortcuts: list(entries),
        ..SessionSnapshot::default()
    };
    Session::with_parts(
        state,
        StoragePersistence::new(MemoryStore::new()),
        IdAllocator::sequential(),
        DragTracker::default(),
    )
}

pub fn root_ids(list: &ShortcutList) -> Vec<String> {
    list.iter().map(|entry| entry.id().to_string()).collect()
}

pub fn child_ids(list: &ShortcutList, folder: &str) -> Vec<String> {
    list.get(&id(folder))
        .and_then(ShortcutEntry::as_folder)
        .map(|f| f.children().iter().map(|l| l.id().to_string()).collect())
        .unwrap_or_default()
}

/// Every id in the list, root and nested, in display order.
pub fn all_ids(list: &ShortcutList) -> Vec<String> {
    list.ids().map(ToString::to_string).collect()
}

/// Checks the structural invariants on the persisted JSON shape so the test
/// does not lean on the types that enforce them.
pub fn assert_invariants(list: &ShortcutList) {
    let ids = all_ids(list);
    let mut deduped = ids.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), ids.len(), "duplicate ids in {ids:?}");

    let json = serde_json::to_value(list).expect("list serializes");
    for entry in json.as_array().expect("array") {
        if entry["type"] == "folder" {
            let children = entry["children"].as_array().expect("folder children");
            assert!(!children.is_empty(), "empty folder {}", entry["id"]);
            for child in children {
                assert_ne!(child["type"], "folder", "nested folder in {}", entry["id"]);
            }
        }
    }
}

/// Linear congruential generator; fixed seeds keep sequences reproducible.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    pub fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }
}
