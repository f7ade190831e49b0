//! Root-level list operations: add, remove, edit, reorder.
//!
//! Every function here is pure. It reads the current list and returns the
//! next one, or `None` when the call is a no-op (unknown id, nothing to change).

use tabking_types::{
    Folder, Link, ShortcutEntry, ShortcutId, ShortcutList, ShortcutListError, normalize_url,
};

/// Append a link to the end of the root list.
pub fn add(list: &ShortcutList, link: Link) -> Result<ShortcutList, ShortcutListError> {
    let mut entries = list.entries().to_vec();
    entries.push(link.into());
    ShortcutList::new(entries)
}

/// Remove a root entry, including a folder's children.
#[must_use]
pub fn remove(list: &ShortcutList, id: &ShortcutId) -> Option<ShortcutList> {
    let index = list.position(id)?;
    let mut entries = list.entries().to_vec();
    entries.remove(index);
    rebuild(entries)
}

/// Update a root entry in place. Folders only take the title; a blank or
/// absent `url` leaves a link's URL untouched.
#[must_use]
pub fn edit(
    list: &ShortcutList,
    id: &ShortcutId,
    title: &str,
    url: Option<&str>,
) -> Option<ShortcutList> {
    let index = list.position(id)?;
    let current = &list.entries()[index];
    let next = match current {
        ShortcutEntry::Link(link) => {
            let url = url
                .and_then(normalize_url)
                .unwrap_or_else(|| link.url().to_string());
            ShortcutEntry::Link(link.clone().with_title(title).with_url(url))
        }
        ShortcutEntry::Folder(folder) => ShortcutEntry::Folder(folder.clone().with_title(title)),
    };
    if &next == current {
        return None;
    }

    let mut entries = list.entries().to_vec();
    entries[index] = next;
    rebuild(entries)
}

/// Move `drag` into `target`'s slot, shifting the entries in between.
#[must_use]
pub fn reorder(list: &ShortcutList, drag: &ShortcutId, target: &ShortcutId) -> Option<ShortcutList> {
    if drag == target {
        return None;
    }
    let from = list.position(drag)?;
    let to = list.position(target)?;

    let mut entries = list.entries().to_vec();
    let moved = entries.remove(from);
    entries.insert(to, moved);
    rebuild(entries)
}

/// A loaded or imported list with its empty folders removed.
#[must_use]
pub fn pruned(list: ShortcutList) -> ShortcutList {
    let before = list.len();
    let entries = prune_empty_folders(list.into_entries());
    if entries.len() != before {
        tracing::debug!(removed = before - entries.len(), "Pruned empty folders");
    }
    rebuild(entries).unwrap_or_default()
}

/// Drop every folder left without children.
pub(crate) fn prune_empty_folders(mut entries: Vec<ShortcutEntry>) -> Vec<ShortcutEntry> {
    entries.retain(|entry| !entry.as_folder().is_some_and(Folder::is_empty));
    entries
}

/// Re-validate a list produced by an operation. Operations only move or drop
/// existing entries (or add freshly allocated ids), so a failure here is a bug.
pub(crate) fn rebuild(entries: Vec<ShortcutEntry>) -> Option<ShortcutList> {
    match ShortcutList::new(entries) {
        Ok(list) => Some(list),
        Err(e) => {
            tracing::error!("Shortcut operation produced an invalid list: {e}");
            None
        }
    }
}
