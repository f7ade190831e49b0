//! Merge and unfold: the folder-forming side of drag and drop.
//!
//! - [`merge`] drops one root link onto another root entry. Onto a link it
//!   synthesizes a folder `[target, dragged]` in the target's slot; onto a
//!   folder it appends the dragged link to the folder's children.
//! - [`remove_from_folder`] deletes a child and prunes folders left empty.
//! - [`move_to_root`] lifts a child out to the end of the root list. A folder
//!   left with a single child is unwrapped in place: the survivor takes the
//!   folder's slot while the moved item still lands at the end.
//!
//! Like the root operations, these are pure and return `None` for no-ops.
//! They work on a copy of the entries, so an aborted merge can never lose the
//! dragged item.

use tabking_types::{Folder, Link, ShortcutEntry, ShortcutId, ShortcutList};

use crate::ops::{prune_empty_folders, rebuild};

/// Merge root entry `drag` into root entry `drop`.
///
/// `new_folder_id` is only called when a folder has to be created.
/// Folders never move into other entries, so dragging a folder is always a
/// no-op (the result would nest folders).
pub fn merge(
    list: &ShortcutList,
    drag: &ShortcutId,
    drop: &ShortcutId,
    new_folder_id: impl FnOnce() -> ShortcutId,
) -> Option<ShortcutList> {
    if drag == drop {
        return None;
    }
    let target = list.get(drop)?;
    let dragged = match list.get(drag)? {
        ShortcutEntry::Link(link) => link.clone(),
        ShortcutEntry::Folder(_) => return None,
    };

    let mut entries: Vec<ShortcutEntry> = list
        .iter()
        .filter(|entry| entry.id() != drag)
        .cloned()
        .collect();
    let index = entries.iter().position(|entry| entry.id() == drop)?;

    entries[index] = match target {
        ShortcutEntry::Folder(folder) => {
            let mut children = folder.children().to_vec();
            children.push(dragged);
            ShortcutEntry::Folder(folder.clone().with_children(children))
        }
        ShortcutEntry::Link(target) => ShortcutEntry::Folder(Folder::new(
            new_folder_id(),
            Folder::DEFAULT_TITLE,
            vec![target.clone(), dragged],
        )),
    };
    rebuild(entries)
}

/// Delete `item` from `folder`, pruning folders left without children.
#[must_use]
pub fn remove_from_folder(
    list: &ShortcutList,
    folder: &ShortcutId,
    item: &ShortcutId,
) -> Option<ShortcutList> {
    let (index, found) = find_folder(list, folder)?;
    found.child(item)?;

    let mut entries = list.entries().to_vec();
    entries[index] = ShortcutEntry::Folder(found.clone().with_children(without(found, item)));
    rebuild(prune_empty_folders(entries))
}

/// Lift `item` out of `folder` and append it to the root list.
#[must_use]
pub fn move_to_root(
    list: &ShortcutList,
    folder: &ShortcutId,
    item: &ShortcutId,
) -> Option<ShortcutList> {
    let (index, found) = find_folder(list, folder)?;
    let moved = found.child(item)?.clone();
    let remaining = without(found, item);

    let mut entries = list.entries().to_vec();
    match remaining.as_slice() {
        [] => {
            entries.remove(index);
        }
        [survivor] => {
            entries[index] = ShortcutEntry::Link(survivor.clone());
        }
        _ => {
            entries[index] = ShortcutEntry::Folder(found.clone().with_children(remaining));
        }
    }
    entries.push(ShortcutEntry::Link(moved));
    rebuild(prune_empty_folders(entries))
}

fn find_folder<'a>(list: &'a ShortcutList, id: &ShortcutId) -> Option<(usize, &'a Folder)> {
    let index = list.position(id)?;
    list.entries()[index].as_folder().map(|folder| (index, folder))
}

fn without(folder: &Folder, item: &ShortcutId) -> Vec<Link> {
    folder
        .children()
        .iter()
        .filter(|child| child.id() != item)
        .cloned()
        .collect()
}
