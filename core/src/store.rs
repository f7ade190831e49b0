//! The Shortcut Store: sole owner of the grid's [`ShortcutList`].
//!
//! All mutation funnels through the operations below. Each one computes the
//! full next list first and only then swaps it in, so callers never observe a
//! partially applied change. Invalid references are silent no-ops reported as
//! [`Outcome::Unchanged`].

use thiserror::Error;

use tabking_types::{Link, ShortcutId, ShortcutList, ShortcutListError};

use crate::ids::IdAllocator;
use crate::{merge, ops};

/// Whether an operation replaced the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    Changed,
    Unchanged,
}

impl Outcome {
    #[must_use]
    pub fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("shortcut id {0} is already in use")]
    DuplicateId(ShortcutId),
}

impl From<ShortcutListError> for StoreError {
    fn from(err: ShortcutListError) -> Self {
        match err {
            ShortcutListError::DuplicateId(id) => Self::DuplicateId(id),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShortcutStore {
    list: ShortcutList,
    ids: IdAllocator,
}

impl ShortcutStore {
    #[must_use]
    pub fn new(list: ShortcutList) -> Self {
        Self::with_ids(list, IdAllocator::default())
    }

    #[must_use]
    pub fn with_ids(list: ShortcutList, ids: IdAllocator) -> Self {
        Self { list, ids }
    }

    /// Read-only view of the current list.
    #[must_use]
    pub fn snapshot(&self) -> &ShortcutList {
        &self.list
    }

    /// Allocate an id for a link the caller is about to [`add`](Self::add).
    pub fn next_link_id(&mut self) -> ShortcutId {
        self.ids.link_id(&self.list)
    }

    pub fn add(&mut self, link: Link) -> Result<Outcome, StoreError> {
        let id = link.id().clone();
        let next = ops::add(&self.list, link)?;
        tracing::debug!(id = %id, "Added shortcut");
        Ok(self.commit(Some(next)))
    }

    pub fn remove(&mut self, id: &ShortcutId) -> Outcome {
        let next = ops::remove(&self.list, id);
        log_op("remove", id, next.is_some());
        self.commit(next)
    }

    pub fn edit(&mut self, id: &ShortcutId, title: &str, url: Option<&str>) -> Outcome {
        let next = ops::edit(&self.list, id, title, url);
        log_op("edit", id, next.is_some());
        self.commit(next)
    }

    pub fn reorder(&mut self, drag: &ShortcutId, target: &ShortcutId) -> Outcome {
        let next = ops::reorder(&self.list, drag, target);
        log_op("reorder", drag, next.is_some());
        self.commit(next)
    }

    pub fn merge(&mut self, drag: &ShortcutId, drop: &ShortcutId) -> Outcome {
        let next = merge::merge(&self.list, drag, drop, || self.ids.folder_id(&self.list));
        log_op("merge", drag, next.is_some());
        self.commit(next)
    }

    pub fn remove_from_folder(&mut self, folder: &ShortcutId, item: &ShortcutId) -> Outcome {
        let next = merge::remove_from_folder(&self.list, folder, item);
        log_op("remove_from_folder", item, next.is_some());
        self.commit(next)
    }

    pub fn move_to_root(&mut self, folder: &ShortcutId, item: &ShortcutId) -> Outcome {
        let next = merge::move_to_root(&self.list, folder, item);
        log_op("move_to_root", item, next.is_some());
        self.commit(next)
    }

    /// Swap in a whole list (import, reset to defaults).
    pub fn replace(&mut self, list: ShortcutList) -> Outcome {
        if list == self.list {
            return Outcome::Unchanged;
        }
        self.commit(Some(list))
    }

    fn commit(&mut self, next: Option<ShortcutList>) -> Outcome {
        match next {
            Some(list) => {
                self.list = list;
                Outcome::Changed
            }
            None => Outcome::Unchanged,
        }
    }
}

fn log_op(op: &'static str, id: &ShortcutId, changed: bool) {
    if changed {
        tracing::debug!(op, id = %id, "Shortcut list changed");
    } else {
        tracing::debug!(op, id = %id, "Shortcut operation was a no-op");
    }
}
