//! Id allocation for entries created by the app (added links, merge folders).

use uuid::Uuid;

use tabking_types::{ShortcutId, ShortcutList};

/// Source of fresh shortcut ids.
///
/// Both strategies skip ids already present in the list they are asked
/// about, and neither hands out the same id twice, so ids are never reused
/// after deletion.
#[derive(Debug, Clone, Default)]
pub enum IdAllocator {
    /// `folder-<uuid>` / `link-<uuid>`.
    #[default]
    Random,
    /// `folder-1`, `link-2`, ... from a single counter. Deterministic, for
    /// tests and scripted sessions.
    Sequential { next: u64 },
}

impl IdAllocator {
    #[must_use]
    pub fn sequential() -> Self {
        Self::Sequential { next: 1 }
    }

    pub fn folder_id(&mut self, taken: &ShortcutList) -> ShortcutId {
        self.allocate("folder", taken)
    }

    pub fn link_id(&mut self, taken: &ShortcutList) -> ShortcutId {
        self.allocate("link", taken)
    }

    fn allocate(&mut self, prefix: &str, taken: &ShortcutList) -> ShortcutId {
        loop {
            let raw = match self {
                Self::Random => format!("{prefix}-{}", Uuid::new_v4().simple()),
                Self::Sequential { next } => {
                    let raw = format!("{prefix}-{next}");
                    *next += 1;
                    raw
                }
            };
            let Ok(id) = ShortcutId::new(raw) else {
                continue;
            };
            if !taken.contains(&id) {
                return id;
            }
        }
    }
}
