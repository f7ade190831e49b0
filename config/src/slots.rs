//! The three persisted slots and the write-through adapter over them.
//!
//! Slot keys predate the current name of the app and are kept so existing
//! data keeps loading.

use anyhow::Context;
use serde::de::DeserializeOwned;

use tabking_core::{Persistence, SessionSnapshot, default_shortcuts, ops};
use tabking_types::{AppSettings, Note, ShortcutList};

use crate::kv::KeyValueStore;

pub const SHORTCUTS_KEY: &str = "aerotab_shortcuts";
pub const SETTINGS_KEY: &str = "aerotab_settings";
pub const NOTES_KEY: &str = "tabking_notes";

/// Read all slots. Each one falls back to its default on its own when it is
/// missing, unreadable or malformed; loading never fails.
pub fn load_session(store: &impl KeyValueStore) -> SessionSnapshot {
    let shortcuts = load_slot::<ShortcutList>(store, SHORTCUTS_KEY)
        .map(ops::pruned)
        .unwrap_or_else(default_shortcuts);
    let settings = load_slot::<AppSettings>(store, SETTINGS_KEY)
        .map(AppSettings::clamped)
        .unwrap_or_default();
    let notes = load_slot::<Vec<Note>>(store, NOTES_KEY).unwrap_or_default();

    SessionSnapshot {
        settings,
        shortcuts,
        notes,
    }
}

fn load_slot<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "Slot absent, using defaults");
            return None;
        }
        Err(e) => {
            tracing::warn!(key, "Slot unreadable, using defaults: {e:#}");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, "Slot malformed, using defaults: {e}");
            None
        }
    }
}

/// Write-through [`Persistence`] over any [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct StoragePersistence<S> {
    store: S,
}

impl<S: KeyValueStore> StoragePersistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn write<T: serde::Serialize + ?Sized>(&mut self, key: &str, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string(value).with_context(|| format!("failed to encode {key}"))?;
        self.store.set(key, &json)
    }
}

impl<S: KeyValueStore> Persistence for StoragePersistence<S> {
    fn save_shortcuts(&mut self, shortcuts: &ShortcutList) -> anyhow::Result<()> {
        self.write(SHORTCUTS_KEY, shortcuts)
    }

    fn save_settings(&mut self, settings: &AppSettings) -> anyhow::Result<()> {
        self.write(SETTINGS_KEY, settings)
    }

    fn save_notes(&mut self, notes: &[Note]) -> anyhow::Result<()> {
        self.write(NOTES_KEY, notes)
    }
}
