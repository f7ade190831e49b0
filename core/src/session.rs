//! Application session: the one owner of grid state.
//!
//! A [`Session`] holds the [`ShortcutStore`], settings, notes and the drag
//! tracker. Every mutation entry point commits through the store and writes
//! the changed slot through the [`Persistence`] sink. A failed write is
//! logged and surfaced once per session via [`Session::take_persist_warning`];
//! the in-memory state stays authoritative either way.

use std::time::{Duration, Instant};

use tabking_types::{
    AppSettings, DragSessionId, DragSource, DragTracker, DropAction, DwellTicket, GridConfig,
    Link, Note, ShortcutId, ShortcutList,
};

use crate::ids::IdAllocator;
use crate::persistence::Persistence;
use crate::store::{Outcome, ShortcutStore, StoreError};

const PERSIST_WARNING: &str = "Saving failed; changes may not persist.";

/// Whole-session state swapped in by import and captured by export.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionSnapshot {
    pub settings: AppSettings,
    pub shortcuts: ShortcutList,
    pub notes: Vec<Note>,
}

#[derive(Debug)]
pub struct Session<P: Persistence> {
    store: ShortcutStore,
    settings: AppSettings,
    notes: Vec<Note>,
    drag: DragTracker,
    persistence: P,
    persist_warning_shown: bool,
    pending_warning: Option<&'static str>,
}

impl<P: Persistence> Session<P> {
    #[must_use]
    pub fn new(state: SessionSnapshot, persistence: P) -> Self {
        Self::with_parts(state, persistence, IdAllocator::default(), DragTracker::default())
    }

    /// Full control over id allocation and the dwell threshold.
    #[must_use]
    pub fn with_parts(
        state: SessionSnapshot,
        persistence: P,
        ids: IdAllocator,
        drag: DragTracker,
    ) -> Self {
        Self {
            store: ShortcutStore::with_ids(state.shortcuts, ids),
            settings: state.settings.clamped(),
            notes: state.notes,
            drag,
            persistence,
            persist_warning_shown: false,
            pending_warning: None,
        }
    }

    #[must_use]
    pub fn with_dwell_threshold(state: SessionSnapshot, persistence: P, dwell: Duration) -> Self {
        Self::with_parts(state, persistence, IdAllocator::default(), DragTracker::new(dwell))
    }

    #[must_use]
    pub fn shortcuts(&self) -> &ShortcutList {
        self.store.snapshot()
    }

    #[must_use]
    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    #[must_use]
    pub fn grid_config(&self) -> GridConfig {
        self.settings.grid_config
    }

    #[must_use]
    pub fn open_in_new_tab(&self) -> bool {
        self.settings.open_in_new_tab
    }

    #[must_use]
    pub fn drag(&self) -> &DragTracker {
        &self.drag
    }

    #[must_use]
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut P {
        &mut self.persistence
    }

    /// Copy of everything an export needs.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            settings: self.settings.clone(),
            shortcuts: self.store.snapshot().clone(),
            notes: self.notes.clone(),
        }
    }

    /// Returns the save-failure warning the first time one occurs.
    pub fn take_persist_warning(&mut self) -> Option<&'static str> {
        self.pending_warning.take()
    }

    // Shortcut mutations

    pub fn on_add_shortcut(&mut self, link: Link) -> Result<Outcome, StoreError> {
        let outcome = self.store.add(link)?;
        Ok(self.persist_shortcuts(outcome))
    }

    /// Add from the add-shortcut form. Blank URL input is ignored.
    pub fn add_from_input(&mut self, name: &str, raw_url: &str) -> Result<Outcome, StoreError> {
        let id = self.store.next_link_id();
        match Link::from_input(id, name, raw_url) {
            Some(link) => self.on_add_shortcut(link),
            None => Ok(Outcome::Unchanged),
        }
    }

    pub fn on_remove_shortcut(&mut self, id: &ShortcutId) -> Outcome {
        let outcome = self.store.remove(id);
        self.persist_shortcuts(outcome)
    }

    pub fn on_edit_shortcut(&mut self, id: &ShortcutId, title: &str, url: Option<&str>) -> Outcome {
        let outcome = self.store.edit(id, title, url);
        self.persist_shortcuts(outcome)
    }

    pub fn on_reorder_shortcuts(&mut self, drag: &ShortcutId, target: &ShortcutId) -> Outcome {
        let outcome = self.store.reorder(drag, target);
        self.persist_shortcuts(outcome)
    }

    pub fn on_merge_shortcuts(&mut self, drag: &ShortcutId, drop: &ShortcutId) -> Outcome {
        let outcome = self.store.merge(drag, drop);
        self.persist_shortcuts(outcome)
    }

    pub fn on_remove_from_folder(&mut self, folder: &ShortcutId, item: &ShortcutId) -> Outcome {
        let outcome = self.store.remove_from_folder(folder, item);
        self.persist_shortcuts(outcome)
    }

    pub fn on_move_to_root(&mut self, folder: &ShortcutId, item: &ShortcutId) -> Outcome {
        let outcome = self.store.move_to_root(folder, item);
        self.persist_shortcuts(outcome)
    }

    // Settings and notes

    /// Apply `update` to a copy of the settings; the result is clamped to the
    /// UI ranges and persisted if it differs.
    pub fn update_settings(&mut self, update: impl FnOnce(&mut AppSettings)) -> Outcome {
        let mut next = self.settings.clone();
        update(&mut next);
        let next = next.clamped();
        if next == self.settings {
            return Outcome::Unchanged;
        }
        self.settings = next;
        let result = self.persistence.save_settings(&self.settings);
        self.note_persist_result("settings", result);
        Outcome::Changed
    }

    pub fn replace_notes(&mut self, notes: Vec<Note>) -> Outcome {
        if notes == self.notes {
            return Outcome::Unchanged;
        }
        self.notes = notes;
        let result = self.persistence.save_notes(&self.notes);
        self.note_persist_result("notes", result);
        Outcome::Changed
    }

    /// Atomically swap in a validated import. All three slots are written.
    pub fn restore(&mut self, state: SessionSnapshot) {
        self.drag.cancel();
        self.settings = state.settings.clamped();
        self.notes = state.notes;
        let replaced = self.store.replace(state.shortcuts);
        tracing::info!(
            shortcuts = self.store.snapshot().len(),
            shortcuts_changed = replaced.is_changed(),
            notes = self.notes.len(),
            "Session state restored"
        );

        // Every slot is rewritten, even when its content did not change.
        let result = self.persistence.save_settings(&self.settings);
        self.note_persist_result("settings", result);
        let result = self.persistence.save_shortcuts(self.store.snapshot());
        self.note_persist_result("shortcuts", result);
        let result = self.persistence.save_notes(&self.notes);
        self.note_persist_result("notes", result);
    }

    // Drag gestures

    pub fn on_drag_start(&mut self, source: DragSource) -> DragSessionId {
        let session = self.drag.begin(source);
        tracing::trace!(session = %session, "Drag started");
        session
    }

    /// Pointer entered a tile. Schedule a callback for the returned ticket's
    /// `due` instant and hand it back to [`Self::on_dwell_elapsed`].
    pub fn on_drag_enter(&mut self, target: &ShortcutId, now: Instant) -> Option<DwellTicket> {
        self.drag.enter(target, now)
    }

    pub fn on_dwell_elapsed(&mut self, ticket: &DwellTicket) -> bool {
        self.drag.dwell_elapsed(ticket)
    }

    /// Frame-driven alternative to dwell callbacks.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        self.drag.poll(now)
    }

    pub fn on_drag_leave_surface(&mut self) {
        self.drag.leave_surface();
    }

    pub fn on_drag_cancel(&mut self) {
        self.drag.cancel();
    }

    /// Drop on a tile. Resolves the gesture and applies it to the store.
    pub fn on_drop(&mut self, target: &ShortcutId, now: Instant) -> Outcome {
        let action = self.drag.drop_on(target, now);
        self.apply_drop(action)
    }

    /// Drop on the backdrop around an open folder.
    pub fn on_backdrop_drop(&mut self) -> Outcome {
        let action = self.drag.drop_on_backdrop();
        self.apply_drop(action)
    }

    fn apply_drop(&mut self, action: DropAction) -> Outcome {
        match action {
            DropAction::Reorder { drag, target } => self.on_reorder_shortcuts(&drag, &target),
            DropAction::Merge { drag, drop } => self.on_merge_shortcuts(&drag, &drop),
            DropAction::MoveToRoot { folder, item } => self.on_move_to_root(&folder, &item),
            DropAction::Discard => {
                tracing::trace!("Drop discarded");
                Outcome::Unchanged
            }
        }
    }

    fn persist_shortcuts(&mut self, outcome: Outcome) -> Outcome {
        if outcome.is_changed() {
            let result = self.persistence.save_shortcuts(self.store.snapshot());
            self.note_persist_result("shortcuts", result);
        }
        outcome
    }

    fn note_persist_result(&mut self, slot: &'static str, result: anyhow::Result<()>) {
        if let Err(e) = result {
            tracing::warn!(slot, "Persist failed: {e:#}");
            if !self.persist_warning_shown {
                self.pending_warning = Some(PERSIST_WARNING);
                self.persist_warning_shown = true;
            }
        }
    }
}
