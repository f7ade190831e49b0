//! Core domain types for Tab King.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application: the shortcut
//! grid model, settings, notes, and the drag session state machine.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod drag;
mod ids;
mod link_input;
mod note;
mod settings;
mod shortcut;

pub use drag::{
    DEFAULT_DWELL_THRESHOLD, DragIntent, DragSessionId, DragSource, DragState, DragTracker,
    DropAction, DwellTicket,
};
pub use ids::{ShortcutId, ShortcutIdError};
pub use link_input::{normalize_url, title_from_url};
pub use note::Note;
pub use settings::{AppSettings, GridConfig, SearchEngine, SuggestServer};
pub use shortcut::{
    EntryError, EntryKind, Folder, Link, Location, ShortcutEntry, ShortcutList, ShortcutListError,
};
