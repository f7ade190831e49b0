//! Shortcut grid state for Tab King.
//!
//! [`ShortcutStore`] owns the root list and is the only thing that mutates
//! it. [`ops`] and [`merge`] hold the pure list transformations the store
//! commits. [`Session`] wraps the store together with settings, notes, the
//! drag tracker and a [`Persistence`] sink.

mod defaults;
mod ids;
pub mod merge;
pub mod ops;
mod persistence;
mod session;
mod store;

pub use defaults::default_shortcuts;
pub use ids::IdAllocator;
pub use persistence::{Ephemeral, Persistence};
pub use session::{Session, SessionSnapshot};
pub use store::{Outcome, ShortcutStore, StoreError};
