//! Write-through persistence hook for session state.

use tabking_types::{AppSettings, Note, ShortcutList};

/// Durable sink the [`Session`](crate::Session) writes to after every change.
///
/// Each call overwrites the whole slot. Failures are reported back to the
/// session, which logs them and keeps the in-memory state authoritative.
pub trait Persistence {
    fn save_shortcuts(&mut self, shortcuts: &ShortcutList) -> anyhow::Result<()>;
    fn save_settings(&mut self, settings: &AppSettings) -> anyhow::Result<()>;
    fn save_notes(&mut self, notes: &[Note]) -> anyhow::Result<()>;
}

/// Discards everything. For previews and tests that don't care about storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ephemeral;

impl Persistence for Ephemeral {
    fn save_shortcuts(&mut self, _shortcuts: &ShortcutList) -> anyhow::Result<()> {
        Ok(())
    }

    fn save_settings(&mut self, _settings: &AppSettings) -> anyhow::Result<()> {
        Ok(())
    }

    fn save_notes(&mut self, _notes: &[Note]) -> anyhow::Result<()> {
        Ok(())
    }
}
