//! Export and import of whole-session backup documents.
//!
//! Import is all-or-nothing: the document is fully validated into a
//! [`SessionSnapshot`] before the session is touched, and any failure is
//! reported by category.

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use tabking_core::{Persistence, Session, SessionSnapshot, ops};
use tabking_types::{AppSettings, Note, ShortcutList};

/// Highest document version this build reads. Version 2 added `notes`.
pub const EXPORT_VERSION: u64 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("not a backup document: {0}")]
    Malformed(String),
    #[error("invalid settings: {0}")]
    Settings(String),
    #[error("invalid shortcuts: {0}")]
    Shortcuts(String),
    #[error("invalid notes: {0}")]
    Notes(String),
    #[error("backup version {found} is newer than the supported version {supported}")]
    VersionTooNew { found: u64, supported: u64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub settings: AppSettings,
    pub shortcuts: ShortcutList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<Note>>,
    pub exported_at: String,
    pub version: u64,
}

impl ExportDocument {
    #[must_use]
    pub fn new(state: &SessionSnapshot, now: DateTime<Utc>) -> Self {
        Self {
            settings: state.settings.clone(),
            shortcuts: state.shortcuts.clone(),
            notes: Some(state.notes.clone()),
            exported_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            version: EXPORT_VERSION,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("failed to encode backup document")
    }
}

/// `tabking-config-YYYY-MM-DD.json` for the UTC date of `now`.
#[must_use]
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("tabking-config-{}.json", now.format("%Y-%m-%d"))
}

/// Validate a backup document without applying it.
pub fn parse_import(text: &str) -> Result<SessionSnapshot, ImportError> {
    let doc: Value =
        serde_json::from_str(text).map_err(|e| ImportError::Malformed(e.to_string()))?;
    let Some(doc) = doc.as_object() else {
        return Err(ImportError::Malformed("top level must be an object".to_string()));
    };

    let version = match doc.get("version") {
        None => 1,
        Some(raw) => raw.as_u64().filter(|v| *v >= 1).ok_or_else(|| {
            ImportError::Malformed("version must be a positive integer".to_string())
        })?,
    };
    if version > EXPORT_VERSION {
        return Err(ImportError::VersionTooNew {
            found: version,
            supported: EXPORT_VERSION,
        });
    }

    let settings = parse_settings(doc.get("settings")).map_err(ImportError::Settings)?;
    let shortcuts = parse_shortcuts(doc.get("shortcuts")).map_err(ImportError::Shortcuts)?;
    let notes = if version >= 2 {
        parse_notes(doc.get("notes")).map_err(ImportError::Notes)?
    } else {
        Vec::new()
    };

    Ok(SessionSnapshot {
        settings,
        shortcuts,
        notes,
    })
}

/// Validate `text` and, only on success, swap it into `session`.
pub fn import_into<P: Persistence>(
    session: &mut Session<P>,
    text: &str,
) -> Result<(), ImportError> {
    match parse_import(text) {
        Ok(state) => {
            tracing::info!(
                shortcuts = state.shortcuts.len(),
                notes = state.notes.len(),
                "Backup imported"
            );
            session.restore(state);
            Ok(())
        }
        Err(e) => {
            tracing::warn!("Backup rejected: {e}");
            Err(e)
        }
    }
}

fn parse_settings(raw: Option<&Value>) -> Result<AppSettings, String> {
    let value = raw.ok_or("settings is missing")?;
    let obj = value.as_object().ok_or("settings must be an object")?;

    expect(obj, "blurLevel", "settings", Value::is_number, "a number")?;
    expect(obj, "defaultEngine", "settings", Value::is_string, "a string")?;
    expect(obj, "openInNewTab", "settings", Value::is_boolean, "a boolean")?;
    expect(obj, "gridConfig", "settings", Value::is_object, "an object")?;
    if let Some(grid) = obj.get("gridConfig").and_then(Value::as_object) {
        for field in ["rows", "cols", "iconSize", "gapX", "gapY"] {
            expect(grid, field, "settings.gridConfig", Value::is_u64, "a non-negative integer")?;
        }
    }
    optional(obj, "backgroundImage", "settings", Value::is_string, "a string or null")?;
    optional(obj, "customSuggestUrl", "settings", Value::is_string, "a string or null")?;
    optional(obj, "suggestServer", "settings", Value::is_string, "a string")?;

    serde_json::from_value(value.clone()).map_err(|e| format!("settings: {e}"))
}

fn parse_shortcuts(raw: Option<&Value>) -> Result<ShortcutList, String> {
    let value = raw.ok_or("shortcuts is missing")?;
    let entries = value.as_array().ok_or("shortcuts must be an array")?;
    for (i, entry) in entries.iter().enumerate() {
        check_entry(entry, &format!("shortcuts[{i}]"), true)?;
    }
    let list: ShortcutList =
        serde_json::from_value(value.clone()).map_err(|e| format!("shortcuts: {e}"))?;
    Ok(ops::pruned(list))
}

fn check_entry(entry: &Value, at: &str, allow_folder: bool) -> Result<(), String> {
    let obj = entry.as_object().ok_or_else(|| format!("{at} must be an object"))?;
    for field in ["id", "title", "url"] {
        expect(obj, field, at, Value::is_string, "a string")?;
    }

    let is_folder = match obj.get("type") {
        None | Some(Value::Null) => false,
        Some(Value::String(kind)) if kind == "link" => false,
        Some(Value::String(kind)) if kind == "folder" && allow_folder => true,
        Some(Value::String(kind)) if kind == "folder" => {
            return Err(format!("{at} is a folder nested inside a folder"));
        }
        Some(_) => return Err(format!("{at}.type must be \"link\" or \"folder\"")),
    };

    match obj.get("children") {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Array(children)) if is_folder => {
            for (i, child) in children.iter().enumerate() {
                check_entry(child, &format!("{at}.children[{i}]"), false)?;
            }
            Ok(())
        }
        Some(Value::Array(_)) => Ok(()),
        Some(_) => Err(format!("{at}.children must be an array")),
    }
}

fn parse_notes(raw: Option<&Value>) -> Result<Vec<Note>, String> {
    let value = match raw {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(value) => value,
    };
    let notes = value.as_array().ok_or("notes must be an array")?;
    for (i, note) in notes.iter().enumerate() {
        let at = format!("notes[{i}]");
        let obj = note.as_object().ok_or_else(|| format!("{at} must be an object"))?;
        for field in ["id", "title", "content"] {
            expect(obj, field, &at, Value::is_string, "a string")?;
        }
        expect(obj, "updatedAt", &at, Value::is_number, "a number")?;
    }
    serde_json::from_value(value.clone()).map_err(|e| format!("notes: {e}"))
}

fn expect(
    obj: &Map<String, Value>,
    field: &str,
    at: &str,
    check: fn(&Value) -> bool,
    what: &str,
) -> Result<(), String> {
    match obj.get(field) {
        None => Err(format!("{at}.{field} is missing")),
        Some(value) if check(value) => Ok(()),
        Some(_) => Err(format!("{at}.{field} must be {what}")),
    }
}

fn optional(
    obj: &Map<String, Value>,
    field: &str,
    at: &str,
    check: fn(&Value) -> bool,
    what: &str,
) -> Result<(), String> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(()),
        Some(value) if check(value) => Ok(()),
        Some(_) => Err(format!("{at}.{field} must be {what}")),
    }
}
