use serde::{Deserialize, Serialize};

/// A notepad entry carried in version-2 backups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Unix epoch milliseconds of the last edit.
    pub updated_at: i64,
}
