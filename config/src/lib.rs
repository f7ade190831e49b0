//! Configuration and storage for Tab King.
//!
//! - **`config`**: `~/.tabking/config.toml` and path resolution
//! - **`kv`**: durable key-value slots (file-backed and in-memory)
//! - **`slots`**: the persisted shortcut, settings and notes slots
//! - **`backup`**: export/import documents

mod backup;
mod config;
mod kv;
mod slots;

pub use backup::{
    EXPORT_VERSION, ExportDocument, ImportError, export_file_name, import_into, parse_import,
};
pub use config::{
    ConfigError, DragConfig, MIN_DWELL_THRESHOLD, StorageConfig, TabkingConfig, config_path,
    default_data_dir,
};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use slots::{NOTES_KEY, SETTINGS_KEY, SHORTCUTS_KEY, StoragePersistence, load_session};
