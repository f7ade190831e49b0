//! Tab King CLI - drives the shortcut grid against the on-disk slots.
//!
//! ```text
//! main() -> TabkingConfig::load() -> FileStore::open(data_dir)
//!        -> load_session() -> Session -> commands::run()
//! ```

mod commands;
mod render;

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tabking_config::{FileStore, StoragePersistence, TabkingConfig, load_session};
use tabking_core::Session;

use crate::commands::Command;

#[derive(Parser)]
#[command(name = "tabking")]
#[command(about = "Organize start-page shortcuts: add, reorder, fold into folders, back up")]
struct Cli {
    /// Directory holding the persisted slots (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn init_tracing(data_dir: &Path) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_path = data_dir.join("logs").join("tabking.log");
    match open_log_file(&log_path) {
        Ok(file) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .init();
            tracing::debug!(path = %log_path.display(), "Logging initialized");
        }
        Err(e) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(env_filter)
                .init();
            tracing::warn!(path = %log_path.display(), "Failed to open log file: {e}");
        }
    }
}

fn open_log_file(path: &Path) -> std::io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = TabkingConfig::load()?.unwrap_or_default();
    let data_dir = config.data_dir(cli.data_dir.as_deref());
    init_tracing(&data_dir);

    let store = FileStore::open(&data_dir)?;
    let state = load_session(&store);
    let mut session = Session::with_dwell_threshold(
        state,
        StoragePersistence::new(store),
        config.dwell_threshold(),
    );

    let mut stdout = std::io::stdout().lock();
    commands::run(cli.command, &mut session, &mut stdout)
}
