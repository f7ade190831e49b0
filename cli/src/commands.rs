//! Subcommand handlers. Each runs against an already loaded [`Session`] and
//! writes its human-readable result to `out`.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Args, Subcommand};

use tabking_config::{ExportDocument, export_file_name, import_into};
use tabking_core::{Outcome, Persistence, Session};
use tabking_types::{DragSource, SearchEngine, ShortcutId, SuggestServer};

use crate::render;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the shortcut grid
    List,
    /// Append a link to the end of the grid
    Add {
        /// Address; `https://` is assumed when no scheme is given
        url: String,
        /// Display name (derived from the address when omitted)
        #[arg(long, default_value = "")]
        name: String,
    },
    /// Remove a root entry (a folder goes with its children)
    Remove { id: String },
    /// Change a root entry's title and, for links, its address
    Edit {
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: Option<String>,
    },
    /// Move DRAG into TARGET's slot
    Reorder { drag: String, target: String },
    /// Fold DRAG into DROP (creating a folder when DROP is a link)
    Merge { drag: String, drop: String },
    /// Delete ITEM from FOLDER
    RemoveFromFolder { folder: String, item: String },
    /// Take ITEM out of FOLDER and append it to the grid
    MoveToRoot { folder: String, item: String },
    /// Replay a pointer drag of SOURCE onto TARGET held for HOLD_MS
    Drag {
        source: String,
        target: String,
        #[arg(long, default_value_t = 0)]
        hold_ms: u64,
    },
    /// Write a backup document
    Export {
        /// File or directory; defaults to the dated file name in the current directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace settings, shortcuts and notes from a backup document
    Import { file: PathBuf },
    /// Show or change settings
    Settings(SettingsArgs),
}

#[derive(Debug, Default, Args)]
pub struct SettingsArgs {
    #[arg(long)]
    pub rows: Option<u32>,
    #[arg(long)]
    pub cols: Option<u32>,
    #[arg(long)]
    pub icon_size: Option<u32>,
    #[arg(long)]
    pub gap_x: Option<u32>,
    #[arg(long)]
    pub gap_y: Option<u32>,
    #[arg(long)]
    pub blur: Option<f64>,
    #[arg(long)]
    pub engine: Option<String>,
    #[arg(long)]
    pub new_tab: Option<bool>,
    #[arg(long)]
    pub suggest: Option<String>,
    #[arg(long)]
    pub suggest_url: Option<String>,
}

impl SettingsArgs {
    fn is_empty(&self) -> bool {
        self.rows.is_none()
            && self.cols.is_none()
            && self.icon_size.is_none()
            && self.gap_x.is_none()
            && self.gap_y.is_none()
            && self.blur.is_none()
            && self.engine.is_none()
            && self.new_tab.is_none()
            && self.suggest.is_none()
            && self.suggest_url.is_none()
    }
}

/// Which view to print after a change.
#[derive(Debug, Clone, Copy)]
enum View {
    Shortcuts,
    Settings,
}

pub fn run<P: Persistence>(
    command: Command,
    session: &mut Session<P>,
    out: &mut impl Write,
) -> Result<()> {
    let outcome = match command {
        Command::List => {
            write!(out, "{}", render::shortcut_tree(session.shortcuts()))?;
            return Ok(());
        }
        Command::Add { url, name } => session
            .add_from_input(&name, &url)
            .context("failed to add shortcut")?,
        Command::Remove { id } => session.on_remove_shortcut(&parse_id(&id)?),
        Command::Edit { id, title, url } => {
            session.on_edit_shortcut(&parse_id(&id)?, &title, url.as_deref())
        }
        Command::Reorder { drag, target } => {
            session.on_reorder_shortcuts(&parse_id(&drag)?, &parse_id(&target)?)
        }
        Command::Merge { drag, drop } => {
            session.on_merge_shortcuts(&parse_id(&drag)?, &parse_id(&drop)?)
        }
        Command::RemoveFromFolder { folder, item } => {
            session.on_remove_from_folder(&parse_id(&folder)?, &parse_id(&item)?)
        }
        Command::MoveToRoot { folder, item } => {
            session.on_move_to_root(&parse_id(&folder)?, &parse_id(&item)?)
        }
        Command::Drag {
            source,
            target,
            hold_ms,
        } => replay_drag(session, &parse_id(&source)?, &parse_id(&target)?, hold_ms),
        Command::Export { out: path } => {
            let written = export(session, path.as_deref())?;
            writeln!(out, "Exported to {}", written.display())?;
            return Ok(());
        }
        Command::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            import_into(session, &text)?;
            Outcome::Changed
        }
        Command::Settings(args) => {
            if args.is_empty() {
                write!(out, "{}", render::settings(session.settings()))?;
                return Ok(());
            }
            let outcome = apply_settings(session, &args)?;
            return report(session, outcome, View::Settings, out);
        }
    };

    report(session, outcome, View::Shortcuts, out)
}

fn report<P: Persistence>(
    session: &mut Session<P>,
    outcome: Outcome,
    view: View,
    out: &mut impl Write,
) -> Result<()> {
    match (outcome, view) {
        (Outcome::Changed, View::Shortcuts) => {
            write!(out, "{}", render::shortcut_tree(session.shortcuts()))?;
        }
        (Outcome::Changed, View::Settings) => {
            write!(out, "{}", render::settings(session.settings()))?;
        }
        (Outcome::Unchanged, _) => writeln!(out, "No change")?,
    }
    if let Some(warning) = session.take_persist_warning() {
        writeln!(out, "warning: {warning}")?;
    }
    Ok(())
}

fn parse_id(raw: &str) -> Result<ShortcutId> {
    ShortcutId::new(raw).with_context(|| format!("invalid shortcut id {raw:?}"))
}

/// Drive the gesture through the session's tracker with a synthetic clock.
fn replay_drag<P: Persistence>(
    session: &mut Session<P>,
    source: &ShortcutId,
    target: &ShortcutId,
    hold_ms: u64,
) -> Outcome {
    let start = Instant::now();
    let dropped_at = start + Duration::from_millis(hold_ms);
    session.on_drag_start(DragSource::Entry(source.clone()));
    session.on_drag_enter(target, start);
    session.on_tick(dropped_at);
    session.on_drop(target, dropped_at)
}

fn export<P: Persistence>(session: &Session<P>, dest: Option<&Path>) -> Result<PathBuf> {
    let now = Utc::now();
    let path = match dest {
        Some(dir) if dir.is_dir() => dir.join(export_file_name(now)),
        Some(file) => file.to_path_buf(),
        None => PathBuf::from(export_file_name(now)),
    };
    let json = ExportDocument::new(&session.snapshot(), now).to_json()?;
    std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "Backup exported");
    Ok(path)
}

fn apply_settings<P: Persistence>(session: &mut Session<P>, args: &SettingsArgs) -> Result<Outcome> {
    let engine = match args.engine.as_deref() {
        Some(raw) => match SearchEngine::parse(raw) {
            Some(engine) => Some(engine),
            None => bail!("unknown search engine {raw:?}"),
        },
        None => None,
    };
    let suggest = match args.suggest.as_deref() {
        Some(raw) => match SuggestServer::ALL
            .into_iter()
            .find(|server| server.as_str().eq_ignore_ascii_case(raw.trim()))
        {
            Some(server) => Some(server),
            None => bail!("unknown suggest server {raw:?}"),
        },
        None => None,
    };

    let outcome = session.update_settings(|settings| {
        let grid = &mut settings.grid_config;
        grid.rows = args.rows.unwrap_or(grid.rows);
        grid.cols = args.cols.unwrap_or(grid.cols);
        grid.icon_size = args.icon_size.unwrap_or(grid.icon_size);
        grid.gap_x = args.gap_x.unwrap_or(grid.gap_x);
        grid.gap_y = args.gap_y.unwrap_or(grid.gap_y);
        settings.blur_level = args.blur.unwrap_or(settings.blur_level);
        settings.default_engine = engine.unwrap_or(settings.default_engine);
        settings.open_in_new_tab = args.new_tab.unwrap_or(settings.open_in_new_tab);
        settings.suggest_server = suggest.unwrap_or(settings.suggest_server);
        if let Some(url) = &args.suggest_url {
            settings.custom_suggest_url = Some(url.clone()).filter(|url| !url.trim().is_empty());
        }
    });
    Ok(outcome)
}
