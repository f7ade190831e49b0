//! Plain-text views of session state.

use std::fmt::Write;

use tabking_types::{AppSettings, Link, ShortcutEntry, ShortcutList};

/// One line per root entry; folder children are indented beneath it.
pub fn shortcut_tree(list: &ShortcutList) -> String {
    if list.is_empty() {
        return "(no shortcuts)\n".to_string();
    }
    let mut out = String::new();
    for (index, entry) in list.iter().enumerate() {
        match entry {
            ShortcutEntry::Link(link) => {
                let _ = writeln!(out, "{index}. {}", link_line(link));
            }
            ShortcutEntry::Folder(folder) => {
                let _ = writeln!(
                    out,
                    "{index}. [{}] {} ({} items)",
                    folder.id(),
                    folder.title(),
                    folder.children().len()
                );
                for child in folder.children() {
                    let _ = writeln!(out, "   - {}", link_line(child));
                }
            }
        }
    }
    out
}

fn link_line(link: &Link) -> String {
    format!("[{}] {}  {}", link.id(), link.title(), link.url())
}

pub fn settings(settings: &AppSettings) -> String {
    let grid = settings.grid_config;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "grid            {}x{}, icon {}px, gap {}x{}px",
        grid.rows, grid.cols, grid.icon_size, grid.gap_x, grid.gap_y
    );
    let _ = writeln!(out, "engine          {}", settings.default_engine.as_str());
    let _ = writeln!(out, "open in new tab {}", settings.open_in_new_tab);
    let _ = writeln!(out, "blur            {}", settings.blur_level);
    let _ = writeln!(out, "suggest         {}", settings.suggest_server.as_str());
    if let Some(url) = &settings.custom_suggest_url {
        let _ = writeln!(out, "suggest url     {url}");
    }
    let _ = writeln!(
        out,
        "background      {}",
        if settings.background_image.is_some() {
            "custom"
        } else {
            "none"
        }
    );
    out
}
