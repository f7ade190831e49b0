//! End-to-end walkthroughs of the grid operations through a session.

use serde_json::json;
use tabking_config::{ImportError, import_into};
use tabking_core::Outcome;
use tabking_types::AppSettings;

use crate::common::{child_ids, folder, id, link, memory_session, root_ids};

#[test]
fn merging_two_links_creates_folder_in_drop_slot() {
    let mut session = memory_session(vec![link("a").into(), link("b").into(), link("c").into()]);

    assert_eq!(session.on_merge_shortcuts(&id("a"), &id("b")), Outcome::Changed);

    let shortcuts = session.shortcuts();
    assert_eq!(root_ids(shortcuts), ["folder-1", "c"]);
    assert_eq!(child_ids(shortcuts, "folder-1"), ["b", "a"]);
    assert_eq!(shortcuts.entries()[0].title(), "Folder");
}

#[test]
fn merging_link_into_folder_appends_child() {
    let mut session = memory_session(vec![folder("f", &["x", "y"]).into(), link("z").into()]);

    assert_eq!(session.on_merge_shortcuts(&id("z"), &id("f")), Outcome::Changed);

    let shortcuts = session.shortcuts();
    assert_eq!(root_ids(shortcuts), ["f"]);
    assert_eq!(child_ids(shortcuts, "f"), ["x", "y", "z"]);
}

#[test]
fn moving_out_of_two_item_folder_unwraps_survivor_in_place() {
    let mut session = memory_session(vec![
        folder("f", &["x", "y"]).into(),
        link("m").into(),
        link("n").into(),
    ]);

    assert_eq!(session.on_move_to_root(&id("f"), &id("x")), Outcome::Changed);
    assert_eq!(root_ids(session.shortcuts()), ["y", "m", "n", "x"]);
}

#[test]
fn moving_out_of_large_folder_keeps_folder() {
    let mut session = memory_session(vec![folder("f", &["x", "y", "w"]).into(), link("m").into()]);

    assert_eq!(session.on_move_to_root(&id("f"), &id("y")), Outcome::Changed);
    assert_eq!(root_ids(session.shortcuts()), ["f", "m", "y"]);
    assert_eq!(child_ids(session.shortcuts(), "f"), ["x", "w"]);
}

#[test]
fn removing_last_child_prunes_folder() {
    let mut session = memory_session(vec![link("a").into(), folder("f", &["x"]).into()]);

    assert_eq!(session.on_remove_from_folder(&id("f"), &id("x")), Outcome::Changed);
    assert_eq!(root_ids(session.shortcuts()), ["a"]);
}

#[test]
fn removing_one_of_two_children_does_not_unwrap() {
    let mut session = memory_session(vec![folder("f", &["x", "y"]).into()]);

    assert_eq!(session.on_remove_from_folder(&id("f"), &id("x")), Outcome::Changed);
    assert_eq!(root_ids(session.shortcuts()), ["f"]);
    assert_eq!(child_ids(session.shortcuts(), "f"), ["y"]);
}

#[test]
fn version_one_backup_imports_without_notes() {
    let mut session = memory_session(vec![link("a").into()]);
    let doc = json!({
        "settings": serde_json::to_value(AppSettings::default()).unwrap(),
        "shortcuts": [
            {"id": "1", "title": "知乎", "url": "https://www.zhihu.com", "icon": "/svg/www.zhihu.com.png"},
            {"id": "2", "title": "Dev", "url": "", "type": "folder", "children": [
                {"id": "3", "title": "GitHub", "url": "https://github.com"}
            ]}
        ],
        "exportedAt": "2024-11-02T08:00:00.000Z",
        "version": 1
    });

    import_into(&mut session, &doc.to_string()).unwrap();

    assert_eq!(root_ids(session.shortcuts()), ["1", "2"]);
    assert_eq!(child_ids(session.shortcuts(), "2"), ["3"]);
    assert!(session.notes().is_empty());
}

#[test]
fn backup_missing_url_is_rejected_whole() {
    let mut session = memory_session(vec![link("a").into(), folder("f", &["x", "y"]).into()]);
    assert!(session.update_settings(|s| s.grid_config.rows = 2).is_changed());
    let before = session.snapshot();

    let doc = json!({
        "settings": serde_json::to_value(AppSettings::default()).unwrap(),
        "shortcuts": [
            {"id": "1", "title": "Fine", "url": "https://fine.example"},
            {"id": "2", "title": "Broken"}
        ],
        "notes": [],
        "version": 2
    });

    let err = import_into(&mut session, &doc.to_string()).unwrap_err();
    assert!(matches!(err, ImportError::Shortcuts(_)));
    assert_eq!(session.snapshot(), before);
}

#[test]
fn edit_updates_link_and_folder_title() {
    let mut session = memory_session(vec![link("a").into(), folder("f", &["x", "y"]).into()]);

    assert_eq!(
        session.on_edit_shortcut(&id("a"), "Docs", Some("docs.rs")),
        Outcome::Changed
    );
    let edited = session.shortcuts().entries()[0].as_link().unwrap();
    assert_eq!(edited.title(), "Docs");
    assert_eq!(edited.url(), "https://docs.rs");

    assert_eq!(
        session.on_edit_shortcut(&id("f"), "Work", Some("ignored")),
        Outcome::Changed
    );
    let folder = session.shortcuts().entries()[1].as_folder().unwrap();
    assert_eq!(folder.title(), "Work");
    assert_eq!(folder.children().len(), 2);
}
