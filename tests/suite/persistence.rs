//! Slot persistence against real files and the persisted wire format.

use tabking_config::{
    FileStore, KeyValueStore, MemoryStore, NOTES_KEY, SETTINGS_KEY, SHORTCUTS_KEY,
    StoragePersistence, load_session,
};
use tabking_core::{Outcome, Session, default_shortcuts};
use tabking_types::{Folder, Link, SearchEngine};
use tabking_utils::SyncPolicy;

use crate::common::{id, link, list, root_ids};

fn open(dir: &std::path::Path) -> FileStore {
    FileStore::open(dir).unwrap().with_sync(SyncPolicy::Fast)
}

#[test]
fn mutations_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = open(dir.path());
        let mut session = Session::new(load_session(&store), StoragePersistence::new(store));
        assert_eq!(session.shortcuts(), &default_shortcuts());

        assert_eq!(session.on_merge_shortcuts(&id("1"), &id("2")), Outcome::Changed);
        assert_eq!(session.on_remove_shortcut(&id("14")), Outcome::Changed);
        assert!(session.update_settings(|s| s.default_engine = SearchEngine::Baidu).is_changed());
        assert!(session.take_persist_warning().is_none());
    }

    let store = open(dir.path());
    let state = load_session(&store);
    assert_eq!(state.shortcuts.len(), 12);
    assert!(state.shortcuts.entries()[0].is_folder());
    assert!(!state.shortcuts.contains(&id("14")));
    assert_eq!(state.settings.default_engine, SearchEngine::Baidu);
}

#[test]
fn corrupt_shortcut_slot_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path());
    store.set(SHORTCUTS_KEY, "[{\"id\": \"1\", \"title\": 5}]").unwrap();
    store.set(SETTINGS_KEY, "{\"defaultEngine\": \"zhihu\"}").unwrap();

    let state = load_session(&store);
    assert_eq!(state.shortcuts, default_shortcuts());
    assert_eq!(state.settings.default_engine, SearchEngine::Zhihu);
    assert!(state.settings.open_in_new_tab);
}

#[test]
fn failed_writes_warn_once_and_keep_memory_state() {
    let mut store = MemoryStore::new();
    store.set_read_only(true);
    let state = load_session(&store);
    let mut session = Session::new(state, StoragePersistence::new(store));

    assert_eq!(session.on_remove_shortcut(&id("1")), Outcome::Changed);
    assert!(session.take_persist_warning().is_some());
    assert_eq!(session.on_remove_shortcut(&id("2")), Outcome::Changed);
    assert!(session.take_persist_warning().is_none());

    assert!(!session.shortcuts().contains(&id("1")));
    assert!(session.persistence().store().slot(SHORTCUTS_KEY).is_none());

    session.persistence_mut().store_mut().set_read_only(false);
    assert_eq!(session.on_remove_shortcut(&id("3")), Outcome::Changed);
    let stored = session.persistence().store().slot(SHORTCUTS_KEY).unwrap();
    assert!(!stored.contains("\"id\":\"2\""));
}

#[test]
fn restore_writes_every_slot() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(dir.path());
    let mut session = Session::new(load_session(&store), StoragePersistence::new(store));

    let mut state = session.snapshot();
    state.shortcuts = list(vec![link("only").into()]);
    session.restore(state);

    let reopened = open(dir.path());
    for key in [SHORTCUTS_KEY, SETTINGS_KEY, NOTES_KEY] {
        assert!(reopened.get(key).unwrap().is_some(), "{key} not written");
    }
    assert_eq!(root_ids(&load_session(&reopened).shortcuts), ["only"]);
}

#[test]
fn persisted_shortcut_wire_format() {
    let shortcuts = list(vec![
        Folder::new(
            id("f"),
            "Work",
            vec![Link::new(id("x"), "X", "https://x").with_icon("/svg/x.png")],
        )
        .into(),
        Link::new(id("z"), "Z", "https://z").into(),
    ]);

    insta::assert_snapshot!(serde_json::to_string_pretty(&shortcuts).unwrap(), @r#"
    [
      {
        "id": "f",
        "title": "Work",
        "url": "",
        "type": "folder",
        "children": [
          {
            "id": "x",
            "title": "X",
            "url": "https://x",
            "icon": "/svg/x.png",
            "type": "link"
          }
        ]
      },
      {
        "id": "z",
        "title": "Z",
        "url": "https://z",
        "type": "link"
      }
    ]
    "#);
}
