//! Pointer gestures through the session, including late timer callbacks.

use std::time::{Duration, Instant};

use tabking_core::Outcome;
use tabking_types::{DragIntent, DragSource};

use crate::common::{child_ids, folder, id, link, memory_session, root_ids};

const DWELL: Duration = Duration::from_millis(600);

#[test]
fn hover_switching_then_quick_drop_reorders() {
    let t0 = Instant::now();
    let mut session = memory_session(vec![
        link("a").into(),
        link("b").into(),
        link("c").into(),
        link("d").into(),
    ]);

    session.on_drag_start(DragSource::Entry(id("a")));
    let over_b = session.on_drag_enter(&id("b"), t0).unwrap();
    let over_c = session.on_drag_enter(&id("c"), t0 + Duration::from_millis(400)).unwrap();

    // b's timer fires after the pointer moved on; it must not arm merge on c.
    assert!(!session.on_dwell_elapsed(&over_b));
    assert_eq!(session.drag().intent(), Some(DragIntent::Reorder));
    assert_eq!(session.drag().reorder_highlight(), Some(&id("c")));

    assert_eq!(
        session.on_drop(&id("c"), over_c.due - Duration::from_millis(1)),
        Outcome::Changed
    );
    assert_eq!(root_ids(session.shortcuts()), ["b", "c", "a", "d"]);
}

#[test]
fn leave_surface_then_late_callback_still_reorders() {
    let t0 = Instant::now();
    let mut session = memory_session(vec![link("a").into(), link("b").into()]);

    session.on_drag_start(DragSource::Entry(id("b")));
    let ticket = session.on_drag_enter(&id("a"), t0).unwrap();
    session.on_drag_leave_surface();
    assert!(!session.on_dwell_elapsed(&ticket));

    // Pointer comes back and drops immediately.
    let later = t0 + DWELL * 2;
    session.on_drag_enter(&id("a"), later);
    assert_eq!(session.on_drop(&id("a"), later), Outcome::Changed);
    assert_eq!(root_ids(session.shortcuts()), ["b", "a"]);
}

#[test]
fn frame_polling_arms_merge() {
    let t0 = Instant::now();
    let mut session = memory_session(vec![link("a").into(), folder("f", &["x", "y"]).into()]);

    session.on_drag_start(DragSource::Entry(id("a")));
    session.on_drag_enter(&id("f"), t0);
    assert!(!session.on_tick(t0 + DWELL / 2));
    assert!(session.on_tick(t0 + DWELL));
    assert_eq!(session.drag().merge_highlight(), Some(&id("f")));

    assert_eq!(session.on_drop(&id("f"), t0 + DWELL), Outcome::Changed);
    assert_eq!(root_ids(session.shortcuts()), ["f"]);
    assert_eq!(child_ids(session.shortcuts(), "f"), ["x", "y", "a"]);
}

#[test]
fn dragging_folder_onto_folder_changes_nothing() {
    let t0 = Instant::now();
    let mut session = memory_session(vec![
        folder("f", &["x", "y"]).into(),
        folder("g", &["z", "w"]).into(),
    ]);
    let before = session.shortcuts().clone();

    session.on_drag_start(DragSource::Entry(id("f")));
    let ticket = session.on_drag_enter(&id("g"), t0).unwrap();
    assert!(session.on_dwell_elapsed(&ticket));
    assert_eq!(session.on_drop(&id("g"), t0 + DWELL), Outcome::Unchanged);
    assert_eq!(session.shortcuts(), &before);
}

#[test]
fn folder_item_drag_out_to_backdrop() {
    let mut session = memory_session(vec![folder("f", &["x"]).into(), link("m").into()]);

    session.on_drag_start(DragSource::FolderItem {
        folder: id("f"),
        item: id("x"),
    });
    assert_eq!(session.on_backdrop_drop(), Outcome::Changed);
    assert_eq!(root_ids(session.shortcuts()), ["m", "x"]);
}

#[test]
fn cancelled_gesture_ignores_drop() {
    let t0 = Instant::now();
    let mut session = memory_session(vec![link("a").into(), link("b").into()]);

    session.on_drag_start(DragSource::Entry(id("a")));
    session.on_drag_enter(&id("b"), t0);
    session.on_drag_cancel();
    assert_eq!(session.on_drop(&id("b"), t0 + DWELL), Outcome::Unchanged);
    assert_eq!(root_ids(session.shortcuts()), ["a", "b"]);
}
