//! Drag session tracking for the shortcut grid.
//!
//! A single pointer gesture either reorders tiles or merges two tiles into a
//! folder. The only discriminator is dwell time: hovering one target for at
//! least the dwell threshold arms merge intent, anything shorter is a reorder.
//!
//! Hosts drive the tracker in one of two ways:
//!
//! - **Timer callbacks**: [`DragTracker::enter`] hands back a [`DwellTicket`].
//!   The host schedules a delayed callback for `ticket.due` and calls
//!   [`DragTracker::dwell_elapsed`] when it fires. Tickets are matched against
//!   the live session and hover generation, so a callback that fires after the
//!   hover moved on (new target, surface leave, drop, new session) is a no-op
//!   even if the host failed to cancel it.
//! - **Frame polling**: call [`DragTracker::poll`] with the current instant.
//!
//! Drops also check elapsed dwell time, so both styles agree on the outcome.

use std::fmt;
use std::time::{Duration, Instant};

use crate::ShortcutId;

/// Hover time that turns a reorder into a merge.
pub const DEFAULT_DWELL_THRESHOLD: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DragSessionId(u64);

impl DragSessionId {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DragSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the gesture picked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// A root-level tile.
    Entry(ShortcutId),
    /// A link inside an open folder.
    FolderItem {
        folder: ShortcutId,
        item: ShortcutId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragIntent {
    Reorder,
    Merge,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging {
        session: DragSessionId,
        source: DragSource,
    },
    Hovering {
        session: DragSessionId,
        source: ShortcutId,
        target: ShortcutId,
        since: Instant,
        /// Generation of this hover; bumps on every new target or leave.
        hover: u64,
        intent: DragIntent,
    },
}

/// Handle for one scheduled dwell callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DwellTicket {
    pub session: DragSessionId,
    pub hover: u64,
    pub target: ShortcutId,
    /// When the callback should fire.
    pub due: Instant,
}

/// How a finished gesture should mutate the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAction {
    Reorder {
        drag: ShortcutId,
        target: ShortcutId,
    },
    Merge {
        drag: ShortcutId,
        drop: ShortcutId,
    },
    MoveToRoot {
        folder: ShortcutId,
        item: ShortcutId,
    },
    /// No recognized target, self-drop, or no active session.
    Discard,
}

#[derive(Debug, Clone)]
pub struct DragTracker {
    state: DragState,
    threshold: Duration,
    next_session: u64,
    next_hover: u64,
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DWELL_THRESHOLD)
    }
}

impl DragTracker {
    #[must_use]
    pub fn new(threshold: Duration) -> Self {
        Self {
            state: DragState::Idle,
            threshold,
            next_session: 1,
            next_hover: 1,
        }
    }

    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    #[must_use]
    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    /// Current intent, or `None` when no gesture is in progress.
    #[must_use]
    pub fn intent(&self) -> Option<DragIntent> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { .. } => Some(DragIntent::Reorder),
            DragState::Hovering { intent, .. } => Some(*intent),
        }
    }

    /// Tile that should show the reorder indicator.
    #[must_use]
    pub fn reorder_highlight(&self) -> Option<&ShortcutId> {
        match &self.state {
            DragState::Hovering {
                target,
                intent: DragIntent::Reorder,
                ..
            } => Some(target),
            _ => None,
        }
    }

    /// Tile that should show the merge indicator.
    #[must_use]
    pub fn merge_highlight(&self) -> Option<&ShortcutId> {
        match &self.state {
            DragState::Hovering {
                target,
                intent: DragIntent::Merge,
                ..
            } => Some(target),
            _ => None,
        }
    }

    /// Start a new gesture. Any previous session is abandoned, which also
    /// invalidates all of its outstanding dwell tickets.
    pub fn begin(&mut self, source: DragSource) -> DragSessionId {
        let session = DragSessionId(self.next_session);
        self.next_session += 1;
        self.state = DragState::Dragging { session, source };
        session
    }

    /// Pointer entered the tile `target`.
    ///
    /// Returns a ticket when a fresh dwell timer should be scheduled. Entering
    /// the tile that is already hovered keeps the running timer.
    pub fn enter(&mut self, target: &ShortcutId, now: Instant) -> Option<DwellTicket> {
        let (session, source) = match &self.state {
            DragState::Dragging {
                session,
                source: DragSource::Entry(source),
            } => (*session, source.clone()),
            DragState::Hovering {
                session,
                source,
                target: hovered,
                ..
            } => {
                if hovered == target {
                    return None;
                }
                (*session, source.clone())
            }
            DragState::Idle
            | DragState::Dragging {
                source: DragSource::FolderItem { .. },
                ..
            } => return None,
        };

        if &source == target {
            self.state = DragState::Dragging {
                session,
                source: DragSource::Entry(source),
            };
            return None;
        }

        let hover = self.bump_hover();
        self.state = DragState::Hovering {
            session,
            source,
            target: target.clone(),
            since: now,
            hover,
            intent: DragIntent::Reorder,
        };
        Some(DwellTicket {
            session,
            hover,
            target: target.clone(),
            due: now + self.threshold,
        })
    }

    /// A scheduled dwell callback fired. Returns `true` if it armed merge
    /// intent; stale tickets are ignored.
    pub fn dwell_elapsed(&mut self, ticket: &DwellTicket) -> bool {
        match &mut self.state {
            DragState::Hovering {
                session,
                target,
                hover,
                intent,
                ..
            } if *session == ticket.session
                && *hover == ticket.hover
                && *target == ticket.target =>
            {
                *intent = DragIntent::Merge;
                true
            }
            _ => false,
        }
    }

    /// Promote to merge intent if the current hover has lasted long enough.
    pub fn poll(&mut self, now: Instant) -> bool {
        let threshold = self.threshold;
        match &mut self.state {
            DragState::Hovering { since, intent, .. }
                if *intent == DragIntent::Reorder
                    && now.saturating_duration_since(*since) >= threshold =>
            {
                *intent = DragIntent::Merge;
                true
            }
            _ => false,
        }
    }

    /// Pointer left the whole drop surface. The gesture stays alive but the
    /// hover, its timer, and any merge intent are dropped.
    pub fn leave_surface(&mut self) {
        if let DragState::Hovering {
            session, source, ..
        } = &self.state
        {
            let session = *session;
            let source = DragSource::Entry(source.clone());
            self.bump_hover();
            self.state = DragState::Dragging { session, source };
        }
    }

    /// Drop onto the tile `target`. Always ends the session.
    pub fn drop_on(&mut self, target: &ShortcutId, now: Instant) -> DropAction {
        self.poll(now);
        let state = self.finish();
        match state {
            DragState::Hovering {
                source,
                target: hovered,
                intent: DragIntent::Merge,
                ..
            } if &hovered == target && &source != target => DropAction::Merge {
                drag: source,
                drop: hovered,
            },
            DragState::Hovering { source, .. }
            | DragState::Dragging {
                source: DragSource::Entry(source),
                ..
            } if &source != target => DropAction::Reorder {
                drag: source,
                target: target.clone(),
            },
            _ => DropAction::Discard,
        }
    }

    /// Drop onto the backdrop around an open folder. Always ends the session.
    pub fn drop_on_backdrop(&mut self) -> DropAction {
        match self.finish() {
            DragState::Dragging {
                source: DragSource::FolderItem { folder, item },
                ..
            } => DropAction::MoveToRoot { folder, item },
            _ => DropAction::Discard,
        }
    }

    /// Gesture ended without a drop (e.g. released outside the window).
    pub fn cancel(&mut self) {
        self.finish();
    }

    fn finish(&mut self) -> DragState {
        self.bump_hover();
        std::mem::replace(&mut self.state, DragState::Idle)
    }

    fn bump_hover(&mut self) -> u64 {
        let hover = self.next_hover;
        self.next_hover += 1;
        hover
    }
}
