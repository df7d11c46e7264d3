//! Central application state for board.
//!
//! `AppState` wraps the [`CommentStore`] together with the purely visual state
//! the terminal needs: current mode, list selection, help scroll, in-flight
//! request count, and the last failure message. Rendering reads it; the
//! keybinding dispatcher and the network-result handler mutate it. Nothing
//! here performs I/O.

use board_core::{Applied, CommentId, CommentStore, Completion, SortOrder};
use ratatui::widgets::ListState;

/// Input mode controlling which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Navigation over the comment list.
    #[default]
    Normal,
    /// Typing into the new-comment box.
    Compose,
    /// Typing into the open edit session.
    Edit,
    /// Full-screen help overlay.
    HelpOverlay,
    /// Quit confirmation shown when a draft or edit would be lost.
    ConfirmQuit,
}

pub struct AppState {
    pub mode: Mode,
    pub store: CommentStore,
    /// Selection over `store.comments()`.
    pub list_state: ListState,
    /// Inner height of the comment list, cached after each render.
    pub list_viewport_height: u16,
    pub help_scroll: u16,
    /// Requests handed to the network worker whose completion has not arrived.
    pub in_flight: usize,
    /// Message of the most recent failure, cleared by the next clean completion.
    pub last_error: Option<String>,
    /// Spinner frame, advanced on every tick while requests are in flight.
    pub spinner: usize,
}

impl AppState {
    pub fn new(order: SortOrder) -> Self {
        Self {
            mode: Mode::default(),
            store: CommentStore::new(order),
            list_state: ListState::default(),
            list_viewport_height: 0,
            help_scroll: 0,
            in_flight: 0,
            last_error: None,
            spinner: 0,
        }
    }

    /// Id of the selected comment, if the selection points at one.
    pub fn selected_id(&self) -> Option<CommentId> {
        let idx = self.list_state.selected()?;
        self.store.comments().get(idx).map(|c| c.id.clone())
    }

    pub fn select_next(&mut self, n: usize) {
        let len = self.store.comments().len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let next = self.list_state.selected().map_or(0, |i| i.saturating_add(n));
        self.list_state.select(Some(next.min(len - 1)));
    }

    pub fn select_prev(&mut self, n: usize) {
        if self.store.comments().is_empty() {
            self.list_state.select(None);
            return;
        }
        let prev = self.list_state.selected().map_or(0, |i| i.saturating_sub(n));
        self.list_state.select(Some(prev));
    }

    pub fn select_first(&mut self) {
        if !self.store.comments().is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let len = self.store.comments().len();
        if len > 0 {
            self.list_state.select(Some(len - 1));
        }
    }

    /// Half the cached list height, at least one row.
    pub fn half_page(&self) -> usize {
        usize::from(self.list_viewport_height / 2).max(1)
    }

    pub fn tick(&mut self) {
        if self.in_flight > 0 {
            self.spinner = self.spinner.wrapping_add(1);
        }
    }

    /// Records that a request was handed to the network worker.
    pub fn note_dispatched(&mut self) {
        self.in_flight += 1;
    }

    /// Applies a finished request to the store and fixes up view state.
    ///
    /// Keeps the selection on the same comment id when it survives the new
    /// snapshot, and drops out of `Edit` mode once the session is gone.
    pub fn apply_completion(&mut self, completion: Completion) -> Applied {
        self.in_flight = self.in_flight.saturating_sub(1);
        let selected = self.selected_id();

        let applied = self.store.apply(completion);

        match &applied.error {
            Some(msg) => self.last_error = Some(msg.clone()),
            None => self.last_error = None,
        }
        if applied.snapshot_replaced {
            self.reselect(selected.as_ref());
        }
        if self.mode == Mode::Edit && self.store.edit_session().is_none() {
            self.mode = Mode::Normal;
        }
        applied
    }

    fn reselect(&mut self, previous: Option<&CommentId>) {
        let comments = self.store.comments();
        if comments.is_empty() {
            self.list_state.select(None);
            return;
        }
        let by_id = previous.and_then(|id| comments.iter().position(|c| &c.id == id));
        let fallback = self.list_state.selected().unwrap_or(0).min(comments.len() - 1);
        self.list_state.select(Some(by_id.unwrap_or(fallback)));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SortOrder::default())
    }
}
