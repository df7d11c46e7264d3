//! Keybinding dispatcher for board.
//!
//! Translates crossterm key and mouse events into `AppState` mutations and
//! returns a `KeyAction` telling the event loop what to do next. Requests for
//! the comments service are returned rather than sent, so the dispatcher stays
//! free of channels and can be exercised directly in tests.

use board_core::Request;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{AppState, Mode};

/// Control-flow signal returned from the dispatcher.
#[derive(Debug)]
pub enum KeyAction {
    /// Nothing further to do; redraw on the next render tick.
    Continue,
    /// Hand this request to the network worker.
    Dispatch(Request),
    /// Exit the event loop.
    Quit,
}

/// Dispatches a key event to the handler for the current mode.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    // Ctrl-c always quits, whatever is being typed.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::ConfirmQuit => handle_confirm_quit(key, state),
        Mode::Normal => handle_normal(key, state),
        Mode::Compose => handle_compose(key, state),
        Mode::Edit => handle_edit(key, state),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if let Some(action) = handle_scroll_key(key, state) {
        return action;
    }

    match key.code {
        KeyCode::Char('a') | KeyCode::Char('i') => {
            state.mode = Mode::Compose;
            KeyAction::Continue
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(id) = state.selected_id() {
                if state.store.start_edit(&id) {
                    state.mode = Mode::Edit;
                }
            }
            KeyAction::Continue
        }
        KeyCode::Char('d') => match state.selected_id() {
            Some(id) => KeyAction::Dispatch(state.store.begin_delete(&id)),
            None => KeyAction::Continue,
        },
        KeyCode::Char('r') => KeyAction::Dispatch(state.store.begin_refresh()),
        KeyCode::Char('s') => {
            let next = state.store.order().next();
            state.store.set_order(next);
            KeyAction::Dispatch(state.store.begin_refresh())
        }
        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
            KeyAction::Continue
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            if state.store.has_unsaved_input() {
                state.mode = Mode::ConfirmQuit;
                KeyAction::Continue
            } else {
                KeyAction::Quit
            }
        }
        _ => KeyAction::Continue,
    }
}

/// Selection movement: j / k / g / G / arrows / Ctrl-d / Ctrl-u.
///
/// Returns `None` when the key is not a scroll key.
fn handle_scroll_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.select_next(1),
        KeyCode::Char('k') | KeyCode::Up => state.select_prev(1),
        KeyCode::Char('g') | KeyCode::Home => state.select_first(),
        KeyCode::Char('G') | KeyCode::End => state.select_last(),
        KeyCode::Char('d') if ctrl => state.select_next(state.half_page()),
        KeyCode::Char('u') if ctrl => state.select_prev(state.half_page()),
        _ => return None,
    }
    Some(KeyAction::Continue)
}

// ---------------------------------------------------------------------------
// Text entry
// ---------------------------------------------------------------------------

/// Applies an editing key to `buf`. Returns `false` if the key is not an edit key.
fn edit_buffer(key: KeyEvent, buf: &mut String) -> bool {
    match key.code {
        KeyCode::Char(c) => buf.push(c),
        KeyCode::Backspace => {
            buf.pop();
        }
        _ => return false,
    }
    true
}

/// New-comment box. `Enter` submits; `Esc` leaves the draft in place.
fn handle_compose(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            state.mode = Mode::Normal;
            KeyAction::Continue
        }
        KeyCode::Enter => match state.store.submit_draft() {
            Some(request) => {
                state.mode = Mode::Normal;
                KeyAction::Dispatch(request)
            }
            None => KeyAction::Continue,
        },
        _ => {
            edit_buffer(key, state.store.draft_mut());
            KeyAction::Continue
        }
    }
}

/// Inline editor. `Enter` saves; `Esc` cancels the session.
///
/// After `Enter` the mode stays `Edit` until the update is acknowledged, so a
/// failed save leaves the user where they were.
fn handle_edit(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            state.store.cancel_edit();
            state.mode = Mode::Normal;
            KeyAction::Continue
        }
        KeyCode::Enter => match state.store.begin_save_edit() {
            Some(request) => KeyAction::Dispatch(request),
            None => {
                state.mode = Mode::Normal;
                KeyAction::Continue
            }
        },
        _ => {
            if let Some(session) = state.store.edit_session_mut() {
                edit_buffer(key, &mut session.edit_text);
            } else {
                state.mode = Mode::Normal;
            }
            KeyAction::Continue
        }
    }
}

// ---------------------------------------------------------------------------
// HelpOverlay / ConfirmQuit
// ---------------------------------------------------------------------------

fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') => state.help_scroll = state.help_scroll.saturating_add(1),
        KeyCode::Char('k') => state.help_scroll = state.help_scroll.saturating_sub(1),
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}

/// `y` quits and drops unsaved text; `n` / `Esc` returns to Normal.
fn handle_confirm_quit(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => KeyAction::Quit,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.mode = Mode::Normal;
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Scroll wheel moves the selection (or scrolls help when it is open).
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    let help = state.mode == Mode::HelpOverlay;
    match mouse.kind {
        MouseEventKind::ScrollUp if help => state.help_scroll = state.help_scroll.saturating_sub(3),
        MouseEventKind::ScrollDown if help => state.help_scroll = state.help_scroll.saturating_add(3),
        MouseEventKind::ScrollUp => state.select_prev(1),
        MouseEventKind::ScrollDown => state.select_next(1),
        _ => {}
    }
    KeyAction::Continue
}
