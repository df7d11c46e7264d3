//! UI rendering for board.
//!
//! `render()` is the single entry point called from the event loop's
//! `terminal.draw()` closure. Layout arithmetic lives in `layout.rs`, the
//! cards and compose box in `comment_list.rs`.

pub mod comment_list;
pub mod help;
pub mod keybindings;
mod layout;

use ratatui::Frame;

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, render_status_bar, render_title};

/// Renders one complete frame.
///
/// The list's inner height is cached in `state` for the next keypress's
/// half-page movement.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let [title, compose, list, status_bar] = compute_layout(frame);

    state.list_viewport_height = inner_rect(list).height;

    render_title(frame, title, theme);
    comment_list::render_compose(frame, compose, state, theme);
    comment_list::render_comments(frame, list, state, theme);
    render_status_bar(frame, status_bar, state, theme);

    if state.mode == Mode::HelpOverlay {
        help::render_help_overlay(frame, theme, state.help_scroll);
    }
}
