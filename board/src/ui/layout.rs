//! Layout arithmetic and shared widgets for board.
//!
//! Called inside `terminal.draw()` on every render so every frame reflects the
//! current terminal size. No state lives here.
//!
//! ```text
//! ┌ title ─────────────────────────┐  1 row
//! ┌ New comment ───────────────────┐  3 rows
//! ┌ Comments (N) ──────────────────┐  fill
//! status bar                          1 row
//! ```

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

/// Returns `[title, compose, list, status_bar]` for the current frame.
pub fn compute_layout(frame: &Frame) -> [Rect; 4] {
    let [title, compose, list, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());
    [title, compose, list, status]
}

/// Area inside a 1-cell border.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Bordered block; thick border when the panel has focus.
pub fn panel_block<'a>(title: &'a str, is_focused: bool, theme: &'a Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
}

pub fn render_title(frame: &mut Frame, area: Rect, theme: &Theme) {
    let title = Line::from(Span::styled(
        "Community Comments",
        Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
    ))
    .centered();
    frame.render_widget(Paragraph::new(title), area);
}

/// The 1-row status bar: mode, in-flight indicator, sort order, last error.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (mode_text, mode_fg) = match state.mode {
        Mode::Compose => (" COMPOSE ", theme.status_mode_insert),
        Mode::Edit => (" EDIT ", theme.status_mode_insert),
        Mode::Normal | Mode::HelpOverlay | Mode::ConfirmQuit => {
            (" NORMAL ", theme.status_mode_normal)
        }
    };

    let mut spans = vec![Span::styled(
        mode_text,
        Style::default().fg(mode_fg).add_modifier(Modifier::BOLD),
    )];

    if state.in_flight > 0 {
        let frame_glyph = SPINNER[state.spinner % SPINNER.len()];
        spans.push(Span::raw(format!(" {frame_glyph} {} pending ", state.in_flight)));
    }

    spans.push(Span::raw(format!(" sort: {} ", state.store.order().label())));

    match (&state.last_error, state.mode) {
        (_, Mode::ConfirmQuit) => spans.push(Span::styled(
            " Unsaved text will be lost. Quit? (y/n) ",
            Style::default().fg(theme.status_error).add_modifier(Modifier::BOLD),
        )),
        (Some(err), _) => spans.push(Span::styled(
            format!(" {err} "),
            Style::default().fg(theme.status_error),
        )),
        (None, _) => spans.push(Span::raw(" ? help ")),
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
