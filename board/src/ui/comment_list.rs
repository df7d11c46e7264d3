//! Comment cards and the new-comment box.
//!
//! Each comment renders as a multi-line `ListItem`:
//!
//! ```text
//!  A  Admin · 2024-03-01 10:00:00
//!     [image] https://via.placeholder.com/150
//!     comment text, wrapped line by line
//!     ♥ 3 Likes
//! ```
//!
//! The comment under edit shows the session's working text with a cursor.

use board_core::{Comment, EditSession};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use crate::ui::layout::panel_block;

const INDENT: &str = "    ";

/// Renders the comment list with the current selection highlighted.
pub fn render_comments(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let count = state.store.comments().len();
    let title = if count > 0 { format!("Comments ({count})") } else { "Comments".to_owned() };
    let focused = matches!(state.mode, Mode::Normal | Mode::Edit);
    let block = panel_block(&title, focused, theme);

    let edit = state.store.edit_session();
    let items: Vec<ListItem> = if count == 0 {
        let msg = if state.in_flight > 0 { "Loading..." } else { "No comments yet" };
        vec![ListItem::new(Line::styled(msg, Style::default().fg(theme.placeholder)))]
    } else {
        state
            .store
            .comments()
            .iter()
            .map(|c| comment_card(c, edit.filter(|s| s.is_editing(&c.id)), theme))
            .collect()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme.selection_bg));

    frame.render_stateful_widget(list, area, &mut state.list_state);
}

/// Builds the card for one comment.
fn comment_card(c: &Comment, edit: Option<&EditSession>, theme: &Theme) -> ListItem<'static> {
    let mut lines = Vec::new();

    let avatar = Span::styled(
        format!(" {} ", c.avatar_initial()),
        Style::default()
            .bg(theme.avatar_bg)
            .fg(theme.avatar_fg)
            .add_modifier(Modifier::BOLD),
    );
    let mut header = vec![
        avatar,
        Span::raw(" "),
        Span::styled(
            c.author_or_unknown().to_owned(),
            Style::default().fg(theme.author).add_modifier(Modifier::BOLD),
        ),
    ];
    let date = c.display_date();
    if !date.is_empty() {
        header.push(Span::styled(format!(" · {date}"), Style::default().fg(theme.timestamp)));
    }
    lines.push(Line::from(header));

    if let Some(url) = c.image_url() {
        lines.push(Line::from(vec![
            Span::raw(INDENT),
            Span::styled(format!("[image] {url}"), Style::default().fg(theme.image_link)),
        ]));
    }

    match edit {
        Some(session) => {
            let style = Style::default().fg(theme.editing);
            let mut body: Vec<&str> = session.edit_text.split('\n').collect();
            let last = body.pop().unwrap_or_default();
            for line in body {
                lines.push(Line::from(vec![Span::raw(INDENT), Span::styled(line.to_owned(), style)]));
            }
            lines.push(Line::from(vec![
                Span::raw(INDENT),
                Span::styled(format!("{last}▏"), style),
                Span::styled("  Enter save · Esc cancel", Style::default().fg(theme.placeholder)),
            ]));
        }
        None => {
            for line in c.text.lines() {
                lines.push(Line::from(vec![
                    Span::raw(INDENT),
                    Span::styled(line.to_owned(), Style::default().fg(theme.body)),
                ]));
            }
        }
    }

    lines.push(Line::from(vec![
        Span::raw(INDENT),
        Span::styled("♥ ", Style::default().fg(theme.likes)),
        Span::styled(format!("{} Likes", c.likes), Style::default().fg(theme.timestamp)),
    ]));
    lines.push(Line::raw(""));

    ListItem::new(lines)
}

/// Renders the new-comment box from the store's draft.
pub fn render_compose(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let composing = state.mode == Mode::Compose;
    let block = panel_block("New comment", composing, theme);
    let draft = state.store.draft();

    let line = if draft.is_empty() && !composing {
        Line::styled("Add a comment... (press a)", Style::default().fg(theme.placeholder))
    } else if composing {
        Line::from(vec![
            Span::raw(draft.to_owned()),
            Span::styled("▏", Style::default().fg(theme.border_active)),
        ])
    } else {
        Line::raw(draft.to_owned())
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}
