//! Help overlay for board.
//!
//! Drawn last inside the same `terminal.draw()` closure, after a `Clear` over
//! its area, so it sits on top of the cards.

use ratatui::{
    Frame,
    layout::Constraint,
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the centred help modal, scrolled by `help_scroll` rows.
///
/// Skipped on terminals narrower than 40 columns.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 40 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(70), Constraint::Percentage(80));

    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help — j/k scroll, ? or Esc to dismiss ")
        .border_style(Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text(theme))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn build_help_text(theme: &Theme) -> Text<'static> {
    let heading = |s: &'static str| {
        Line::styled(s, Style::default().fg(theme.title).add_modifier(Modifier::BOLD))
    };
    Text::from(vec![
        heading("Comments"),
        Line::from("  j / k         Select next / previous comment"),
        Line::from("  g / G         Jump to first / last comment"),
        Line::from("  Ctrl-d / u    Move half a page down / up"),
        Line::from("  e / Enter     Edit selected comment"),
        Line::from("  d             Delete selected comment"),
        Line::from("  r             Reload comments from the server"),
        Line::from("  s             Cycle sort order and reload"),
        Line::from(""),
        heading("New comment"),
        Line::from("  a / i         Start typing a new comment"),
        Line::from("  Enter         Post (blank text is ignored)"),
        Line::from("  Esc           Stop typing, keep the draft"),
        Line::from(""),
        heading("Editing"),
        Line::from("  Enter         Save changes"),
        Line::from("  Esc           Discard changes"),
        Line::from(""),
        heading("General"),
        Line::from("  ?             Open / close this help"),
        Line::from("  q / Esc       Quit (asks first if text is unsaved)"),
        Line::from("  Ctrl-c        Quit immediately"),
    ])
}
