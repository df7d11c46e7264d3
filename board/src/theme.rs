//! Color themes for board.
//!
//! - `dark` — ANSI 16 colors only, safe on any terminal.
//! - `catppuccin_mocha` — Catppuccin Mocha palette in RGB; needs truecolor.

use ratatui::style::Color;

/// Every color board draws with.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border of the panel that has keyboard focus.
    pub border_active: Color,
    pub border_inactive: Color,

    // Comment cards
    pub title: Color,
    /// Background of the single-letter avatar.
    pub avatar_bg: Color,
    pub avatar_fg: Color,
    pub author: Color,
    pub timestamp: Color,
    pub body: Color,
    pub image_link: Color,
    /// Heart and like count.
    pub likes: Color,
    /// Highlight for the selected card.
    pub selection_bg: Color,
    /// Text of a comment currently being edited.
    pub editing: Color,
    pub placeholder: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub status_mode_normal: Color,
    pub status_mode_insert: Color,
    pub status_error: Color,
}

impl Theme {
    /// ANSI 16-color theme.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            title: Color::White,
            avatar_bg: Color::Red,
            avatar_fg: Color::White,
            author: Color::White,
            timestamp: Color::DarkGray,
            body: Color::Reset,
            image_link: Color::Blue,
            likes: Color::Red,
            selection_bg: Color::Black,
            editing: Color::Yellow,
            placeholder: Color::DarkGray,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_normal: Color::Cyan,
            status_mode_insert: Color::Green,
            status_error: Color::LightRed,
        }
    }

    /// Catppuccin Mocha palette.
    pub fn catppuccin_mocha() -> Self {
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface0 = Color::Rgb(49, 50, 68); //    #313244
        let surface1 = Color::Rgb(69, 71, 90); //    #45475a
        let text = Color::Rgb(205, 214, 244); //     #cdd6f4
        let subtext0 = Color::Rgb(166, 173, 200); // #a6adc8
        let red = Color::Rgb(243, 139, 168); //      #f38ba8
        let green = Color::Rgb(166, 227, 161); //    #a6e3a1
        let yellow = Color::Rgb(249, 226, 175); //   #f9e2af
        let blue = Color::Rgb(137, 180, 250); //     #89b4fa
        let crust = Color::Rgb(17, 17, 27); //       #11111b

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            title: lavender,
            avatar_bg: red,
            avatar_fg: crust,
            author: text,
            timestamp: subtext0,
            body: text,
            image_link: blue,
            likes: red,
            selection_bg: surface0,
            editing: yellow,
            placeholder: overlay1,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode_normal: lavender,
            status_mode_insert: green,
            status_error: red,
        }
    }

    /// Resolves a theme name from config. Unknown names fall back to `dark`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }
}
