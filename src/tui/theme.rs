//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::config::Theme;
use crate::scoring::{Leaning, OverallLabel};

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Leaning colors
    pub progressive: Color,
    pub moderate: Color,
    pub conservative: Color,
    pub mixed: Color,

    // Bars
    pub bar_empty: Color,
    pub gauge: Color,

    // Question card
    pub category: Color,
    pub option_key: Color,
    pub option_selected: Style,

    pub title_style: Style,
    pub muted: Color,
    pub title_color: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay
    pub popup_border: Color,
    pub popup_title: Style,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            progressive: Color::LightBlue,
            moderate: Color::Green,
            conservative: Color::LightRed,
            mixed: Color::Yellow,
            bar_empty: Color::DarkGray,
            gauge: Color::Cyan,
            category: Color::Cyan,
            option_key: Color::Cyan,
            option_selected: Style::new().fg(Color::Black).bg(Color::Cyan).bold(),
            title_style: Style::new().bold(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
        }
    }

    pub fn light() -> Self {
        Self {
            progressive: Color::Blue,
            moderate: Color::Indexed(28),
            conservative: Color::Red,
            mixed: Color::Indexed(130),
            bar_empty: Color::Indexed(250),
            gauge: Color::Blue,
            category: Color::Blue,
            option_key: Color::Blue,
            option_selected: Style::new().fg(Color::White).bg(Color::Blue).bold(),
            title_style: Style::new().bold(),
            muted: Color::Indexed(243),
            title_color: Color::Blue,
            status_bar_bg: Color::Indexed(254),
            status_key_color: Color::Blue,
            flash_success: Color::Indexed(28),
            flash_error: Color::Red,
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
        }
    }

    pub fn leaning_color(&self, leaning: Leaning) -> Color {
        match leaning {
            Leaning::VeryProgressive | Leaning::Progressive => self.progressive,
            Leaning::Moderate => self.moderate,
            Leaning::Conservative | Leaning::VeryConservative => self.conservative,
        }
    }

    pub fn overall_color(&self, label: OverallLabel) -> Color {
        match label {
            OverallLabel::Leaning(leaning) => self.leaning_color(leaning),
            OverallLabel::Mixed => self.mixed,
        }
    }
}

/// Pick the palette for the configured theme. `Auto` asks the terminal for its
/// background luminance and falls back to dark when it can't tell.
pub fn resolve_theme(theme: Theme) -> ThemeColors {
    match theme {
        Theme::Dark => ThemeColors::dark(),
        Theme::Light => ThemeColors::light(),
        Theme::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            Ok(_) => ThemeColors::dark(),
            Err(e) => {
                log::debug!("Could not detect terminal background: {}", e);
                ThemeColors::dark()
            }
        },
    }
}
