//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::config::ThemeMode;

/// Which palette to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Score-based colors (traffic light pattern)
    pub score_high: Color,
    pub score_mid: Color,
    pub score_low: Color,

    /// One color per technology, cycled for tables with more rows
    pub series: Vec<Color>,
    pub bar_empty: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub header_style: Style,
    pub row_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub not_applicable: Color,

    // Tab colors
    pub tab_active_style: Style,
    pub tab_inactive_style: Style,

    // Parameter panel
    pub field_selected: Style,
    pub field_editing: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_warning: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            score_high: Color::Green,
            score_mid: Color::Yellow,
            score_low: Color::Red,
            series: vec![
                Color::Cyan,
                Color::Magenta,
                Color::Yellow,
                Color::Green,
                Color::Blue,
                Color::Red,
            ],
            bar_empty: Color::DarkGray,
            row_alt_bg: Color::Indexed(235),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            not_applicable: Color::DarkGray,
            tab_active_style: Style::new().fg(Color::Cyan).bold(),
            tab_inactive_style: Style::new().fg(Color::DarkGray),
            field_selected: Style::new().fg(Color::Cyan).bold(),
            field_editing: Style::new().fg(Color::Black).bg(Color::Cyan),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_warning: Color::Yellow,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
        }
    }

    pub fn light() -> Self {
        Self {
            score_high: Color::Rgb(0, 120, 0),
            score_mid: Color::Rgb(160, 110, 0),
            score_low: Color::Rgb(180, 0, 0),
            series: vec![
                Color::Rgb(0, 90, 160),
                Color::Rgb(150, 0, 130),
                Color::Rgb(160, 110, 0),
                Color::Rgb(0, 120, 0),
                Color::Rgb(40, 40, 200),
                Color::Rgb(180, 0, 0),
            ],
            bar_empty: Color::Indexed(250),
            row_alt_bg: Color::Indexed(254),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Indexed(242),
            title_color: Color::Rgb(0, 90, 160),
            not_applicable: Color::Indexed(245),
            tab_active_style: Style::new().fg(Color::Rgb(0, 90, 160)).bold(),
            tab_inactive_style: Style::new().fg(Color::Indexed(245)),
            field_selected: Style::new().fg(Color::Rgb(0, 90, 160)).bold(),
            field_editing: Style::new().fg(Color::White).bg(Color::Rgb(0, 90, 160)),
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Rgb(0, 90, 160),
            flash_success: Color::Rgb(0, 120, 0),
            flash_warning: Color::Rgb(160, 110, 0),
            flash_error: Color::Rgb(180, 0, 0),
            popup_border: Color::Rgb(0, 90, 160),
            popup_title: Style::new().fg(Color::Rgb(0, 90, 160)).bold(),
            popup_bg: Color::Indexed(255),
        }
    }

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    /// Color for the technology at `index` in the table
    pub fn series_color(&self, index: usize) -> Color {
        self.series[index % self.series.len()]
    }

    /// Returns the appropriate color for a 0-5 score
    pub fn score_color(&self, score: f64) -> Color {
        if score >= 4.0 {
            self.score_high
        } else if score >= 2.5 {
            self.score_mid
        } else {
            self.score_low
        }
    }
}

/// Resolve the configured theme mode, probing the terminal for `auto`.
///
/// Must be called before the terminal enters raw mode.
pub fn resolve_theme(mode: ThemeMode) -> Theme {
    match mode {
        ThemeMode::Dark => Theme::Dark,
        ThemeMode::Light => Theme::Light,
        ThemeMode::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Theme::Light,
            Ok(_) => Theme::Dark,
            Err(e) => {
                tracing::debug!(error = %e, "could not detect terminal background");
                Theme::Dark
            }
        },
    }
}
