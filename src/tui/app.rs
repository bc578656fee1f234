use std::time::Instant;

use ratatui::widgets::TableState;

use crate::advisory::{Advisory, AdvisoryLevel};
use crate::output::format_value;
use crate::report::Report;
use crate::simulation::{Adjusted, ParamField, SimulationParams};
use crate::tui::theme::ThemeColors;

const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Table,
    Charts,
    Projection,
    Report,
}

impl View {
    pub const ALL: [View; 4] = [View::Table, View::Charts, View::Projection, View::Report];

    pub fn title(&self) -> &'static str {
        match self {
            View::Table => "Table",
            View::Charts => "Charts",
            View::Projection => "Projection",
            View::Report => "Report",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            View::Table => 0,
            View::Charts => 1,
            View::Projection => 2,
            View::Report => 3,
        }
    }

    fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    EditValue,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Info,
    Success,
    Warning,
    Error,
}

pub struct App {
    pub report: Report,
    /// Parameters the session started with, restored by reset
    pub initial_params: SimulationParams,
    pub advisories: Vec<Advisory>,
    pub colors: ThemeColors,
    pub current_view: View,
    pub selected_field: ParamField,
    pub input_mode: InputMode,
    pub edit_input: String,
    pub flash_message: Option<(String, FlashKind, Instant)>,
    pub table_state: TableState,
    pub projection_state: TableState,
    pub narrative_scroll: u16,
    pub should_quit: bool,
}

impl App {
    pub fn new(report: Report, advisories: Vec<Advisory>, colors: ThemeColors) -> Self {
        let mut table_state = TableState::default();
        if !report.table.is_empty() {
            table_state.select(Some(0));
        }
        let mut projection_state = TableState::default();
        if !report.projection.is_empty() {
            projection_state.select(Some(0));
        }

        // Surface the first data notice in the status bar on startup
        let flash_message = advisories.first().map(|advisory| {
            let kind = match advisory.level {
                AdvisoryLevel::Info => FlashKind::Info,
                AdvisoryLevel::Warning => FlashKind::Warning,
            };
            (advisory.to_string(), kind, Instant::now())
        });

        Self {
            initial_params: report.params,
            report,
            advisories,
            colors,
            current_view: View::Table,
            selected_field: ParamField::InitialVolume,
            input_mode: InputMode::Normal,
            edit_input: String::new(),
            flash_message,
            table_state,
            projection_state,
            narrative_scroll: 0,
            should_quit: false,
        }
    }

    pub fn params(&self) -> SimulationParams {
        self.report.params
    }

    pub fn update_flash(&mut self) {
        if let Some((_, _, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String, kind: FlashKind) {
        self.flash_message = Some((msg, kind, Instant::now()));
    }

    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    pub fn previous_view(&mut self) {
        self.current_view = self.current_view.previous();
    }

    pub fn select_view(&mut self, view: View) {
        self.current_view = view;
    }

    pub fn next_field(&mut self) {
        self.selected_field = self.selected_field.next();
    }

    pub fn previous_field(&mut self) {
        self.selected_field = self.selected_field.previous();
    }

    /// Move the selected parameter by whole steps and re-project.
    pub fn step_selected(&mut self, steps: i32) {
        let adjusted = self.params().stepped(self.selected_field, steps);
        self.apply(self.selected_field, adjusted);
    }

    pub fn reset_params(&mut self) {
        self.report.set_params(self.initial_params);
        self.clamp_projection_selection();
        self.show_flash("Parameters reset".to_string(), FlashKind::Success);
    }

    /// Start typing a new value for the selected parameter
    pub fn start_edit(&mut self) {
        self.input_mode = InputMode::EditValue;
        self.edit_input = format_value(self.params().value(self.selected_field));
    }

    pub fn confirm_edit(&mut self) {
        let input = self.edit_input.trim().trim_end_matches('%').trim().to_string();
        self.input_mode = InputMode::Normal;
        self.edit_input.clear();

        match input.parse::<f64>() {
            Ok(value) if value.is_finite() => {
                let adjusted = self.params().with_value(self.selected_field, value);
                self.apply(self.selected_field, adjusted);
            }
            _ => self.show_flash(format!("Not a number: '{}'", input), FlashKind::Error),
        }
    }

    pub fn cancel_edit(&mut self) {
        self.input_mode = InputMode::Normal;
        self.edit_input.clear();
    }

    fn apply(&mut self, field: ParamField, adjusted: Adjusted) {
        let value = format_value(adjusted.params.value(field));
        if adjusted.params != self.params() {
            self.report.set_params(adjusted.params);
            self.clamp_projection_selection();
        }

        if adjusted.clamped {
            tracing::debug!(field = field.label(), %value, "parameter clamped");
            self.show_flash(
                format!("{} clamped to {}", field.label(), value),
                FlashKind::Warning,
            );
        } else {
            self.show_flash(format!("{}: {}", field.label(), value), FlashKind::Success);
        }
    }

    fn clamp_projection_selection(&mut self) {
        let len = self.report.projection.len();
        match self.projection_state.selected() {
            _ if len == 0 => self.projection_state.select(None),
            Some(i) if i >= len => self.projection_state.select(Some(len - 1)),
            None => self.projection_state.select(Some(0)),
            Some(_) => {}
        }
    }

    /// Move down within the current view: rows in the tables, lines in the report
    pub fn scroll_down(&mut self) {
        match self.current_view {
            View::Table => next_row(&mut self.table_state, self.report.table.len()),
            View::Projection => next_row(&mut self.projection_state, self.report.projection.len()),
            View::Report => {
                let max = u16::try_from(self.report.narrative.lines().count()).unwrap_or(u16::MAX);
                self.narrative_scroll = self.narrative_scroll.saturating_add(1).min(max);
            }
            View::Charts => {}
        }
    }

    pub fn scroll_up(&mut self) {
        match self.current_view {
            View::Table => previous_row(&mut self.table_state, self.report.table.len()),
            View::Projection => {
                previous_row(&mut self.projection_state, self.report.projection.len())
            }
            View::Report => self.narrative_scroll = self.narrative_scroll.saturating_sub(1),
            View::Charts => {}
        }
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

fn next_row(state: &mut TableState, len: usize) {
    if len == 0 {
        return;
    }
    let i = match state.selected() {
        Some(i) if i + 1 < len => i + 1,
        _ => 0,
    };
    state.select(Some(i));
}

fn previous_row(state: &mut TableState, len: usize) {
    if len == 0 {
        return;
    }
    let i = match state.selected() {
        Some(0) | None => len - 1,
        Some(i) => i - 1,
    };
    state.select(Some(i));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::default_table;

    fn app() -> App {
        let report = Report::build(
            default_table(),
            "line one\nline two".to_string(),
            SimulationParams::default(),
        );
        App::new(report, Vec::new(), ThemeColors::dark())
    }

    #[test]
    fn test_first_advisory_is_flashed() {
        let report = Report::build(default_table(), String::new(), SimulationParams::default());
        let app = App::new(
            report,
            vec![Advisory::warning("table rejected"), Advisory::info("no report")],
            ThemeColors::dark(),
        );
        let (msg, kind, _) = app.flash_message.clone().unwrap();
        assert_eq!(msg, "warning: table rejected");
        assert_eq!(kind, FlashKind::Warning);
    }

    #[test]
    fn test_view_cycle() {
        let mut app = app();
        app.previous_view();
        assert_eq!(app.current_view, View::Report);
        app.next_view();
        app.next_view();
        assert_eq!(app.current_view, View::Charts);
    }

    #[test]
    fn test_step_reprojects() {
        let mut app = app();
        app.selected_field = ParamField::Horizon;
        app.step_selected(1);
        assert_eq!(app.params().horizon_years, 6);
        assert_eq!(app.report.projection.len(), 6);
        assert!(matches!(
            app.flash_message,
            Some((_, FlashKind::Success, _))
        ));
    }

    #[test]
    fn test_edit_out_of_range_is_clamped_and_flagged() {
        let mut app = app();
        app.selected_field = ParamField::Horizon;
        app.start_edit();
        assert_eq!(app.input_mode, InputMode::EditValue);
        assert_eq!(app.edit_input, "5");

        app.edit_input = "40".to_string();
        app.confirm_edit();

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.params().horizon_years, 15);
        assert_eq!(app.report.projection.len(), 15);
        let (msg, kind, _) = app.flash_message.clone().unwrap();
        assert_eq!(kind, FlashKind::Warning);
        assert!(msg.contains("clamped to 15"));
    }

    #[test]
    fn test_edit_growth_accepts_percent() {
        let mut app = app();
        app.selected_field = ParamField::GrowthPct;
        app.start_edit();
        app.edit_input = "12.5%".to_string();
        app.confirm_edit();
        assert_eq!(app.params().growth_pct, 12.5);
    }

    #[test]
    fn test_edit_rejects_garbage() {
        let mut app = app();
        app.start_edit();
        app.edit_input = "abc".to_string();
        app.confirm_edit();
        assert_eq!(app.params(), SimulationParams::default());
        assert!(matches!(app.flash_message, Some((_, FlashKind::Error, _))));
    }

    #[test]
    fn test_reset_restores_initial_params() {
        let mut app = app();
        app.step_selected(3);
        assert_eq!(app.params().initial_volume_tb, 130.0);
        app.reset_params();
        assert_eq!(app.params(), SimulationParams::default());
    }

    #[test]
    fn test_projection_selection_follows_horizon() {
        let mut app = app();
        app.current_view = View::Projection;
        app.scroll_up();
        assert_eq!(app.projection_state.selected(), Some(4));

        app.selected_field = ParamField::Horizon;
        app.start_edit();
        app.edit_input = "2".to_string();
        app.confirm_edit();
        assert_eq!(app.projection_state.selected(), Some(1));
    }

    #[test]
    fn test_row_navigation_wraps() {
        let mut app = app();
        app.scroll_up();
        assert_eq!(app.table_state.selected(), Some(3));
        app.scroll_down();
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn test_narrative_scroll_is_bounded() {
        let mut app = app();
        app.current_view = View::Report;
        app.scroll_up();
        assert_eq!(app.narrative_scroll, 0);
        for _ in 0..10 {
            app.scroll_down();
        }
        assert_eq!(app.narrative_scroll, 2);
    }

    #[test]
    fn test_narrative_scroll_saturates_on_long_documents() {
        let report = Report::build(
            default_table(),
            "line\n".repeat(70_000),
            SimulationParams::default(),
        );
        let mut app = App::new(report, Vec::new(), ThemeColors::dark());
        app.current_view = View::Report;
        app.narrative_scroll = u16::MAX;

        app.scroll_down();
        assert_eq!(app.narrative_scroll, u16::MAX);
    }
}
