use std::f64::consts::PI;

use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};
use ratatui::widgets::{
    Bar, BarChart, BarGroup, Block, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap,
};

use crate::advisory::AdvisoryLevel;
use crate::output::{format_hours, format_rounded, format_value, NOT_APPLICABLE};
use crate::report::{BarSeries, CONCLUSIONS, INTERPRETATION};
use crate::scoring::{RadarSeries, RADAR_CATEGORIES, SCORE_MAX};
use crate::simulation::ParamField;
use crate::tui::app::{App, FlashKind, InputMode, View};
use crate::tui::theme::ThemeColors;

/// BarChart takes integer values; bars are scaled so the largest is this tall
const BAR_RESOLUTION: f64 = 1000.0;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 10 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Params(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Length(1), // Tab bar
        Constraint::Length(1), // Parameter panel
        Constraint::Fill(1),   // Current view
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    render_params(frame, chunks[2], app);
    match app.current_view {
        View::Table => render_table(frame, chunks[3], app),
        View::Charts => render_charts(frame, chunks[3], app),
        View::Projection => render_projection(frame, chunks[3], app),
        View::Report => render_report(frame, chunks[3], app),
    }
    render_status_bar(frame, chunks[4], app);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, &app.colors);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let title = "Storage Report";
    let mut spans = vec![Span::styled(
        title,
        Style::default().fg(app.colors.title_color).bold(),
    )];

    let notes = app.advisories.len();
    if notes > 0 {
        let text = if notes == 1 {
            "1 data notice (see Report)".to_string()
        } else {
            format!("{} data notices (see Report)", notes)
        };
        let padding_len = (area.width as usize).saturating_sub(title.len() + text.len());
        spans.push(Span::raw(" ".repeat(padding_len)));
        spans.push(Span::styled(text, Style::default().fg(app.colors.flash_warning)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<String> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| format!("{} {}", i + 1, view.title()))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current_view.index())
        .style(app.colors.tab_inactive_style)
        .highlight_style(app.colors.tab_active_style.reversed())
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn render_params(frame: &mut Frame, area: Rect, app: &App) {
    let params = app.params();
    let mut spans = Vec::new();

    for (i, field) in ParamField::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  |  ", Style::default().fg(app.colors.muted)));
        }
        let selected = *field == app.selected_field;
        let editing = selected && app.input_mode == InputMode::EditValue;

        let label_style = if selected {
            app.colors.field_selected
        } else {
            Style::default().fg(app.colors.muted)
        };
        spans.push(Span::styled(format!("{}: ", field.label()), label_style));

        if editing {
            spans.push(Span::styled(
                format!("{}|", app.edit_input),
                app.colors.field_editing,
            ));
        } else {
            let value = format_value(params.value(*field));
            let value_style = if selected {
                app.colors.field_selected
            } else {
                Style::default()
            };
            spans.push(Span::styled(value, value_style));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App) {
    let colors = &app.colors;
    let rows: Vec<Row> = app
        .report
        .table
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let mtbf = if record.has_mtbf() {
                Cell::from(format_value(record.mtbf_hours))
            } else {
                Cell::from(NOT_APPLICABLE).style(Style::default().fg(colors.not_applicable))
            };

            // Alternating row background (odd rows get subtle background)
            let row_style = if idx % 2 == 1 {
                Style::default().bg(colors.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(record.name.clone())
                    .style(Style::default().fg(colors.series_color(idx)).bold()),
                Cell::from(format_value(record.read_speed)),
                Cell::from(format_value(record.write_speed)),
                Cell::from(format_value(record.capacity)),
                Cell::from(format_value(record.cost_per_gb)),
                mtbf,
                Cell::from(format_value(record.power_watts)),
                Cell::from(format_value(record.security_score)),
                Cell::from(format_value(record.scalability_score)),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Fill(1),     // Name
        Constraint::Length(8),   // Read MB/s
        Constraint::Length(8),   // Write MB/s
        Constraint::Length(10),  // Capacity TB
        Constraint::Length(8),   // USD/GB
        Constraint::Length(10),  // MTBF h
        Constraint::Length(7),   // Power W
        Constraint::Length(8),   // Security
        Constraint::Length(8),   // Scalability
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec![
                "Technology",
                "Read",
                "Write",
                "Capacity",
                "USD/GB",
                "MTBF h",
                "Power",
                "Security",
                "Scale",
            ])
            .style(colors.header_style)
            .bottom_margin(1),
        )
        .block(Block::bordered().title(" Reference table (MB/s, TB, W, ratings 1-5) "))
        .row_highlight_style(colors.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_charts(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);
    let bar_areas = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(rows[0]);

    for (series, bar_area) in app.report.bars.iter().zip(bar_areas.iter()) {
        render_bar_chart(frame, *bar_area, series, &app.colors);
    }

    let radar_areas =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(44)]).split(rows[1]);
    render_radar(frame, radar_areas[0], &app.report.radar, &app.colors);
    render_radar_scores(frame, radar_areas[1], &app.report.radar, &app.colors);
}

fn render_bar_chart(frame: &mut Frame, area: Rect, series: &BarSeries, colors: &ThemeColors) {
    let max = series.max_value();
    let bars: Vec<Bar> = series
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let scaled = if max > 0.0 {
                (point.value / max * BAR_RESOLUTION).round() as u64
            } else {
                0
            };
            Bar::default()
                .value(scaled)
                .label(Line::from(point.technology.clone()))
                .text_value(format_value(point.value))
                .style(Style::default().fg(colors.series_color(i)))
        })
        .collect();

    let count = bars.len().max(1) as u16;
    let inner_width = area.width.saturating_sub(2);
    let bar_width = (inner_width / count).saturating_sub(1).clamp(1, 9);

    let chart = BarChart::default()
        .block(Block::bordered().title(format!(" {} ", series.metric.title())))
        .bar_width(bar_width)
        .bar_gap(1)
        .max(BAR_RESOLUTION as u64)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

/// Unit-circle point for a radar axis; the first axis points straight up.
fn axis_point(axis: usize, radius: f64) -> (f64, f64) {
    let angle = PI / 2.0 - 2.0 * PI * axis as f64 / RADAR_CATEGORIES.len() as f64;
    (radius * angle.cos(), radius * angle.sin())
}

fn render_radar(frame: &mut Frame, area: Rect, radar: &[RadarSeries], colors: &ThemeColors) {
    let axes = RADAR_CATEGORIES.len();
    let canvas = Canvas::default()
        .block(Block::bordered().title(" Reliability / Scalability / Security (0-5) "))
        .marker(Marker::Braille)
        .x_bounds([-1.6, 1.6])
        .y_bounds([-1.2, 1.3])
        .paint(|ctx| {
            // Grid: one ring per score step, plus the spokes
            for level in 1..=SCORE_MAX as usize {
                let r = level as f64 / SCORE_MAX;
                for axis in 0..axes {
                    let (x1, y1) = axis_point(axis, r);
                    let (x2, y2) = axis_point((axis + 1) % axes, r);
                    ctx.draw(&CanvasLine::new(x1, y1, x2, y2, colors.bar_empty));
                }
            }
            for axis in 0..axes {
                let (x, y) = axis_point(axis, 1.0);
                ctx.draw(&CanvasLine::new(0.0, 0.0, x, y, colors.bar_empty));
            }
            ctx.layer();

            for (i, series) in radar.iter().enumerate() {
                let color = colors.series_color(i);
                for axis in 0..axes {
                    let next = (axis + 1) % axes;
                    let (x1, y1) = axis_point(axis, series.values[axis] / SCORE_MAX);
                    let (x2, y2) = axis_point(next, series.values[next] / SCORE_MAX);
                    ctx.draw(&CanvasLine::new(x1, y1, x2, y2, color));
                }
            }

            for (axis, label) in RADAR_CATEGORIES.iter().enumerate() {
                let (x, y) = axis_point(axis, 1.1);
                let x = if x < 0.0 { x - 0.4 } else { x };
                ctx.print(x, y, Span::styled(*label, Style::default().fg(colors.muted)));
            }
        });

    frame.render_widget(canvas, area);
}

fn render_radar_scores(frame: &mut Frame, area: Rect, radar: &[RadarSeries], colors: &ThemeColors) {
    let rows: Vec<Row> = radar
        .iter()
        .enumerate()
        .map(|(i, series)| {
            let mut cells =
                vec![Cell::from(series.name.clone()).style(Style::default().fg(colors.series_color(i)))];
            cells.extend(series.values.iter().map(|v| {
                Cell::from(format!("{:.1}", v)).style(Style::default().fg(colors.score_color(*v)))
            }));
            Row::new(cells)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Fill(1),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(Row::new(vec!["", "Reliab.", "Scale", "Security"]).style(colors.header_style))
    .block(Block::bordered().title(" Scores "));

    frame.render_widget(table, area);
}

fn render_projection(frame: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(4)]).split(area);
    let colors = &app.colors;
    let projection = &app.report.projection;

    let technologies: Vec<String> = projection
        .first()
        .map(|row| row.transfer.iter().map(|t| t.technology.clone()).collect())
        .unwrap_or_default();

    let mut header = vec!["Year".to_string(), "Volume (TB)".to_string()];
    header.extend(technologies.iter().map(|t| format!("{} (h)", t)));

    let rows: Vec<Row> = projection
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let mut cells = vec![
                Cell::from(row.year.to_string()),
                Cell::from(format_rounded(row.volume_tb)),
            ];
            cells.extend(row.transfer.iter().map(|t| match t.hours {
                Some(_) => Cell::from(format_hours(t.hours)),
                None => Cell::from(NOT_APPLICABLE).style(Style::default().fg(colors.not_applicable)),
            }));

            let row_style = if idx % 2 == 1 {
                Style::default().bg(colors.row_alt_bg)
            } else {
                Style::default()
            };
            Row::new(cells).style(row_style)
        })
        .collect();

    let mut widths = vec![Constraint::Length(6), Constraint::Length(13)];
    widths.extend(technologies.iter().map(|_| Constraint::Fill(1)));

    let table = Table::new(rows, widths)
        .header(Row::new(header).style(colors.header_style).bottom_margin(1))
        .block(Block::bordered().title(" Time to read the full volume sequentially "))
        .row_highlight_style(colors.row_selected);

    frame.render_stateful_widget(table, chunks[0], &mut app.projection_state);

    let interpretation = Paragraph::new(INTERPRETATION)
        .style(Style::default().fg(app.colors.muted))
        .wrap(Wrap { trim: true })
        .block(Block::bordered().title(" Interpretation "));
    frame.render_widget(interpretation, chunks[1]);
}

fn render_report(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let mut lines: Vec<Line> = Vec::new();

    for advisory in &app.advisories {
        let color = match advisory.level {
            AdvisoryLevel::Info => colors.muted,
            AdvisoryLevel::Warning => colors.flash_warning,
        };
        lines.push(Line::from(Span::styled(
            advisory.to_string(),
            Style::default().fg(color),
        )));
    }
    if !app.advisories.is_empty() {
        lines.push(Line::from(""));
    }

    lines.extend(app.report.narrative.lines().map(|l| Line::from(l.to_string())));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Conclusions and next steps",
        Style::default().fg(colors.title_color).bold(),
    )));
    lines.extend(CONCLUSIONS.iter().map(|c| Line::from(format!("- {}", c))));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.narrative_scroll, 0))
        .block(Block::bordered().title(" Report "));
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let text = if let Some((ref msg, kind, _)) = app.flash_message {
        let msg_color = match kind {
            FlashKind::Info => colors.muted,
            FlashKind::Success => colors.flash_success,
            FlashKind::Warning => colors.flash_warning,
            FlashKind::Error => colors.flash_error,
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints: &[(&str, &str)] = match app.input_mode {
            InputMode::EditValue => &[("Enter", ":apply "), ("Esc", ":cancel")],
            _ => &[
                ("Tab", ":view "),
                ("h/l", ":param "),
                ("+/-", ":adjust "),
                ("e", ":edit "),
                ("r", ":reset "),
                ("j/k", ":scroll "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
        };

        // Build hints with colored shortcut keys
        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(colors.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(colors.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, colors: &ThemeColors) {
    let popup_area = centered_rect_fixed(52, 16, frame.area());

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Keyboard Shortcuts ", colors.popup_title))
        .border_style(Style::default().fg(colors.popup_border))
        .style(Style::default().bg(colors.popup_bg));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(colors.status_key_color).bold();
    let entries = [
        ("Tab / S-Tab   ", "Next / previous view"),
        ("1-4           ", "Jump to view"),
        ("h / l, ← / →  ", "Select parameter"),
        ("+ / -         ", "Increase / decrease parameter"),
        ("e / Enter     ", "Type a parameter value"),
        ("r             ", "Reset parameters"),
        ("j / k, ↓ / ↑  ", "Scroll rows or report"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, action)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*action)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(
        "Out-of-range values are clamped to volume >= 1 TB, growth >= 0 %, 1-15 years.",
    ));
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(colors.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines).wrap(Wrap { trim: true }), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Report;
    use crate::simulation::SimulationParams;
    use crate::table::default_table;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn app() -> App {
        let report = Report::build(
            default_table(),
            "# Findings\nSSD is fastest.".to_string(),
            SimulationParams::default(),
        );
        App::new(report, Vec::new(), ThemeColors::dark())
    }

    fn render(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_axis_point_first_axis_points_up() {
        let (x, y) = axis_point(0, 1.0);
        assert!(x.abs() < 1e-9);
        assert!((y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_centered_rect_is_clamped() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = centered_rect_fixed(50, 16, area);
        assert_eq!(rect, Rect::new(0, 0, 20, 10));
    }

    #[test]
    fn test_every_view_renders() {
        let mut app = app();
        for view in View::ALL {
            app.select_view(view);
            let screen = render(&mut app, 120, 40);
            assert!(screen.contains("Storage Report"));
        }
    }

    #[test]
    fn test_table_view_shows_not_applicable_mtbf() {
        let mut app = app();
        let screen = render(&mut app, 120, 30);
        assert!(screen.contains("Cloud"));
        assert!(screen.contains(NOT_APPLICABLE));
    }

    #[test]
    fn test_projection_view_shows_years() {
        let mut app = app();
        app.select_view(View::Projection);
        let screen = render(&mut app, 120, 30);
        assert!(screen.contains("207.36"));
    }

    #[test]
    fn test_small_terminal() {
        let mut app = app();
        let screen = render(&mut app, 30, 5);
        assert!(screen.contains("Terminal too small"));
    }
}
