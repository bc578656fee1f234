use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::report::{BarSeries, Report, CONCLUSIONS, INTERPRETATION};
use crate::scoring::{RadarSeries, RADAR_CATEGORIES, SCORE_MAX};
use crate::simulation::{round2, ProjectionRow, SimulationParams};
use crate::table::{ReferenceTable, COLUMNS};

/// Shown in place of a value that does not apply
pub const NOT_APPLICABLE: &str = "N/A";

/// Width used when stdout is not a terminal
const DEFAULT_WIDTH: usize = 80;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, falling back to 80 columns for pipes
pub fn get_terminal_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_WIDTH)
}

/// Format a table value without trailing zeros ("0.035", "1200000")
pub fn format_value(value: f64) -> String {
    format!("{}", value)
}

/// Format a value rounded to two decimals ("138.89")
pub fn format_rounded(value: f64) -> String {
    format!("{:.2}", round2(value))
}

/// Format a transfer time, or N/A when the technology has no throughput
pub fn format_hours(hours: Option<f64>) -> String {
    hours.map(format_rounded).unwrap_or_else(|| NOT_APPLICABLE.to_string())
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Lay out rows under headers. The first column is left-aligned, the rest
/// right-aligned. Column width is measured in chars.
fn render_columns(headers: &[String], rows: &[Vec<String>], use_colors: bool) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let align = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let width = widths.get(i).copied().unwrap_or(0);
                if i == 0 {
                    format!("{:<width$}", cell, width = width)
                } else {
                    format!("{:>width$}", cell, width = width)
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header = align(headers);
    let mut lines = vec![if use_colors {
        header.bold().to_string()
    } else {
        header
    }];
    lines.extend(rows.iter().map(|row| align(row.as_slice())));
    lines.join("\n")
}

/// The reference table, one row per technology, all nine columns
pub fn format_reference_table(table: &ReferenceTable, use_colors: bool) -> String {
    let headers: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    let rows: Vec<Vec<String>> = table
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                format_value(r.read_speed),
                format_value(r.write_speed),
                format_value(r.capacity),
                format_value(r.cost_per_gb),
                if r.has_mtbf() {
                    format_value(r.mtbf_hours)
                } else {
                    NOT_APPLICABLE.to_string()
                },
                format_value(r.power_watts),
                format_value(r.security_score),
                format_value(r.scalability_score),
            ]
        })
        .collect();

    render_columns(&headers, &rows, use_colors)
}

/// Horizontal bar chart: one bar per technology, scaled to the largest value
pub fn format_bar_chart(series: &BarSeries, width: usize, use_colors: bool) -> String {
    let title = series.metric.title();
    let mut lines = vec![if use_colors {
        title.bold().to_string()
    } else {
        title.to_string()
    }];

    let label_width = series
        .points
        .iter()
        .map(|p| p.technology.chars().count())
        .max()
        .unwrap_or(0)
        .min(16);
    let values: Vec<String> = series.points.iter().map(|p| format_value(p.value)).collect();
    let value_width = values.iter().map(|v| v.len()).max().unwrap_or(0);
    let bar_width = width
        .saturating_sub(label_width + value_width + 4)
        .clamp(10, 60);
    let max = series.max_value();

    for (point, value) in series.points.iter().zip(&values) {
        let ratio = if max > 0.0 { point.value / max } else { 0.0 };
        let filled = (ratio * bar_width as f64).round() as usize;
        let bar = "█".repeat(filled);
        let label = format!(
            "{:<width$}",
            truncate_name(&point.technology, label_width),
            width = label_width
        );
        if use_colors {
            lines.push(format!("{}  {} {}", label, bar.cyan(), value.dimmed()));
        } else {
            lines.push(format!("{}  {} {}", label, bar, value));
        }
    }

    lines.join("\n")
}

/// Text score bar on the 0-5 scale, e.g. "███░░"
pub fn score_bar(score: f64, width: usize) -> String {
    let ratio = (score / SCORE_MAX).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Radar chart data as a table: one row per technology, one column per axis
pub fn format_radar_table(radar: &[RadarSeries], use_colors: bool) -> String {
    let mut headers = vec!["technology".to_string()];
    headers.extend(RADAR_CATEGORIES.iter().map(|c| c.to_lowercase()));

    let rows: Vec<Vec<String>> = radar
        .iter()
        .map(|series| {
            let mut row = vec![series.name.clone()];
            row.extend(
                series
                    .values
                    .iter()
                    .map(|v| format!("{} {:.1}", score_bar(*v, 5), v)),
            );
            row
        })
        .collect();

    render_columns(&headers, &rows, use_colors)
}

/// Projection table: year, volume, then one hours column per technology
pub fn format_projection_table(rows: &[ProjectionRow], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No projection rows.".to_string();
    }

    let mut headers = vec!["year".to_string(), "volume (TB)".to_string()];
    headers.extend(
        rows[0]
            .transfer
            .iter()
            .map(|t| format!("{} (h)", t.technology)),
    );

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.year.to_string(), format_rounded(row.volume_tb)];
            cells.extend(row.transfer.iter().map(|t| format_hours(t.hours)));
            cells
        })
        .collect();

    render_columns(&headers, &body, use_colors)
}

/// Projection as tab-separated values for scripting (header row, no colors)
pub fn format_tsv(rows: &[ProjectionRow]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };

    let mut header = vec!["year".to_string(), "volume_tb".to_string()];
    header.extend(first.transfer.iter().map(|t| format!("{}_hours", t.technology)));

    let mut lines = vec![header.join("\t")];
    lines.extend(rows.iter().map(|row| {
        let mut cells = vec![row.year.to_string(), format_rounded(row.volume_tb)];
        cells.extend(row.transfer.iter().map(|t| format_hours(t.hours)));
        cells.join("\t")
    }));
    lines.join("\n")
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    report: &'a Report,
}

/// Machine-readable report (table, charts data, projection; values unrounded)
pub fn format_json(report: &Report, generated_at: DateTime<Utc>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        generated_at,
        report,
    })
}

fn format_params(params: &SimulationParams) -> String {
    format!(
        "initial volume {} TB, growth {}% per year, {} year(s)",
        format_value(params.initial_volume_tb),
        format_value(params.growth_pct),
        params.horizon_years
    )
}

fn heading(text: &str, use_colors: bool) -> String {
    let underline = "=".repeat(text.chars().count());
    if use_colors {
        format!("{}\n{}", text.bold().cyan(), underline.dimmed())
    } else {
        format!("{}\n{}", text, underline)
    }
}

/// Full plain-text report: table, charts, radar scores, projection, conclusions
pub fn format_text_report(report: &Report, width: usize, use_colors: bool) -> String {
    let mut sections = vec![
        heading("Storage technologies: comparison and simulation", use_colors),
        format_reference_table(&report.table, use_colors),
    ];

    for series in &report.bars {
        sections.push(format_bar_chart(series, width, use_colors));
    }

    sections.push(heading("Reliability, scalability, security (0-5)", use_colors));
    sections.push(format_radar_table(&report.radar, use_colors));
    sections.push(
        "Reliability: 1 at the lowest MTBF, 5 at the highest; 0 where MTBF does not apply."
            .to_string(),
    );

    sections.push(heading("Growth simulation", use_colors));
    sections.push(format_params(&report.params));
    sections.push(format_projection_table(&report.projection, use_colors));
    sections.push(INTERPRETATION.to_string());

    let narrative = report.narrative.trim_end();
    if !narrative.is_empty() {
        sections.push(heading("Report", use_colors));
        sections.push(narrative.to_string());
    }

    sections.push(heading("Conclusions and next steps", use_colors));
    sections.push(
        CONCLUSIONS
            .iter()
            .map(|c| format!("- {}", c))
            .collect::<Vec<_>>()
            .join("\n"),
    );

    sections.join("\n\n")
}
