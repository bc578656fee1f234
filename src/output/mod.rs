pub mod formatter;

pub use formatter::{
    format_bar_chart, format_hours, format_json, format_projection_table, format_radar_table,
    format_reference_table, format_rounded, format_text_report, format_tsv, format_value,
    get_terminal_width, score_bar, should_use_colors, NOT_APPLICABLE,
};
