use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use storage_report::advisory::Advisory;
use storage_report::buffered_eprintln;
use storage_report::narrative::{default_narrative_path, load_narrative};
use storage_report::report::Report;
use storage_report::simulation::{validate_simulation, SimulationConfig};
use storage_report::table::{default_table_path, load_table};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_IO: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum ReportFormat {
    /// Full report as aligned text
    #[default]
    Text,
    /// Table, chart data and projection as JSON
    Json,
    /// Projection only, tab-separated
    Tsv,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive report (default if no subcommand)
    Tui,
    /// Print the report to stdout
    Report {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "storage-report")]
#[command(about = "Compare storage technologies and project transfer time as data grows", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/storage-report/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Technology table (.csv, .yaml or .json; defaults to data/assumptions.csv)
    #[arg(long, global = true)]
    table: Option<PathBuf>,

    /// Narrative report shown in the Report tab (defaults to docs/REPORT.md)
    #[arg(long, global = true)]
    narrative: Option<PathBuf>,

    /// Initial data volume in TB
    #[arg(long, global = true, value_name = "TB")]
    volume: Option<f64>,

    /// Annual growth in percent
    #[arg(long, global = true, value_name = "PCT")]
    growth: Option<f64>,

    /// Years to simulate (1-15)
    #[arg(long, global = true, value_name = "N")]
    years: Option<u32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);
    let start_time = Instant::now();

    storage_report::logging::init_tracing(cli.verbose);

    let (format, no_color) = match command {
        Commands::Init => {
            if let Err(e) = storage_report::config::init::run_init_wizard(cli.config) {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_IO);
            }
            std::process::exit(EXIT_SUCCESS);
        }
        Commands::Tui => (None, false),
        Commands::Report { format, no_color } => (Some(format), no_color),
    };

    // Load config
    let config = match storage_report::config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Command-line values win over the config file
    let from_cli = SimulationConfig {
        initial_volume_tb: cli.volume,
        growth_pct: cli.growth,
        horizon_years: cli.years,
    };
    let simulation = config.simulation.clone().unwrap_or_default().merge(&from_cli);
    if let Err(errors) = validate_simulation(&simulation) {
        eprintln!("Simulation parameter errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    let params = simulation.resolve();

    let table_path = cli
        .table
        .or_else(|| config.table_path.clone())
        .unwrap_or_else(default_table_path);
    let narrative_path = cli
        .narrative
        .or_else(|| config.narrative_path.clone())
        .unwrap_or_else(default_narrative_path);

    let table = load_table(&table_path);
    let narrative = load_narrative(&narrative_path);
    let advisories: Vec<Advisory> = [table.advisory, narrative.advisory]
        .into_iter()
        .flatten()
        .collect();

    let report = Report::build(table.value, narrative.value, params);
    tracing::debug!(
        technologies = report.table.len(),
        years = report.projection.len(),
        elapsed = ?start_time.elapsed(),
        "report built"
    );

    match format {
        None => {
            // Probe the terminal background before raw mode takes over
            let theme = storage_report::tui::resolve_theme(config.theme);
            let colors = storage_report::tui::ThemeColors::for_theme(theme);
            let app = storage_report::tui::App::new(report, advisories.clone(), colors);

            if let Err(e) = storage_report::tui::run_tui(app).await {
                eprintln!("Terminal error: {:#}", e);
                std::process::exit(EXIT_IO);
            }

            // The TUI showed these already; repeat them where they persist
            for advisory in &advisories {
                eprintln!("{}", advisory);
            }
        }
        Some(format) => {
            for advisory in &advisories {
                buffered_eprintln!("{}", advisory);
            }

            let output = match format {
                ReportFormat::Text => {
                    let use_colors = !no_color && storage_report::output::should_use_colors();
                    let width = storage_report::output::get_terminal_width();
                    storage_report::output::format_text_report(&report, width, use_colors)
                }
                ReportFormat::Json => {
                    match storage_report::output::format_json(&report, chrono::Utc::now()) {
                        Ok(json) => json,
                        Err(e) => {
                            eprintln!("Failed to serialize report: {}", e);
                            std::process::exit(EXIT_IO);
                        }
                    }
                }
                ReportFormat::Tsv => storage_report::output::format_tsv(&report.projection),
            };
            println!("{}", output);
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
