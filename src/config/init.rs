use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{get_config_path, Config, ThemeMode};
use crate::simulation::params::{MAX_HORIZON_YEARS, MIN_HORIZON_YEARS, MIN_VOLUME_TB};
use crate::simulation::{SimulationConfig, SimulationParams};
use crate::table::{default_table, default_table_path, save_table_csv};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Print text with a typewriter effect, one character at a time.
fn typewriter(text: &str) {
    use std::thread;
    use std::time::Duration;
    for c in text.chars() {
        print!("{}", c);
        std::io::stdout().flush().ok();
        thread::sleep(Duration::from_millis(12));
    }
    println!();
}

fn parse_volume(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= MIN_VOLUME_TB => Ok(v),
        Ok(_) => Err(format!("must be at least {} TB", MIN_VOLUME_TB)),
        Err(_) => Err("must be a number".to_string()),
    }
}

fn parse_growth(s: &str) -> Result<f64, String> {
    match s.trim_end_matches('%').parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Ok(_) => Err("must be non-negative".to_string()),
        Err(_) => Err("must be a number".to_string()),
    }
}

fn parse_horizon(s: &str) -> Result<u32, String> {
    match s.parse::<u32>() {
        Ok(v) if (MIN_HORIZON_YEARS..=MAX_HORIZON_YEARS).contains(&v) => Ok(v),
        _ => Err(format!(
            "must be a whole number between {} and {}",
            MIN_HORIZON_YEARS, MAX_HORIZON_YEARS
        )),
    }
}

fn parse_theme(s: &str) -> Result<ThemeMode, String> {
    match s.to_lowercase().as_str() {
        "auto" => Ok(ThemeMode::Auto),
        "dark" => Ok(ThemeMode::Dark),
        "light" => Ok(ThemeMode::Light),
        _ => Err("choose auto, dark or light".to_string()),
    }
}

/// Keep prompting until `parse` accepts the input.
fn prompt_parsed<T>(
    message: &str,
    default: &str,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<T> {
    loop {
        let input = prompt_with_default(message, default)?;
        match parse(&input) {
            Ok(v) => return Ok(v),
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    }
}

/// Serialize a config and write it atomically, creating parent directories.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    typewriter("Storage Report Configuration Wizard");
    println!("===================================");
    println!();

    // 1. Simulation defaults
    let defaults = SimulationParams::default();
    typewriter("The projection starts from an initial data volume and grows it every year.");
    let initial_volume_tb = prompt_parsed(
        "Initial volume (TB)",
        &defaults.initial_volume_tb.to_string(),
        parse_volume,
    )?;
    let growth_pct = prompt_parsed(
        "Annual growth (%)",
        &defaults.growth_pct.to_string(),
        parse_growth,
    )?;
    let horizon_years = prompt_parsed(
        "Horizon (years)",
        &defaults.horizon_years.to_string(),
        parse_horizon,
    )?;

    // 2. Theme
    println!();
    let theme = prompt_parsed("Theme (auto/dark/light)", "auto", parse_theme)?;

    // 3. Assumptions table
    println!();
    typewriter("Technology metrics come from a table file. Without one, built-in values for HDD, SSD, Tape and Cloud are used.");
    let table_path = if prompt_yes_no("Write the built-in table to a CSV file you can edit?", true)? {
        let path_str = prompt_with_default(
            "Table path",
            &default_table_path().display().to_string(),
        )?;
        let path = PathBuf::from(path_str);
        if !path.exists()
            || prompt_yes_no(
                &format!("{} already exists. Overwrite?", path.display()),
                false,
            )?
        {
            save_table_csv(&path, &default_table())?;
            println!("Table written to {}", path.display());
        }
        Some(path)
    } else {
        None
    };

    // 4. Config path
    let default_config_path = default_path.unwrap_or_else(get_config_path);
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    // Check if file already exists
    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 5. Write config
    let config = Config {
        table_path,
        narrative_path: None,
        simulation: Some(SimulationConfig {
            initial_volume_tb: Some(initial_volume_tb),
            growth_pct: Some(growth_pct),
            horizon_years: Some(horizon_years),
        }),
        theme,
    };
    write_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `storage-report` to get started.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;

    #[test]
    fn test_parse_volume() {
        assert_eq!(parse_volume("250"), Ok(250.0));
        assert!(parse_volume("0.5").is_err());
        assert!(parse_volume("lots").is_err());
    }

    #[test]
    fn test_parse_growth_accepts_percent_sign() {
        assert_eq!(parse_growth("20%"), Ok(20.0));
        assert_eq!(parse_growth("0"), Ok(0.0));
        assert!(parse_growth("-1").is_err());
    }

    #[test]
    fn test_parse_horizon_bounds() {
        assert_eq!(parse_horizon("1"), Ok(1));
        assert_eq!(parse_horizon("15"), Ok(15));
        assert!(parse_horizon("0").is_err());
        assert!(parse_horizon("16").is_err());
        assert!(parse_horizon("2.5").is_err());
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!(parse_theme("Dark"), Ok(ThemeMode::Dark));
        assert!(parse_theme("solarized").is_err());
    }

    #[test]
    fn test_write_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = Config {
            table_path: Some(PathBuf::from("data/assumptions.csv")),
            narrative_path: None,
            simulation: Some(SimulationConfig::from(SimulationParams::default())),
            theme: ThemeMode::Dark,
        };

        write_config(&path, &config).unwrap();
        let loaded = load_config(Some(path)).unwrap();
        assert_eq!(loaded, config);
    }
}
