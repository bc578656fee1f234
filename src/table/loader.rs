use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::defaults::default_table;
use super::types::{ReferenceTable, TableError, TechnologyRecord, COLUMNS};
use crate::advisory::{Advisory, Loaded};

/// Default table location, relative to the working directory
pub fn default_table_path() -> PathBuf {
    PathBuf::from("data").join("assumptions.csv")
}

/// Load the reference table, falling back to the built-in table.
///
/// Never fails: a missing file yields an informational advisory, an
/// unreadable or invalid one yields a warning naming the cause.
pub fn load_table(path: &Path) -> Loaded<ReferenceTable> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "table file not found");
        return Loaded::fallback(
            default_table(),
            Advisory::info(format!(
                "No table found at {}. Using built-in defaults.",
                path.display()
            )),
        );
    }

    match read_table(path) {
        Ok(table) => {
            tracing::debug!(path = %path.display(), rows = table.len(), "loaded table");
            Loaded::clean(table)
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "table rejected");
            Loaded::fallback(
                default_table(),
                Advisory::warning(format!(
                    "Could not read {}: {}. Using built-in defaults.",
                    path.display(),
                    e
                )),
            )
        }
    }
}

/// Read and validate a table file, choosing the parser by extension.
pub fn read_table(path: &Path) -> Result<ReferenceTable, TableError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let records = match extension.as_str() {
        "csv" => parse_csv(fs::File::open(path)?)?,
        "yaml" | "yml" => parse_yaml(&fs::read_to_string(path)?)?,
        "json" => parse_json(&fs::read_to_string(path)?)?,
        other => return Err(TableError::UnsupportedFormat(other.to_string())),
    };

    ReferenceTable::new(records)
}

/// Parse CSV with a header row. Extra columns are ignored.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<TechnologyRecord>, TableError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing: Vec<String> = COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(TableError::MissingColumns(missing));
    }

    rdr.deserialize()
        .collect::<Result<Vec<TechnologyRecord>, _>>()
        .map_err(TableError::from)
}

/// Parse a YAML sequence of records
pub fn parse_yaml(content: &str) -> Result<Vec<TechnologyRecord>, TableError> {
    serde_saphyr::from_str(content).map_err(|e| TableError::Yaml(e.to_string()))
}

/// Parse a JSON array of records
pub fn parse_json(content: &str) -> Result<Vec<TechnologyRecord>, TableError> {
    Ok(serde_json::from_str(content)?)
}

/// Write a table as CSV atomically, creating parent directories.
pub fn save_table_csv(path: &Path, table: &ReferenceTable) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    {
        let mut writer = csv::Writer::from_writer(&mut file);
        for record in table.iter() {
            writer
                .serialize(record)
                .context("Failed to serialize table row")?;
        }
        writer.flush().context("Failed to write table")?;
    }

    file.commit()
        .with_context(|| format!("Failed to save table to {}", path.display()))?;

    Ok(())
}
