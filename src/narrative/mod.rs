use std::fs;
use std::path::{Path, PathBuf};

use crate::advisory::{Advisory, Loaded};

/// Shown when no report document is available
pub const PLACEHOLDER: &str = "# Report (summary)\n\
See docs/REPORT.md for the full report: methodology, comparison, charts and simulation.\n";

/// Default report location, relative to the working directory
pub fn default_narrative_path() -> PathBuf {
    PathBuf::from("docs").join("REPORT.md")
}

/// Load the free-text report, falling back to [`PLACEHOLDER`].
///
/// A missing file yields an informational advisory; an unreadable one
/// (including invalid UTF-8) yields a warning.
pub fn load_narrative(path: &Path) -> Loaded<String> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "narrative file not found");
        return Loaded::fallback(
            PLACEHOLDER.to_string(),
            Advisory::info(format!(
                "No report found at {}. Showing a minimal summary.",
                path.display()
            )),
        );
    }

    match fs::read_to_string(path) {
        Ok(text) => Loaded::clean(text),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "narrative unreadable");
            Loaded::fallback(
                PLACEHOLDER.to_string(),
                Advisory::warning(format!(
                    "Could not read {}: {}. Showing a minimal summary.",
                    path.display(),
                    e
                )),
            )
        }
    }
}
