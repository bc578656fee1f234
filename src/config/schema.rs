use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::simulation::SimulationConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Table of technology assumptions (.csv, .yaml or .json)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_path: Option<PathBuf>,

    /// Free-text report shown in the Report tab
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation: Option<SimulationConfig>,

    #[serde(default)]
    pub theme: ThemeMode,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Detect from the terminal background
    #[default]
    Auto,
    Dark,
    Light,
}
