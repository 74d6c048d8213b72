//! Pipeline configuration.
//!
//! Loaded from an optional JSON file; every field has a default so an
//! empty object (or no file at all) runs the pipeline against the
//! working directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{EngineError, Result};

pub const PRICES_FILE: &str = "prices.txt";
pub const TRADES_FILE: &str = "trades.txt";
pub const MARKET_DATA_FILE: &str = "marketdata.txt";
pub const INQUIRIES_FILE: &str = "inquiries.txt";

pub const POSITIONS_FILE: &str = "positions.txt";
pub const RISK_FILE: &str = "risk.txt";
pub const EXECUTIONS_FILE: &str = "executions.txt";
pub const STREAMING_FILE: &str = "streaming.txt";
pub const ALL_INQUIRIES_FILE: &str = "allinquiries.txt";
pub const GUI_FILE: &str = "gui.txt";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory holding the four input files.
    #[serde(default = "default_dir")]
    pub data_dir: PathBuf,

    /// Directory the six output files are appended to.
    #[serde(default = "default_dir")]
    pub output_dir: PathBuf,

    /// GUI throttle window in milliseconds.
    #[serde(default = "default_gui_throttle_ms")]
    pub gui_throttle_ms: u64,
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_gui_throttle_ms() -> u64 {
    300
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: default_dir(),
            output_dir: default_dir(),
            gui_throttle_ms: default_gui_throttle_ms(),
        }
    }
}

impl PipelineConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|err| {
            EngineError::Config(format!(
                "failed to read config file '{}': {}",
                path.as_ref().display(),
                err
            ))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|err| EngineError::Config(format!("failed to parse config: {}", err)))
    }

    /// Run everything inside one directory (tests).
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            data_dir: dir.clone(),
            output_dir: dir,
            ..Self::default()
        }
    }

    pub fn input_path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    pub fn output_path(&self, file: &str) -> PathBuf {
        self.output_dir.join(file)
    }
}
