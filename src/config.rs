use crate::error::FlowLoadError;
use crate::pacing::{Pacing, PacingChoice};
use serde::{Deserialize, Serialize};
use std::fs;

/// Settings shared by every interpreter a host creates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterpreterConfig {
    pub pacing: Pacing,
    pub pacing_mode: PacingChoice,
}

impl InterpreterConfig {
    /// A config that paces the conversation in real time.
    pub fn realtime() -> Self {
        Self {
            pacing: Pacing::default(),
            pacing_mode: PacingChoice::Sleep,
        }
    }

    /// Loads a config from a JSON file. Missing fields fall back to defaults.
    pub fn from_file(path: &str) -> Result<Self, FlowLoadError> {
        let content = fs::read_to_string(path).map_err(|source| FlowLoadError::Io {
            path: path.to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}
