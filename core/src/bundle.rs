use crate::config::Config;
use crate::error::{ErrorCode, PromptError, Result};
use crate::prompts::continue_prompt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Both prompts plus the inputs they were rendered from, for handing to a
/// model-calling layer as one JSON document.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PromptBundle {
    pub generated_at: DateTime<Utc>,
    pub work_dir: String,
    pub modifications_tag_name: String,
    pub system: String,
    #[serde(rename = "continue")]
    pub continuation: String,
}

impl PromptBundle {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            generated_at: Utc::now(),
            work_dir: config.work_dir.clone(),
            modifications_tag_name: config.modifications_tag_name.clone(),
            system: config.system_prompt(),
            continuation: continue_prompt().to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| PromptError::Serialize {
            code: ErrorCode::SerializeFailed,
            message: format!("Could not serialize prompt bundle: {e}"),
        })
    }
}

/// Writes prompt output to `path`, replacing any existing file.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| PromptError::File {
        code: ErrorCode::OutputWriteFailed,
        message: format!("Could not write prompt output: {e}"),
        path: path.to_path_buf(),
    })
}
