use crate::constants::{MODIFICATIONS_TAG_NAME, WORK_DIR};
use crate::error::{ErrorCode, PromptError, Result};
use crate::markdown::ALLOWED_HTML_ELEMENTS;
use crate::prompts::build_system_prompt;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const ENV_WORK_DIR: &str = "BOLTPROMPT_WORK_DIR";
pub const ENV_MODIFICATIONS_TAG: &str = "BOLTPROMPT_MODIFICATIONS_TAG";

const MAX_CONFIG_FILE_SIZE: u64 = 1_000_000; // 1 MB limit

static TAG_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("tag name pattern is valid")
});

/// Values substituted into the system prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub work_dir: String,
    pub modifications_tag_name: String,
    pub allowed_html_elements: Vec<String>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            work_dir: WORK_DIR.to_string(),
            modifications_tag_name: MODIFICATIONS_TAG_NAME.to_string(),
            allowed_html_elements: ALLOWED_HTML_ELEMENTS.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Loads a JSON config file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path).map_err(|e| PromptError::Config {
            code: ErrorCode::ConfigReadFailed,
            message: format!("Could not read config file metadata: {e}"),
            path: path.to_path_buf(),
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(PromptError::Config {
                code: ErrorCode::BoundsExceeded,
                message: "Config file size exceeds limit".to_string(),
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| PromptError::Config {
            code: ErrorCode::ConfigReadFailed,
            message: format!("Could not read config file: {e}"),
            path: path.to_path_buf(),
        })?;

        serde_json::from_str(&content).map_err(|e| PromptError::Config {
            code: ErrorCode::ConfigCorrupt,
            message: format!("Could not parse config file: {e}"),
            path: path.to_path_buf(),
        })
    }

    /// Applies `BOLTPROMPT_*` overrides from a key lookup such as
    /// `std::env::var`; empty values are ignored.
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(dir) = non_empty(ENV_WORK_DIR) {
            self.work_dir = dir;
        }
        if let Some(tag) = non_empty(ENV_MODIFICATIONS_TAG) {
            self.modifications_tag_name = tag;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.work_dir.starts_with('/') {
            return Err(PromptError::Validation {
                code: ErrorCode::InvalidWorkDir,
                message: format!("'{}' must be an absolute path", self.work_dir),
                field: "work_dir".to_string(),
            });
        }
        check_tag_name("modifications_tag_name", &self.modifications_tag_name)?;

        if self.allowed_html_elements.is_empty() {
            return Err(PromptError::Validation {
                code: ErrorCode::EmptyElementList,
                message: "at least one element is required".to_string(),
                field: "allowed_html_elements".to_string(),
            });
        }
        for element in &self.allowed_html_elements {
            check_tag_name("allowed_html_elements", element)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn system_prompt(&self) -> String {
        build_system_prompt(
            &self.work_dir,
            self.allowed_html_elements.as_slice(),
            &self.modifications_tag_name,
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn check_tag_name(field: &str, name: &str) -> Result<()> {
    if TAG_NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(PromptError::Validation {
            code: ErrorCode::InvalidTagName,
            message: format!("'{name}' is not a valid tag name"),
            field: field.to_string(),
        })
    }
}
