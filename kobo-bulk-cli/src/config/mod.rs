//! Run configuration loaded from a JSON file.
//!
//! The whole run is driven by one `config.json`: where the spreadsheets
//! live, which columns join them, and where the submissions go. The
//! config is loaded once and passed by reference into each stage; there
//! is no ambient global.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Default KoboCAT host; override per-deployment with `server_url`.
pub const DEFAULT_SERVER_URL: &str = "https://kobocat.unhcr.org";

/// Environment variable that overrides `api_token` from the file.
pub const TOKEN_ENV_VAR: &str = "KOBO_API_TOKEN";

/// Top-level run configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Workbook holding one row per parent record.
    pub parent_data_path: PathBuf,
    /// Workbooks holding child rows, attached in the order listed here.
    #[serde(default)]
    pub child_data_paths: Vec<ChildSource>,
    /// Column in the parent workbook that identifies a parent record.
    pub parent_id_column: String,
    /// Column in every child workbook that references a parent id.
    pub child_id_column: String,
    /// Form uid on the target server; becomes the `id` attribute of each
    /// submission document.
    pub project_uuid: String,
    /// Token for the `Authorization: Token ...` header. May be left empty
    /// in the file and supplied via [`TOKEN_ENV_VAR`] instead.
    #[serde(default)]
    pub api_token: String,
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// XML group names of the target form.
    #[serde(default)]
    pub form: FormLayout,
}

/// A named child workbook.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildSource {
    /// Label used in log messages.
    pub name: String,
    pub path: PathBuf,
}

/// Names of the form's parent group and repeating child group.
#[derive(Debug, Clone, Deserialize)]
pub struct FormLayout {
    #[serde(default = "default_parent_group")]
    pub parent_group: String,
    #[serde(default = "default_child_group")]
    pub child_group: String,
}

impl Default for FormLayout {
    fn default() -> Self {
        FormLayout {
            parent_group: default_parent_group(),
            child_group: default_child_group(),
        }
    }
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_parent_group() -> String {
    "household".to_string()
}

fn default_child_group() -> String {
    "Individual".to_string()
}

impl Config {
    /// Load and validate the configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Config =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if let Ok(token) = std::env::var(TOKEN_ENV_VAR)
            && !token.trim().is_empty()
        {
            config.api_token = token.trim().to_string();
        }

        if config.api_token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }

        Ok(config)
    }

    /// Full URL of the OpenRosa submission endpoint.
    pub fn submission_endpoint(&self) -> String {
        format!(
            "{}/api/v1/submissions",
            self.server_url.trim_end_matches('/')
        )
    }
}
