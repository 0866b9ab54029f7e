//! Client configuration loaded from `DTL_*` environment variables.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{ClientError, ClientResult};

/// Base URL used when `DTL_API_BASE_URL` is not set
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5001/api";

/// Prefix shared by every configuration variable
pub const ENV_PREFIX: &str = "DTL_";

/// Runtime environment, selects the log format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Whether human-readable logs should be used
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Client configuration, read from `DTL_*` environment variables
#[derive(Clone, Debug, Deserialize)]
pub struct ClientConfig {
    /// `DTL_API_BASE_URL`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// `DTL_STORAGE_PATH`, defaults to `~/.dtl/storage.json`
    #[serde(default)]
    pub storage_path: Option<String>,
    /// `DTL_ENV`, `development` or `production`
    #[serde(default)]
    pub env: Environment,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            storage_path: None,
            env: Environment::default(),
        }
    }
}

impl ClientConfig {
    /// Load from the process environment. Call `dotenvy::dotenv()` first to
    /// pick up a `.env` file.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Load from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> ClientResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Location of the persistent token storage file
    pub fn storage_path(&self) -> PathBuf {
        match self.storage_path.as_deref() {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_storage_dir().join("storage.json"),
        }
    }
}

fn default_storage_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".dtl")
}
