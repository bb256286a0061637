use std::{fs, path::Path};

use serde::Deserialize;

use crate::{EditorError, Result};

const DEFAULT_CORNER_RADIUS: f64 = 8.0;
const DEFAULT_NOTICE_CAPACITY: usize = 256;
const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// remote store config
    #[serde(default)]
    pub store: StoreConfig,
    /// editor behaviour
    #[serde(default)]
    pub editor: EditorConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// store type
    #[serde(default)]
    pub store_type: StoreType,
    /// http backend config
    pub http: Option<HttpConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    #[default]
    Mem,
    Http,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// base url of the workflow api, without a trailing slash
    pub base_url: String,
    /// request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditorConfig {
    /// corner radius used when routing edges
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f64,
    /// number of notices kept in the notifier history
    #[serde(default = "default_notice_capacity")]
    pub notice_capacity: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            corner_radius: DEFAULT_CORNER_RADIUS,
            notice_capacity: DEFAULT_NOTICE_CAPACITY,
        }
    }
}

fn default_corner_radius() -> f64 {
    DEFAULT_CORNER_RADIUS
}

fn default_notice_capacity() -> usize {
    DEFAULT_NOTICE_CAPACITY
}

fn default_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT_MS
}

impl Config {
    pub fn create<T: AsRef<Path>>(path: T) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref()).map_err(|e| EditorError::Config(format!("failed to load config file {:?}: {}", path.as_ref(), e)))?;

        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        let config = toml::from_str::<Config>(toml_str)?;
        Ok(config)
    }
}
