//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SchemaSyncResult;
use crate::application::agent::{RECONNECT_INITIAL_MS, RECONNECT_MAX_MS};
use crate::infrastructure::fs::{CHECKPOINT_FILE_NAME, DEFAULT_DEBOUNCE_MS};
use crate::infrastructure::generator::{DEFAULT_GENERATOR_KIND, DEFAULT_GENERATOR_PROGRAM};

use super::loader::{self, ConfigWarning};

/// `[server]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_schema")]
    pub schema: PathBuf,

    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            bind: default_bind(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_schema() -> PathBuf {
    PathBuf::from("openapi.yaml")
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

/// `[client]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Staging file; defaults to `<temp_dir>/openapi.yaml`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staging: Option<PathBuf>,

    /// Checkpoint file; defaults to `<output_dir>/HASH`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkpoint: Option<PathBuf>,

    #[serde(default = "default_reconnect_initial_ms")]
    pub reconnect_initial_ms: u64,

    #[serde(default = "default_reconnect_max_ms")]
    pub reconnect_max_ms: u64,
}

impl ClientConfig {
    pub fn staging_path(&self) -> PathBuf {
        self.staging
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("openapi.yaml"))
    }

    pub fn checkpoint_path(&self) -> PathBuf {
        self.checkpoint
            .clone()
            .unwrap_or_else(|| self.output_dir.join(CHECKPOINT_FILE_NAME))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            output_dir: default_output_dir(),
            staging: None,
            checkpoint: None,
            reconnect_initial_ms: default_reconnect_initial_ms(),
            reconnect_max_ms: default_reconnect_max_ms(),
        }
    }
}

fn default_url() -> String {
    "ws://localhost:5000".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("src/client")
}

fn default_reconnect_initial_ms() -> u64 {
    RECONNECT_INITIAL_MS
}

fn default_reconnect_max_ms() -> u64 {
    RECONNECT_MAX_MS
}

/// `[generator]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default = "default_kind")]
    pub kind: String,

    /// Extra arguments appended after `-o <dir>`
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            kind: default_kind(),
            args: Vec::new(),
        }
    }
}

fn default_program() -> String {
    DEFAULT_GENERATOR_PROGRAM.to_string()
}

fn default_kind() -> String {
    DEFAULT_GENERATOR_KIND.to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> SchemaSyncResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> SchemaSyncResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Resolve the config file layer, then apply `SCHEMA_SYNC_*` overrides.
    ///
    /// An explicit path must load; otherwise the project file, then the
    /// user file, then defaults.
    pub fn resolve(explicit: Option<&Path>) -> SchemaSyncResult<(Self, Vec<ConfigWarning>)> {
        let (config, warnings) = loader::load_layered(explicit, Path::new("."))?;
        Ok((config.with_env_overrides(), warnings))
    }

    /// Apply environment variable overrides (SCHEMA_SYNC_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::apply_env_overrides(self, |key| std::env::var(key).ok())
    }
}
