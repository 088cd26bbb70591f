//! Configuration module for schema-sync
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (SCHEMA_SYNC_*)
//! 3. Project config (./schema-sync.toml, or `--config <path>`)
//! 4. User config (<config_dir>/schema-sync/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    apply_env_overrides, user_config_path, ConfigWarning, PROJECT_CONFIG_FILE,
};
pub use types::{ClientConfig, Config, GeneratorConfig, ServerConfig};
