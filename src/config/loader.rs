//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SchemaSyncError, SchemaSyncResult};

use super::types::Config;

/// Project config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "schema-sync.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> SchemaSyncResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| SchemaSyncError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Pick the file layer: explicit path, project file in `cwd`, user file,
/// or defaults. The first file found wins.
pub(super) fn load_layered(
    explicit: Option<&Path>,
    cwd: &Path,
) -> SchemaSyncResult<(Config, Vec<ConfigWarning>)> {
    if let Some(path) = explicit {
        return load_with_warnings(path);
    }

    let project = cwd.join(PROJECT_CONFIG_FILE);
    if project.is_file() {
        return load_with_warnings(&project);
    }

    if let Some(user) = user_config_path() {
        if user.is_file() {
            return load_with_warnings(&user);
        }
    }

    Ok((Config::default(), Vec::new()))
}

/// `<config_dir>/schema-sync/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("schema-sync").join("config.toml"))
}

/// Apply `SCHEMA_SYNC_*` overrides read through `lookup`.
pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(schema) = var("SCHEMA_SYNC_SCHEMA") {
        config.server.schema = PathBuf::from(schema);
    }
    if let Some(bind) = var("SCHEMA_SYNC_BIND") {
        config.server.bind = bind;
    }
    if let Some(url) = var("SCHEMA_SYNC_URL") {
        config.client.url = url;
    }
    if let Some(dir) = var("SCHEMA_SYNC_OUTPUT_DIR") {
        config.client.output_dir = PathBuf::from(dir);
    }
    if let Some(program) = var("SCHEMA_SYNC_GENERATOR") {
        config.generator.program = program;
    }
    if let Some(kind) = var("SCHEMA_SYNC_GENERATOR_KIND") {
        config.generator.kind = kind;
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "server",
        "schema",
        "bind",
        "debounce_ms",
        "client",
        "url",
        "output_dir",
        "staging",
        "checkpoint",
        "reconnect_initial_ms",
        "reconnect_max_ms",
        "generator",
        "program",
        "kind",
        "args",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a = a.as_bytes();
    let b = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &ac) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b.len()]
}
