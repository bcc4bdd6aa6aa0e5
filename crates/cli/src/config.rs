use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "schemargs.json";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Schema used when `--schema` is not given.
    #[serde(default)]
    pub schema: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub config: Config,
}

/// Load the config from `config_path`, or from `schemargs.json` in `cwd`.
/// Only an explicitly requested file has to exist.
fn load_config_in(cwd: &Path, config_path: Option<&Path>) -> Result<Option<LoadedConfig>> {
    let (path, explicit) = match config_path {
        Some(p) => (resolve_against(cwd, p), true),
        None => (cwd.join(DEFAULT_CONFIG_NAME), false),
    };

    if !path.exists() {
        if explicit {
            bail!("config not found: {}", path.display());
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config: Config = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse config JSON: {}", path.display()))?;

    Ok(Some(LoadedConfig { path, config }))
}

/// Pick the schema source: `--schema` wins over the config file.
pub fn resolve_schema(schema: Option<&str>, config_path: Option<&Path>) -> Result<String> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    resolve_schema_in(&cwd, schema, config_path)
}

fn resolve_schema_in(
    cwd: &Path,
    schema: Option<&str>,
    config_path: Option<&Path>,
) -> Result<String> {
    if let Some(schema) = schema {
        return Ok(schema.to_string());
    }

    let Some(loaded) = load_config_in(cwd, config_path)? else {
        bail!("no schema given: pass --schema or create {DEFAULT_CONFIG_NAME}");
    };
    tracing::debug!(path = %loaded.path.display(), "loaded config");

    loaded
        .config
        .schema
        .with_context(|| format!("config does not declare a schema: {}", loaded.path.display()))
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
