//! Handlers for `roster config {path,get,init,export}`.
//!
//! Each handler renders its output as a string; [`handle_config_command`]
//! prints it.

use std::path::{Path, PathBuf};

use roster_core::{Error, Result};

use crate::cli::ConfigAction;
use crate::config::RosterConfig;

/// Handle a config subcommand.
///
/// Takes the raw `--config` path rather than a loaded config, since `path`
/// and `init` must work before any config file exists.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    let output = match action {
        ConfigAction::Path => config_path_report(config_path)?,
        ConfigAction::Get { key } => config_get(&RosterConfig::load(config_path)?, &key)?,
        ConfigAction::Init { file, force } => {
            let path = match file {
                Some(p) => PathBuf::from(p),
                None => RosterConfig::default_config_path()
                    .ok_or_else(|| Error::config("Could not determine config directory"))?,
            };
            config_init(&path, force)?;
            format!("Config file created at {}", path.display())
        }
        ConfigAction::Export { docker_env } => {
            config_export(&RosterConfig::load(config_path)?, docker_env)?
        }
    };
    println!("{output}");
    Ok(())
}

fn config_path_report(config_path: Option<&str>) -> Result<String> {
    let path = RosterConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory for this platform"))?;
    if !path.exists() {
        eprintln!("(file does not exist, run `roster config init` to create it)");
    }
    Ok(path.display().to_string())
}

fn config_get(config: &RosterConfig, key: &str) -> Result<String> {
    let value = toml::Value::try_from(config).map_err(|e| Error::config(e.to_string()))?;
    lookup(&value, key)
        .map(render)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

fn config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }
    let body = RosterConfig::default().to_toml_string()?;
    std::fs::write(path, body).map_err(|e| Error::io_with_path(e, path))
}

fn config_export(config: &RosterConfig, docker_env: bool) -> Result<String> {
    let lines: Vec<String> = config
        .to_env_vars()?
        .into_iter()
        .map(|(key, value)| {
            if docker_env {
                format!("--env {key}={value}")
            } else {
                format!("{key}={value}")
            }
        })
        .collect();
    Ok(lines.join("\n"))
}

/// Walk a dotted key such as `server.port`.
fn lookup<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

fn render(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Table(_) | toml::Value::Array(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}
