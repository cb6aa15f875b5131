//! Configuration for the Roster server.
//!
//! Provides the [`RosterConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `ROSTER_CONFIG` environment variable
//! 3. XDG default: `~/.config/roster/config.toml`
//! 4. Built-in defaults
//!
//! `ROSTER_<SECTION>_<KEY>` environment variables are layered on top.

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

use confyg::{Confygery, env};
use roster_core::traits::ConfigProvider;
use roster_core::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Env var naming an explicit config file.
pub const CONFIG_ENV: &str = "ROSTER_CONFIG";

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "ROSTER";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the Roster server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Project name, shown in logs and version output.
    pub project_name: String,

    /// HTTP listener.
    pub server: ServerConfig,

    /// Record store seeding.
    pub store: StoreConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host name or address to bind to.
    pub host: String,

    /// Port to listen on.
    #[serde(deserialize_with = "lenient")]
    pub port: u16,
}

/// Store seeding configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Start from the John Doe / Jane Doe fixture.
    #[serde(deserialize_with = "lenient")]
    pub seed_demo: bool,

    /// JSON array of create requests loaded at start-up.
    pub seed_file: Option<String>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            project_name: "roster".to_string(),
            server: ServerConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Accept either a native value or its string form.
///
/// Environment overrides always arrive as strings.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + std::str::FromStr,
    T::Err: std::fmt::Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NativeOrText<T> {
        Native(T),
        Text(String),
    }

    match NativeOrText::<T>::deserialize(deserializer)? {
        NativeOrText::Native(value) => Ok(value),
        NativeOrText::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl RosterConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        env_opts.add_section("server");
        env_opts.add_section("store");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("roster").join("config.toml"))
    }

    /// Override listener and seeding settings from command-line flags.
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>, demo: bool) -> Self {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self.store.seed_demo |= demo;
        self
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into `ROSTER_`-prefixed environment variable pairs.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value = toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten(&value, ENV_PREFIX, &mut vars);
        Ok(vars)
    }
}

fn flatten(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                flatten(val, &format!("{prefix}_{}", key.to_uppercase()), out);
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        other => out.push((prefix.to_string(), other.to_string())),
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for RosterConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn bind_address(&self) -> Result<SocketAddr> {
        let host = self.server.host.as_str();
        (host, self.server.port)
            .to_socket_addrs()
            .map_err(|e| Error::config(format!("invalid server address {host}: {e}")))?
            .next()
            .ok_or_else(|| Error::config(format!("{host} resolved to no address")))
    }

    fn seed_file(&self) -> Option<PathBuf> {
        self.store.seed_file.as_ref().map(PathBuf::from)
    }

    fn seed_demo(&self) -> bool {
        self.store.seed_demo
    }
}

// ============================================================================
// Tests
// ============================================================================
