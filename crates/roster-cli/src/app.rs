//! The `roster` application.
//!
//! [`RosterCli`] owns the loaded configuration and dispatches parsed
//! [`CliArgs`] to the matching command.

use std::sync::Arc;

use roster_core::traits::ConfigProvider;
use roster_core::{AppState, Result};
use tracing_subscriber::EnvFilter;

use crate::cli::{BaseCommand, CliArgs};
use crate::config::RosterConfig;
use crate::config_handlers;

/// CLI application parameterized over a config provider.
pub struct RosterCli<C: ConfigProvider> {
    name: String,
    config: Arc<C>,
    version: String,
}

impl RosterCli<RosterConfig> {
    /// Create from CLI args, loading config from file and environment.
    ///
    /// Flags given to `serve` take precedence over the loaded values.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let mut config = RosterConfig::load(args.config.as_deref())?;
        if let Some(BaseCommand::Serve { host, port, demo }) = &args.command {
            config = config.with_overrides(host.clone(), *port, *demo);
        }
        Ok(Self::new(name, config))
    }
}

impl<C: ConfigProvider> RosterCli<C> {
    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: C) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Get a reference to the config provider.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// `RUST_LOG` wins when set; otherwise `--quiet` means warn, `--verbose`
    /// means debug, and the default is info.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(default_level(verbose, quiet))
        };

        // A subscriber may already be installed, e.g. by a test harness.
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(BaseCommand::Serve { .. }) => self.serve().await,
            Some(BaseCommand::Version) => {
                println!("{}", self.version_line());
                Ok(())
            }
            Some(BaseCommand::Health) => {
                println!("{}", self.health().await?);
                Ok(())
            }
            Some(BaseCommand::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.action)
            }
            None => {
                println!("{}, use --help for usage", self.version_line());
                Ok(())
            }
        }
    }

    async fn serve(&self) -> Result<()> {
        let state = AppState::from_config((*self.config).clone())?;
        tracing::info!(
            project = state.project_name(),
            records = state.store().read().await.len(),
            "starting server"
        );
        roster_api::run(&state).await
    }

    /// Build the state `serve` would use and describe it.
    async fn health(&self) -> Result<String> {
        let state = AppState::from_config((*self.config).clone())?;
        let addr = self.config.bind_address()?;
        let records = state.store().read().await.len();
        Ok(format!(
            "{}: healthy ({records} records, listening on {addr})",
            self.name
        ))
    }

    fn version_line(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}

fn default_level(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(config: RosterConfig) -> RosterCli<RosterConfig> {
        RosterCli::new("roster", config)
    }

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(false, false), "info");
        assert_eq!(default_level(true, false), "debug");
        assert_eq!(default_level(false, true), "warn");
    }

    #[test]
    fn test_version_line() {
        let app = cli(RosterConfig::default()).with_version("9.9.9");
        assert_eq!(app.version_line(), "roster 9.9.9");
    }

    #[test]
    fn test_from_args_applies_serve_overrides() {
        let args = CliArgs::try_parse_from([
            "roster",
            "--config",
            "/nonexistent/config.toml",
            "serve",
            "--port",
            "4040",
            "--demo",
        ])
        .unwrap();
        let app = RosterCli::from_args("roster", &args).unwrap();
        assert_eq!(app.config().server.port, 4040);
        assert!(app.config().seed_demo());
    }

    #[test]
    fn test_from_args_rejects_broken_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = \"many\"\n").unwrap();

        let args =
            CliArgs::try_parse_from(["roster", "--config", path.to_str().unwrap(), "version"])
                .unwrap();
        assert!(RosterCli::from_args("roster", &args).is_err());
    }

    #[tokio::test]
    async fn test_health_reports_seeded_records() {
        let config = RosterConfig::default().with_overrides(None, Some(0), true);
        let report = cli(config).health().await.unwrap();
        assert!(report.starts_with("roster: healthy (2 records"));
    }

    #[tokio::test]
    async fn test_health_fails_on_missing_seed_file() {
        let mut config = RosterConfig::default();
        config.store.seed_file = Some("/nonexistent/users.json".into());
        assert!(cli(config).health().await.is_err());
    }

    #[tokio::test]
    async fn test_run_version_and_no_command() {
        let app = cli(RosterConfig::default());
        app.run(CliArgs::try_parse_from(["roster", "-q", "version"]).unwrap())
            .await
            .unwrap();
        app.run(CliArgs::try_parse_from(["roster", "-q"]).unwrap())
            .await
            .unwrap();
    }
}
