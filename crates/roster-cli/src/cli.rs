//! CLI argument parsing.

use clap::{Parser, Subcommand};

/// Command-line arguments for the `roster` binary.
#[derive(Parser, Debug)]
#[command(name = "roster", about = "In-memory user registry with permission-guarded HTTP API")]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "ROSTER_CONFIG", global = true)]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<BaseCommand>,
}

/// Built-in commands.
#[derive(Subcommand, Debug)]
pub enum BaseCommand {
    /// Start the HTTP server.
    Serve {
        /// Host to bind to, overriding `server.host`.
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on, overriding `server.port`.
        #[arg(short, long)]
        port: Option<u16>,

        /// Seed the store with the demo records.
        #[arg(long)]
        demo: bool,
    },

    /// Show version information.
    Version,

    /// Load configuration and seeds, then report whether the server could start.
    Health,

    /// Configuration management.
    Config(ConfigCommand),
}

/// Config subcommand wrapper.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config action to perform.
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "server.port").
        key: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as a Docker `--env` flag list.
        #[arg(long)]
        docker_env: bool,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand() {
        let args = CliArgs::try_parse_from(["roster"]).unwrap();
        assert!(args.command.is_none());
        assert!(!args.verbose);
        assert!(!args.quiet);
    }

    #[test]
    fn test_serve_overrides() {
        let args =
            CliArgs::try_parse_from(["roster", "serve", "--host", "0.0.0.0", "-p", "8080", "--demo"])
                .unwrap();
        match args.command {
            Some(BaseCommand::Serve { host, port, demo }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
                assert!(demo);
            }
            other => panic!("expected Serve, got {other:?}"),
        }
    }

    #[test]
    fn test_serve_rejects_bad_port() {
        assert!(CliArgs::try_parse_from(["roster", "serve", "--port", "http"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            CliArgs::try_parse_from(["roster", "health", "--config", "/tmp/r.toml", "-v"]).unwrap();
        assert_eq!(args.config.as_deref(), Some("/tmp/r.toml"));
        assert!(args.verbose);
        assert!(matches!(args.command, Some(BaseCommand::Health)));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(CliArgs::try_parse_from(["roster", "-v", "-q", "version"]).is_err());
    }

    #[test]
    fn test_config_actions() {
        let args = CliArgs::try_parse_from(["roster", "config", "get", "server.port"]).unwrap();
        match args.command {
            Some(BaseCommand::Config(ConfigCommand {
                action: ConfigAction::Get { key },
            })) => assert_eq!(key, "server.port"),
            other => panic!("expected config get, got {other:?}"),
        }

        let args =
            CliArgs::try_parse_from(["roster", "config", "init", "--file", "x.toml", "--force"])
                .unwrap();
        match args.command {
            Some(BaseCommand::Config(ConfigCommand {
                action: ConfigAction::Init { file, force },
            })) => {
                assert_eq!(file.as_deref(), Some("x.toml"));
                assert!(force);
            }
            other => panic!("expected config init, got {other:?}"),
        }

        let args = CliArgs::try_parse_from(["roster", "config", "export", "--docker-env"]).unwrap();
        assert!(matches!(
            args.command,
            Some(BaseCommand::Config(ConfigCommand {
                action: ConfigAction::Export { docker_env: true }
            }))
        ));
    }
}
