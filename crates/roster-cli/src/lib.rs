//! Command-line front end for Roster.
//!
//! - [`RosterConfig`]: file/env configuration implementing
//!   [`roster_core::ConfigProvider`]
//! - [`CliArgs`]: the clap definition of the `roster` binary
//! - [`RosterCli`]: command dispatch, logging set-up, and `serve`

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;

pub use app::RosterCli;
pub use cli::{BaseCommand, CliArgs, ConfigAction, ConfigCommand};
pub use config::{RosterConfig, ServerConfig, StoreConfig};
