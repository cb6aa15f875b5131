//! Roster Core: record store, service façade, and shared types.
//!
//! This crate has no internal Roster dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`record`]: Records, permissions, and request payloads
//! - [`store`]: In-memory record store and its shared handle
//! - [`service`]: Service façade used by request handlers
//! - [`state`]: Application state container
//! - [`traits`]: Core traits for configuration

#![doc = include_str!("../README.md")]

pub mod error;
pub mod record;
pub mod service;
pub mod state;
pub mod store;
pub mod traits;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use record::{CreateRequest, PermissionKind, PermissionSet, Record, RecordId, UpdateRequest};
pub use service::{USER_NOT_FOUND, UserService};
pub use state::AppState;
pub use store::{RecordStore, StoreHandle};
pub use traits::ConfigProvider;
