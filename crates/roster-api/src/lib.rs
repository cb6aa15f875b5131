//! HTTP API server for Roster.
//!
//! # Modules
//!
//! - [`router`]: Route table and shared handler state
//! - [`handlers`]: `/users` and `/health` handlers
//! - [`guard`]: Permission guard middleware
//! - [`envelope`]: `{success, data, errors}` response envelope
//! - [`error`]: Error-to-status mapping
//! - [`server`]: Binding and serving

#![doc = include_str!("../README.md")]

pub mod envelope;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod router;
pub mod server;

pub use envelope::ApiResponse;
pub use error::{ApiError, ApiResult};
pub use router::{router, ApiState};
pub use server::{bind, run, serve, shutdown_signal};
