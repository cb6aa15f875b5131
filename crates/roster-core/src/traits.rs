//! Core traits for Roster.
//!
//! The primary trait is [`ConfigProvider`], which abstracts the
//! configuration the server needs at start-up: where to listen and how to
//! seed the record store.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::Result;

/// Trait for application configuration.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::net::SocketAddr;
/// use std::path::PathBuf;
/// use roster_core::traits::ConfigProvider;
/// use roster_core::Result;
///
/// #[derive(Clone)]
/// struct FixedConfig;
///
/// impl ConfigProvider for FixedConfig {
///     fn project_name(&self) -> &str {
///         "roster"
///     }
///
///     fn bind_address(&self) -> Result<SocketAddr> {
///         Ok(SocketAddr::from(([127, 0, 0, 1], 3000)))
///     }
///
///     fn seed_file(&self) -> Option<PathBuf> {
///         None
///     }
/// }
///
/// assert!(!FixedConfig.seed_demo());
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used in log lines and version output.
    fn project_name(&self) -> &str;

    /// Socket address the HTTP server binds to.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured host and port do not form a valid
    /// address.
    fn bind_address(&self) -> Result<SocketAddr>;

    /// JSON file of create requests loaded into the store at start-up.
    fn seed_file(&self) -> Option<PathBuf>;

    /// Whether to start from the two-record demo fixture.
    fn seed_demo(&self) -> bool {
        false
    }
}
