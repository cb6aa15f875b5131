//! Application state management.
//!
//! Provides [`AppState<C>`], the container built once at process start that
//! holds the configuration and the single shared [`StoreHandle`]. Request
//! handlers and the permission guard receive clones of it; nothing reaches
//! the store through a global.
//!
//! # Example
//!
//! ```
//! use std::net::SocketAddr;
//! use std::path::PathBuf;
//! use roster_core::{AppState, ConfigProvider, Result};
//!
//! #[derive(Clone)]
//! struct DemoConfig;
//!
//! impl ConfigProvider for DemoConfig {
//!     fn project_name(&self) -> &str { "demo" }
//!     fn bind_address(&self) -> Result<SocketAddr> { Ok(([127, 0, 0, 1], 0).into()) }
//!     fn seed_file(&self) -> Option<PathBuf> { None }
//!     fn seed_demo(&self) -> bool { true }
//! }
//!
//! let state = AppState::from_config(DemoConfig)?;
//! assert_eq!(state.project_name(), "demo");
//! # Ok::<(), roster_core::Error>(())
//! ```

use std::sync::Arc;

use crate::Result;
use crate::service::UserService;
use crate::store::{RecordStore, StoreHandle};
use crate::traits::ConfigProvider;

/// Shared application state.
///
/// Generic over `C: ConfigProvider`. Cloning is cheap: both the
/// configuration and the store sit behind an `Arc`.
#[derive(Debug)]
pub struct AppState<C: ConfigProvider> {
    config: Arc<C>,
    store: StoreHandle,
}

impl<C: ConfigProvider> AppState<C> {
    /// Create state from a configuration and an already built store.
    pub fn new(config: C, store: StoreHandle) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Create state, seeding a fresh store as the configuration asks.
    ///
    /// The demo fixture is applied first, then the seed file (if any).
    ///
    /// # Errors
    ///
    /// Returns an error if the seed file cannot be read or parsed.
    pub fn from_config(config: C) -> Result<Self> {
        let mut store = if config.seed_demo() {
            RecordStore::demo()
        } else {
            RecordStore::new()
        };

        if let Some(path) = config.seed_file() {
            store.load_seed_file(&path)?;
        }

        log::info!(
            "{}: record store ready with {} records",
            config.project_name(),
            store.len()
        );
        Ok(Self::new(config, StoreHandle::new(store)))
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Get a cloneable handle to the configuration.
    pub fn config_arc(&self) -> Arc<C> {
        Arc::clone(&self.config)
    }

    /// The shared store handle.
    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    /// A service façade over the shared store.
    pub fn service(&self) -> UserService {
        UserService::new(self.store.clone())
    }

    /// Get the project name from the configuration.
    pub fn project_name(&self) -> &str {
        self.config.project_name()
    }
}

impl<C: ConfigProvider> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            store: self.store.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::path::PathBuf;

    #[derive(Clone, Debug)]
    struct TestConfig {
        demo: bool,
        seed: Option<PathBuf>,
    }

    impl ConfigProvider for TestConfig {
        fn project_name(&self) -> &str {
            "test-project"
        }

        fn bind_address(&self) -> Result<SocketAddr> {
            Ok(SocketAddr::from(([127, 0, 0, 1], 0)))
        }

        fn seed_file(&self) -> Option<PathBuf> {
            self.seed.clone()
        }

        fn seed_demo(&self) -> bool {
            self.demo
        }
    }

    fn test_config() -> TestConfig {
        TestConfig {
            demo: false,
            seed: None,
        }
    }

    #[tokio::test]
    async fn test_from_config_empty() {
        let state = AppState::from_config(test_config()).unwrap();
        assert!(state.store().read().await.is_empty());
        assert_eq!(state.project_name(), "test-project");
    }

    #[tokio::test]
    async fn test_from_config_demo_then_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(&path, r#"[{"name": "Alice", "job": "Engineer"}]"#).unwrap();

        let state = AppState::from_config(TestConfig {
            demo: true,
            seed: Some(path),
        })
        .unwrap();

        let users = state.service().find_all(None).await;
        let names: Vec<_> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["John Doe", "Jane Doe", "Alice"]);
        assert_eq!(users[2].id, 3);
    }

    #[test]
    fn test_from_config_bad_seed() {
        let result = AppState::from_config(TestConfig {
            demo: false,
            seed: Some(PathBuf::from("/nonexistent/seed.json")),
        });
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_clone_shares_store() {
        let state = AppState::new(test_config(), StoreHandle::new(RecordStore::demo()));
        let cloned = state.clone();

        cloned.service().remove(1).await.unwrap();
        assert_eq!(state.store().read().await.len(), 1);
        assert!(Arc::ptr_eq(&state.config_arc(), &cloned.config_arc()));
    }

    #[test]
    fn test_app_state_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AppState<TestConfig>>();
    }
}
