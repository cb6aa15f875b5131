//! Permission evaluation against stored records.
//!
//! The evaluator never checks whether the target record exists. An unknown
//! id resolves to an empty permission set, so any non-empty requirement
//! against it fails with [`Error::Forbidden`], not
//! [`Error::NotFound`](roster_core::Error::NotFound). Callers that rely on
//! a 404 for missing records must not put the guard in front of them.

use async_trait::async_trait;
use roster_core::{Error, PermissionSet, RecordId, Result, StoreHandle};

/// Message carried by the forbidden error.
pub const MISSING_PERMISSIONS: &str = "This user don't have the required permissions";

/// Source of the permission set granted to a record.
///
/// Implementations return an empty set for unknown ids instead of failing.
#[async_trait]
pub trait PermissionSource: Send + Sync {
    /// Permissions granted to `id`.
    async fn permissions(&self, id: RecordId) -> PermissionSet;
}

#[async_trait]
impl PermissionSource for StoreHandle {
    async fn permissions(&self, id: RecordId) -> PermissionSet {
        StoreHandle::permissions(self, id).await
    }
}

/// Checks a record's granted permissions against a required set.
///
/// # Example
///
/// ```
/// use roster_acl::PermissionEvaluator;
/// use roster_core::{PermissionKind, PermissionSet, RecordStore, StoreHandle};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let evaluator = PermissionEvaluator::new(StoreHandle::new(RecordStore::demo()));
/// let required = PermissionSet::from([PermissionKind::Delete]);
///
/// assert!(evaluator.check(1, &required).await.is_ok());
/// assert!(evaluator.check(2, &required).await.unwrap_err().is_forbidden());
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct PermissionEvaluator<S = StoreHandle> {
    source: S,
}

impl<S: PermissionSource> PermissionEvaluator<S> {
    /// Create an evaluator reading permissions from `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Required permissions that `id` has not been granted.
    pub async fn missing(&self, id: RecordId, required: &PermissionSet) -> PermissionSet {
        if required.is_empty() {
            return PermissionSet::new();
        }
        let granted = self.source.permissions(id).await;
        required.difference(&granted).copied().collect()
    }

    /// Returns `true` if `id` holds every permission in `required`.
    pub async fn allows(&self, id: RecordId, required: &PermissionSet) -> bool {
        self.missing(id, required).await.is_empty()
    }

    /// Fail unless `id` holds every permission in `required`.
    ///
    /// # Errors
    ///
    /// [`Error::Forbidden`] naming nothing but [`MISSING_PERMISSIONS`]; the
    /// missing kinds are logged at debug level.
    pub async fn check(&self, id: RecordId, required: &PermissionSet) -> Result<()> {
        let missing = self.missing(id, required).await;
        if missing.is_empty() {
            return Ok(());
        }

        tracing::debug!(
            record = id,
            missing = ?missing.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
            "permission check failed"
        );
        Err(Error::forbidden(MISSING_PERMISSIONS))
    }
}
