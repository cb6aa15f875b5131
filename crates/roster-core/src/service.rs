//! User service façade.
//!
//! [`UserService`] is the only entry point request handlers use. It forwards
//! to the shared [`StoreHandle`] and turns absence into
//! [`Error::NotFound`](crate::Error::NotFound) for updates and removals.
//! Plain reads pass absence through unchanged.

use crate::record::{CreateRequest, Record, RecordId, UpdateRequest};
use crate::store::StoreHandle;
use crate::{Error, Result};

/// Message carried by the not-found error of [`UserService`].
pub const USER_NOT_FOUND: &str = "User not found";

/// Create/read/update/delete operations over the record store.
#[derive(Debug, Clone)]
pub struct UserService {
    store: StoreHandle,
}

impl UserService {
    /// Create a service over an existing store handle.
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// The underlying store handle.
    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    /// Create a record.
    pub async fn create(&self, request: CreateRequest) -> Record {
        let mut store = self.store.write().await;
        store.create(request).clone()
    }

    /// Search by name when `name` is non-empty, otherwise list everything.
    ///
    /// Only the search counts as an access.
    pub async fn find_all(&self, name: Option<&str>) -> Vec<Record> {
        match name.filter(|n| !n.is_empty()) {
            Some(query) => self.store.write().await.find_by_name(query),
            None => self.store.read().await.find_all(),
        }
    }

    /// Look up one record, counting the access.
    pub async fn find_by_id(&self, id: RecordId) -> Option<Record> {
        let mut store = self.store.write().await;
        store.find_by_id(id).cloned()
    }

    /// Access count of one record.
    pub async fn find_access(&self, id: RecordId) -> Option<u64> {
        self.store.read().await.get_access_count(id)
    }

    /// Merge `request` into the record with `id`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no record has that id.
    pub async fn update(&self, id: RecordId, request: UpdateRequest) -> Result<Record> {
        let mut store = self.store.write().await;
        store
            .update(id, request)
            .cloned()
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }

    /// Remove the record with `id`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no record has that id.
    pub async fn remove(&self, id: RecordId) -> Result<()> {
        if self.store.write().await.delete(id) {
            Ok(())
        } else {
            Err(Error::not_found(USER_NOT_FOUND))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::record::PermissionKind;
    use crate::store::RecordStore;

    fn service() -> UserService {
        UserService::new(StoreHandle::new(RecordStore::demo()))
    }

    #[tokio::test]
    async fn test_create() {
        let service = service();
        let created = service
            .create(CreateRequest::new("Alice", "Engineer"))
            .await;

        assert_eq!(created.id, 3);
        assert_eq!(created.access_count, 0);
        assert!(created.permissions.is_empty());
        assert_eq!(service.find_all(None).await.len(), 3);
    }

    #[tokio::test]
    async fn test_find_all_without_name_is_untracked() {
        let service = service();
        let users = service.find_all(None).await;
        assert_eq!(users.len(), 2);
        assert_eq!(service.find_access(1).await, Some(0));
    }

    #[tokio::test]
    async fn test_find_all_empty_name_lists_everything() {
        let service = service();
        assert_eq!(service.find_all(Some("")).await.len(), 2);
        assert_eq!(service.find_access(1).await, Some(0));
    }

    #[tokio::test]
    async fn test_find_all_with_name_searches() {
        let service = service();
        let users = service.find_all(Some("Doe")).await;
        assert_eq!(users.len(), 2);
        assert_eq!(service.find_access(1).await, Some(1));
        assert_eq!(service.find_access(2).await, Some(1));
    }

    #[tokio::test]
    async fn test_find_by_id_counts() {
        let service = service();
        assert_eq!(service.find_by_id(1).await.unwrap().access_count, 1);
        assert_eq!(service.find_by_id(1).await.unwrap().access_count, 2);
        assert_eq!(service.find_access(1).await, Some(2));
    }

    #[tokio::test]
    async fn test_find_by_id_absent_passes_through() {
        let service = service();
        assert!(service.find_by_id(3).await.is_none());
        assert_eq!(service.find_access(3).await, None);
    }

    #[tokio::test]
    async fn test_update() {
        let service = service();
        let request = UpdateRequest::new()
            .with_name("John Doe Jr.")
            .with_job("Senior Developer")
            .with_permissions([PermissionKind::Update, PermissionKind::Delete]);

        let updated = service.update(1, request).await.unwrap();
        assert_eq!(updated.name, "John Doe Jr.");
        assert_eq!(updated.job, "Senior Developer");
        assert_eq!(updated.permissions.len(), 2);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let service = service();
        let err = service
            .update(3, UpdateRequest::new().with_job("Senior"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), format!("Not found: {USER_NOT_FOUND}"));
    }

    #[tokio::test]
    async fn test_remove() {
        let service = service();
        service.remove(1).await.unwrap();
        assert_eq!(service.find_all(None).await.len(), 1);

        let err = service.remove(1).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(service.find_all(None).await.len(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_store() {
        let service = service();
        let other = service.clone();
        other.remove(2).await.unwrap();
        assert!(service.find_by_id(2).await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_lookups_count_every_access() {
        const LOOKUPS: u64 = 64;
        let service = service();

        let tasks: Vec<_> = (0..LOOKUPS)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.find_by_id(1).await })
            })
            .collect();
        for task in tasks {
            assert!(task.await.unwrap().is_some());
        }

        assert_eq!(service.find_access(1).await, Some(LOOKUPS));
        assert_eq!(service.find_access(2).await, Some(0));
    }
}
