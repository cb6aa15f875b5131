//! In-memory record store.
//!
//! [`RecordStore`] owns the collection of user records and every lookup and
//! mutation primitive. Lookups come in two families:
//!
//! - **Tracked** ([`find_by_id`](RecordStore::find_by_id),
//!   [`find_by_name`](RecordStore::find_by_name)) increment the access count
//!   of every matched record exactly once per call.
//! - **Untracked** ([`get`](RecordStore::get),
//!   [`find_all`](RecordStore::find_all),
//!   [`get_access_count`](RecordStore::get_access_count),
//!   [`get_permissions`](RecordStore::get_permissions)) never touch it.
//!
//! No method fails for a missing id: absence is `None`, `false`, or an empty
//! collection.
//!
//! [`StoreHandle`] wraps a store in a single reader-writer lock so it can be
//! shared across request handlers. Mutations and tracked lookups take the
//! write side.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::record::{CreateRequest, PermissionKind, PermissionSet, Record, RecordId, UpdateRequest};
use crate::{Error, Result};

/// Ordered, id-keyed collection of user records.
///
/// # Example
///
/// ```
/// use roster_core::{CreateRequest, RecordStore};
///
/// let mut store = RecordStore::new();
/// let id = store.create(CreateRequest::new("Alice", "Engineer")).id;
///
/// assert_eq!(store.find_by_id(id).map(|r| r.access_count), Some(1));
/// assert_eq!(store.get_access_count(id), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<Record>,
    next_id: RecordId,
}

impl RecordStore {
    /// Create an empty store. The first record gets id 1.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a store holding `records` in the given order.
    ///
    /// New ids continue after the highest id present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if two records share an id.
    pub fn with_records(records: Vec<Record>) -> Result<Self> {
        let mut seen = std::collections::HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(Error::validation(format!(
                    "duplicate record id {}",
                    record.id
                )));
            }
        }
        let next_id = records.iter().map(|r| r.id).max().map_or(1, |max| max + 1);
        Ok(Self { records, next_id })
    }

    /// Store seeded with the two demo users, John Doe and Jane Doe.
    pub fn demo() -> Self {
        let mut store = Self::new();
        store.create(
            CreateRequest::new("John Doe", "Developer")
                .with_permissions([PermissionKind::Update, PermissionKind::Delete]),
        );
        store.create(CreateRequest::new("Jane Doe", "Designer"));
        store
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id and count the access.
    pub fn find_by_id(&mut self, id: RecordId) -> Option<&Record> {
        let record = self.records.iter_mut().find(|r| r.id == id)?;
        record.access_count += 1;
        Some(&*record)
    }

    /// Case-insensitive substring search on name.
    ///
    /// Every match has its access count incremented once. Matches are
    /// returned in store order.
    pub fn find_by_name(&mut self, query: &str) -> Vec<Record> {
        let needle = query.to_lowercase();
        self.records
            .iter_mut()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .map(|r| {
                r.access_count += 1;
                r.clone()
            })
            .collect()
    }

    /// Independent copy of every record, in store order.
    pub fn find_all(&self) -> Vec<Record> {
        self.records.clone()
    }

    /// Look up a record by id without counting the access.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Stored access count, without incrementing it.
    pub fn get_access_count(&self, id: RecordId) -> Option<u64> {
        self.get(id).map(|r| r.access_count)
    }

    /// Permissions granted to a record; empty for an unknown id.
    pub fn get_permissions(&self, id: RecordId) -> PermissionSet {
        self.get(id)
            .map(|r| r.permissions.clone())
            .unwrap_or_default()
    }

    /// Append a new record built from `request` and return it.
    pub fn create(&mut self, request: CreateRequest) -> &Record {
        let id = self.next_id;
        self.next_id += 1;

        let index = self.records.len();
        self.records.push(Record {
            id,
            name: request.name,
            job: request.job,
            access_count: 0,
            permissions: request.permissions,
        });
        log::debug!("created record {id}");
        &self.records[index]
    }

    /// Remove the record with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: RecordId) -> bool {
        match self.records.iter().position(|r| r.id == id) {
            Some(index) => {
                self.records.remove(index);
                log::debug!("deleted record {id}");
                true
            }
            None => false,
        }
    }

    /// Merge the fields present in `request` into the record with `id`.
    pub fn update(&mut self, id: RecordId, request: UpdateRequest) -> Option<&Record> {
        let record = self.records.iter_mut().find(|r| r.id == id)?;
        record.apply(request);
        log::debug!("updated record {id}");
        Some(&*record)
    }

    /// Create one record per entry of a JSON array of create requests.
    ///
    /// Returns the number of records added.
    pub fn load_seed_file(&mut self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let requests: Vec<CreateRequest> = serde_json::from_str(&content)
            .map_err(|e| Error::serialization(format!("{}: {e}", path.display())))?;

        let count = requests.len();
        for request in requests {
            self.create(request);
        }
        log::info!("seeded {count} records from {}", path.display());
        Ok(count)
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Shared handle
// ============================================================================

/// Cloneable, lock-guarded handle to a [`RecordStore`].
///
/// Built once at start-up and passed to every component that needs the
/// store. All clones refer to the same records.
#[derive(Debug, Clone, Default)]
pub struct StoreHandle {
    inner: Arc<RwLock<RecordStore>>,
}

impl StoreHandle {
    /// Wrap a store.
    pub fn new(store: RecordStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Shared access for untracked reads.
    pub async fn read(&self) -> RwLockReadGuard<'_, RecordStore> {
        self.inner.read().await
    }

    /// Exclusive access for mutations and tracked lookups.
    pub async fn write(&self) -> RwLockWriteGuard<'_, RecordStore> {
        self.inner.write().await
    }

    /// Permissions for `id`; empty for an unknown id.
    pub async fn permissions(&self, id: RecordId) -> PermissionSet {
        self.read().await.get_permissions(id)
    }
}

impl From<RecordStore> for StoreHandle {
    fn from(store: RecordStore) -> Self {
        Self::new(store)
    }
}

// ============================================================================
// Tests
// ============================================================================
