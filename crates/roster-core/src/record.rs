//! User records and the request shapes that create and modify them.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned to a record by the store.
pub type RecordId = u64;

/// Set of permissions granted to a record.
///
/// Ordered so that serialized output is stable.
pub type PermissionSet = BTreeSet<PermissionKind>;

/// A permission that can be granted to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionKind {
    /// May be deleted.
    Delete,
    /// May be updated.
    Update,
}

impl PermissionKind {
    /// Wire name of the permission.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Update => "update",
        }
    }
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Unique, immutable identifier.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Job title.
    pub job: String,
    /// Number of tracked lookups that have hit this record.
    pub access_count: u64,
    /// Permissions granted to this record.
    pub permissions: PermissionSet,
}

impl Record {
    /// Returns `true` if every permission in `required` is granted.
    pub fn grants(&self, required: &PermissionSet) -> bool {
        required.is_subset(&self.permissions)
    }

    /// Overwrite the fields present in `update`, leaving the rest untouched.
    pub(crate) fn apply(&mut self, update: UpdateRequest) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(job) = update.job {
            self.job = job;
        }
        if let Some(permissions) = update.permissions {
            self.permissions = permissions;
        }
    }
}

/// Payload for creating a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRequest {
    /// Display name.
    pub name: String,
    /// Job title.
    pub job: String,
    /// Permissions to grant; empty when omitted.
    #[serde(default)]
    pub permissions: PermissionSet,
}

impl CreateRequest {
    /// Create a request with no permissions.
    pub fn new(name: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job: job.into(),
            permissions: PermissionSet::new(),
        }
    }

    /// Grant the given permissions.
    pub fn with_permissions(mut self, permissions: impl IntoIterator<Item = PermissionKind>) -> Self {
        self.permissions = permissions.into_iter().collect();
        self
    }
}

/// Partial payload for updating a record.
///
/// Only fields that are `Some` overwrite the stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New job title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,
    /// Replacement permission set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionSet>,
}

impl UpdateRequest {
    /// An update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the new name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the new job.
    pub fn with_job(mut self, job: impl Into<String>) -> Self {
        self.job = Some(job.into());
        self
    }

    /// Replace the permission set.
    pub fn with_permissions(mut self, permissions: impl IntoIterator<Item = PermissionKind>) -> Self {
        self.permissions = Some(permissions.into_iter().collect());
        self
    }

    /// Returns `true` if no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.job.is_none() && self.permissions.is_none()
    }
}
