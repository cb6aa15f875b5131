//! Permission guard middleware.
//!
//! Routes that mutate a record are layered with [`require_permissions`],
//! which reads the `id` route parameter and asks the
//! [`PermissionEvaluator`] whether that record holds the required
//! permissions. The request is rejected with `403` before the handler runs
//! if it does not.
//!
//! An `id` that is missing, undecodable, or not numeric names no record, which has no
//! permissions, so the guard answers `403` there too.

use std::collections::HashMap;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use roster_acl::PermissionEvaluator;
use roster_core::{PermissionKind, PermissionSet, RecordId};

use crate::error::{ApiError, ApiResult};

/// Guard configuration for one route: who checks, and what is required.
#[derive(Debug, Clone)]
pub struct RequirePermissions {
    evaluator: PermissionEvaluator,
    required: PermissionSet,
}

impl RequirePermissions {
    /// Require every permission in `required`.
    pub fn new(
        evaluator: PermissionEvaluator,
        required: impl IntoIterator<Item = PermissionKind>,
    ) -> Self {
        Self {
            evaluator,
            required: required.into_iter().collect(),
        }
    }

    /// The permissions this guard requires.
    pub fn required(&self) -> &PermissionSet {
        &self.required
    }

    async fn authorize(&self, id: Option<RecordId>) -> ApiResult<()> {
        match id {
            Some(id) => self
                .evaluator
                .check(id, &self.required)
                .await
                .map_err(ApiError::from),
            None if self.required.is_empty() => Ok(()),
            None => Err(ApiError::Forbidden(
                roster_acl::MISSING_PERMISSIONS.to_string(),
            )),
        }
    }
}

/// Middleware rejecting requests whose target record lacks permissions.
pub async fn require_permissions(
    State(guard): State<RequirePermissions>,
    params: Result<Path<HashMap<String, String>>, PathRejection>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let id = params
        .ok()
        .and_then(|Path(params)| params.get("id")?.parse::<RecordId>().ok());
    guard.authorize(id).await?;
    Ok(next.run(request).await)
}
