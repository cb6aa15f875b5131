//! Router construction.

use axum::middleware;
use axum::routing::{delete, get, patch};
use axum::Router;
use roster_acl::PermissionEvaluator;
use roster_core::{AppState, ConfigProvider, PermissionKind, StoreHandle, UserService};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::guard::{require_permissions, RequirePermissions};
use crate::handlers::{
    create_user, find_access, find_user, find_users, health, remove_user, update_user,
};

/// State shared by every handler.
///
/// The service and the evaluator both read the same store.
#[derive(Debug, Clone)]
pub struct ApiState {
    /// Service façade over the store.
    pub service: UserService,
    /// Permission evaluator over the store.
    pub evaluator: PermissionEvaluator,
}

impl ApiState {
    /// Build state around one store handle.
    pub fn new(store: StoreHandle) -> Self {
        Self {
            service: UserService::new(store.clone()),
            evaluator: PermissionEvaluator::new(store),
        }
    }
}

impl<C: ConfigProvider> From<&AppState<C>> for ApiState {
    fn from(state: &AppState<C>) -> Self {
        Self::new(state.store().clone())
    }
}

/// Create the HTTP router.
pub fn router(state: ApiState) -> Router {
    let update_guard = middleware::from_fn_with_state(
        RequirePermissions::new(state.evaluator.clone(), [PermissionKind::Update]),
        require_permissions,
    );
    let delete_guard = middleware::from_fn_with_state(
        RequirePermissions::new(state.evaluator.clone(), [PermissionKind::Delete]),
        require_permissions,
    );

    Router::new()
        .route("/health", get(health))
        .route("/users", get(find_users).post(create_user))
        .route("/users/{id}", get(find_user))
        .route("/users/{id}", patch(update_user).route_layer(update_guard))
        .route("/users/{id}", delete(remove_user).route_layer(delete_guard))
        .route("/users/{id}/access", get(find_access))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

// ============================================================================
// Tests
// ============================================================================
