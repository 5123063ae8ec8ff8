pub mod admin;
pub mod auth;
pub mod health;
pub mod owner;
pub mod stores;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree (everything except the root-level health check).
///
/// ```text
/// /auth/*             signup, login, password change
/// /admin/*            dashboard, user and store management (ADMIN)
/// /api/stores/*       browsing + rating lifecycle, owner views
/// /api/store-owner/*  alias for the owner views
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/api/stores", stores::router().merge(owner::router()))
        .nest("/api/store-owner", owner::router())
}
