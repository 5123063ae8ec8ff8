//! Route definitions for platform administration.
//!
//! All routes are mounted under `/admin` and require the `ADMIN` role
//! (enforced per-handler via the `RequireAdmin` extractor).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Admin routes mounted at `/admin`.
///
/// ```text
/// GET  /dashboard               -> dashboard
/// GET  /users                   -> list_users
/// POST /users                   -> create_user
/// GET  /users/{id}              -> get_user
/// GET  /stores                  -> list_stores
/// POST /stores                  -> create_store
/// POST /create-admin            -> create_admin
/// POST /create-store-with-owner -> create_store_with_owner
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route("/users/{id}", get(admin::get_user))
        .route("/stores", get(admin::list_stores).post(admin::create_store))
        .route("/create-admin", post(admin::create_admin))
        .route(
            "/create-store-with-owner",
            post(admin::create_store_with_owner),
        )
}
