//! Route definitions for store-owner self-service views.
//!
//! Mounted twice: merged into `/api/stores` and aliased at
//! `/api/store-owner`. All handlers require the `STORE_OWNER` role.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::owner;
use crate::state::AppState;

/// Store-owner routes.
///
/// ```text
/// GET /my-store         -> my_store
/// GET /my-ratings       -> my_ratings
/// GET /dashboard        -> dashboard
/// PUT /update-password  -> update_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/my-store", get(owner::my_store))
        .route("/my-ratings", get(owner::my_ratings))
        .route("/dashboard", get(owner::dashboard))
        .route("/update-password", put(owner::update_password))
}
