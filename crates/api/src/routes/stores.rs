//! Route definitions for store browsing and the rating lifecycle.
//!
//! All routes are mounted under `/api/stores`.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::stores;
use crate::state::AppState;

/// User-facing store routes mounted at `/api/stores`.
///
/// ```text
/// GET    /                 -> list_stores (any authenticated role)
/// POST   /rate             -> rate_store (USER, ADMIN)
/// DELETE /rate/{store_id}  -> remove_rating (USER, ADMIN)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(stores::list_stores))
        .route("/rate", post(stores::rate_store))
        .route("/rate/{store_id}", delete(stores::remove_rating))
}
