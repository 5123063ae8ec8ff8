//! Route definitions for authentication.
//!
//! All routes are mounted under `/auth`.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Authentication routes mounted at `/auth`.
///
/// ```text
/// POST /signup          -> signup
/// POST /login           -> login
/// PUT  /update-password -> update_password (any authenticated role)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/update-password", put(auth::update_password))
}
