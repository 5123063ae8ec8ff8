//! Handlers for the store-owner endpoints: the owner's store, the ratings
//! it has received, and a small dashboard.
//!
//! All handlers require the `STORE_OWNER` role. An owner may hold several
//! stores; these views operate on the first one (lowest id).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use ratewise_core::rating::{summarize, RatingSummary};
use ratewise_db::models::rating::RatingWithUser;
use ratewise_db::models::store::Store;
use ratewise_db::repositories::{RatingRepo, StoreRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::auth::{change_password, UpdatePasswordRequest};
use crate::middleware::rbac::RequireOwner;
use crate::response::DataResponse;
use crate::state::AppState;

/// How many of the latest ratings the dashboard shows.
const RECENT_RATINGS: usize = 5;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response for `GET /api/stores/my-store`.
#[derive(Debug, Serialize)]
pub struct MyStoreResponse {
    #[serde(flatten)]
    pub store: Store,
    pub average_rating: f64,
    pub total_ratings: i64,
}

/// Response for `GET /api/stores/my-ratings`.
#[derive(Debug, Serialize)]
pub struct MyRatingsResponse {
    pub store_name: String,
    #[serde(flatten)]
    pub summary: RatingSummary,
    pub ratings: Vec<RatingWithUser>,
}

/// Response for `GET /api/stores/dashboard`.
#[derive(Debug, Serialize)]
pub struct OwnerDashboardResponse {
    pub store_id: ratewise_core::types::DbId,
    pub store_name: String,
    #[serde(flatten)]
    pub summary: RatingSummary,
    /// The latest ratings, newest first.
    pub recent_ratings: Vec<RatingWithUser>,
    /// Distinct users who have rated the store.
    pub users_rated: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/stores/my-store
///
/// The caller's store with its rating aggregates. 404 when the caller
/// owns no store.
pub async fn my_store(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
) -> AppResult<Json<DataResponse<MyStoreResponse>>> {
    let store = owned_store(&state, user.user_id).await?;
    let values = RatingRepo::values_for_store(&state.pool, store.id).await?;
    let summary = summarize(&values);

    Ok(Json(DataResponse {
        data: MyStoreResponse {
            store,
            average_rating: summary.average_rating,
            total_ratings: summary.total_ratings,
        },
    }))
}

/// GET /api/stores/my-ratings
///
/// Every rating the caller's store has received, newest first, with the
/// rater's identity, plus the aggregate summary.
pub async fn my_ratings(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
) -> AppResult<Json<DataResponse<MyRatingsResponse>>> {
    let store = owned_store(&state, user.user_id).await?;

    let ratings = RatingRepo::list_for_store_with_users(&state.pool, store.id).await?;
    let values: Vec<i16> = ratings.iter().map(|r| r.value).collect();
    let summary = summarize(&values);

    Ok(Json(DataResponse {
        data: MyRatingsResponse {
            store_name: store.name,
            summary,
            ratings,
        },
    }))
}

/// GET /api/stores/dashboard
///
/// Aggregate view for the caller's store: summary with distribution, the
/// latest ratings, and how many distinct users have rated.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
) -> AppResult<Json<DataResponse<OwnerDashboardResponse>>> {
    let store = owned_store(&state, user.user_id).await?;

    let ratings = RatingRepo::list_for_store_with_users(&state.pool, store.id).await?;
    let values: Vec<i16> = ratings.iter().map(|r| r.value).collect();
    let summary = summarize(&values);

    // One rating per user/store pair, so every row is a distinct rater.
    let users_rated = ratings.len() as i64;
    let recent_ratings: Vec<RatingWithUser> =
        ratings.into_iter().take(RECENT_RATINGS).collect();

    Ok(Json(DataResponse {
        data: OwnerDashboardResponse {
            store_id: store.id,
            store_name: store.name,
            summary,
            recent_ratings,
            users_rated,
        },
    }))
}

/// PUT /api/stores/update-password
///
/// Password change alias for store owners; same semantics as
/// `/auth/update-password`. Returns 204.
pub async fn update_password(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
    Json(input): Json<UpdatePasswordRequest>,
) -> AppResult<StatusCode> {
    change_password(&state, user.user_id, &input).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the caller's store or 404.
async fn owned_store(state: &AppState, owner_id: ratewise_core::types::DbId) -> AppResult<Store> {
    StoreRepo::find_first_by_owner(&state.pool, owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Store not found".into()))
}
