//! Handlers for the user-facing `/api/stores` endpoints: browsing stores
//! and the rating lifecycle (submit, revise, remove).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use ratewise_core::error::CoreError;
use ratewise_core::rating::{is_valid_rating, round2, MAX_RATING, MIN_RATING};
use ratewise_core::types::DbId;
use ratewise_db::models::rating::Rating;
use ratewise_db::models::store::StoreListing;
use ratewise_db::repositories::{RatingRepo, StoreRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireRater};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /api/stores`.
#[derive(Debug, Deserialize)]
pub struct StoreSearchParams {
    pub search: Option<String>,
}

/// Request body for `POST /api/stores/rate`.
#[derive(Debug, Deserialize)]
pub struct RateStoreRequest {
    pub store_id: DbId,
    /// Deserialized as a float so that a fractional value like `3.5`
    /// reaches the integer check below and gets the standard validation
    /// envelope instead of a body-rejection error.
    pub rating: f64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/stores
///
/// List all stores with their aggregate rating and the caller's own
/// rating. Any authenticated role may browse.
pub async fn list_stores(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<StoreSearchParams>,
) -> AppResult<Json<DataResponse<Vec<StoreListing>>>> {
    let search = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let mut listings = StoreRepo::list_for_user(&state.pool, user.user_id, search).await?;
    for listing in &mut listings {
        listing.average_rating = round2(listing.average_rating);
    }

    Ok(Json(DataResponse { data: listings }))
}

/// POST /api/stores/rate
///
/// Submit or revise the caller's rating for a store (upsert semantics:
/// at most one rating per user/store pair).
pub async fn rate_store(
    State(state): State<AppState>,
    RequireRater(user): RequireRater,
    Json(input): Json<RateStoreRequest>,
) -> AppResult<Json<DataResponse<Rating>>> {
    // The cast saturates for out-of-range floats, which the range check
    // then rejects.
    let value = input.rating as i16;
    if input.rating.fract() != 0.0 || !is_valid_rating(value) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Rating must be an integer between {MIN_RATING} and {MAX_RATING}"
        ))));
    }

    StoreRepo::find_by_id(&state.pool, input.store_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Store",
            id: input.store_id,
        }))?;

    let rating = RatingRepo::upsert(&state.pool, user.user_id, input.store_id, value).await?;

    Ok(Json(DataResponse { data: rating }))
}

/// DELETE /api/stores/rate/{store_id}
///
/// Remove the caller's rating for a store. 404 when the store does not
/// exist or the caller has no rating to remove. Returns 204.
pub async fn remove_rating(
    State(state): State<AppState>,
    RequireRater(user): RequireRater,
    Path(store_id): Path<DbId>,
) -> AppResult<StatusCode> {
    StoreRepo::find_by_id(&state.pool, store_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Store",
            id: store_id,
        }))?;

    let deleted = RatingRepo::delete(&state.pool, user.user_id, store_id).await?;
    if !deleted {
        return Err(AppError::NotFound("No rating found to remove".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}
