//! Handlers for the `/admin` resource (dashboard, user and store management).
//!
//! All handlers require the `ADMIN` role via [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use ratewise_core::error::CoreError;
use ratewise_core::pagination::{clamp_limit, clamp_page, Pagination};
use ratewise_core::rating::round2;
use ratewise_core::roles::Role;
use ratewise_core::types::DbId;
use ratewise_core::validate::{validate_email, validate_password, validate_required};
use ratewise_db::models::dashboard::DashboardTotals;
use ratewise_db::models::rating::RatingWithStore;
use ratewise_db::models::store::{CreateStore, Store, StoreFilter, StoreWithStats};
use ratewise_db::models::user::{CreateUser, UserFilter, UserResponse};
use ratewise_db::repositories::{DashboardRepo, RatingRepo, StoreRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub address: Option<String>,
    /// Role spelling; defaults to `USER` when omitted.
    pub role: Option<String>,
}

/// Request body for `POST /admin/create-admin`.
#[derive(Debug, Deserialize)]
pub struct CreateAdminRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: Option<String>,
}

/// Request body for `POST /admin/stores`.
#[derive(Debug, Deserialize)]
pub struct CreateStoreRequest {
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub category: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub owner_id: Option<DbId>,
}

/// Request body for `POST /admin/create-store-with-owner`.
#[derive(Debug, Deserialize)]
pub struct CreateStoreWithOwnerRequest {
    pub store: StoreInput,
    pub owner: OwnerInput,
}

#[derive(Debug, Deserialize)]
pub struct StoreInput {
    pub name: String,
    pub email: String,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OwnerInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: Option<String>,
}

/// Query parameters for `GET /admin/users`.
#[derive(Debug, Deserialize)]
pub struct ListUsersParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub role: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Query parameters for `GET /admin/stores`.
#[derive(Debug, Deserialize)]
pub struct ListStoresParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Keep only stores whose average rating is at least this value.
    pub rating: Option<f64>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Trimmed store reference embedded in user listings.
#[derive(Debug, Serialize)]
pub struct OwnedStoreRef {
    pub id: DbId,
    pub name: String,
    pub email: String,
}

impl From<&Store> for OwnedStoreRef {
    fn from(store: &Store) -> Self {
        Self {
            id: store.id,
            name: store.name.clone(),
            email: store.email.clone(),
        }
    }
}

/// One row of the admin user listing: the user plus their owned stores.
#[derive(Debug, Serialize)]
pub struct UserListEntry {
    #[serde(flatten)]
    pub user: UserResponse,
    pub stores: Vec<OwnedStoreRef>,
}

/// Paginated user listing.
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserListEntry>,
    pub pagination: Pagination,
}

/// Paginated store listing with aggregates.
#[derive(Debug, Serialize)]
pub struct StoreListResponse {
    pub stores: Vec<StoreWithStats>,
    pub pagination: Pagination,
}

/// Admin user detail: profile, submitted ratings, owned stores.
#[derive(Debug, Serialize)]
pub struct UserDetailResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub ratings: Vec<RatingWithStore>,
    pub stores: Vec<Store>,
}

/// Response for `POST /admin/create-store-with-owner`.
#[derive(Debug, Serialize)]
pub struct StoreWithOwnerResponse {
    pub store: Store,
    pub owner: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /admin/dashboard
///
/// Aggregate platform counts.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<DashboardTotals>>> {
    let totals = DashboardRepo::totals(&state.pool).await?;
    Ok(Json(DataResponse { data: totals }))
}

/// POST /admin/users
///
/// Create an account with an explicit role (defaults to USER).
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    validate_required("Name", &input.name)?;
    validate_email(&input.email)?;
    validate_password(&input.password)?;

    let role: Role = input
        .role
        .as_deref()
        .unwrap_or("USER")
        .parse()
        .map_err(CoreError::Validation)?;

    let user = create_account(&state, &input.email, &input.password, &input.name, input.address.clone(), role).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// POST /admin/create-admin
///
/// Create an ADMIN account.
pub async fn create_admin(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateAdminRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    validate_required("Name", &input.name)?;
    validate_email(&input.email)?;
    validate_password(&input.password)?;

    let user = create_account(&state, &input.email, &input.password, &input.name, input.address.clone(), Role::Admin).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// GET /admin/users
///
/// List users with substring filters and page/limit pagination. Each row
/// embeds the stores the user owns.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListUsersParams>,
) -> AppResult<Json<DataResponse<UserListResponse>>> {
    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit);
    let offset = Pagination::offset(page, limit);

    let filter = UserFilter {
        role: params.role,
        name: params.name,
        email: params.email,
        address: params.address,
    };

    let users = UserRepo::list_filtered(&state.pool, &filter, limit, offset).await?;
    let total = UserRepo::count_filtered(&state.pool, &filter).await?;

    // One query for all owned stores on this page instead of per-user lookups.
    let user_ids: Vec<DbId> = users.iter().map(|u| u.id).collect();
    let owned = StoreRepo::find_by_owner_ids(&state.pool, &user_ids).await?;

    let entries: Vec<UserListEntry> = users
        .iter()
        .map(|u| UserListEntry {
            user: u.to_response(),
            stores: owned
                .iter()
                .filter(|s| s.owner_id == Some(u.id))
                .map(OwnedStoreRef::from)
                .collect(),
        })
        .collect();

    Ok(Json(DataResponse {
        data: UserListResponse {
            users: entries,
            pagination: Pagination::new(page, limit, total),
        },
    }))
}

/// GET /admin/users/{id}
///
/// Full user detail: profile, submitted ratings with store names, and
/// owned stores.
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserDetailResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let ratings = RatingRepo::list_for_user_with_stores(&state.pool, id).await?;
    let stores = StoreRepo::find_by_owner_ids(&state.pool, &[id]).await?;

    Ok(Json(DataResponse {
        data: UserDetailResponse {
            user: user.to_response(),
            ratings,
            stores,
        },
    }))
}

/// POST /admin/stores
///
/// Create a store, optionally linked to an existing owner.
pub async fn create_store(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateStoreRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Store>>)> {
    validate_required("Name", &input.name)?;
    validate_email(&input.email)?;

    // Store names are unique at the application level only (no constraint);
    // emails are additionally backstopped by uq_stores_email.
    if StoreRepo::find_by_name(&state.pool, &input.name).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Store with this name already exists".into(),
        )));
    }
    if StoreRepo::find_by_email(&state.pool, &input.email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Store with this email already exists".into(),
        )));
    }

    let create_dto = CreateStore {
        name: input.name,
        email: input.email,
        address: input.address,
        category: input.category,
        phone: input.phone,
        description: input.description,
        owner_id: input.owner_id,
    };
    let store = StoreRepo::create(&state.pool, &create_dto).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: store })))
}

/// GET /admin/stores
///
/// List stores with filters, pagination, rating aggregates, and owner
/// identity. The optional `rating` filter keeps stores whose rounded
/// average is at least the given value; it applies to the fetched page
/// (the average is derived, not a column).
pub async fn list_stores(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListStoresParams>,
) -> AppResult<Json<DataResponse<StoreListResponse>>> {
    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit);
    let offset = Pagination::offset(page, limit);

    let filter = StoreFilter {
        category: params.category,
        name: params.name,
        email: params.email,
        address: params.address,
    };

    let mut stores = StoreRepo::list_with_stats(&state.pool, &filter, limit, offset).await?;
    let total = StoreRepo::count_filtered(&state.pool, &filter).await?;

    for store in &mut stores {
        store.average_rating = round2(store.average_rating);
    }

    if let Some(min_rating) = params.rating {
        stores.retain(|s| s.average_rating >= min_rating);
    }

    Ok(Json(DataResponse {
        data: StoreListResponse {
            stores,
            pagination: Pagination::new(page, limit, total),
        },
    }))
}

/// POST /admin/create-store-with-owner
///
/// Create a STORE_OWNER account and its store as one transaction: a
/// failure on either insert rolls back both.
pub async fn create_store_with_owner(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateStoreWithOwnerRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<StoreWithOwnerResponse>>)> {
    validate_required("Store name", &input.store.name)?;
    validate_required("Owner name", &input.owner.name)?;
    validate_email(&input.store.email)?;
    validate_email(&input.owner.email)?;
    validate_password(&input.owner.password)?;

    if UserRepo::find_by_email(&state.pool, &input.owner.email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Owner email already exists".into(),
        )));
    }
    if StoreRepo::find_by_email(&state.pool, &input.store.email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Store email already exists".into(),
        )));
    }

    let hashed = hash_password(&input.owner.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let owner_dto = CreateUser {
        email: input.owner.email,
        password_hash: hashed,
        name: input.owner.name,
        address: input.owner.address,
        role: Role::StoreOwner.as_str().to_string(),
    };
    let store_dto = CreateStore {
        name: input.store.name,
        email: input.store.email,
        address: input.store.address,
        category: None,
        phone: None,
        description: None,
        owner_id: None, // linked inside the transaction
    };

    let (owner, store) = StoreRepo::create_with_owner(&state.pool, &owner_dto, &store_dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: StoreWithOwnerResponse {
                store,
                owner: owner.to_response(),
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Duplicate-check, hash, and insert an account with the given role.
async fn create_account(
    state: &AppState,
    email: &str,
    password: &str,
    name: &str,
    address: Option<String>,
    role: Role,
) -> AppResult<UserResponse> {
    if UserRepo::find_by_email(&state.pool, email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "User with this email already exists".into(),
        )));
    }

    let hashed = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        email: email.to_string(),
        password_hash: hashed,
        name: name.to_string(),
        address,
        role: role.as_str().to_string(),
    };
    let user = UserRepo::create(&state.pool, &create_dto).await?;
    Ok(user.to_response())
}
