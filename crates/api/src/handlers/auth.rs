//! Handlers for the `/auth` resource (signup, login, password change).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use ratewise_core::error::CoreError;
use ratewise_core::roles::Role;
use ratewise_core::validate::{validate_email, validate_password, validate_required};
use ratewise_db::models::user::{CreateUser, UserResponse};
use ratewise_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub address: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `PUT /auth/update-password`.
#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Successful authentication response returned by signup and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /auth/signup
///
/// Create a USER account and issue a bearer token.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AuthResponse>>)> {
    // 1. Validate input shape.
    validate_required("Name", &input.name)?;
    validate_email(&input.email)?;
    validate_password(&input.password)?;

    // 2. Friendly duplicate check; uq_users_email backstops the race.
    if UserRepo::find_by_email(&state.pool, &input.email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "User already exists with this email".into(),
        )));
    }

    // 3. Hash and create.
    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        email: input.email,
        password_hash: hashed,
        name: input.name,
        address: input.address,
        role: Role::User.as_str().to_string(),
    };
    let user = UserRepo::create(&state.pool, &create_dto).await?;

    // 4. Issue a token.
    let response = build_auth_response(&state, user.to_response())?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// POST /auth/login
///
/// Authenticate with email + password. Returns the user and a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    // 1. Find the account.
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    // 2. Verify the password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }

    // 3. Issue a token.
    let response = build_auth_response(&state, user.to_response())?;
    Ok(Json(DataResponse { data: response }))
}

/// PUT /auth/update-password
///
/// Self-service password change for any authenticated role. Returns 204.
pub async fn update_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdatePasswordRequest>,
) -> AppResult<StatusCode> {
    change_password(&state, user.user_id, &input).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verified password change shared by `/auth/update-password` and the
/// store-owner alias route.
///
/// Steps, in order: new password meets the minimum length; the account
/// still exists; the current password verifies; the new password differs
/// from the current one; re-hash and persist.
pub async fn change_password(
    state: &AppState,
    user_id: ratewise_core::types::DbId,
    input: &UpdatePasswordRequest,
) -> AppResult<()> {
    validate_password(&input.new_password)?;

    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    let current_valid = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    let same_as_current = verify_password(&input.new_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if same_as_current {
        return Err(AppError::Core(CoreError::Validation(
            "New password must be different from current password".into(),
        )));
    }

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user_id, &hashed).await?;

    Ok(())
}

/// Mint a token for the given user and assemble the auth response.
fn build_auth_response(state: &AppState, user: UserResponse) -> AppResult<AuthResponse> {
    let token = generate_token(user.id, &user.role, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let expires_in = state.config.jwt.expiry_mins * 60;

    Ok(AuthResponse {
        user,
        token,
        expires_in,
    })
}
