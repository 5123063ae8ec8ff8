//! Rating entity model and joined views.

use ratewise_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full rating row from the `ratings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rating {
    pub id: DbId,
    pub value: i16,
    pub user_id: DbId,
    pub store_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Rating joined with the rater's public identity, for store-owner views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RatingWithUser {
    pub id: DbId,
    pub value: i16,
    pub created_at: Timestamp,
    pub user_id: DbId,
    pub user_name: String,
    pub user_email: String,
}

/// Rating joined with the rated store's name, for admin user detail.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RatingWithStore {
    pub id: DbId,
    pub value: i16,
    pub created_at: Timestamp,
    pub store_id: DbId,
    pub store_name: String,
}
