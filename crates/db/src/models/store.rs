//! Store entity model and DTOs.

use ratewise_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full store row from the `stores` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Store {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub category: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub owner_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new store.
#[derive(Debug)]
pub struct CreateStore {
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub category: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub owner_id: Option<DbId>,
}

/// Filters for the admin store listing.
#[derive(Debug, Default)]
pub struct StoreFilter {
    pub category: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Admin listing row: store columns joined with rating aggregates and
/// owner identity. `average_rating` comes back unrounded from SQL AVG;
/// handlers round it for the wire.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoreWithStats {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub category: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub owner_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub average_rating: f64,
    pub total_ratings: i64,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
}

/// User-facing listing row: public store fields, the aggregate rating,
/// and the requesting user's own rating (null when unrated).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoreListing {
    pub id: DbId,
    pub name: String,
    pub address: Option<String>,
    pub average_rating: f64,
    pub total_ratings: i64,
    pub user_rating: Option<i16>,
}
