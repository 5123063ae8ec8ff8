//! Repository for the `users` table.

use ratewise_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User, UserFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, name, address, role, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A concurrent insert with the same email fails on `uq_users_email`;
    /// the API layer maps that to 409 Conflict.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, name, address, role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List users matching the filter, newest first, with pagination.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &UserFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        let (where_clause, next_idx) = build_filter_clause(filter, 1);
        let query = format!(
            "SELECT {COLUMNS} FROM users {where_clause} \
             ORDER BY created_at DESC \
             LIMIT ${next_idx} OFFSET ${}",
            next_idx + 1
        );

        let q = sqlx::query_as::<_, User>(&query);
        bind_filter(q, filter).bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count users matching the filter (for pagination totals).
    pub async fn count_filtered(pool: &PgPool, filter: &UserFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, _) = build_filter_clause(filter, 1);
        let query = format!("SELECT COUNT(*) FROM users {where_clause}");

        let q = sqlx::query_as::<_, (i64,)>(&query);
        let (count,) = bind_filter(q, filter).fetch_one(pool).await?;
        Ok(count)
    }

    /// Update a user's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Build the dynamic WHERE clause for user filters. Returns the clause and
/// the next free bind index.
fn build_filter_clause(filter: &UserFilter, mut bind_idx: u32) -> (String, u32) {
    let mut conditions = Vec::new();

    if filter.role.is_some() {
        conditions.push(format!("role = ${bind_idx}"));
        bind_idx += 1;
    }
    if filter.name.is_some() {
        conditions.push(format!("name ILIKE ${bind_idx}"));
        bind_idx += 1;
    }
    if filter.email.is_some() {
        conditions.push(format!("email ILIKE ${bind_idx}"));
        bind_idx += 1;
    }
    if filter.address.is_some() {
        conditions.push(format!("address ILIKE ${bind_idx}"));
        bind_idx += 1;
    }

    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (clause, bind_idx)
}

/// Bind filter parameters in the same order `build_filter_clause` declared them.
fn bind_filter<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    filter: &'q UserFilter,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    if let Some(ref role) = filter.role {
        q = q.bind(role);
    }
    if let Some(ref name) = filter.name {
        q = q.bind(format!("%{name}%"));
    }
    if let Some(ref email) = filter.email {
        q = q.bind(format!("%{email}%"));
    }
    if let Some(ref address) = filter.address {
        q = q.bind(format!("%{address}%"));
    }
    q
}
