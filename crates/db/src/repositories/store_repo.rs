//! Repository for the `stores` table, including the joined listing queries
//! that carry rating aggregates.

use ratewise_core::types::DbId;
use sqlx::PgPool;

use crate::models::store::{CreateStore, Store, StoreFilter, StoreListing, StoreWithStats};
use crate::models::user::{CreateUser, User};

/// Column list shared across plain-row queries.
const COLUMNS: &str =
    "id, name, email, address, category, phone, description, owner_id, created_at, updated_at";

/// Provides CRUD and listing operations for stores.
pub struct StoreRepo;

impl StoreRepo {
    /// Insert a new store, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStore) -> Result<Store, sqlx::Error> {
        let query = format!(
            "INSERT INTO stores (name, email, address, category, phone, description, owner_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Store>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.address)
            .bind(&input.category)
            .bind(&input.phone)
            .bind(&input.description)
            .bind(input.owner_id)
            .fetch_one(pool)
            .await
    }

    /// Create a store owner account and their store as one transaction.
    ///
    /// Either both rows exist afterwards or neither does -- a failed store
    /// insert cannot leave an orphaned owner behind.
    pub async fn create_with_owner(
        pool: &PgPool,
        owner: &CreateUser,
        store: &CreateStore,
    ) -> Result<(User, Store), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_query =
            "INSERT INTO users (email, password_hash, name, address, role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, email, password_hash, name, address, role, created_at, updated_at";
        let new_owner = sqlx::query_as::<_, User>(user_query)
            .bind(&owner.email)
            .bind(&owner.password_hash)
            .bind(&owner.name)
            .bind(&owner.address)
            .bind(&owner.role)
            .fetch_one(&mut *tx)
            .await?;

        let store_query = format!(
            "INSERT INTO stores (name, email, address, category, phone, description, owner_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let new_store = sqlx::query_as::<_, Store>(&store_query)
            .bind(&store.name)
            .bind(&store.email)
            .bind(&store.address)
            .bind(&store.category)
            .bind(&store.phone)
            .bind(&store.description)
            .bind(new_owner.id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((new_owner, new_store))
    }

    /// Find a store by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Store>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stores WHERE id = $1");
        sqlx::query_as::<_, Store>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a store by exact name (application-level uniqueness check).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Store>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stores WHERE name = $1 LIMIT 1");
        sqlx::query_as::<_, Store>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Find a store by email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Store>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stores WHERE email = $1");
        sqlx::query_as::<_, Store>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// First store owned by the given user, lowest id first.
    ///
    /// The schema allows an owner to hold several stores; owner-facing
    /// views operate on the first match.
    pub async fn find_first_by_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Option<Store>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stores WHERE owner_id = $1 ORDER BY id LIMIT 1"
        );
        sqlx::query_as::<_, Store>(&query)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// All stores owned by any of the given users (for embedding owned
    /// stores into the admin user listing without N+1 queries).
    pub async fn find_by_owner_ids(
        pool: &PgPool,
        owner_ids: &[DbId],
    ) -> Result<Vec<Store>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stores WHERE owner_id = ANY($1)");
        sqlx::query_as::<_, Store>(&query)
            .bind(owner_ids)
            .fetch_all(pool)
            .await
    }

    /// Admin listing with rating aggregates and owner identity.
    ///
    /// `average_rating` is the raw SQL AVG (0.0 when unrated); callers
    /// round it for presentation.
    pub async fn list_with_stats(
        pool: &PgPool,
        filter: &StoreFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<StoreWithStats>, sqlx::Error> {
        let (where_clause, next_idx) = build_filter_clause(filter, 1);
        let query = format!(
            "SELECT \
                s.id, s.name, s.email, s.address, s.category, s.phone, s.description, \
                s.owner_id, s.created_at, s.updated_at, \
                COALESCE(AVG(r.value)::float8, 0.0) AS average_rating, \
                COUNT(r.id) AS total_ratings, \
                u.name AS owner_name, \
                u.email AS owner_email \
             FROM stores s \
             LEFT JOIN ratings r ON r.store_id = s.id \
             LEFT JOIN users u ON u.id = s.owner_id \
             {where_clause} \
             GROUP BY s.id, u.name, u.email \
             ORDER BY s.created_at DESC \
             LIMIT ${next_idx} OFFSET ${}",
            next_idx + 1
        );

        let q = sqlx::query_as::<_, StoreWithStats>(&query);
        bind_filter(q, filter).bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count stores matching the filter (for pagination totals).
    pub async fn count_filtered(pool: &PgPool, filter: &StoreFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, _) = build_filter_clause(filter, 1);
        let query = format!("SELECT COUNT(*) FROM stores s {where_clause}");

        let q = sqlx::query_as::<_, (i64,)>(&query);
        let (count,) = bind_filter(q, filter).fetch_one(pool).await?;
        Ok(count)
    }

    /// User-facing listing: every store with its aggregate rating and the
    /// requesting user's own rating. Optional case-insensitive substring
    /// search over name and address.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        search: Option<&str>,
    ) -> Result<Vec<StoreListing>, sqlx::Error> {
        let where_clause = if search.is_some() {
            "WHERE (s.name ILIKE $2 OR s.address ILIKE $2)"
        } else {
            ""
        };
        // The ur join hits at most one row per store (unique user/store
        // pair), so it neither multiplies the AVG rows nor the COUNT.
        let query = format!(
            "SELECT \
                s.id, s.name, s.address, \
                COALESCE(AVG(r.value)::float8, 0.0) AS average_rating, \
                COUNT(r.id) AS total_ratings, \
                ur.value AS user_rating \
             FROM stores s \
             LEFT JOIN ratings r ON r.store_id = s.id \
             LEFT JOIN ratings ur ON ur.store_id = s.id AND ur.user_id = $1 \
             {where_clause} \
             GROUP BY s.id, ur.value \
             ORDER BY s.name"
        );

        let mut q = sqlx::query_as::<_, StoreListing>(&query).bind(user_id);
        if let Some(term) = search {
            q = q.bind(format!("%{}%", term.trim()));
        }
        q.fetch_all(pool).await
    }
}

/// Build the dynamic WHERE clause for admin store filters.
fn build_filter_clause(filter: &StoreFilter, mut bind_idx: u32) -> (String, u32) {
    let mut conditions = Vec::new();

    if filter.category.is_some() {
        conditions.push(format!("s.category = ${bind_idx}"));
        bind_idx += 1;
    }
    if filter.name.is_some() {
        conditions.push(format!("s.name ILIKE ${bind_idx}"));
        bind_idx += 1;
    }
    if filter.email.is_some() {
        conditions.push(format!("s.email ILIKE ${bind_idx}"));
        bind_idx += 1;
    }
    if filter.address.is_some() {
        conditions.push(format!("s.address ILIKE ${bind_idx}"));
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
    filter: &'q StoreFilter,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    if let Some(ref category) = filter.category {
        q = q.bind(category);
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
