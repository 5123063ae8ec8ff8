//! Admin dashboard counts.

use sqlx::PgPool;

use crate::models::dashboard::DashboardTotals;

pub struct DashboardRepo;

impl DashboardRepo {
    /// Fetch the three platform totals as independent counts.
    pub async fn totals(pool: &PgPool) -> Result<DashboardTotals, sqlx::Error> {
        let (total_users,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = 'USER'")
                .fetch_one(pool)
                .await?;
        let (total_stores,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM stores")
            .fetch_one(pool)
            .await?;
        let (total_ratings,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ratings")
            .fetch_one(pool)
            .await?;

        Ok(DashboardTotals {
            total_users,
            total_stores,
            total_ratings,
        })
    }
}
