//! Aggregate counts for the admin dashboard.

use serde::Serialize;

/// Platform-wide totals, each from an independent COUNT.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardTotals {
    /// Accounts with role `USER` only (owners and admins excluded).
    pub total_users: i64,
    pub total_stores: i64,
    pub total_ratings: i64,
}
