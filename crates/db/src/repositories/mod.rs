mod dashboard_repo;
mod rating_repo;
mod store_repo;
mod user_repo;

pub use dashboard_repo::DashboardRepo;
pub use rating_repo::RatingRepo;
pub use store_repo::StoreRepo;
pub use user_repo::UserRepo;
