// JobLink Infrastructure - SQLite Adapter
// Implements: OfferRepository, TransactionalOfferStore, NotificationRepository,
// and the activity read ports consumed by the feed aggregator.

mod activity_repository;
mod connection;
mod migration;
mod notification_repository;
mod offer_repository;
mod transaction;

pub use activity_repository::SqliteActivityRepository;
pub use connection::create_pool;
pub use migration::run_migrations;
pub use notification_repository::SqliteNotificationRepository;
pub use offer_repository::SqliteOfferRepository;
pub use transaction::SqliteOfferTransaction;

// Note: sqlx::Error conversion is handled by wrapping in helper functions
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
