// Port Layer - Interfaces for external dependencies

pub mod activity;
pub mod id_provider;
pub mod link_builder;
pub mod notification_repository;
pub mod offer_repository;
pub mod time_provider;
pub mod transaction;

// Re-exports
pub use activity::{ApplicationStore, JobCatalog, SeekerProfileStore};
pub use id_provider::IdProvider;
pub use link_builder::{LinkBuilder, PathLinkBuilder};
pub use notification_repository::NotificationRepository;
pub use offer_repository::OfferRepository;
pub use time_provider::TimeProvider;
pub use transaction::{OfferStoreTransaction, Transaction, TransactionalOfferStore};
