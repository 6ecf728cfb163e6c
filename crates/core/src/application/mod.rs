// Application Layer - Use Cases and Business Logic

pub mod notifications;
pub mod offers;

// Re-exports
pub use notifications::NotificationService;
pub use offers::OfferService;
