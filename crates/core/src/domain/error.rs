// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid offer transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Offer not found: {0}")]
    OfferNotFound(String),

    #[error("Notification not found: {0}")]
    NotificationNotFound(i64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
