//! # Sync Errors
//!
//! This module defines the error types shared by every screen. Remote failures
//! and client-side rule violations both end up in a screen's single error slot,
//! so they live side by side here.

use crate::framework::EntityId;

/// A business rule checked on the client before anything is sent.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum DomainViolation {
    /// Selling was requested for a product with no stock left.
    #[error("Product is out of stock")]
    OutOfStock,

    /// The entity is not part of the list currently on screen.
    #[error("Item {0} is not in the current list")]
    NotCached(EntityId),

    /// A required form field was left blank.
    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    /// A numeric form field could not be parsed.
    #[error("Field '{field}' has an invalid value: {value}")]
    InvalidField { field: &'static str, value: String },

    /// The form has no field with this name.
    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// Errors surfaced by remote calls and screen operations.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The request never completed or the response could not be decoded.
    #[error("network failure: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("server responded with status {status}")]
    Rejected { status: u16 },

    #[error(transparent)]
    Domain(#[from] DomainViolation),

    /// Another mutating request from the same screen is still outstanding.
    #[error("a request is already in flight")]
    Busy,

    /// The screen was torn down before the response arrived.
    #[error("screen is no longer active")]
    Inactive,

    /// The screen's event loop has stopped.
    #[error("screen closed")]
    Closed,
}

impl SyncError {
    /// Message to show in the screen's error slot.
    ///
    /// Domain violations carry their own wording; remote failures use the
    /// operation's `fallback` message because the server sends no detail.
    pub fn display_message(&self, fallback: impl Into<String>) -> String {
        match self {
            SyncError::Domain(violation) => violation.to_string(),
            _ => fallback.into(),
        }
    }

    /// Whether this error should be written to the screen's error slot at all.
    pub(crate) fn is_reportable(&self) -> bool {
        !matches!(self, SyncError::Busy | SyncError::Inactive | SyncError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_violations_keep_their_own_message() {
        let error = SyncError::from(DomainViolation::OutOfStock);
        assert_eq!(error.display_message("Error selling product"), "Product is out of stock");
    }

    #[test]
    fn remote_failures_use_the_operation_message() {
        let error = SyncError::Rejected { status: 500 };
        assert_eq!(error.display_message("Error deleting user"), "Error deleting user");
        assert!(error.is_reportable());
        assert!(!SyncError::Busy.is_reportable());
    }
}
