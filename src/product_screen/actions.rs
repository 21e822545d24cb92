//! Custom actions for the Product screen.
//!
//! This module defines the domain-specific operations (Actions) that can be performed
//! on a cached [`Product`](crate::model::Product). Each action is turned into a
//! replace call by [`Resource::apply_action`](crate::framework::Resource::apply_action).
//!
//! See [`impl Resource for Product`](crate::model::Product#impl-Resource-for-Product) for the implementation details.

/// Custom actions for Product entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductAction {
    /// Sells one unit: replaces the product with its quantity decremented by one.
    ///
    /// # Errors
    /// Fails with [`DomainViolation::OutOfStock`](crate::framework::DomainViolation::OutOfStock)
    /// when the cached quantity is zero. Nothing is sent in that case.
    Sell,
}
