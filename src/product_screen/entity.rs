//! Resource trait implementation for the Product domain type.
//!
//! This module contains the [`Resource`] trait implementation
//! that enables [`Product`] to be managed by the generic [`crate::framework::SyncController`].
//!
//! Includes support for the `Sell` action.

use super::actions::ProductAction;
use crate::framework::{DomainViolation, EntityId, Operation, Resource};
use crate::model::{Product, ProductDraft, ProductFields};

impl Resource for Product {
    type Fields = ProductFields;
    type Draft = ProductDraft;
    type Action = ProductAction;

    const LABEL: &'static str = "product";
    const COLLECTION: &'static str = "products";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_fields(id: EntityId, fields: ProductFields) -> Self {
        Self::new(id, fields.name, fields.description, fields.price, fields.quantity)
    }

    fn to_draft(&self) -> ProductDraft {
        ProductDraft::from_product(self)
    }

    /// Handles custom actions for the Product entity.
    ///
    /// # Actions
    /// - `Sell`: Every field echoed unchanged except `quantity - 1`
    fn apply_action(&self, action: &ProductAction) -> Result<ProductFields, DomainViolation> {
        match action {
            ProductAction::Sell => {
                let quantity = self.quantity.checked_sub(1).ok_or(DomainViolation::OutOfStock)?;
                Ok(ProductFields {
                    quantity,
                    ..self.fields()
                })
            }
        }
    }

    // A stale id reads the same as an empty shelf.
    fn violation_message(violation: &DomainViolation) -> String {
        match violation {
            DomainViolation::NotCached(_) => DomainViolation::OutOfStock.to_string(),
            other => other.to_string(),
        }
    }

    // Create and replace share one form, and so one message.
    fn failure_message(operation: Operation) -> String {
        match operation {
            Operation::List => "Error fetching products".to_string(),
            Operation::Create | Operation::Replace => "Error adding/updating product".to_string(),
            Operation::Action => "Error selling product".to_string(),
            Operation::Remove => "Error deleting product".to_string(),
        }
    }
}
