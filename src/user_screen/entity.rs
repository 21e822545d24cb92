//! Resource trait implementation for the User domain type.
//!
//! This module contains the [`Resource`] trait implementation
//! that enables [`User`] to be managed by the generic [`crate::framework::SyncController`].
//!
//! Users are created through the signup endpoint; every other call goes to the
//! regular `/api/users` collection.

use std::convert::Infallible;

use crate::framework::{DomainViolation, EntityId, Resource};
use crate::model::{User, UserDraft, UserFields};

impl Resource for User {
    type Fields = UserFields;
    type Draft = UserDraft;
    type Action = Infallible;

    const LABEL: &'static str = "user";
    const COLLECTION: &'static str = "users";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_fields(id: EntityId, fields: UserFields) -> Self {
        Self::new(id, fields.username)
    }

    /// The password starts blank; it is never read back from the server.
    fn to_draft(&self) -> UserDraft {
        UserDraft {
            username: self.username.clone(),
            password: String::new(),
        }
    }

    fn apply_action(&self, action: &Infallible) -> Result<UserFields, DomainViolation> {
        match *action {}
    }

    fn create_path() -> String {
        "/api/signup".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Operation;

    #[test]
    fn users_are_created_through_signup() {
        assert_eq!(User::create_path(), "/api/signup");
        assert_eq!(User::list_path(), "/api/users");
    }

    #[test]
    fn failure_messages() {
        assert_eq!(User::failure_message(Operation::List), "Error fetching users");
        assert_eq!(User::failure_message(Operation::Create), "Error adding user");
        assert_eq!(User::failure_message(Operation::Replace), "Error updating user");
        assert_eq!(User::failure_message(Operation::Remove), "Error deleting user");
    }
}
