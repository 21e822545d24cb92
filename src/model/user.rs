use serde::{Deserialize, Serialize};

use crate::framework::{Draft, DomainViolation, EntityId};
use crate::model::product::required;

/// Represents an account shown in user management.
///
/// The server never returns passwords, and none is kept here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub username: String,
}

impl User {
    pub fn new(id: impl Into<EntityId>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }
}

/// Payload for creating (signing up) or replacing a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFields {
    pub username: String,
    pub password: String,
}

/// User form state.
#[derive(Clone, Default, PartialEq)]
pub struct UserDraft {
    pub username: String,
    pub password: String,
}

// Keeps the password out of logs.
impl std::fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDraft")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Draft for UserDraft {
    type Fields = UserFields;

    fn set_field(&mut self, name: &str, value: String) -> Result<(), DomainViolation> {
        match name {
            "username" => self.username = value,
            "password" => self.password = value,
            other => return Err(DomainViolation::UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn to_fields(&self) -> Result<UserFields, DomainViolation> {
        Ok(UserFields {
            username: required("username", &self.username)?,
            password: required("password", &self.password)?,
        })
    }
}
