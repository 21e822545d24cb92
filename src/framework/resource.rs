//! # Resource Trait
//!
//! The `Resource` trait is the contract every managed collection (Product, User, …)
//! implements so that one generic [`SyncController`](crate::framework::SyncController)
//! can drive all screens. It names the collection's endpoints, the payload sent on
//! create/replace (`Fields`), the editable form state (`Draft`) and any custom
//! action that is turned into a replace call (`Action`).
//!
//! # Architecture Note
//! Every screen fetches a list, mutates through REST calls and re-fetches. Writing
//! that loop once against this trait means Products and Users only describe
//! *what* they are, never *how* they are synchronised.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};

use crate::framework::DomainViolation;

/// Opaque, server-assigned identity.
///
/// The server may hand out numbers or strings. The value is kept exactly as
/// received so that echoed payloads and URLs match what the server expects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(u64),
    Text(String),
}

impl Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{}", n),
            EntityId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        EntityId::Number(id)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        EntityId::Text(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        EntityId::Text(id)
    }
}

/// The remote operations a screen can trigger, used to pick error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Replace,
    Action,
    Remove,
}

/// Editable form state for one resource type.
pub trait Draft: Default + Clone + Debug + PartialEq + Send + Sync + 'static {
    /// Payload produced by a valid draft.
    type Fields;

    /// Updates the named field. No cross-field validation happens here.
    fn set_field(&mut self, name: &str, value: String) -> Result<(), DomainViolation>;

    /// Converts the draft into a payload, enforcing required and numeric fields.
    fn to_fields(&self) -> Result<Self::Fields, DomainViolation>;
}

/// Trait that any collection must implement to be synchronised by a screen.
pub trait Resource: Clone + Debug + PartialEq + Send + Sync + DeserializeOwned + 'static {
    /// Create/replace payload (everything except the identity).
    type Fields: Serialize + Clone + Debug + PartialEq + Send + Sync + 'static;

    /// Form state edited by the user.
    type Draft: Draft<Fields = Self::Fields>;

    /// Resource-specific operations that end in a replace call (e.g. `Sell`).
    /// Use [`std::convert::Infallible`] when there are none.
    type Action: Debug + Send + Sync + 'static;

    /// Singular, lowercase name used in messages ("product").
    const LABEL: &'static str;

    /// Collection segment under `/api` ("products").
    const COLLECTION: &'static str;

    fn id(&self) -> &EntityId;

    /// Builds an entity from its identity and payload, as a server would.
    fn from_fields(id: EntityId, fields: Self::Fields) -> Self;

    /// Pre-populates a draft for editing this entity.
    fn to_draft(&self) -> Self::Draft;

    /// Computes the replacement payload for `action` from the cached entity.
    fn apply_action(&self, action: &Self::Action) -> Result<Self::Fields, DomainViolation>;

    /// Path of the collection; replace and remove address `{list_path}/{id}`.
    fn list_path() -> String {
        format!("/api/{}", Self::COLLECTION)
    }

    fn create_path() -> String {
        Self::list_path()
    }

    /// Message shown when a request is refused locally for `violation`.
    fn violation_message(violation: &DomainViolation) -> String {
        violation.to_string()
    }

    /// Message shown when `operation` fails remotely.
    fn failure_message(operation: Operation) -> String {
        match operation {
            Operation::List => format!("Error fetching {}", Self::COLLECTION),
            Operation::Create => format!("Error adding {}", Self::LABEL),
            Operation::Replace | Operation::Action => format!("Error updating {}", Self::LABEL),
            Operation::Remove => format!("Error deleting {}", Self::LABEL),
        }
    }
}
