//! # Screen Messages
//!
//! This module defines the messages exchanged between a [`ScreenClient`](crate::framework::ScreenClient)
//! (the view side) and its [`ScreenActor`](crate::framework::ScreenActor).
//!
//! # The CRUD Pattern
//! The variants map onto the controller's named operations: loading, field edits,
//! switching the form into edit mode, submitting, running a custom action and
//! deleting, plus `Snapshot` for reading the current view model.

use crate::framework::{EntityId, Resource, ScreenState, SyncError};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by screens.
pub type Response<T> = oneshot::Sender<Result<T, SyncError>>;

/// Internal message type sent to a screen's event loop.
#[derive(Debug)]
pub enum ScreenRequest<T: Resource> {
    LoadInitial {
        respond_to: Response<()>,
    },
    FieldChange {
        name: String,
        value: String,
        respond_to: Response<()>,
    },
    StartEdit {
        entity: T,
        respond_to: Response<()>,
    },
    CancelEdit {
        respond_to: Response<()>,
    },
    Submit {
        respond_to: Response<()>,
    },
    Action {
        id: EntityId,
        action: T::Action,
        respond_to: Response<()>,
    },
    Delete {
        id: EntityId,
        respond_to: Response<()>,
    },
    Snapshot {
        respond_to: Response<ScreenState<T>>,
    },
}
