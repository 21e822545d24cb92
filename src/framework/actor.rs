//! # Screen Actor
//!
//! This module defines the `ScreenActor`, the event loop that owns one mounted
//! screen's [`SyncController`]. It processes messages sequentially, so a
//! screen's cache, draft and error slot are never touched by two operations at
//! once and need no locks.

use crate::framework::{
    ActiveFlag, RemoteCollection, Resource, Response, ScreenClient, ScreenRequest, ScreenState, SyncController,
    SyncError,
};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

/// The event loop behind one screen.
///
/// **Concurrency Model**:
/// UI events and network completions interleave on this single task. Every
/// remote call is a suspend point; while it is pending, further messages queue
/// in the channel and are handled in order afterwards.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ScreenActor::new()` to get the `actor` (loop) and `client` (view handle).
/// 2.  **Run**: Spawn the actor's run loop in a background task.
/// 3.  **Tear down**: `client.deactivate()` and drop every client; the loop exits.
pub struct ScreenActor<T: Resource, R> {
    receiver: mpsc::Receiver<ScreenRequest<T>>,
    controller: SyncController<T, R>,
    publisher: watch::Sender<ScreenState<T>>,
}

impl<T: Resource, R: RemoteCollection<T> + 'static> ScreenActor<T, R> {
    pub fn new(buffer_size: usize, remote: R) -> (Self, ScreenClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (publisher, state) = watch::channel(ScreenState::default());
        let active = ActiveFlag::new();

        let actor = Self {
            receiver,
            controller: SyncController::with_active_flag(remote, active.clone()),
            publisher,
        };
        let client = ScreenClient::new(sender, state, active);
        (actor, client)
    }

    /// Runs the screen's event loop until every client is dropped.
    pub async fn run(mut self) {
        let entity_type = T::LABEL;
        info!(entity_type, "Screen started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ScreenRequest::LoadInitial { respond_to } => {
                    let result = self.controller.load_initial().await;
                    self.reply(respond_to, result);
                }
                ScreenRequest::FieldChange {
                    name,
                    value,
                    respond_to,
                } => {
                    debug!(entity_type, %name, "Field change");
                    let result = self.controller.field_change(&name, value);
                    self.reply(respond_to, result);
                }
                ScreenRequest::StartEdit { entity, respond_to } => {
                    self.controller.start_edit(&entity);
                    self.reply(respond_to, Ok(()));
                }
                ScreenRequest::CancelEdit { respond_to } => {
                    self.controller.cancel_edit();
                    self.reply(respond_to, Ok(()));
                }
                ScreenRequest::Submit { respond_to } => {
                    let result = self.controller.submit().await;
                    self.reply(respond_to, result);
                }
                ScreenRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    let result = self.controller.perform(&id, action).await;
                    self.reply(respond_to, result);
                }
                ScreenRequest::Delete { id, respond_to } => {
                    let result = self.controller.delete(&id).await;
                    self.reply(respond_to, result);
                }
                ScreenRequest::Snapshot { respond_to } => {
                    let snapshot = self.controller.snapshot();
                    let _ = respond_to.send(Ok(snapshot));
                }
            }
        }

        self.controller.active_flag().deactivate();
        info!(entity_type, size = self.controller.cache().len(), "Screen closed");
    }

    /// Publishes the new state, then answers the caller.
    fn reply<V>(&self, respond_to: Response<V>, result: Result<V, SyncError>) {
        if self.controller.active_flag().is_active() {
            self.publisher.send_replace(self.controller.snapshot());
        }
        let _ = respond_to.send(result);
    }
}
