//! # Screen Client
//!
//! The view's handle to a running [`ScreenActor`](crate::framework::ScreenActor).

use crate::framework::{ActiveFlag, EntityId, Resource, Response, ScreenRequest, ScreenState, SyncError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

/// A type-safe client for interacting with a `ScreenActor`.
///
/// * **Cloneable** – holds a sender and a state receiver, so cloning is cheap.
/// * **In-flight guard** – `load_initial`, `submit`, `perform_action` and
///   `delete` refuse to start while another of them is outstanding and fail
///   with [`SyncError::Busy`] without sending anything. Views read
///   [`is_busy`](Self::is_busy) to disable the triggering controls.
/// * **State feed** – [`subscribe`](Self::subscribe) yields every state the
///   screen publishes.
pub struct ScreenClient<T: Resource> {
    sender: mpsc::Sender<ScreenRequest<T>>,
    state: watch::Receiver<ScreenState<T>>,
    in_flight: Arc<AtomicBool>,
    active: ActiveFlag,
}

impl<T: Resource> Clone for ScreenClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            state: self.state.clone(),
            in_flight: self.in_flight.clone(),
            active: self.active.clone(),
        }
    }
}

/// Clears the in-flight flag when the request finishes or is abandoned.
struct InFlight(Arc<AtomicBool>);

impl InFlight {
    fn acquire(flag: &Arc<AtomicBool>) -> Result<Self, SyncError> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| SyncError::Busy)?;
        Ok(Self(flag.clone()))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<T: Resource> ScreenClient<T> {
    pub fn new(
        sender: mpsc::Sender<ScreenRequest<T>>,
        state: watch::Receiver<ScreenState<T>>,
        active: ActiveFlag,
    ) -> Self {
        Self {
            sender,
            state,
            in_flight: Arc::new(AtomicBool::new(false)),
            active,
        }
    }

    async fn request<V>(
        &self,
        build: impl FnOnce(Response<V>) -> ScreenRequest<T> + Send,
    ) -> Result<V, SyncError>
    where
        V: Send,
    {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| SyncError::Closed)?;
        response.await.map_err(|_| SyncError::Closed)?
    }

    async fn guarded<V>(
        &self,
        build: impl FnOnce(Response<V>) -> ScreenRequest<T> + Send,
    ) -> Result<V, SyncError>
    where
        V: Send,
    {
        let _in_flight = InFlight::acquire(&self.in_flight)?;
        self.request(build).await
    }

    pub async fn load_initial(&self) -> Result<(), SyncError> {
        self.guarded(|respond_to| ScreenRequest::LoadInitial { respond_to })
            .await
    }

    pub async fn change_field(&self, name: impl Into<String>, value: impl Into<String>) -> Result<(), SyncError> {
        let (name, value) = (name.into(), value.into());
        self.request(|respond_to| ScreenRequest::FieldChange {
            name,
            value,
            respond_to,
        })
        .await
    }

    pub async fn start_edit(&self, entity: T) -> Result<(), SyncError> {
        self.request(|respond_to| ScreenRequest::StartEdit { entity, respond_to })
            .await
    }

    pub async fn cancel_edit(&self) -> Result<(), SyncError> {
        self.request(|respond_to| ScreenRequest::CancelEdit { respond_to })
            .await
    }

    pub async fn submit(&self) -> Result<(), SyncError> {
        self.guarded(|respond_to| ScreenRequest::Submit { respond_to })
            .await
    }

    pub async fn perform_action(&self, id: EntityId, action: T::Action) -> Result<(), SyncError> {
        self.guarded(|respond_to| ScreenRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: EntityId) -> Result<(), SyncError> {
        self.guarded(|respond_to| ScreenRequest::Delete { id, respond_to })
            .await
    }

    /// Asks the screen for its current state.
    pub async fn snapshot(&self) -> Result<ScreenState<T>, SyncError> {
        self.request(|respond_to| ScreenRequest::Snapshot { respond_to })
            .await
    }

    /// Last published state, without a round-trip to the screen.
    pub fn latest(&self) -> ScreenState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<T>> {
        self.state.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_active()
    }

    /// Marks the view as discarded; late responses no longer change state.
    pub fn deactivate(&self) {
        self.active.deactivate();
    }
}
