//! # Fake Remote & Testing Guide
//!
//! [`FakeRemote<T>`] implements [`RemoteCollection<T>`] entirely in memory. It
//! behaves like a tiny server (assigns ids, stores entities) and records every
//! call, so tests can assert what a screen sent and that its cache matches the
//! collaborator afterwards.
//!
//! ## When to use the Fake vs a real server
//!
//! | Feature | FakeRemote | HTTP + test server |
//! |---------|------------|--------------------|
//! | **Speed** | Instant (in-memory) | Fast (loopback socket) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **Call log** | Every call recorded | Only what the server logs |
//! | **Error Injection** | Easy (`fail_next`) | Needs a custom handler |
//! | **Use Case** | Controller and screen logic | Wire format and paths |
//!
//! ## Example
//!
//! ```rust
//! use inventory_console::framework::mock::{FakeRemote, RemoteCall};
//! use inventory_console::framework::SyncController;
//! use inventory_console::model::{Price, Product, ProductFields};
//!
//! #[tokio::main]
//! async fn main() {
//!     let remote = FakeRemote::<Product>::new();
//!     remote.seed(ProductFields {
//!         name: "Widget".into(),
//!         description: "Blue".into(),
//!         price: Price::Number(9.99),
//!         quantity: 2,
//!     });
//!
//!     let mut controller = SyncController::new(remote.clone());
//!     controller.load_initial().await.unwrap();
//!
//!     assert_eq!(remote.calls(), vec![RemoteCall::List]);
//!     assert_eq!(controller.cache().get(), remote.items().as_slice());
//! }
//! ```
//!
//! ## Holding responses
//!
//! [`FakeRemote::hold_responses`] parks every call after it has been recorded
//! until [`FakeRemote::release`] hands out permits. This is how tests put a
//! request "in flight" to exercise the busy guard and the still-active check.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Semaphore;

use crate::framework::{EntityId, RemoteCollection, Resource, SyncError};

/// One recorded call against the fake.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall<T: Resource> {
    List,
    Create { fields: T::Fields },
    Replace { id: EntityId, fields: T::Fields },
    Remove { id: EntityId },
}

struct FakeState<T: Resource> {
    items: Vec<T>,
    next_id: u64,
    calls: Vec<RemoteCall<T>>,
    failures: VecDeque<SyncError>,
}

/// In-memory collaborator with a call log and failure injection.
pub struct FakeRemote<T: Resource> {
    state: Arc<Mutex<FakeState<T>>>,
    held: Arc<AtomicBool>,
    gate: Arc<Semaphore>,
}

impl<T: Resource> Clone for FakeRemote<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            held: self.held.clone(),
            gate: self.gate.clone(),
        }
    }
}

impl<T: Resource> Default for FakeRemote<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource> FakeRemote<T> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                items: Vec::new(),
                next_id: 1,
                calls: Vec::new(),
                failures: VecDeque::new(),
            })),
            held: Arc::new(AtomicBool::new(false)),
            gate: Arc::new(Semaphore::new(0)),
        }
    }

    fn state(&self) -> MutexGuard<'_, FakeState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores an entity directly, without recording a call.
    pub fn seed(&self, fields: T::Fields) -> EntityId {
        let mut state = self.state();
        let id = next_id(&mut state);
        state.items.push(T::from_fields(id.clone(), fields));
        id
    }

    /// The collaborator's current collection.
    pub fn items(&self) -> Vec<T> {
        self.state().items.clone()
    }

    pub fn calls(&self) -> Vec<RemoteCall<T>> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    /// Makes the next call (of any kind) fail with `error`. Queues up.
    pub fn fail_next(&self, error: SyncError) {
        self.state().failures.push_back(error);
    }

    /// Parks every following call until [`release`](Self::release) is called.
    pub fn hold_responses(&self) {
        self.held.store(true, Ordering::SeqCst);
    }

    /// Lets `count` parked calls complete.
    pub fn release(&self, count: usize) {
        self.gate.add_permits(count);
    }

    async fn record(&self, call: RemoteCall<T>) -> Result<(), SyncError> {
        self.state().calls.push(call);
        if self.held.load(Ordering::SeqCst) {
            let permit = self.gate.acquire().await.map_err(|_| SyncError::Closed)?;
            permit.forget();
        }
        match self.state().failures.pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn next_id<T: Resource>(state: &mut FakeState<T>) -> EntityId {
    let id = state.next_id;
    state.next_id += 1;
    EntityId::Number(id)
}

fn not_found() -> SyncError {
    SyncError::Rejected { status: 404 }
}

#[async_trait]
impl<T: Resource> RemoteCollection<T> for FakeRemote<T> {
    async fn list(&self) -> Result<Vec<T>, SyncError> {
        self.record(RemoteCall::List).await?;
        Ok(self.items())
    }

    async fn create(&self, fields: &T::Fields) -> Result<Option<T>, SyncError> {
        self.record(RemoteCall::Create { fields: fields.clone() }).await?;
        let mut state = self.state();
        let id = next_id(&mut state);
        let entity = T::from_fields(id, fields.clone());
        state.items.push(entity.clone());
        Ok(Some(entity))
    }

    async fn replace(&self, id: &EntityId, fields: &T::Fields) -> Result<Option<T>, SyncError> {
        self.record(RemoteCall::Replace {
            id: id.clone(),
            fields: fields.clone(),
        })
        .await?;
        let mut state = self.state();
        let slot = state
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(not_found)?;
        *slot = T::from_fields(id.clone(), fields.clone());
        Ok(Some(slot.clone()))
    }

    async fn remove(&self, id: &EntityId) -> Result<(), SyncError> {
        self.record(RemoteCall::Remove { id: id.clone() }).await?;
        let mut state = self.state();
        let before = state.items.len();
        state.items.retain(|item| item.id() != id);
        if state.items.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}
