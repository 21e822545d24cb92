//! # Sync Controller
//!
//! The per-screen state container. A screen's list, form session and error slot
//! are only changed through the named operations below, so every screen can be
//! tested without rendering anything.
//!
//! ## Reconciliation
//!
//! Every mutating call is followed by [`SyncController::reconcile`], which
//! replaces the whole cache with a fresh list. There is no optimistic merge:
//! between refreshes the cache is a snapshot, never the source of truth.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::framework::{
    CollectionCache, DomainViolation, Draft, EditSession, EntityId, Operation, RemoteCollection, Resource,
    SessionMode, SyncError,
};

/// "Still mounted" flag shared between a screen and its view.
#[derive(Clone, Debug)]
pub struct ActiveFlag(Arc<AtomicBool>);

impl Default for ActiveFlag {
    fn default() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }
}

impl ActiveFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn deactivate(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Everything a view needs to render one screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenState<T: Resource> {
    pub items: Vec<T>,
    pub mode: SessionMode,
    pub draft: T::Draft,
    pub error: Option<String>,
}

impl<T: Resource> Default for ScreenState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            mode: SessionMode::Creating,
            draft: T::Draft::default(),
            error: None,
        }
    }
}

/// Orchestrates remote calls and local state for one screen.
pub struct SyncController<T: Resource, R> {
    remote: R,
    cache: CollectionCache<T>,
    session: EditSession<T>,
    error: Option<String>,
    active: ActiveFlag,
}

impl<T: Resource, R: RemoteCollection<T>> SyncController<T, R> {
    pub fn new(remote: R) -> Self {
        Self::with_active_flag(remote, ActiveFlag::new())
    }

    pub fn with_active_flag(remote: R, active: ActiveFlag) -> Self {
        Self {
            remote,
            cache: CollectionCache::new(),
            session: EditSession::new(),
            error: None,
            active,
        }
    }

    pub fn cache(&self) -> &CollectionCache<T> {
        &self.cache
    }

    pub fn session(&self) -> &EditSession<T> {
        &self.session
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn active_flag(&self) -> &ActiveFlag {
        &self.active
    }

    pub fn snapshot(&self) -> ScreenState<T> {
        ScreenState {
            items: self.cache.get().to_vec(),
            mode: self.session.mode().clone(),
            draft: self.session.draft().clone(),
            error: self.error.clone(),
        }
    }

    /// Populates the cache when the screen becomes active.
    pub async fn load_initial(&mut self) -> Result<(), SyncError> {
        self.reconcile().await
    }

    /// Replaces the whole cache with the server's current list.
    pub async fn reconcile(&mut self) -> Result<(), SyncError> {
        let result = self.remote.list().await;
        self.ensure_active()?;

        match result {
            Ok(items) => {
                self.cache.replace_all(items);
                self.error = None;
                info!(entity_type = T::LABEL, size = self.cache.len(), "Reconciled");
                Ok(())
            }
            Err(e) => Err(self.fail(Operation::List, e)),
        }
    }

    pub fn field_change(&mut self, name: &str, value: impl Into<String>) -> Result<(), SyncError> {
        self.session.field_change(name, value).map_err(SyncError::from)
    }

    pub fn start_edit(&mut self, entity: &T) {
        debug!(entity_type = T::LABEL, id = %entity.id(), "Start edit");
        self.session.start_edit(entity);
    }

    pub fn cancel_edit(&mut self) {
        self.session.cancel();
    }

    /// Creates or replaces depending on the session mode, then reconciles.
    ///
    /// On failure the draft and mode stay as they were.
    pub async fn submit(&mut self) -> Result<(), SyncError> {
        let mode = self.session.mode().clone();
        let operation = match mode {
            SessionMode::Creating => Operation::Create,
            SessionMode::Editing(_) => Operation::Replace,
        };

        let fields = match self.session.draft().to_fields() {
            Ok(fields) => fields,
            Err(violation) => return Err(self.fail(operation, violation.into())),
        };

        let result = match &mode {
            SessionMode::Creating => self.remote.create(&fields).await,
            SessionMode::Editing(id) => self.remote.replace(id, &fields).await,
        };
        self.ensure_active()?;

        match result {
            Ok(_) => {
                info!(entity_type = T::LABEL, ?operation, "Submitted");
                self.session.submit_succeeded();
                self.error = None;
                self.reconcile().await
            }
            Err(e) => Err(self.fail(operation, e)),
        }
    }

    /// Runs a custom action against the cached entity, then reconciles.
    ///
    /// The entity is looked up in the current cache, not re-fetched. A domain
    /// violation sends nothing.
    pub async fn perform(&mut self, id: &EntityId, action: T::Action) -> Result<(), SyncError> {
        debug!(entity_type = T::LABEL, %id, ?action, "Action");
        let fields = match self.cache.find(id) {
            Some(entity) => entity.apply_action(&action),
            None => Err(DomainViolation::NotCached(id.clone())),
        };
        let fields = match fields {
            Ok(fields) => fields,
            Err(violation) => return Err(self.fail(Operation::Action, violation.into())),
        };

        let result = self.remote.replace(id, &fields).await;
        self.ensure_active()?;

        match result {
            Ok(_) => {
                info!(entity_type = T::LABEL, %id, "Action ok");
                self.error = None;
                self.reconcile().await
            }
            Err(e) => Err(self.fail(Operation::Action, e)),
        }
    }

    /// Removes the entity, then reconciles. No confirmation, no undo.
    pub async fn delete(&mut self, id: &EntityId) -> Result<(), SyncError> {
        let result = self.remote.remove(id).await;
        self.ensure_active()?;

        match result {
            Ok(()) => {
                info!(entity_type = T::LABEL, %id, "Deleted");
                self.error = None;
                self.reconcile().await
            }
            Err(e) => Err(self.fail(Operation::Remove, e)),
        }
    }

    fn ensure_active(&self) -> Result<(), SyncError> {
        if self.active.is_active() {
            Ok(())
        } else {
            debug!(entity_type = T::LABEL, "Screen inactive, dropping response");
            Err(SyncError::Inactive)
        }
    }

    /// Records `error` in the error slot (replacing any previous one) and hands it back.
    fn fail(&mut self, operation: Operation, error: SyncError) -> SyncError {
        warn!(entity_type = T::LABEL, ?operation, error = %error, "Operation failed");
        if error.is_reportable() {
            self.error = Some(match &error {
                SyncError::Domain(violation) => T::violation_message(violation),
                other => other.display_message(T::failure_message(operation)),
            });
        }
        error
    }
}
