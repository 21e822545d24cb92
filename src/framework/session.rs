//! # Edit Session
//!
//! Tracks what the form is doing: creating a new entity or editing an existing
//! one. Exactly one mode is active at a time and the session lives as long as
//! the screen.

use crate::framework::{Draft, DomainViolation, EntityId, Resource};

/// Which submit call the form will issue.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionMode {
    #[default]
    Creating,
    Editing(EntityId),
}

/// Draft fields plus the current mode.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession<T: Resource> {
    mode: SessionMode,
    draft: T::Draft,
}

impl<T: Resource> Default for EditSession<T> {
    fn default() -> Self {
        Self {
            mode: SessionMode::Creating,
            draft: T::Draft::default(),
        }
    }
}

impl<T: Resource> EditSession<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &SessionMode {
        &self.mode
    }

    pub fn draft(&self) -> &T::Draft {
        &self.draft
    }

    /// Switches to `Editing(entity.id)` with fields loaded from `entity`.
    pub fn start_edit(&mut self, entity: &T) {
        self.mode = SessionMode::Editing(entity.id().clone());
        self.draft = entity.to_draft();
    }

    /// Updates one field, keeping the mode.
    pub fn field_change(&mut self, name: &str, value: impl Into<String>) -> Result<(), DomainViolation> {
        self.draft.set_field(name, value.into())
    }

    /// Back to `Creating` with cleared fields.
    pub fn submit_succeeded(&mut self) {
        self.reset();
    }

    pub fn cancel(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.mode = SessionMode::Creating;
        self.draft = T::Draft::default();
    }
}
