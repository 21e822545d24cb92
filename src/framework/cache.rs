//! # Collection Cache
//!
//! In-memory mirror of the last successfully fetched list. It is only ever
//! replaced as a whole, never patched, so it cannot drift from what the
//! server returned.

use crate::framework::{EntityId, Resource};

/// The list a screen renders.
#[derive(Debug, Clone)]
pub struct CollectionCache<T: Resource> {
    items: Vec<T>,
    generation: u64,
}

impl<T: Resource> Default for CollectionCache<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            generation: 0,
        }
    }
}

impl<T: Resource> CollectionCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the whole collection.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
        self.generation += 1;
    }

    pub fn get(&self) -> &[T] {
        &self.items
    }

    pub fn find(&self, id: &EntityId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of `replace_all` calls so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
