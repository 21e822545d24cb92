//! Generic synchronisation framework for list-and-form screens.
//!
//! This module provides the building blocks every management screen is made of:
//! fetch a collection, mutate it through REST calls, re-fetch, render.
//!
//! # Main Components
//!
//! - [`Resource`] - Trait that collection types implement to be managed by a screen
//! - [`RemoteCollection`] / [`HttpCollection`] - The remote seam and its reqwest implementation
//! - [`CollectionCache`] - The last fetched list, only ever replaced whole
//! - [`EditSession`] - The create/edit form state machine
//! - [`SyncController`] - Orchestrates remote calls and reconciliation
//! - [`ScreenActor`] / [`ScreenClient`] - Event loop and view handle for a mounted screen
//! - [`SyncError`] / [`DomainViolation`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for an in-memory collaborator to test screens without a server.

pub mod actor;
pub mod cache;
pub mod client;
pub mod controller;
pub mod error;
pub mod message;
pub mod mock;
pub mod remote;
pub mod resource;
pub mod session;

// Re-export core types for convenience
pub use actor::ScreenActor;
pub use cache::CollectionCache;
pub use client::ScreenClient;
pub use controller::{ActiveFlag, ScreenState, SyncController};
pub use error::{DomainViolation, SyncError};
pub use message::{Response, ScreenRequest};
pub use remote::{HttpCollection, HttpTransport, RemoteCollection};
pub use resource::{Draft, EntityId, Operation, Resource};
pub use session::{EditSession, SessionMode};
