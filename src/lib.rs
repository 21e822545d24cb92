#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Inventory Console
//!
//! > **The data-sync core of an inventory admin console.**
//!
//! This crate keeps an admin UI's product and user lists in step with a REST
//! API. Every screen follows the same loop: fetch the collection, mutate it
//! through a REST call, re-fetch, render. Rendering itself lives elsewhere;
//! everything here is plain state that can be tested without a UI.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why a Resource trait + Actor per screen?
//!
//! - **Resource trait**: Products and Users only describe their payloads,
//!   endpoints and messages. The sync loop is written once.
//! - **Actor per screen**: A mounted screen is one Tokio task that owns its
//!   cache, form and error slot, so UI events and network completions never
//!   race on that state.
//!
//! ## 🚀 Core Concepts
//!
//! ### Generics: The Power of `T`
//! You'll see `SyncController<T: Resource, R>` everywhere. `T` is the managed
//! collection and `R` the remote it talks to, which is an HTTP collection in
//! production and a [`FakeRemote`](framework::mock::FakeRemote) in tests.
//!
//! ### Reconcile, never merge
//! After every successful mutation the whole list is fetched again and replaces
//! the cache. The cache never diverges from what the server last returned.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! [`SyncError`](framework::SyncError) covers remote failures,
//! [`DomainViolation`](framework::DomainViolation) covers rules checked before
//! sending (out of stock, blank fields). Both end up in the screen's single
//! error slot as a user-facing message.
//!
//! ### 2. One Request at a Time
//! A screen's mutating calls take an in-flight guard; a second one while the
//! first is outstanding fails with `Busy` and sends nothing.
//!
//! ### 3. Still-Active Guard
//! A torn-down screen ignores responses that arrive late.
//!
//! ### 4. Observability
//! We use `tracing` everywhere with structured logging.
//! See the [`lifecycle::tracing`] module for details.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! - **Role**: Remote seam, cache, edit session, controller, screen actor.
//! - **Key items**: [`Resource`](framework::Resource), [`SyncController`](framework::SyncController),
//!   [`ScreenActor`](framework::ScreenActor).
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! - **Role**: Configuration, mounting screens, shutdown.
//! - **Key items**: [`AdminConsole`](lifecycle::AdminConsole), [`ConsoleConfig`](lifecycle::ConsoleConfig).
//!
//! ### 3. The Interface ([`clients`])
//! - **Role**: Typed handles for each screen, plus login/signup.
//! - **Key items**: [`ProductScreenClient`](clients::ProductScreenClient), [`AuthForm`](clients::AuthForm).
//!
//! ### 4. The Implementation ([`product_screen`], [`user_screen`], [`model`])
//! - **Role**: Concrete implementations of the `Resource` trait.
//!
//! ### 5. Read-only views ([`dashboard`], [`navigation`])
//! - **Role**: Dashboard summary with its slideshow, and the console's routes.
//!
//! ## 🚀 Quick Start
//!
//! ### Running the Demo
//!
//! ```bash
//! # Against a local API, with info logs
//! RUST_LOG=info cargo run -- alice secret
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod clients;
pub mod dashboard;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod navigation;
pub mod product_screen;
pub mod user_screen;
