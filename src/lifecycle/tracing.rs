//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! The console uses a compact format that hides the crate/module prefix (`with_target(false)`).
//! Log levels come from the `RUST_LOG` environment variable.
//!
//! ## What Gets Traced
//!
//! - **Screen Lifecycle**: started, closed, and the final list size
//! - **Remote Calls**: one span per call, tagged with the collection
//! - **Reconciliation**: the list size after every refresh
//! - **Failures**: the operation and the error, at `warn`; nothing is escalated
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs
//! RUST_LOG=info cargo run
//!
//! # Request URLs, field changes and actions
//! RUST_LOG=debug cargo run
//!
//! # Only the sync framework
//! RUST_LOG=inventory_console::framework=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**, mounting the product screen and selling one unit:
//!
//! ```text
//! INFO Screen started entity_type="product"
//! INFO Reconciled entity_type="product" size=3
//! INFO Action ok entity_type="product" id=2
//! INFO Reconciled entity_type="product" size=3
//! ```
//!
//! **With `RUST_LOG=debug`** the same flow also shows the requests:
//!
//! ```text
//! DEBUG Action entity_type="product" id=2 action=Sell
//! DEBUG replace: Sending request method=PUT url=http://localhost:5000/api/products/2
//! DEBUG list: Sending request method=GET url=http://localhost:5000/api/products
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact()
        .init();
}
