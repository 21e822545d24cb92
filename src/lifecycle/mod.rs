//! Wiring and lifecycle: configuration, the console orchestrator and tracing setup.

pub mod config;
pub mod console;
pub mod tracing;

pub use config::{ConfigError, ConsoleConfig};
pub use console::AdminConsole;
pub use self::tracing::setup_tracing;
