//! Type-safe wrappers around [`ScreenClient`](crate::framework::ScreenClient), plus the auth client.

pub mod auth_client;
pub mod product_client;
pub mod screen_handle;
pub mod user_client;

pub use auth_client::*;
pub use product_client::*;
pub use screen_handle::*;
pub use user_client::*;
