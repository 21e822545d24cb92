//! Pure data structures (DTOs) implementing the [`Resource`](crate::framework::Resource) trait.

pub mod product;
pub mod user;

pub use product::*;
pub use user::*;
