//! Product-specific resource logic, including the sell action.

mod actions;
pub mod entity;

pub use actions::*;

use crate::clients::ProductScreenClient;
use crate::framework::{RemoteCollection, ScreenActor};
use crate::model::Product;

/// Creates a new Product screen and its client.
pub fn new<R>(buffer_size: usize, remote: R) -> (ScreenActor<Product, R>, ProductScreenClient)
where
    R: RemoteCollection<Product> + 'static,
{
    let (actor, generic_client) = ScreenActor::new(buffer_size, remote);
    let client = ProductScreenClient::new(generic_client);

    (actor, client)
}
