//! User-specific resource logic and entity implementation.

pub mod entity;

use crate::clients::UserScreenClient;
use crate::framework::{RemoteCollection, ScreenActor};
use crate::model::User;

/// Creates a new User screen and its client.
pub fn new<R>(buffer_size: usize, remote: R) -> (ScreenActor<User, R>, UserScreenClient)
where
    R: RemoteCollection<User> + 'static,
{
    let (actor, generic_client) = ScreenActor::new(buffer_size, remote);
    let client = UserScreenClient::new(generic_client);

    (actor, client)
}
