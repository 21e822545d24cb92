use crate::clients::screen_handle::ScreenHandle;
use crate::framework::ScreenClient;
use crate::model::User;
use async_trait::async_trait;

/// Client for the user management screen.
///
/// Users have no custom actions; everything comes from [`ScreenHandle`].
#[derive(Clone)]
pub struct UserScreenClient {
    inner: ScreenClient<User>,
}

impl UserScreenClient {
    pub fn new(inner: ScreenClient<User>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ScreenHandle<User> for UserScreenClient {
    fn inner(&self) -> &ScreenClient<User> {
        &self.inner
    }
}
