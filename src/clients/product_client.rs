use crate::clients::screen_handle::ScreenHandle;
use crate::framework::{EntityId, ScreenClient, SyncError};
use crate::model::Product;
use async_trait::async_trait;
use crate::product_screen::ProductAction;
use tracing::{debug, instrument};

/// Client for the product management screen.
#[derive(Clone)]
pub struct ProductScreenClient {
    inner: ScreenClient<Product>,
}

impl ProductScreenClient {
    pub fn new(inner: ScreenClient<Product>) -> Self {
        Self { inner }
    }

    /// Sells one unit of the product as it appears in the current list.
    #[instrument(skip(self))]
    pub async fn sell(&self, id: EntityId) -> Result<(), SyncError> {
        debug!("Sending request");
        self.inner.perform_action(id, ProductAction::Sell).await
    }
}

#[async_trait]
impl ScreenHandle<Product> for ProductScreenClient {
    fn inner(&self) -> &ScreenClient<Product> {
        &self.inner
    }
}
