use crate::framework::{EntityId, Resource, ScreenClient, ScreenState, SyncError};
use async_trait::async_trait;

/// Trait for screen-specific clients to inherit the standard screen operations.
///
/// This trait reduces boilerplate by providing default implementations for
/// the operations every list-and-form screen has.
#[async_trait]
pub trait ScreenHandle<T: Resource>: Send + Sync {
    /// Access the inner generic ScreenClient.
    fn inner(&self) -> &ScreenClient<T>;

    /// Fetch the collection when the screen is first shown.
    #[tracing::instrument(skip(self))]
    async fn load(&self) -> Result<(), SyncError> {
        tracing::debug!("Sending request");
        self.inner().load_initial().await
    }

    #[tracing::instrument(skip(self, value))]
    async fn change_field(&self, name: &str, value: &str) -> Result<(), SyncError> {
        self.inner().change_field(name, value).await
    }

    /// Load an entity from the current list into the form.
    #[tracing::instrument(skip(self))]
    async fn edit(&self, entity: T) -> Result<(), SyncError> {
        self.inner().start_edit(entity).await
    }

    async fn cancel_edit(&self) -> Result<(), SyncError> {
        self.inner().cancel_edit().await
    }

    /// Create or update, depending on the form mode.
    #[tracing::instrument(skip(self))]
    async fn submit(&self) -> Result<(), SyncError> {
        tracing::debug!("Sending request");
        self.inner().submit().await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> Result<(), SyncError> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await
    }

    fn state(&self) -> ScreenState<T> {
        self.inner().latest()
    }

    fn is_busy(&self) -> bool {
        self.inner().is_busy()
    }

    /// Mark the screen as discarded.
    fn close(&self) {
        self.inner().deactivate();
    }
}
