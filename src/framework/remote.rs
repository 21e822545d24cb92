//! # Remote Collections
//!
//! [`RemoteCollection`] is the seam between a screen and the REST API. The
//! production implementation, [`HttpCollection`], performs exactly one HTTP
//! round-trip per call with no retry and no timeout. Callers are responsible
//! for re-synchronising their local state afterwards.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use tracing::{debug, instrument};
use url::Url;

use crate::framework::{EntityId, Resource, SyncError};

/// List, create, replace and remove against one named collection.
#[async_trait]
pub trait RemoteCollection<T: Resource>: Send + Sync {
    async fn list(&self) -> Result<Vec<T>, SyncError>;

    /// Returns the created entity when the server echoes it.
    async fn create(&self, fields: &T::Fields) -> Result<Option<T>, SyncError>;

    /// Returns the replaced entity when the server echoes it.
    async fn replace(&self, id: &EntityId, fields: &T::Fields) -> Result<Option<T>, SyncError>;

    async fn remove(&self, id: &EntityId) -> Result<(), SyncError>;
}

/// Shared reqwest client plus the configured API origin.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    origin: Url,
}

impl HttpTransport {
    pub fn new(origin: Url) -> Self {
        Self {
            client: Client::new(),
            origin,
        }
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Appends the segments of `path` under the origin's own path.
    pub fn url(&self, path: &str) -> Result<Url, SyncError> {
        self.url_with(path, None)
    }

    /// Like [`url`](Self::url), with `id` percent-encoded as one final segment.
    pub fn item_url(&self, path: &str, id: &EntityId) -> Result<Url, SyncError> {
        self.url_with(path, Some(id))
    }

    fn url_with(&self, path: &str, id: Option<&EntityId>) -> Result<Url, SyncError> {
        let mut url = self.origin.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| SyncError::Network(format!("origin {} cannot carry a path", self.origin)))?;
            segments.pop_if_empty();
            segments.extend(path.split('/').filter(|segment| !segment.is_empty()));
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        Ok(url)
    }

    /// Sends one request and returns the raw body of a 2xx response.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Vec<u8>, SyncError> {
        debug!(%method, %url, "Sending request");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            // `.json` also sets `Content-Type: application/json`.
            request = request.json(body);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok(body.to_vec())
    }

    /// Sends one request and decodes the JSON body of a 2xx response.
    pub async fn send_json<B, R>(&self, method: Method, url: Url, body: Option<&B>) -> Result<R, SyncError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = self.send(method, url, body).await?;
        decode(&body)
    }
}

/// reqwest-backed [`RemoteCollection`] for any [`Resource`].
pub struct HttpCollection<T: Resource> {
    transport: HttpTransport,
    _resource: PhantomData<fn() -> T>,
}

impl<T: Resource> Clone for HttpCollection<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            _resource: PhantomData,
        }
    }
}

impl<T: Resource> HttpCollection<T> {
    pub fn new(transport: HttpTransport) -> Self {
        Self {
            transport,
            _resource: PhantomData,
        }
    }
}

#[async_trait]
impl<T: Resource> RemoteCollection<T> for HttpCollection<T> {
    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn list(&self) -> Result<Vec<T>, SyncError> {
        let url = self.transport.url(&T::list_path())?;
        self.transport.send_json::<(), Vec<T>>(Method::GET, url, None).await
    }

    #[instrument(skip(self, fields), fields(collection = T::COLLECTION))]
    async fn create(&self, fields: &T::Fields) -> Result<Option<T>, SyncError> {
        let url = self.transport.url(&T::create_path())?;
        let body = self.transport.send(Method::POST, url, Some(fields)).await?;
        Ok(echoed_entity(&body))
    }

    #[instrument(skip(self, fields), fields(collection = T::COLLECTION))]
    async fn replace(&self, id: &EntityId, fields: &T::Fields) -> Result<Option<T>, SyncError> {
        let url = self.transport.item_url(&T::list_path(), id)?;
        let body = self.transport.send(Method::PUT, url, Some(fields)).await?;
        Ok(echoed_entity(&body))
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn remove(&self, id: &EntityId) -> Result<(), SyncError> {
        let url = self.transport.item_url(&T::list_path(), id)?;
        self.transport.send::<()>(Method::DELETE, url, None).await.map(|_| ())
    }
}

fn decode<R: DeserializeOwned>(body: &[u8]) -> Result<R, SyncError> {
    serde_json::from_slice(body)
        .map_err(|e| SyncError::Network(format!("invalid response body: {}", e)))
}

/// A 2xx body that is empty or not shaped like the entity is still a success.
fn echoed_entity<T: Resource>(body: &[u8]) -> Option<T> {
    if body.is_empty() {
        return None;
    }
    match serde_json::from_slice(body) {
        Ok(entity) => Some(entity),
        Err(e) => {
            debug!(collection = T::COLLECTION, error = %e, "Response body is not an entity");
            None
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> SyncError {
    SyncError::Network(error.to_string())
}

fn map_status_error(status: StatusCode) -> SyncError {
    SyncError::Rejected {
        status: status.as_u16(),
    }
}
