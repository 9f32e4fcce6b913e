//! Bearer-authenticated client for the album backend.
//!
//! ERROR HANDLING
//! ==============
//! Every call resolves to `Result<_, ClientError>`. Non-2xx responses carry
//! the numeric status and the raw body text so backend diagnostics reach the
//! user unchanged. Nothing is retried.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientSettings;
use crate::error::{ClientError, TransferError};
use crate::session::{Session, SessionProvider};
use crate::transport::{HttpRequest, Method, Transport};
use crate::types::{
    Album, AlbumList, Created, DeleteOutcome, DescriptionUpdate, NewAlbum, Photo, PhotoList, PhotoRegistration,
    UploadTarget, UploadTargetList, UploadTargetRequest,
};

fn album_endpoint(album_id: &str) -> String {
    format!("/api/albums/{album_id}")
}

fn album_photos_endpoint(album_id: &str) -> String {
    format!("/api/albums/{album_id}/photos")
}

fn photo_endpoint(album_id: &str, photo_id: &str) -> String {
    format!("/api/photos/{album_id}/{photo_id}")
}

fn photo_description_endpoint(album_id: &str, photo_id: &str) -> String {
    format!("/api/photos/{album_id}/{photo_id}/description")
}

/// Backend client. Owns its transport and identity source.
pub struct ApiClient<T, S> {
    transport: T,
    identity: S,
    settings: ClientSettings,
}

impl<T: Transport, S: SessionProvider> ApiClient<T, S> {
    pub fn new(transport: T, identity: S, settings: ClientSettings) -> Self {
        Self { transport, identity, settings }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn identity(&self) -> &S {
        &self.identity
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Fresh session snapshot for gating one render.
    pub async fn session(&self) -> Session {
        Session::fetch(&self.identity).await
    }

    /// Send one backend request and return the JSON body.
    ///
    /// A fresh token is requested for every call. Missing tokens are not an
    /// error; the request goes out unauthenticated and the backend decides.
    /// An empty 2xx body decodes as `null`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Auth`] if the token cannot be minted,
    /// [`ClientError::Transport`] if no response arrives,
    /// [`ClientError::Api`] for non-2xx statuses, and
    /// [`ClientError::Decode`] for non-JSON bodies.
    pub async fn call(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ClientError> {
        let token = self.identity.id_token().await?;
        let mut request = HttpRequest::new(method, self.settings.endpoint(path)).bearer(token);
        if let Some(body) = body {
            request = request.json(body);
        }
        log::debug!("{method} {path}");
        let resp = self.transport.send(request).await?;
        if !resp.is_success() {
            log::debug!("{method} {path} -> {}", resp.status);
            return Err(ClientError::Api { status: resp.status, body: resp.body });
        }
        if resp.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&resp.body)?)
    }

    async fn call_as<R: DeserializeOwned + Default>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<R, ClientError> {
        match self.call(method, path, body).await? {
            Value::Null => Ok(R::default()),
            value => Ok(serde_json::from_value(value)?),
        }
    }

    /// `GET /api/albums`, in server order.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn list_albums(&self) -> Result<Vec<Album>, ClientError> {
        let list: AlbumList = self.call_as(Method::Get, "/api/albums", None).await?;
        Ok(list.albums)
    }

    /// `POST /api/albums`; returns the new album id. Admin-only server-side.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn create_album(&self, title: &str, description: &str) -> Result<String, ClientError> {
        let body = serde_json::to_value(NewAlbum { title, description })?;
        let created: Created = serde_json::from_value(self.call(Method::Post, "/api/albums", Some(body)).await?)?;
        Ok(created.id)
    }

    /// `DELETE /api/albums/{id}`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Rejected`] when the body carries an `error` field,
    /// otherwise see [`ApiClient::call`].
    pub async fn delete_album(&self, album_id: &str) -> Result<(), ClientError> {
        let outcome: DeleteOutcome = self.call_as(Method::Delete, &album_endpoint(album_id), None).await?;
        rejected(outcome)
    }

    /// `GET /api/albums/{id}/photos`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn list_photos(&self, album_id: &str) -> Result<Vec<Photo>, ClientError> {
        let list: PhotoList = self.call_as(Method::Get, &album_photos_endpoint(album_id), None).await?;
        Ok(list.photos)
    }

    /// `POST /api/generate_upload_urls` for a whole batch in one round-trip.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn upload_targets(&self, album_id: &str, filenames: &[String]) -> Result<Vec<UploadTarget>, ClientError> {
        let body = serde_json::to_value(UploadTargetRequest { album_id, filenames })?;
        let list: UploadTargetList = self.call_as(Method::Post, "/api/generate_upload_urls", Some(body)).await?;
        Ok(list.results)
    }

    /// `POST /api/photos`; returns the new photo id.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn register_photo(&self, registration: &PhotoRegistration) -> Result<String, ClientError> {
        let body = serde_json::to_value(registration)?;
        let created: Created = serde_json::from_value(self.call(Method::Post, "/api/photos", Some(body)).await?)?;
        Ok(created.id)
    }

    /// `PUT /api/photos/{album}/{photo}/description`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn update_description(&self, album_id: &str, photo_id: &str, description: &str) -> Result<(), ClientError> {
        let body = serde_json::to_value(DescriptionUpdate { description })?;
        self.call(Method::Put, &photo_description_endpoint(album_id, photo_id), Some(body)).await?;
        Ok(())
    }

    /// `DELETE /api/photos/{album}/{photo}`. Handled exactly like album deletion.
    ///
    /// # Errors
    ///
    /// [`ClientError::Rejected`] when the body carries an `error` field,
    /// otherwise see [`ApiClient::call`].
    pub async fn delete_photo(&self, album_id: &str, photo_id: &str) -> Result<(), ClientError> {
        let outcome: DeleteOutcome = self.call_as(Method::Delete, &photo_endpoint(album_id, photo_id), None).await?;
        rejected(outcome)
    }

    /// PUT raw bytes to a pre-signed storage URL. One attempt, no bearer token.
    ///
    /// # Errors
    ///
    /// [`TransferError::Status`] for non-2xx, [`TransferError::Transport`] when
    /// storage is unreachable.
    pub async fn put_object(&self, upload_url: &str, bytes: Vec<u8>) -> Result<(), TransferError> {
        let resp = self.transport.send(HttpRequest::new(Method::Put, upload_url).bytes(bytes)).await?;
        if !resp.is_success() {
            return Err(TransferError::Status(resp.status));
        }
        Ok(())
    }
}

fn rejected(outcome: DeleteOutcome) -> Result<(), ClientError> {
    match outcome.error {
        Some(message) => Err(ClientError::Rejected(message)),
        None => Ok(()),
    }
}
