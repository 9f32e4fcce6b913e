//! Wire DTOs for the album/photo backend.
//!
//! DESIGN
//! ======
//! The backend is loose about which fields it returns (documents may predate
//! a field, or carry extra bookkeeping such as `created_at`). Response types
//! therefore default missing strings instead of failing the whole list.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// An album as listed by `GET /api/albums`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    /// Backend document id.
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Public URL of the most recent photo, if the album has any.
    #[serde(default)]
    pub cover_url: Option<String>,
}

/// A photo inside one album. The owning album id lives in request paths only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub filename: String,
    /// Object path inside the storage bucket.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub blob_path: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub public_url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

/// A single-use pre-signed upload destination for one pending file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTarget {
    pub filename: String,
    pub upload_url: String,
    pub blob_path: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AlbumList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub albums: Vec<Album>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PhotoList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub photos: Vec<Photo>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UploadTargetList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<UploadTarget>,
}

/// `{id}` body returned by create endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Created {
    pub id: String,
}

/// Body of delete endpoints: `{ok: true}` or `{error: "..."}`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DeleteOutcome {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewAlbum<'a> {
    pub title: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UploadTargetRequest<'a> {
    pub album_id: &'a str,
    pub filenames: &'a [String],
}

/// Registration payload that turns a stored object into a Photo record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PhotoRegistration {
    pub album_id: String,
    pub filename: String,
    pub blob_path: String,
    pub public_url: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct DescriptionUpdate<'a> {
    pub description: &'a str,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
