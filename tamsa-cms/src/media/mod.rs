//! Hosted media storage.
//!
//! Binary payloads never touch the local database: they are pushed to the
//! hosted media service and only the returned URL and remote identifier are
//! persisted. The store layer talks to the service through [`MediaStore`].

mod cloudinary;

use async_trait::async_trait;
use axum::body::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use cloudinary::CloudinaryClient;

pub const IMAGE_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];
pub const VIDEO_CONTENT_TYPES: &[&str] = &["video/mp4", "video/mov", "video/avi", "video/webm"];
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Remote resource kind, as the media service partitions its storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Raw,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Raw => "raw",
        }
    }

    /// Classifies an uploaded image or video. Anything else is rejected by the caller.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        if IMAGE_CONTENT_TYPES.contains(&content_type) {
            Some(MediaKind::Image)
        } else if VIDEO_CONTENT_TYPES.contains(&content_type) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    /// Kind to destroy for a stored `media_type` column: image stays image, everything else is video.
    pub fn from_stored(media_type: Option<&str>) -> Self {
        match media_type {
            Some("image") => MediaKind::Image,
            _ => MediaKind::Video,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file received from a client, not yet uploaded.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl MediaUpload {
    /// The filename is passed through [`secure_filename`].
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: secure_filename(&filename.into()),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// Reduces a client-supplied filename to a flat ASCII name.
///
/// Path separators become word breaks, whitespace runs become `_`, anything
/// outside `[A-Za-z0-9._-]` is dropped and leading/trailing dots and
/// underscores are trimmed. `../../etc/passwd` becomes `etc_passwd`.
pub fn secure_filename(raw: &str) -> String {
    let flattened = raw.replace(['/', '\\'], " ");

    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    match kept.trim_matches(|c| c == '.' || c == '_') {
        "" => "upload".to_string(),
        name => name.to_string(),
    }
}

/// What the media service hands back after a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMedia {
    pub url: String,
    pub remote_id: String,
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, upload: &MediaUpload, kind: MediaKind, folder: &str) -> Result<StoredMedia>;

    async fn destroy(&self, remote_id: &str, kind: MediaKind) -> Result<()>;
}

/// Destroys an object whose database row never made it to disk.
///
/// The original error is what the caller reports, so a failure here is only logged.
pub(crate) async fn reclaim_orphan(media: &dyn MediaStore, stored: &StoredMedia, kind: MediaKind) {
    match media.destroy(&stored.remote_id, kind).await {
        Ok(()) => tracing::warn!(remote_id = %stored.remote_id, "Reclaimed media for rejected insert"),
        Err(e) => tracing::error!(
            remote_id = %stored.remote_id,
            error = %e,
            "Failed to reclaim media for rejected insert"
        ),
    }
}
