/// Cloudinary REST client
///
/// Implements the two calls the site needs: signed upload and signed destroy.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use sha1::{Digest, Sha1};

use super::{MediaKind, MediaStore, MediaUpload, StoredMedia};
use crate::config::MediaConfig;
use crate::error::{AppError, Result};

pub struct CloudinaryClient {
    http_client: HttpClient,
    base_url: String,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl CloudinaryClient {
    pub fn from_config(cfg: &MediaConfig) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| AppError::Media(format!("Failed to create HTTP client: {e}")))?;

        tracing::info!(cloud_name = %cfg.cloud_name, "Cloudinary client initialized");

        Ok(Self {
            http_client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            cloud_name: cfg.cloud_name.clone(),
            api_key: cfg.api_key.clone(),
            api_secret: cfg.api_secret.clone(),
        })
    }

    fn endpoint(&self, kind: MediaKind, action: &str) -> String {
        format!("{}/{}/{}/{}", self.base_url, self.cloud_name, kind.as_str(), action)
    }

    /// SHA-1 over the alphabetically sorted `key=value` pairs followed by the API secret.
    fn sign(&self, params: &[(&str, String)]) -> String {
        sign_params(params, &self.api_secret)
    }

    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(parsed) => format!("{} ({})", parsed.error.message, status),
            Err(_) => format!("status {}: {}", status, body),
        }
    }
}

fn sign_params(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    hex::encode(Sha1::digest(format!("{to_sign}{api_secret}").as_bytes()))
}

#[async_trait]
impl MediaStore for CloudinaryClient {
    async fn upload(&self, upload: &MediaUpload, kind: MediaKind, folder: &str) -> Result<StoredMedia> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signed = [
            ("folder", folder.to_string()),
            ("timestamp", timestamp.clone()),
            ("use_filename", "true".to_string()),
        ];
        let signature = self.sign(&signed);

        let file = Part::bytes(upload.bytes.to_vec())
            .file_name(upload.filename.clone())
            .mime_str(&upload.content_type)
            .map_err(|e| AppError::BadRequest(format!("Invalid content type: {e}")))?;

        let form = Form::new()
            .part("file", file)
            .text("api_key", self.api_key.clone())
            .text("folder", folder.to_string())
            .text("timestamp", timestamp)
            .text("use_filename", "true")
            .text("signature", signature);

        let response = self
            .http_client
            .post(self.endpoint(kind, "upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Media(format!("Upload request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Media(format!(
                "Upload rejected: {}",
                Self::error_message(response).await
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::Media(format!("Invalid upload response: {e}")))?;

        tracing::info!(public_id = %body.public_id, kind = %kind, folder, "Media uploaded");

        Ok(StoredMedia {
            url: body.secure_url,
            remote_id: body.public_id,
        })
    }

    async fn destroy(&self, remote_id: &str, kind: MediaKind) -> Result<()> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signed = [
            ("public_id", remote_id.to_string()),
            ("timestamp", timestamp.clone()),
        ];
        let signature = self.sign(&signed);

        let params = [
            ("public_id", remote_id.to_string()),
            ("timestamp", timestamp),
            ("api_key", self.api_key.clone()),
            ("signature", signature),
        ];

        let response = self
            .http_client
            .post(self.endpoint(kind, "destroy"))
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::Media(format!("Destroy request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Media(format!(
                "Destroy rejected: {}",
                Self::error_message(response).await
            )));
        }

        let body: DestroyResponse = response
            .json()
            .await
            .map_err(|e| AppError::Media(format!("Invalid destroy response: {e}")))?;

        // "not found" means the object is already gone
        match body.result.as_str() {
            "ok" | "not found" => {
                tracing::info!(public_id = remote_id, kind = %kind, result = %body.result, "Media destroyed");
                Ok(())
            }
            other => Err(AppError::Media(format!(
                "Destroy of {} returned '{}'",
                remote_id, other
            ))),
        }
    }
}
