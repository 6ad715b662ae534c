//! Shared fixtures for integration tests
//!
//! Provides an in-memory SQLite database with migrations applied and a
//! recording media store that never touches the network.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use tamsa_cms::config::{AdminConfig, Config, DatabaseConfig, MediaConfig, ServerConfig};
use tamsa_cms::db::Database;
use tamsa_cms::error::{AppError, Result};
use tamsa_cms::media::{MediaKind, MediaStore, MediaUpload, StoredMedia};
use tamsa_cms::services::AuthService;
use tamsa_cms::AppState;

pub const ADMIN_PASSWORD: &str = "tamsa-admin-2024";

#[derive(Debug, Clone, PartialEq)]
pub struct UploadCall {
    pub filename: String,
    pub kind: MediaKind,
    pub folder: String,
}

/// Media store double that records every call
#[derive(Default)]
pub struct FakeMediaStore {
    uploads: Mutex<Vec<UploadCall>>,
    destroys: Mutex<Vec<(String, MediaKind)>>,
    fail_uploads: AtomicBool,
    fail_destroys: AtomicBool,
    destroy_delay_ms: AtomicU64,
    next_id: AtomicUsize,
}

impl FakeMediaStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_destroys(&self, fail: bool) {
        self.fail_destroys.store(fail, Ordering::SeqCst);
    }

    /// Make every destroy take this long, like a slow media service
    pub fn delay_destroys(&self, delay: Duration) {
        self.destroy_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn uploads(&self) -> Vec<UploadCall> {
        self.uploads.lock().unwrap().clone()
    }

    /// Every destroy attempt, including failed ones
    pub fn destroys(&self) -> Vec<(String, MediaKind)> {
        self.destroys.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaStore for FakeMediaStore {
    async fn upload(&self, upload: &MediaUpload, kind: MediaKind, folder: &str) -> Result<StoredMedia> {
        self.uploads.lock().unwrap().push(UploadCall {
            filename: upload.filename.clone(),
            kind,
            folder: folder.to_string(),
        });

        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(AppError::Media("simulated upload failure".to_string()));
        }

        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let remote_id = format!("{}/media_{}", folder, n);

        Ok(StoredMedia {
            url: format!("https://media.test/{}/{}", kind, remote_id),
            remote_id,
        })
    }

    async fn destroy(&self, remote_id: &str, kind: MediaKind) -> Result<()> {
        self.destroys
            .lock()
            .unwrap()
            .push((remote_id.to_string(), kind));

        let delay_ms = self.destroy_delay_ms.load(Ordering::SeqCst);
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        if self.fail_destroys.load(Ordering::SeqCst) {
            return Err(AppError::Media("simulated destroy failure".to_string()));
        }

        Ok(())
    }
}

pub async fn test_db() -> Database {
    let db = Database::connect(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    })
    .await
    .expect("Failed to open in-memory database");

    db.run_migrations().await.expect("Failed to run migrations");
    db
}

/// File-backed database with a multi-connection pool, for tests where
/// requests really run side by side. Keep the directory alive for the test.
pub async fn file_db() -> (TempDir, Database) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("tamsa.db").display());

    let db = Database::connect(&DatabaseConfig {
        url,
        max_connections: 5,
    })
    .await
    .expect("Failed to open file database");

    db.run_migrations().await.expect("Failed to run migrations");
    (dir, db)
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_upload_mb: 5,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        media: MediaConfig {
            cloud_name: "demo".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
        },
        admin: AdminConfig {
            password_hash: AuthService::hash_password(ADMIN_PASSWORD).expect("hash"),
            session_secret: "integration-test-session-secret-0123456789".to_string(),
            session_ttl_hours: 1,
        },
    }
}

pub async fn test_state(media: Arc<FakeMediaStore>) -> AppState {
    AppState {
        db: test_db().await,
        config: test_config(),
        media,
    }
}

pub fn png(filename: &str) -> MediaUpload {
    MediaUpload::new(filename, "image/png", vec![0x89, b'P', b'N', b'G'])
}

pub fn mp4(filename: &str) -> MediaUpload {
    MediaUpload::new(filename, "video/mp4", vec![0, 0, 0, 0x18, b'f', b't', b'y', b'p'])
}

pub fn pdf(filename: &str) -> MediaUpload {
    MediaUpload::new(filename, "application/pdf", b"%PDF-1.4".to_vec())
}

/// Overwrite a row's timestamp so ordering tests are deterministic
pub async fn backdate(db: &Database, table: &str, column: &str, id: i64, timestamp: &str) {
    sqlx::query(&format!("UPDATE {} SET {} = ?1 WHERE id = ?2", table, column))
        .bind(timestamp)
        .bind(id)
        .execute(&db.pool)
        .await
        .expect("Failed to backdate row");
}

pub async fn row_exists(db: &Database, table: &str, id: i64) -> bool {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {} WHERE id = ?1", table))
        .bind(id)
        .fetch_one(&db.pool)
        .await
        .expect("Failed to count rows");
    count > 0
}
