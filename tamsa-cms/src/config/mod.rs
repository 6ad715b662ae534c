use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub media: MediaConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Hosted media service account (Cloudinary REST API).
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    #[serde(default = "default_media_base_url")]
    pub base_url: String,
    #[serde(default = "default_media_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Argon2 PHC string of the shared admin password
    pub password_hash: String,
    /// HS256 key for session tokens; required whenever login is enabled
    pub session_secret: String,
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_upload_mb() -> usize {
    50
}

fn default_max_connections() -> u32 {
    5
}

fn default_media_base_url() -> String {
    "https://api.cloudinary.com/v1_1".to_string()
}

fn default_media_timeout_secs() -> u64 {
    30
}

fn default_session_ttl_hours() -> u64 {
    12
}

pub const MIN_SESSION_SECRET_LEN: usize = 32;

impl AdminConfig {
    /// Refuses to start with login enabled but no real signing key.
    pub fn check(&self) -> anyhow::Result<()> {
        if !self.password_hash.is_empty() && self.session_secret.len() < MIN_SESSION_SECRET_LEN {
            anyhow::bail!(
                "ADMIN__SESSION_SECRET must be set to at least {} characters when ADMIN__PASSWORD_HASH is set",
                MIN_SESSION_SECRET_LEN
            );
        }
        Ok(())
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.max_upload_mb", 50)?
            .set_default("database.url", "sqlite://tamsa.db?mode=rwc")?
            .set_default("database.max_connections", 5)?
            .set_default("media.cloud_name", "")?
            .set_default("media.api_key", "")?
            .set_default("media.api_secret", "")?
            .set_default("media.base_url", "https://api.cloudinary.com/v1_1")?
            .set_default("media.timeout_secs", 30)?
            .set_default("admin.password_hash", "")?
            .set_default("admin.session_secret", "")?
            .set_default("admin.session_ttl_hours", 12)?
            .build()?;

        let config: Self = config.try_deserialize()?;

        config.admin.check()?;
        if config.admin.password_hash.is_empty() {
            tracing::warn!("ADMIN__PASSWORD_HASH is not set; admin login is disabled");
        }
        if config.media.cloud_name.is_empty() {
            tracing::warn!("MEDIA__CLOUD_NAME is not set; media uploads will fail");
        }

        Ok(config)
    }
}
