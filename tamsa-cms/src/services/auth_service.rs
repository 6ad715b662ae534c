// Auth service - shared admin password check and session tokens
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::config::AdminConfig;
use crate::error::{AppError, Result};
use crate::middleware::{Claims, CurrentAdmin};

const ADMIN_SUBJECT: &str = "admin";

pub struct AuthService {
    config: AdminConfig,
}

impl AuthService {
    pub fn new(config: AdminConfig) -> Self {
        Self { config }
    }

    /// Checks the shared admin password and issues a session token.
    pub fn authenticate(&self, password: &str) -> Result<String> {
        if self.config.password_hash.is_empty() {
            tracing::warn!("Admin login attempted but no password hash is configured");
            return Err(AppError::Unauthorized);
        }

        if let Err(e) = self.verify_password(password, &self.config.password_hash) {
            tracing::warn!("Admin login failed");
            return Err(e);
        }

        tracing::info!("Admin logged in");
        self.issue_session_token()
    }

    pub fn hash_password(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        Ok(argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string())
    }

    pub fn verify_password(&self, password: &str, hash: &str) -> Result<()> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AppError::Unauthorized)
    }

    pub fn issue_session_token(&self) -> Result<String> {
        if self.config.session_secret.is_empty() {
            return Err(AppError::Internal(anyhow::anyhow!("Session secret is not configured")));
        }

        let now = Utc::now();
        let exp = now + Duration::hours(self.config.session_ttl_hours as i64);

        let claims = Claims {
            sub: ADMIN_SUBJECT.to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.session_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))
    }

    pub fn verify_session_token(&self, token: &str) -> Result<CurrentAdmin> {
        // An empty key would accept tokens anyone can sign
        if self.config.session_secret.is_empty() {
            return Err(AppError::Unauthorized);
        }

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.session_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Unauthorized)?
        .claims;

        if claims.sub != ADMIN_SUBJECT {
            return Err(AppError::Unauthorized);
        }

        Ok(CurrentAdmin {
            logged_in_at: claims.iat,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(password: &str) -> AuthService {
        AuthService::new(AdminConfig {
            password_hash: AuthService::hash_password(password).unwrap(),
            session_secret: "test-secret".to_string(),
            session_ttl_hours: 1,
        })
    }

    #[test]
    fn correct_password_yields_verifiable_token() {
        let auth = service("hunter22");
        let token = auth.authenticate("hunter22").unwrap();
        assert!(auth.verify_session_token(&token).is_ok());
    }

    #[test]
    fn wrong_password_is_unauthorized() {
        let auth = service("hunter22");
        assert!(matches!(auth.authenticate("letmein"), Err(AppError::Unauthorized)));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let auth = service("hunter22");
        let other = AuthService::new(AdminConfig {
            password_hash: String::new(),
            session_secret: "another-secret".to_string(),
            session_ttl_hours: 1,
        });
        let token = other.issue_session_token().unwrap();
        assert!(matches!(auth.verify_session_token(&token), Err(AppError::Unauthorized)));
    }

    #[test]
    fn empty_secret_rejects_forged_token() {
        let forged = encode(
            &Header::default(),
            &Claims {
                sub: ADMIN_SUBJECT.to_string(),
                iat: Utc::now().timestamp() as usize,
                exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
            },
            &EncodingKey::from_secret(b""),
        )
        .unwrap();

        let auth = AuthService::new(AdminConfig {
            password_hash: String::new(),
            session_secret: String::new(),
            session_ttl_hours: 1,
        });
        assert!(matches!(auth.verify_session_token(&forged), Err(AppError::Unauthorized)));
    }

    #[test]
    fn login_disabled_without_hash() {
        let auth = AuthService::new(AdminConfig {
            password_hash: String::new(),
            session_secret: "test-secret".to_string(),
            session_ttl_hours: 1,
        });
        assert!(matches!(auth.authenticate("anything"), Err(AppError::Unauthorized)));
    }
}
