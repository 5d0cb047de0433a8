//! Sessions: an HS256 JWT carried in an HttpOnly cookie or a `Bearer`
//! header.
//!
//! The token only proves what was true at login. Its `ver` claim must still
//! match the account's `session_version` (see `AuthService::resolve_session`).

use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::core::config::SessionConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{SessionClaims, SessionUser};
use crate::shared::constants::SESSION_COOKIE;

/// A token that passed signature and expiry checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedSession {
    pub user: SessionUser,
    pub version: i32,
}

pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
    cookie_secure: bool,
}

impl SessionManager {
    pub fn new(config: &SessionConfig) -> Self {
        let secret = config.secret.as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_secs: config.ttl.as_secs() as i64,
            cookie_secure: config.cookie_secure,
        }
    }

    /// Issue a session token; returns the token and its expiry
    pub fn issue(&self, user: &SessionUser, version: i32) -> Result<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::seconds(self.ttl_secs);
        let claims = SessionClaims {
            sub: user.user_id.to_string(),
            username: user.username.clone(),
            is_staff: user.is_staff,
            ver: version,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign session token: {}", e)))?;

        Ok((token, expires_at))
    }

    pub fn verify(&self, token: &str) -> Result<VerifiedSession> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid session: {}", e)))?;

        let user_id = Uuid::parse_str(&data.claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid session subject".to_string()))?;

        Ok(VerifiedSession {
            user: SessionUser {
                user_id,
                username: data.claims.username,
                is_staff: data.claims.is_staff,
            },
            version: data.claims.ver,
        })
    }

    /// Verify a raw token if there is one. Missing or invalid tokens yield `None`.
    pub fn session_from_token(&self, token: Option<&str>) -> Option<VerifiedSession> {
        let token = token.filter(|t| !t.is_empty())?;

        match self.verify(token) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::debug!("Ignoring session token: {}", e);
                None
            }
        }
    }

    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.cookie_secure)
            .max_age(time::Duration::seconds(self.ttl_secs))
            .build()
    }

    /// Cookie to pass to `CookieJar::remove`
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE).path("/").build()
    }
}
