use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::LoginResponseDto;
use crate::features::auth::model::{SessionUser, User, Viewer};
use crate::features::auth::session::SessionManager;
use crate::shared::validation::USERNAME_REGEX;

const USER_COLUMNS: &str = "id, username, password_hash, is_staff, is_active, session_version, \
     last_login, created_at, updated_at";

/// Hash checked for unknown usernames so they cost the same bcrypt round
static DUMMY_HASH: OnceCell<String> = OnceCell::const_new();

pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";

/// Run bcrypt off the async runtime
async fn verify_password(password: String, hash: String) -> Result<bool> {
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password check task failed: {}", e)))?;

    match verified {
        Ok(valid) => Ok(valid),
        Err(e) => {
            tracing::warn!("Stored password hash is unusable: {}", e);
            Ok(false)
        }
    }
}

async fn hash_password(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| AppError::Internal(format!("Password hash task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

async fn dummy_hash() -> Result<&'static str> {
    DUMMY_HASH
        .get_or_try_init(|| hash_password("linkshelf-unknown-user".to_string()))
        .await
        .map(String::as_str)
}

/// Account state a session is checked against on every request
#[derive(Debug, sqlx::FromRow)]
struct SessionAccount {
    username: String,
    is_staff: bool,
    is_active: bool,
    session_version: i32,
}

/// Service for authentication operations (login, sessions, admin seeding)
pub struct AuthService {
    pool: PgPool,
    sessions: Arc<SessionManager>,
}

impl AuthService {
    pub fn new(pool: PgPool, sessions: Arc<SessionManager>) -> Self {
        Self { pool, sessions }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Check credentials. Returns `None` for unknown users, wrong passwords
    /// and inactive accounts alike.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);

        let Some(user) = sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
        else {
            verify_password(password.to_string(), dummy_hash().await?.to_string()).await?;
            tracing::info!("Login failed: unknown username");
            return Ok(None);
        };

        if !verify_password(password.to_string(), user.password_hash.clone()).await? {
            tracing::info!("Login failed: wrong password for user_id={}", user.id);
            return Ok(None);
        }

        if !user.is_active {
            tracing::info!("Login refused: inactive user_id={}", user.id);
            return Ok(None);
        }

        sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1")
            .bind(user.id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(Some(user))
    }

    /// Authenticate and issue a session token
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponseDto> {
        let user = self
            .authenticate(username.trim(), password)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        let session_user = SessionUser::from(&user);
        let (token, expires_at) = self.sessions.issue(&session_user, user.session_version)?;

        tracing::info!("User logged in: user_id={}", user.id);

        Ok(LoginResponseDto {
            token,
            token_type: "Bearer".to_string(),
            expires_at,
            user: session_user,
        })
    }

    /// Resolve a raw token to a viewer.
    ///
    /// The token must verify and its account must still exist, be active and
    /// carry the same session version. Staff status and username come from
    /// the account, not the token. Any failure, a database error included,
    /// yields `Anonymous`.
    pub async fn resolve_session(&self, token: Option<&str>) -> Viewer {
        let Some(session) = self.sessions.session_from_token(token) else {
            return Viewer::Anonymous;
        };
        let user_id = session.user.user_id;

        let account = sqlx::query_as::<_, SessionAccount>(
            "SELECT username, is_staff, is_active, session_version FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;

        match account {
            Ok(Some(account)) if account.is_active && account.session_version == session.version => {
                Viewer::Authenticated(SessionUser {
                    user_id,
                    username: account.username,
                    is_staff: account.is_staff,
                })
            }
            Ok(Some(_)) => {
                tracing::debug!("Session revoked or account inactive: user_id={}", user_id);
                Viewer::Anonymous
            }
            Ok(None) => {
                tracing::debug!("Session for unknown user_id={}", user_id);
                Viewer::Anonymous
            }
            Err(e) => {
                tracing::warn!("Failed to check session for user_id={}: {:?}", user_id, e);
                Viewer::Anonymous
            }
        }
    }

    /// Invalidate every token issued to the account so far
    pub async fn revoke_sessions(&self, user_id: Uuid) -> Result<()> {
        sqlx::query(
            "UPDATE users SET session_version = session_version + 1, updated_at = NOW() WHERE id = $1",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        tracing::info!("Sessions revoked: user_id={}", user_id);

        Ok(())
    }

    /// Create the configured staff account unless the username is taken
    pub async fn seed_admin(&self, username: &str, password: &str) -> Result<()> {
        if !USERNAME_REGEX.is_match(username) || username.chars().count() > 150 {
            return Err(AppError::Validation(format!(
                "Invalid admin username '{}'",
                username
            )));
        }

        let password_hash = hash_password(password.to_string()).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, is_staff, is_active)
            VALUES ($1, $2, TRUE, TRUE)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() > 0 {
            tracing::info!("Seeded staff account '{}'", username);
        } else {
            tracing::debug!("Staff account '{}' already exists", username);
        }

        Ok(())
    }
}
