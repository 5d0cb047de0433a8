use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Identity carried by a valid session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    pub user_id: Uuid,
    pub username: String,
    pub is_staff: bool,
}

/// Who is making the request.
///
/// Inserted into request extensions by the session middleware. Anything
/// short of a valid session resolves to `Anonymous`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Viewer {
    #[default]
    Anonymous,
    Authenticated(SessionUser),
}

impl Viewer {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Viewer::Authenticated(_))
    }

    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            Viewer::Authenticated(user) => Some(user),
            Viewer::Anonymous => None,
        }
    }
}

/// JWT claims of a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id
    pub sub: String,
    pub username: String,
    pub is_staff: bool,
    /// `users.session_version` at issue time
    pub ver: i32,
    pub iat: i64,
    pub exp: i64,
}

/// Database model for an account
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub session_version: i32,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            is_staff: user.is_staff,
        }
    }
}
