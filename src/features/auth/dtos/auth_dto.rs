use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::auth::model::SessionUser;

/// Request DTO for login
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(length(min = 1, max = 150, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response DTO for a successful login.
///
/// The same token is also set as the session cookie.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponseDto {
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub user: SessionUser,
}

/// Response DTO for /me endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MeResponseDto {
    pub user_id: Uuid,
    pub username: String,
    pub is_staff: bool,
}

impl From<SessionUser> for MeResponseDto {
    fn from(user: SessionUser) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            is_staff: user.is_staff,
        }
    }
}
