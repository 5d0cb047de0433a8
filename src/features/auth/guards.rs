//! Authorization guards.
//!
//! Both read the [`Viewer`] placed in request extensions by the session
//! middleware; a request without one is treated as anonymous.

use crate::core::error::AppError;
use crate::features::auth::model::{SessionUser, Viewer};
use axum::{extract::FromRequestParts, http::request::Parts};

fn session_user(parts: &Parts) -> Result<&SessionUser, AppError> {
    parts
        .extensions
        .get::<Viewer>()
        .and_then(Viewer::user)
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
}

/// Guard for any logged-in user.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireUser(user): RequireUser) { ... }
/// ```
pub struct RequireUser(pub SessionUser);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequireUser(session_user(parts)?.clone()))
    }
}

/// Guard for staff accounts; every admin endpoint uses it.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireStaff(user): RequireStaff) { ... }
/// ```
pub struct RequireStaff(pub SessionUser);

impl<S> FromRequestParts<S> for RequireStaff
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = session_user(parts)?;

        if !user.is_staff {
            return Err(AppError::Forbidden("Staff access required".to_string()));
        }

        Ok(RequireStaff(user.clone()))
    }
}
