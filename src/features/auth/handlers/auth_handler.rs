use std::sync::Arc;

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{LoginRequestDto, LoginResponseDto, MeResponseDto};
use crate::features::auth::guards::RequireUser;
use crate::features::auth::model::Viewer;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;

/// Login with username and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful; session cookie set", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    jar: CookieJar,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponseDto>>)> {
    dto.validate()?;

    let response = service.login(&dto.username, &dto.password).await?;
    let jar = jar.add(service.sessions().session_cookie(response.token.clone()));

    Ok((jar, Json(ApiResponse::success(Some(response), None, None))))
}

/// End every session of the current user and clear the session cookie
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Sessions revoked; session cookie cleared")
    ),
    tag = "auth"
)]
pub async fn logout(
    State(service): State<Arc<AuthService>>,
    viewer: Viewer,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<()>>)> {
    if let Some(user) = viewer.user() {
        service.revoke_sessions(user.user_id).await?;
    }

    let jar = jar.remove(service.sessions().removal_cookie());
    Ok((
        jar,
        Json(ApiResponse::success(
            None,
            Some("Logged out".to_string()),
            None,
        )),
    ))
}

/// Get current authenticated user info
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user retrieved successfully", body = ApiResponse<MeResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("session_cookie" = []),
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(RequireUser(user): RequireUser) -> Json<ApiResponse<MeResponseDto>> {
    Json(ApiResponse::success(Some(user.into()), None, None))
}

#[cfg(test)]
mod tests {
    use axum::http::{
        header::{AUTHORIZATION, COOKIE, SET_COOKIE},
        HeaderValue, StatusCode,
    };
    use axum_test::TestServer;
    use serde_json::json;
    use sqlx::PgPool;

    use super::*;
    use crate::core::middleware::session_middleware;
    use crate::features::auth::routes;
    use crate::shared::constants::SESSION_COOKIE;
    use crate::shared::test_helpers::{lazy_pool, session_manager, staff_user, with_viewer};

    fn server(viewer: Viewer) -> TestServer {
        let service = Arc::new(AuthService::new(lazy_pool(), Arc::new(session_manager())));
        TestServer::new(with_viewer(routes::routes(service), viewer)).unwrap()
    }

    /// Routes behind the real session middleware
    async fn live_server(pool: PgPool) -> TestServer {
        let service = Arc::new(AuthService::new(pool, Arc::new(session_manager())));
        service.seed_admin("admin", "correct horse").await.unwrap();
        let app = routes::routes(service.clone()).layer(axum::middleware::from_fn_with_state(
            service,
            session_middleware,
        ));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_me_requires_session() {
        let response = server(Viewer::Anonymous).get("/api/auth/me").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_returns_session_user() {
        let response = server(Viewer::Authenticated(staff_user()))
            .get("/api/auth/me")
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["username"], staff_user().username);
        assert_eq!(body["data"]["is_staff"], true);
    }

    #[tokio::test]
    async fn test_login_rejects_blank_credentials_before_database() {
        let response = server(Viewer::Anonymous)
            .post("/api/auth/login")
            .json(&json!({ "username": "", "password": "" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let response = server(Viewer::Anonymous)
            .post("/api/auth/logout")
            .add_header(COOKIE, HeaderValue::from_static("linkshelf_session=stale"))
            .await;
        response.assert_status_ok();

        let cleared = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .any(|v| v.starts_with(&format!("{}=", SESSION_COOKIE)) && v.contains("Max-Age=0"));
        assert!(cleared);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_logout_revokes_token(pool: PgPool) {
        let server = live_server(pool).await;

        let login = server
            .post("/api/auth/login")
            .json(&json!({ "username": "admin", "password": "correct horse" }))
            .await;
        login.assert_status_ok();
        let body: serde_json::Value = login.json();
        let bearer = format!("Bearer {}", body["data"]["token"].as_str().unwrap());
        let bearer = HeaderValue::from_str(&bearer).unwrap();

        server
            .get("/api/auth/me")
            .add_header(AUTHORIZATION, bearer.clone())
            .await
            .assert_status_ok();

        server
            .post("/api/auth/logout")
            .add_header(AUTHORIZATION, bearer.clone())
            .await
            .assert_status_ok();

        // the copied token no longer works after logout
        server
            .get("/api/auth/me")
            .add_header(AUTHORIZATION, bearer)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_wrong_password_is_unauthorized(pool: PgPool) {
        let server = live_server(pool).await;
        for username in ["admin", "nobody"] {
            let response = server
                .post("/api/auth/login")
                .json(&json!({ "username": username, "password": "nope" }))
                .await;
            response.assert_status(StatusCode::UNAUTHORIZED);
        }
    }
}
