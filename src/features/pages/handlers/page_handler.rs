use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::core::error::{AppError, Result};
use crate::features::auth::model::Viewer;
use crate::features::auth::services::auth_service::INVALID_CREDENTIALS;
use crate::features::directory::dtos::DirectoryCategoryDto;
use crate::features::pages::flash::{flash_cookie, take_flash, Flash, FlashCode};
use crate::features::pages::PagesState;
use crate::shared::templates::{LOGIN_PAGE, PUBLIC_PAGE};

#[derive(Debug, Serialize)]
struct ViewerContext<'a> {
    username: &'a str,
    is_staff: bool,
}

impl<'a> ViewerContext<'a> {
    fn from_viewer(viewer: &'a Viewer) -> Option<Self> {
        viewer.user().map(|user| Self {
            username: &user.username,
            is_staff: user.is_staff,
        })
    }
}

#[derive(Debug, Serialize)]
struct PublicPageContext<'a> {
    viewer: Option<ViewerContext<'a>>,
    flash: Option<Flash>,
    categories: Vec<DirectoryCategoryDto>,
}

#[derive(Debug, Serialize)]
struct LoginPageContext<'a> {
    viewer: Option<ViewerContext<'a>>,
    flash: Option<Flash>,
    error: Option<&'a str>,
    username: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

fn render_login(
    state: &PagesState,
    viewer: &Viewer,
    flash: Option<Flash>,
    error: Option<&str>,
    username: &str,
) -> Result<Html<String>> {
    let page = LoginPageContext {
        viewer: ViewerContext::from_viewer(viewer),
        flash,
        error,
        username,
    };
    Ok(Html(state.renderer.render(LOGIN_PAGE, &page)?))
}

/// GET / - the directory as the requester may see it
pub async fn public_page(
    viewer: Viewer,
    State(state): State<Arc<PagesState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>)> {
    let categories = state.directory.view_for(&viewer).await?;
    let (jar, flash) = take_flash(jar, &viewer);

    let page = PublicPageContext {
        viewer: ViewerContext::from_viewer(&viewer),
        flash,
        categories,
    };
    let html = state.renderer.render(PUBLIC_PAGE, &page)?;

    Ok((jar, Html(html)))
}

/// GET /login/
pub async fn login_form(
    viewer: Viewer,
    State(state): State<Arc<PagesState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>)> {
    let (jar, flash) = take_flash(jar, &viewer);
    let html = render_login(&state, &viewer, flash, None, "")?;
    Ok((jar, html))
}

/// POST /login/ - on success set the session and go back to the directory
pub async fn login_submit(
    viewer: Viewer,
    State(state): State<Arc<PagesState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let username = form.username.trim();

    if username.is_empty() || form.password.is_empty() {
        return Ok(render_login(&state, &viewer, None, Some(INVALID_CREDENTIALS), username)?
            .into_response());
    }

    match state.auth.login(username, &form.password).await {
        Ok(login) => {
            let jar = jar
                .add(state.auth.sessions().session_cookie(login.token))
                .add(flash_cookie(FlashCode::Welcome));
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(AppError::Unauthorized(_)) => {
            Ok(render_login(&state, &viewer, None, Some(INVALID_CREDENTIALS), username)?
                .into_response())
        }
        Err(e) => Err(e),
    }
}

/// GET or POST /logout/ - end the user's sessions everywhere
pub async fn logout(
    viewer: Viewer,
    State(state): State<Arc<PagesState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect)> {
    if let Some(user) = viewer.user() {
        state.auth.revoke_sessions(user.user_id).await?;
    }

    let jar = jar
        .remove(state.auth.sessions().removal_cookie())
        .add(flash_cookie(FlashCode::LoggedOut));

    Ok((jar, Redirect::to("/")))
}

#[cfg(test)]
mod tests {
    use axum::http::{
        header::{COOKIE, LOCATION, SET_COOKIE},
        HeaderValue, StatusCode,
    };
    use axum_test::{TestResponse, TestServer};
    use sqlx::PgPool;

    use super::*;
    use crate::core::config::SiteConfig;
    use crate::features::auth::AuthService;
    use crate::features::directory::DirectoryService;
    use crate::features::pages::routes;
    use crate::shared::constants::{FLASH_COOKIE, SESSION_COOKIE};
    use crate::shared::templates::PageRenderer;
    use crate::shared::test_helpers::{lazy_pool, session_manager, with_viewer};

    fn server(viewer: Viewer) -> TestServer {
        server_with(lazy_pool(), viewer)
    }

    fn server_with(pool: PgPool, viewer: Viewer) -> TestServer {
        let site = Arc::new(SiteConfig {
            title: "Team Links".to_string(),
            ..Default::default()
        });
        let state = Arc::new(PagesState {
            directory: Arc::new(DirectoryService::new(pool.clone())),
            auth: Arc::new(AuthService::new(pool, Arc::new(session_manager()))),
            renderer: Arc::new(PageRenderer::new(site).unwrap()),
        });
        TestServer::new(with_viewer(routes::routes(state), viewer)).unwrap()
    }

    fn set_cookies(response: &TestResponse) -> Vec<String> {
        response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(str::to_string))
            .collect()
    }

    #[tokio::test]
    async fn test_login_form_renders() {
        let response = server(Viewer::Anonymous).get("/login/").await;
        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("action=\"/login/\""));
        assert!(html.contains("Team Links"));
    }

    #[tokio::test]
    async fn test_blank_login_shows_error() {
        let response = server(Viewer::Anonymous)
            .post("/login/")
            .form(&[("username", "  "), ("password", "")])
            .await;
        response.assert_status_ok();
        assert!(response.text().contains(INVALID_CREDENTIALS));
        assert!(set_cookies(&response)
            .iter()
            .all(|c| !c.starts_with(SESSION_COOKIE)));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_logout_revokes_session_and_redirects(pool: PgPool) {
        let auth = AuthService::new(pool.clone(), Arc::new(session_manager()));
        auth.seed_admin("admin", "correct horse").await.unwrap();
        let login = auth.login("admin", "correct horse").await.unwrap();
        let user_id = login.user.user_id;
        let viewer = Viewer::Authenticated(login.user.clone());

        let response = server_with(pool.clone(), viewer)
            .get("/logout/")
            .add_header(COOKIE, HeaderValue::from_static("linkshelf_session=token"))
            .await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header(LOCATION), "/");

        let cookies = set_cookies(&response);
        assert!(cookies
            .iter()
            .any(|c| c.starts_with(&format!("{}=;", SESSION_COOKIE)) && c.contains("Max-Age=0")));
        assert!(cookies
            .iter()
            .any(|c| c.starts_with(&format!("{}=logged_out", FLASH_COOKIE))));

        let version: i32 = sqlx::query_scalar("SELECT session_version FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(version, 1);
        assert_eq!(auth.resolve_session(Some(&login.token)).await, Viewer::Anonymous);
    }

    #[tokio::test]
    async fn test_logout_accepts_post() {
        let response = server(Viewer::Anonymous).post("/logout/").await;
        response.assert_status(StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_flash_is_shown_once() {
        let response = server(Viewer::Anonymous)
            .get("/login/")
            .add_header(COOKIE, HeaderValue::from_static("linkshelf_flash=logged_out"))
            .await;
        assert!(response.text().contains("You have been logged out."));
        assert!(set_cookies(&response)
            .iter()
            .any(|c| c.starts_with(&format!("{}=;", FLASH_COOKIE))));
    }
}
