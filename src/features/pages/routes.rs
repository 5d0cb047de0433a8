use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::pages::handlers;
use crate::features::pages::PagesState;

/// HTML routes
pub fn routes(state: Arc<PagesState>) -> Router {
    Router::new()
        .route("/", get(handlers::public_page))
        .route(
            "/login/",
            get(handlers::login_form).post(handlers::login_submit),
        )
        .route("/logout/", get(handlers::logout).post(handlers::logout))
        .with_state(state)
}
