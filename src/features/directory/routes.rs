use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::directory::handlers;
use crate::features::directory::services::DirectoryService;

/// Public directory API (session optional)
pub fn routes(service: Arc<DirectoryService>) -> Router {
    Router::new()
        .route("/api/directory", get(handlers::get_directory))
        .with_state(service)
}
