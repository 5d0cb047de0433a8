use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::links::handlers;
use crate::features::links::services::LinkService;

/// Create admin routes for link management (staff only)
pub fn admin_routes(service: Arc<LinkService>) -> Router {
    Router::new()
        .route(
            "/api/admin/links",
            get(handlers::list_links).post(handlers::create_link),
        )
        .route("/api/admin/links/bulk", put(handlers::bulk_update_links))
        .route(
            "/api/admin/links/{id}",
            get(handlers::get_link)
                .put(handlers::update_link)
                .delete(handlers::delete_link),
        )
        .with_state(service)
}
