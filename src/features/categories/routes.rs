use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create admin routes for category management (staff only)
pub fn admin_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/api/admin/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/api/admin/categories/bulk",
            put(handlers::bulk_update_categories),
        )
        .route(
            "/api/admin/categories/{id}",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .with_state(service)
}
