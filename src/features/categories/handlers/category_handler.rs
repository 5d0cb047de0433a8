use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireStaff;
use crate::features::categories::dtos::{
    BulkUpdateCategoriesDto, CategoryQueryParams, CategoryResponseDto, CreateCategoryDto,
    DeleteCategoryResponseDto, UpdateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::types::{ApiResponse, Meta};

/// List categories (staff only)
#[utoipa::path(
    get,
    path = "/api/admin/categories",
    params(CategoryQueryParams),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - staff access required")
    ),
    tag = "categories",
    security(
        ("session_cookie" = []),
        ("bearer_auth" = [])
    )
)]
pub async fn list_categories(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<CategoryService>>,
    Query(params): Query<CategoryQueryParams>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let (categories, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::success(
        Some(categories),
        None,
        Some(Meta { total }),
    )))
}

/// Create a category (staff only)
#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - staff access required")
    ),
    tag = "categories",
    security(
        ("session_cookie" = []),
        ("bearer_auth" = [])
    )
)]
pub async fn create_category(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    dto.validate()?;

    let category = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(category), None, None)),
    ))
}

/// Edit order and color of several categories (staff only)
#[utoipa::path(
    put,
    path = "/api/admin/categories/bulk",
    request_body = BulkUpdateCategoriesDto,
    responses(
        (status = 200, description = "Categories updated", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "A category was not found; nothing was changed"),
        (status = 403, description = "Forbidden - staff access required")
    ),
    tag = "categories",
    security(
        ("session_cookie" = []),
        ("bearer_auth" = [])
    )
)]
pub async fn bulk_update_categories(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<BulkUpdateCategoriesDto>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    dto.validate()?;

    let categories = service.bulk_update(dto).await?;
    let total = categories.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(categories),
        None,
        Some(Meta { total }),
    )))
}

/// Get a category by ID (staff only)
#[utoipa::path(
    get,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found"),
        (status = 403, description = "Forbidden - staff access required")
    ),
    tag = "categories",
    security(
        ("session_cookie" = []),
        ("bearer_auth" = [])
    )
)]
pub async fn get_category(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Update a category (staff only)
#[utoipa::path(
    put,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found"),
        (status = 403, description = "Forbidden - staff access required")
    ),
    tag = "categories",
    security(
        ("session_cookie" = []),
        ("bearer_auth" = [])
    )
)]
pub async fn update_category(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()?;

    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Delete a category together with all of its links (staff only)
#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted", body = ApiResponse<DeleteCategoryResponseDto>),
        (status = 404, description = "Category not found"),
        (status = 403, description = "Forbidden - staff access required")
    ),
    tag = "categories",
    security(
        ("session_cookie" = []),
        ("bearer_auth" = [])
    )
)]
pub async fn delete_category(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeleteCategoryResponseDto>>> {
    let deleted = service.delete(id).await?;
    let message = format!(
        "Category deleted along with {} link(s)",
        deleted.deleted_links
    );
    Ok(Json(ApiResponse::success(
        Some(deleted),
        Some(message),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::json;

    use super::*;
    use crate::features::auth::model::Viewer;
    use crate::features::categories::routes;
    use crate::shared::test_helpers::{lazy_pool, regular_user, staff_user, with_viewer};

    fn server(viewer: Viewer) -> TestServer {
        let service = Arc::new(CategoryService::new(lazy_pool()));
        TestServer::new(with_viewer(routes::admin_routes(service), viewer)).unwrap()
    }

    #[tokio::test]
    async fn test_anonymous_cannot_delete_category() {
        let response = server(Viewer::Anonymous)
            .delete(&format!("/api/admin/categories/{}", Uuid::new_v4()))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_staff_cannot_list_categories() {
        let response = server(Viewer::Authenticated(regular_user()))
            .get("/api/admin/categories")
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_invalid_color_rejected_before_database() {
        let response = server(Viewer::Authenticated(staff_user()))
            .post("/api/admin/categories")
            .json(&json!({ "name": "Tools", "color": "red" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
    }
}
