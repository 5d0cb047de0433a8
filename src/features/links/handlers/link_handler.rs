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
use crate::features::links::dtos::{
    BulkUpdateLinksDto, CreateLinkDto, LinkQueryParams, LinkResponseDto, UpdateLinkDto,
};
use crate::features::links::services::LinkService;
use crate::shared::types::{ApiResponse, Meta};

/// List links (staff only)
#[utoipa::path(
    get,
    path = "/api/admin/links",
    params(LinkQueryParams),
    responses(
        (status = 200, description = "List of links", body = ApiResponse<Vec<LinkResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - staff access required")
    ),
    tag = "links",
    security(
        ("session_cookie" = []),
        ("bearer_auth" = [])
    )
)]
pub async fn list_links(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<LinkService>>,
    Query(params): Query<LinkQueryParams>,
) -> Result<Json<ApiResponse<Vec<LinkResponseDto>>>> {
    let (links, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::success(
        Some(links),
        None,
        Some(Meta { total }),
    )))
}

/// Create a link (staff only)
///
/// `icon_class` may be a class list or a pasted `<i class="..."></i>` snippet;
/// the stored value is always the class list.
#[utoipa::path(
    post,
    path = "/api/admin/links",
    request_body = CreateLinkDto,
    responses(
        (status = 201, description = "Link created", body = ApiResponse<LinkResponseDto>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 403, description = "Forbidden - staff access required")
    ),
    tag = "links",
    security(
        ("session_cookie" = []),
        ("bearer_auth" = [])
    )
)]
pub async fn create_link(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<LinkService>>,
    AppJson(dto): AppJson<CreateLinkDto>,
) -> Result<(StatusCode, Json<ApiResponse<LinkResponseDto>>)> {
    dto.validate()?;

    let link = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(link), None, None)),
    ))
}

/// Edit several links from the list view (staff only)
#[utoipa::path(
    put,
    path = "/api/admin/links/bulk",
    request_body = BulkUpdateLinksDto,
    responses(
        (status = 200, description = "Links updated", body = ApiResponse<Vec<LinkResponseDto>>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 404, description = "A link was not found; nothing was changed"),
        (status = 403, description = "Forbidden - staff access required")
    ),
    tag = "links",
    security(
        ("session_cookie" = []),
        ("bearer_auth" = [])
    )
)]
pub async fn bulk_update_links(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<LinkService>>,
    AppJson(dto): AppJson<BulkUpdateLinksDto>,
) -> Result<Json<ApiResponse<Vec<LinkResponseDto>>>> {
    dto.validate()?;

    let links = service.bulk_update(dto).await?;
    let total = links.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(links),
        None,
        Some(Meta { total }),
    )))
}

/// Get a link by ID (staff only)
#[utoipa::path(
    get,
    path = "/api/admin/links/{id}",
    params(
        ("id" = Uuid, Path, description = "Link ID")
    ),
    responses(
        (status = 200, description = "Link found", body = ApiResponse<LinkResponseDto>),
        (status = 404, description = "Link not found"),
        (status = 403, description = "Forbidden - staff access required")
    ),
    tag = "links",
    security(
        ("session_cookie" = []),
        ("bearer_auth" = [])
    )
)]
pub async fn get_link(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<LinkService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<LinkResponseDto>>> {
    let link = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(link), None, None)))
}

/// Update a link (staff only)
#[utoipa::path(
    put,
    path = "/api/admin/links/{id}",
    params(
        ("id" = Uuid, Path, description = "Link ID")
    ),
    request_body = UpdateLinkDto,
    responses(
        (status = 200, description = "Link updated", body = ApiResponse<LinkResponseDto>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 404, description = "Link not found"),
        (status = 403, description = "Forbidden - staff access required")
    ),
    tag = "links",
    security(
        ("session_cookie" = []),
        ("bearer_auth" = [])
    )
)]
pub async fn update_link(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<LinkService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateLinkDto>,
) -> Result<Json<ApiResponse<LinkResponseDto>>> {
    dto.validate()?;

    let link = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(link), None, None)))
}

/// Delete a link (staff only)
#[utoipa::path(
    delete,
    path = "/api/admin/links/{id}",
    params(
        ("id" = Uuid, Path, description = "Link ID")
    ),
    responses(
        (status = 200, description = "Link deleted"),
        (status = 404, description = "Link not found"),
        (status = 403, description = "Forbidden - staff access required")
    ),
    tag = "links",
    security(
        ("session_cookie" = []),
        ("bearer_auth" = [])
    )
)]
pub async fn delete_link(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<LinkService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::features::links::routes;
    use crate::shared::test_helpers::{lazy_pool, regular_user, with_viewer};

    use super::*;
    use crate::features::auth::model::Viewer;

    fn server(viewer: Viewer) -> TestServer {
        let service = Arc::new(LinkService::new(lazy_pool()));
        TestServer::new(with_viewer(routes::admin_routes(service), viewer)).unwrap()
    }

    #[tokio::test]
    async fn test_anonymous_cannot_list_links() {
        let response = server(Viewer::Anonymous).get("/api/admin/links").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_staff_cannot_create_links() {
        let response = server(Viewer::Authenticated(regular_user()))
            .post("/api/admin/links")
            .json(&json!({
                "title": "Docs",
                "url": "https://docs.example.com",
                "category_id": Uuid::new_v4(),
            }))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }
}
