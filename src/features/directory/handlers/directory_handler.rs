use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::auth::model::Viewer;
use crate::features::directory::dtos::DirectoryCategoryDto;
use crate::features::directory::services::DirectoryService;
use crate::shared::types::{ApiResponse, Meta};

/// Categories and the links visible to the requester.
///
/// Anonymous requests do not see `authenticated_only` links. Categories
/// without visible links are included with an empty `links` list.
#[utoipa::path(
    get,
    path = "/api/directory",
    responses(
        (status = 200, description = "Visible directory", body = ApiResponse<Vec<DirectoryCategoryDto>>)
    ),
    tag = "directory",
    security(
        (),
        ("session_cookie" = []),
        ("bearer_auth" = [])
    )
)]
pub async fn get_directory(
    viewer: Viewer,
    State(service): State<Arc<DirectoryService>>,
) -> Result<Json<ApiResponse<Vec<DirectoryCategoryDto>>>> {
    let categories = service.view_for(&viewer).await?;
    let total = categories.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(categories),
        None,
        Some(Meta { total }),
    )))
}
