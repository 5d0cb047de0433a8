use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::auth::model::SessionUser;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::directory::{dtos as directory_dtos, handlers as directory_handlers};
use crate::features::links::{dtos as links_dtos, handlers as links_handlers};
use crate::shared::constants::SESSION_COOKIE;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::login,
        auth::handlers::logout,
        auth::handlers::get_me,
        // Directory (public)
        directory_handlers::get_directory,
        // Categories (staff)
        categories_handlers::list_categories,
        categories_handlers::create_category,
        categories_handlers::bulk_update_categories,
        categories_handlers::get_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Links (staff)
        links_handlers::list_links,
        links_handlers::create_link,
        links_handlers::bulk_update_links,
        links_handlers::get_link,
        links_handlers::update_link,
        links_handlers::delete_link,
    ),
    components(
        schemas(
            Meta,
            SessionUser,
            // Auth
            auth::dtos::LoginRequestDto,
            auth::dtos::LoginResponseDto,
            auth::dtos::MeResponseDto,
            ApiResponse<auth::dtos::LoginResponseDto>,
            ApiResponse<auth::dtos::MeResponseDto>,
            // Directory
            directory_dtos::DirectoryCategoryDto,
            directory_dtos::DirectoryLinkDto,
            ApiResponse<Vec<directory_dtos::DirectoryCategoryDto>>,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::CategoryListEditDto,
            categories_dtos::BulkUpdateCategoriesDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::DeleteCategoryResponseDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::DeleteCategoryResponseDto>,
            // Links
            links_dtos::CreateLinkDto,
            links_dtos::UpdateLinkDto,
            links_dtos::LinkListEditDto,
            links_dtos::BulkUpdateLinksDto,
            links_dtos::LinkResponseDto,
            ApiResponse<links_dtos::LinkResponseDto>,
            ApiResponse<Vec<links_dtos::LinkResponseDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Login, logout and current session"),
        (name = "directory", description = "Categories and links visible to the requester"),
        (name = "categories", description = "Category administration (staff only)"),
        (name = "links", description = "Link administration (staff only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Linkshelf API",
        version = "0.1.0",
        description = "Administration API for the link directory",
    )
)]
pub struct ApiDoc;

/// Adds the session cookie and Bearer JWT security schemes
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_admin_paths_and_schemes() {
        let openapi = ApiDoc::openapi();
        assert!(openapi.paths.paths.contains_key("/api/admin/links/{id}"));
        assert!(openapi.paths.paths.contains_key("/api/admin/categories/bulk"));
        assert!(openapi.paths.paths.contains_key("/api/directory"));

        let components = openapi.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(components.security_schemes.contains_key("session_cookie"));
    }

    #[test]
    fn test_info_modifier() {
        let mut openapi = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Links".to_string(),
            version: "9.9.9".to_string(),
            description: "desc".to_string(),
        }
        .modify(&mut openapi);
        assert_eq!(openapi.info.title, "Links");
        assert_eq!(openapi.info.version, "9.9.9");
    }
}
