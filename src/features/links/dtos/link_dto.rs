use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::links::models::LinkWithCategory;
use crate::shared::types::{default_page, default_page_size, page_limit, page_offset};
use crate::shared::validation::{validate_not_blank, validate_url_scheme};

/// Query params for the admin link list
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct LinkQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
    /// Filter by category
    pub category_id: Option<Uuid>,
    /// Filter by visibility restriction
    pub authenticated_only: Option<bool>,
    /// Search in title, description or URL
    pub search: Option<String>,
}

impl LinkQueryParams {
    pub fn offset(&self) -> i64 {
        page_offset(self.page, self.page_size)
    }
    pub fn limit(&self) -> i64 {
        page_limit(self.page_size)
    }
}

/// Request DTO for creating a link
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLinkDto {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    #[validate(
        url(message = "Invalid URL"),
        custom(function = "validate_url_scheme"),
        length(max = 2048)
    )]
    pub url: String,

    pub description: Option<String>,

    pub category_id: Uuid,

    /// Font Awesome classes or an `<i class="..."></i>` snippet.
    /// The stored length limit applies after normalization.
    #[validate(length(max = 1000))]
    pub icon_class: Option<String>,

    pub display_order: Option<i32>,

    /// Only show this link to authenticated users
    pub authenticated_only: Option<bool>,
}

/// Request DTO for updating a link; absent fields keep their value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateLinkDto {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: Option<String>,

    #[validate(
        url(message = "Invalid URL"),
        custom(function = "validate_url_scheme"),
        length(max = 2048)
    )]
    pub url: Option<String>,

    /// An empty string clears the description
    pub description: Option<String>,

    pub category_id: Option<Uuid>,

    #[validate(length(max = 1000))]
    pub icon_class: Option<String>,

    pub display_order: Option<i32>,

    pub authenticated_only: Option<bool>,
}

/// One row of a list-page edit
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LinkListEditDto {
    pub id: Uuid,
    pub display_order: Option<i32>,
    pub category_id: Option<Uuid>,
    pub authenticated_only: Option<bool>,
    #[validate(length(max = 1000))]
    pub icon_class: Option<String>,
}

impl From<LinkListEditDto> for UpdateLinkDto {
    fn from(edit: LinkListEditDto) -> Self {
        Self {
            display_order: edit.display_order,
            category_id: edit.category_id,
            authenticated_only: edit.authenticated_only,
            icon_class: edit.icon_class,
            ..Default::default()
        }
    }
}

/// Request DTO for editing several links at once
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BulkUpdateLinksDto {
    #[validate(length(min = 1, max = 500), nested)]
    pub items: Vec<LinkListEditDto>,
}

/// Response DTO for link
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LinkResponseDto {
    pub id: Uuid,
    pub category_id: Uuid,
    pub category_name: String,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub icon_class: String,
    pub display_order: i32,
    pub authenticated_only: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LinkWithCategory> for LinkResponseDto {
    fn from(l: LinkWithCategory) -> Self {
        Self {
            id: l.id,
            category_id: l.category_id,
            category_name: l.category_name,
            title: l.title,
            url: l.url,
            description: l.description,
            icon_class: l.icon_class,
            display_order: l.display_order,
            authenticated_only: l.authenticated_only,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto() -> CreateLinkDto {
        CreateLinkDto {
            title: "Docs".to_string(),
            url: "https://docs.example.com".to_string(),
            description: None,
            category_id: Uuid::new_v4(),
            icon_class: Some(r#"<i class="fas fa-book"></i>"#.to_string()),
            display_order: None,
            authenticated_only: None,
        }
    }

    #[test]
    fn test_valid_create_dto() {
        assert!(create_dto().validate().is_ok());
    }

    #[test]
    fn test_create_dto_rejects_bad_urls() {
        let mut dto = create_dto();
        dto.url = "not a url".to_string();
        assert!(dto.validate().is_err());

        dto.url = "javascript:alert(1)".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_dto_rejects_empty_title() {
        let mut dto = create_dto();
        dto.title = String::new();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_whitespace_only_title_is_rejected() {
        let mut dto = create_dto();
        dto.title = "   ".to_string();
        assert!(dto.validate().is_err());

        let update = UpdateLinkDto {
            title: Some(" \t ".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_update_dto_validates_only_present_fields() {
        assert!(UpdateLinkDto::default().validate().is_ok());

        let dto = UpdateLinkDto {
            url: Some("ftp://files.example.com".to_string()),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());

        let dto = UpdateLinkDto {
            url: Some("data:text/html,hi".to_string()),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_bulk_update_requires_items() {
        let dto = BulkUpdateLinksDto { items: vec![] };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_list_edit_converts_to_partial_update() {
        let id = Uuid::new_v4();
        let update: UpdateLinkDto = LinkListEditDto {
            id,
            display_order: Some(3),
            category_id: None,
            authenticated_only: Some(true),
            icon_class: None,
        }
        .into();

        assert_eq!(update.display_order, Some(3));
        assert_eq!(update.authenticated_only, Some(true));
        assert!(update.title.is_none());
        assert!(update.url.is_none());
    }
}
