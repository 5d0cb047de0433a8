use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::Category;
use crate::shared::types::{default_page, default_page_size, page_limit, page_offset};
use crate::shared::validation::{validate_not_blank, HEX_COLOR_REGEX};

/// Query params for the admin category list
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct CategoryQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
    /// Search in name
    pub search: Option<String>,
}

impl CategoryQueryParams {
    pub fn offset(&self) -> i64 {
        page_offset(self.page, self.page_size)
    }
    pub fn limit(&self) -> i64 {
        page_limit(self.page_size)
    }
}

/// Request DTO for creating a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    pub description: Option<String>,

    pub display_order: Option<i32>,

    /// `#RRGGBB` or `#RRGGBBAA`; defaults to opaque white
    #[validate(regex(path = *HEX_COLOR_REGEX, message = "Color must be #RRGGBB or #RRGGBBAA"))]
    pub color: Option<String>,
}

/// Request DTO for updating a category; absent fields keep their value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,

    /// An empty string clears the description
    pub description: Option<String>,

    pub display_order: Option<i32>,

    #[validate(regex(path = *HEX_COLOR_REGEX, message = "Color must be #RRGGBB or #RRGGBBAA"))]
    pub color: Option<String>,
}

/// One row of a list-page edit
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryListEditDto {
    pub id: Uuid,
    pub display_order: Option<i32>,
    #[validate(regex(path = *HEX_COLOR_REGEX, message = "Color must be #RRGGBB or #RRGGBBAA"))]
    pub color: Option<String>,
}

impl From<CategoryListEditDto> for UpdateCategoryDto {
    fn from(edit: CategoryListEditDto) -> Self {
        Self {
            display_order: edit.display_order,
            color: edit.color,
            ..Default::default()
        }
    }
}

/// Request DTO for editing several categories at once
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BulkUpdateCategoriesDto {
    #[validate(length(min = 1, max = 500), nested)]
    pub items: Vec<CategoryListEditDto>,
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            display_order: c.display_order,
            color: c.color,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Result of deleting a category together with its links
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeleteCategoryResponseDto {
    pub id: Uuid,
    pub deleted_links: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_category_color_validation() {
        let mut dto = CreateCategoryDto {
            name: "Tools".to_string(),
            description: None,
            display_order: Some(1),
            color: Some("#1E90FF".to_string()),
        };
        assert!(dto.validate().is_ok());

        dto.color = None;
        assert!(dto.validate().is_ok());

        dto.color = Some("blue".to_string());
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_category_name_length() {
        let dto = CreateCategoryDto {
            name: "x".repeat(101),
            description: None,
            display_order: None,
            color: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_whitespace_only_name_is_rejected() {
        let dto = CreateCategoryDto {
            name: "    ".to_string(),
            description: None,
            display_order: None,
            color: None,
        };
        assert!(dto.validate().is_err());

        let update = UpdateCategoryDto {
            name: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_bulk_update_validates_each_item() {
        let dto = BulkUpdateCategoriesDto {
            items: vec![
                CategoryListEditDto {
                    id: Uuid::new_v4(),
                    display_order: Some(2),
                    color: Some("#000000FF".to_string()),
                },
                CategoryListEditDto {
                    id: Uuid::new_v4(),
                    display_order: None,
                    color: Some("#12".to_string()),
                },
            ],
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_list_edit_only_touches_order_and_color() {
        let update: UpdateCategoryDto = CategoryListEditDto {
            id: Uuid::nil(),
            display_order: Some(4),
            color: None,
        }
        .into();
        assert_eq!(update.display_order, Some(4));
        assert!(update.name.is_none());
        assert!(update.description.is_none());
    }
}
