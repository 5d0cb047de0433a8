use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::directory::visibility::DirectoryCategory;
use crate::features::links::models::Link;

/// A link as shown on the public page
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DirectoryLinkDto {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub icon_class: String,
    pub authenticated_only: bool,
}

impl From<Link> for DirectoryLinkDto {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            title: link.title,
            url: link.url,
            description: link.description,
            icon_class: link.icon_class,
            authenticated_only: link.authenticated_only,
        }
    }
}

/// A category and the links visible to the requester
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DirectoryCategoryDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub display_order: i32,
    pub links: Vec<DirectoryLinkDto>,
}

impl From<DirectoryCategory> for DirectoryCategoryDto {
    fn from(entry: DirectoryCategory) -> Self {
        let DirectoryCategory { category, links } = entry;
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            color: category.color,
            display_order: category.display_order,
            links: links.into_iter().map(DirectoryLinkDto::from).collect(),
        }
    }
}
