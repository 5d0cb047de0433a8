use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::Viewer;
use crate::features::categories::models::Category;
use crate::features::directory::dtos::DirectoryCategoryDto;
use crate::features::directory::visibility::{visible_links, DirectoryCategory};
use crate::features::links::models::Link;

/// Attach links to their categories.
///
/// Categories keep their given order, links keep their given order within a
/// category. Links whose category is not in `categories` are dropped.
pub fn group_links(categories: Vec<Category>, links: Vec<Link>) -> Vec<DirectoryCategory> {
    let mut by_category: HashMap<Uuid, Vec<Link>> = HashMap::new();
    for link in links {
        by_category.entry(link.category_id).or_default().push(link);
    }

    categories
        .into_iter()
        .map(|category| DirectoryCategory {
            links: by_category.remove(&category.id).unwrap_or_default(),
            category,
        })
        .collect()
}

/// Read side of the public directory
pub struct DirectoryService {
    pool: PgPool,
}

impl DirectoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Every category with all of its links, in display order
    pub async fn load(&self) -> Result<Vec<DirectoryCategory>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, display_order, color, created_at, updated_at
            FROM link_categories
            ORDER BY display_order, name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load categories: {:?}", e);
            AppError::Database(e)
        })?;

        let links = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, category_id, title, url, description, icon_class,
                   display_order, authenticated_only, created_at, updated_at
            FROM links
            ORDER BY display_order, title
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load links: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(group_links(categories, links))
    }

    /// The directory as `viewer` may see it
    pub async fn view_for(&self, viewer: &Viewer) -> Result<Vec<DirectoryCategoryDto>> {
        let directory = visible_links(self.load().await?, viewer.is_authenticated());

        Ok(directory
            .into_iter()
            .map(DirectoryCategoryDto::from)
            .collect())
    }
}
