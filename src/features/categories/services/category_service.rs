use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::database::like_pattern;
use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    BulkUpdateCategoriesDto, CategoryQueryParams, CategoryResponseDto, CreateCategoryDto,
    DeleteCategoryResponseDto, UpdateCategoryDto,
};
use crate::features::categories::models::Category;
use crate::shared::constants::DEFAULT_CATEGORY_COLOR;

const CATEGORY_COLUMNS: &str =
    "id, name, description, display_order, color, created_at, updated_at";

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, params: &CategoryQueryParams) {
    if let Some(search) = params.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        qb.push(" AND name ILIKE ").push_bind(like_pattern(search));
    }
}

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List categories ordered by (display_order, name)
    pub async fn list(
        &self,
        params: &CategoryQueryParams,
    ) -> Result<(Vec<CategoryResponseDto>, i64)> {
        let mut count_query =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM link_categories WHERE 1=1");
        push_filters(&mut count_query, params);

        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM link_categories WHERE 1=1",
            CATEGORY_COLUMNS
        ));
        push_filters(&mut query, params);
        query
            .push(" ORDER BY display_order, name LIMIT ")
            .push_bind(params.limit())
            .push(" OFFSET ")
            .push_bind(params.offset());

        let categories: Vec<Category> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list categories: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((categories.into_iter().map(|c| c.into()).collect(), total))
    }

    /// Get category by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<CategoryResponseDto> {
        let query = format!(
            "SELECT {} FROM link_categories WHERE id = $1",
            CATEGORY_COLUMNS
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get category by id: {:?}", e);
                AppError::Database(e)
            })?
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))
    }

    /// Create a new category
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let query = format!(
            r#"
            INSERT INTO link_categories (name, description, display_order, color)
            VALUES ($1, NULLIF($2, ''), $3, $4)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        let category = sqlx::query_as::<_, Category>(&query)
            .bind(dto.name.trim())
            .bind(dto.description.as_deref().map(str::trim))
            .bind(dto.display_order.unwrap_or(0))
            .bind(dto.color.as_deref().unwrap_or(DEFAULT_CATEGORY_COLOR))
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        tracing::info!("Category created: id={}, name={}", category.id, category.name);

        Ok(category.into())
    }

    /// Update a category; absent fields keep their value
    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        let category = Self::update_with(&self.pool, id, dto)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))?;

        tracing::info!("Category updated: id={}", category.id);

        Ok(category.into())
    }

    /// Apply several list edits in one transaction; any missing category aborts all of them
    pub async fn bulk_update(
        &self,
        dto: BulkUpdateCategoriesDto,
    ) -> Result<Vec<CategoryResponseDto>> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let mut updated = Vec::with_capacity(dto.items.len());

        for item in dto.items {
            let id = item.id;
            let category = Self::update_with(&mut *tx, id, item.into())
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))?;
            updated.push(CategoryResponseDto::from(category));
        }

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!("Bulk category update applied: count={}", updated.len());

        Ok(updated)
    }

    /// Delete a category and every link in it
    pub async fn delete(&self, id: Uuid) -> Result<DeleteCategoryResponseDto> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let deleted_links = sqlx::query("DELETE FROM links WHERE category_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .rows_affected() as i64;

        let result = sqlx::query("DELETE FROM link_categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            // dropping the transaction rolls back the link deletion
            return Err(AppError::NotFound(format!(
                "Category with id {} not found",
                id
            )));
        }

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "Category deleted: id={}, deleted_links={}",
            id,
            deleted_links
        );

        Ok(DeleteCategoryResponseDto { id, deleted_links })
    }

    async fn update_with<'e, E>(
        executor: E,
        id: Uuid,
        dto: UpdateCategoryDto,
    ) -> Result<Option<Category>>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            r#"
            UPDATE link_categories
            SET name = COALESCE($1, name),
                description = CASE WHEN $2::TEXT IS NULL THEN description ELSE NULLIF($2, '') END,
                display_order = COALESCE($3, display_order),
                color = COALESCE($4, color),
                updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(dto.name.as_deref().map(str::trim))
            .bind(dto.description.as_deref().map(str::trim))
            .bind(dto.display_order)
            .bind(dto.color)
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(AppError::Database)
    }
}
