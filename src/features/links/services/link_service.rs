use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::database::like_pattern;
use crate::core::error::{AppError, Result};
use crate::features::links::dtos::{
    BulkUpdateLinksDto, CreateLinkDto, LinkQueryParams, LinkResponseDto, UpdateLinkDto,
};
use crate::features::links::icon::normalize_icon_class;
use crate::features::links::models::LinkWithCategory;
use crate::shared::constants::MAX_ICON_CLASS_LEN;

const LINK_COLUMNS: &str = r#"
    l.id, l.category_id, c.name AS category_name, l.title, l.url, l.description,
    l.icon_class, l.display_order, l.authenticated_only, l.created_at, l.updated_at
"#;

/// Convert database error to more specific AppError with user-friendly messages
fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // Foreign key violation (PostgreSQL error code 23503)
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23503")) {
            return AppError::BadRequest("Category does not exist.".to_string());
        }
    }

    AppError::Database(e)
}

/// Normalize icon input and enforce the stored length limit
fn prepare_icon_class(raw: Option<&str>) -> Result<String> {
    let icon_class = normalize_icon_class(raw);
    if icon_class.chars().count() > MAX_ICON_CLASS_LEN {
        return Err(AppError::Validation(format!(
            "icon_class must not exceed {} characters",
            MAX_ICON_CLASS_LEN
        )));
    }
    Ok(icon_class)
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, params: &LinkQueryParams) {
    if let Some(category_id) = params.category_id {
        qb.push(" AND l.category_id = ").push_bind(category_id);
    }

    if let Some(authenticated_only) = params.authenticated_only {
        qb.push(" AND l.authenticated_only = ")
            .push_bind(authenticated_only);
    }

    if let Some(search) = params.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = like_pattern(search);
        qb.push(" AND (l.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR l.description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR l.url ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

/// Service for link administration.
///
/// Every write path stores the normalized icon class.
pub struct LinkService {
    pool: PgPool,
}

impl LinkService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List links ordered by (category order, link order, title)
    pub async fn list(&self, params: &LinkQueryParams) -> Result<(Vec<LinkResponseDto>, i64)> {
        let mut count_query = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM links l JOIN link_categories c ON c.id = l.category_id WHERE 1=1",
        );
        push_filters(&mut count_query, params);

        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM links l JOIN link_categories c ON c.id = l.category_id WHERE 1=1",
            LINK_COLUMNS
        ));
        push_filters(&mut query, params);
        query
            .push(" ORDER BY c.display_order, l.display_order, l.title LIMIT ")
            .push_bind(params.limit())
            .push(" OFFSET ")
            .push_bind(params.offset());

        let links: Vec<LinkWithCategory> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list links: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((links.into_iter().map(LinkResponseDto::from).collect(), total))
    }

    /// Get link by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<LinkResponseDto> {
        let query = format!(
            "SELECT {} FROM links l JOIN link_categories c ON c.id = l.category_id WHERE l.id = $1",
            LINK_COLUMNS
        );

        sqlx::query_as::<_, LinkWithCategory>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .map(LinkResponseDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Link with id {} not found", id)))
    }

    /// Create a new link
    pub async fn create(&self, dto: CreateLinkDto) -> Result<LinkResponseDto> {
        let icon_class = prepare_icon_class(dto.icon_class.as_deref())?;

        let query = format!(
            r#"
            WITH l AS (
                INSERT INTO links (category_id, title, url, description, icon_class, display_order, authenticated_only)
                VALUES ($1, $2, $3, NULLIF($4, ''), $5, $6, $7)
                RETURNING *
            )
            SELECT {} FROM l JOIN link_categories c ON c.id = l.category_id
            "#,
            LINK_COLUMNS
        );

        let link = sqlx::query_as::<_, LinkWithCategory>(&query)
            .bind(dto.category_id)
            .bind(dto.title.trim())
            .bind(dto.url.trim())
            .bind(dto.description.as_deref().map(str::trim))
            .bind(icon_class)
            .bind(dto.display_order.unwrap_or(0))
            .bind(dto.authenticated_only.unwrap_or(false))
            .fetch_one(&self.pool)
            .await
            .map_err(handle_db_error)?;

        tracing::info!(
            "Link created: id={}, category_id={}, icon_class={}",
            link.id,
            link.category_id,
            link.icon_class
        );

        Ok(link.into())
    }

    /// Update a link; absent fields keep their value
    pub async fn update(&self, id: Uuid, dto: UpdateLinkDto) -> Result<LinkResponseDto> {
        let link = Self::update_with(&self.pool, id, dto)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Link with id {} not found", id)))?;

        tracing::info!("Link updated: id={}", link.id);

        Ok(link.into())
    }

    /// Apply several list edits in one transaction; any missing link aborts all of them
    pub async fn bulk_update(&self, dto: BulkUpdateLinksDto) -> Result<Vec<LinkResponseDto>> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let mut updated = Vec::with_capacity(dto.items.len());

        for item in dto.items {
            let id = item.id;
            let link = Self::update_with(&mut *tx, id, item.into())
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Link with id {} not found", id)))?;
            updated.push(LinkResponseDto::from(link));
        }

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!("Bulk link update applied: count={}", updated.len());

        Ok(updated)
    }

    /// Delete a link
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Link with id {} not found", id)));
        }

        tracing::info!("Link deleted: id={}", id);

        Ok(())
    }

    async fn update_with<'e, E>(
        executor: E,
        id: Uuid,
        dto: UpdateLinkDto,
    ) -> Result<Option<LinkWithCategory>>
    where
        E: PgExecutor<'e>,
    {
        let icon_class = dto
            .icon_class
            .as_deref()
            .map(|raw| prepare_icon_class(Some(raw)))
            .transpose()?;

        let query = format!(
            r#"
            WITH l AS (
                UPDATE links
                SET title = COALESCE($1, title),
                    url = COALESCE($2, url),
                    description = CASE WHEN $3::TEXT IS NULL THEN description ELSE NULLIF($3, '') END,
                    category_id = COALESCE($4, category_id),
                    icon_class = COALESCE($5, icon_class),
                    display_order = COALESCE($6, display_order),
                    authenticated_only = COALESCE($7, authenticated_only),
                    updated_at = NOW()
                WHERE id = $8
                RETURNING *
            )
            SELECT {} FROM l JOIN link_categories c ON c.id = l.category_id
            "#,
            LINK_COLUMNS
        );

        sqlx::query_as::<_, LinkWithCategory>(&query)
            .bind(dto.title.as_deref().map(str::trim))
            .bind(dto.url.as_deref().map(str::trim))
            .bind(dto.description.as_deref().map(str::trim))
            .bind(dto.category_id)
            .bind(icon_class)
            .bind(dto.display_order)
            .bind(dto.authenticated_only)
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(handle_db_error)
    }
}
