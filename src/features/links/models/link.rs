use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for link
#[derive(Debug, Clone, FromRow)]
pub struct Link {
    pub id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub icon_class: String,
    pub display_order: i32,
    pub authenticated_only: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Link row joined with its category, for admin listings
#[derive(Debug, Clone, FromRow)]
pub struct LinkWithCategory {
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
