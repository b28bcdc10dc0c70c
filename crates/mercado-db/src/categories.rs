//! Database operations for the `categories` table.

use mercado_core::CategoryConfig;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `categories` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryRow {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub icon: String,
    pub is_active: bool,
}

/// List categories that are currently enabled, ordered by name.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_active_categories(pool: &PgPool) -> Result<Vec<CategoryRow>, DbError> {
    let rows = sqlx::query_as::<_, CategoryRow>(
        "SELECT id, slug, name, icon, is_active \
         FROM categories \
         WHERE is_active = TRUE \
         ORDER BY name ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Look up an active category by its URL slug.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_category_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<CategoryRow>, DbError> {
    let row = sqlx::query_as::<_, CategoryRow>(
        "SELECT id, slug, name, icon, is_active \
         FROM categories \
         WHERE slug = $1 AND is_active = TRUE",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Sync the static category catalog into the `categories` table.
///
/// Returns `(new_count, updated_count)`. Existing rows are matched by slug
/// and have their display fields refreshed in place; rows removed from the
/// config are left untouched (disabling a category is a moderation action,
/// not a config sync).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any query fails.
pub async fn upsert_categories(
    pool: &PgPool,
    categories: &[CategoryConfig],
) -> Result<(u64, u64), DbError> {
    let mut new_count: u64 = 0;
    let mut updated_count: u64 = 0;

    for category in categories {
        let is_new: bool = sqlx::query_scalar::<_, bool>(
            "INSERT INTO categories (slug, name, icon, description) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (slug) DO UPDATE SET \
                 name        = EXCLUDED.name, \
                 icon        = EXCLUDED.icon, \
                 description = EXCLUDED.description, \
                 updated_at  = NOW() \
             RETURNING (xmax = 0) AS is_new",
        )
        .bind(category.slug())
        .bind(&category.name)
        .bind(&category.icon)
        .bind(&category.description)
        .fetch_one(pool)
        .await?;

        if is_new {
            new_count += 1;
        } else {
            updated_count += 1;
        }
    }

    Ok((new_count, updated_count))
}
