//! Read queries over the `products` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A product row joined with the store name for listing views.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: Uuid,
    pub store_id: Uuid,
    pub store_name: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

/// List available products of one store.
///
/// The join re-checks the store is approved and active, so a direct request
/// for a delisted store's menu comes back empty rather than leaking it.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_products(pool: &PgPool, store_id: Uuid) -> Result<Vec<ProductRow>, DbError> {
    let rows = sqlx::query_as::<_, ProductRow>(
        "SELECT p.id, p.store_id, s.name AS store_name, p.name, p.description, \
                p.price, p.image_url, p.is_available, p.created_at \
         FROM products p \
         JOIN stores s ON s.id = p.store_id \
         WHERE p.store_id = $1 \
           AND p.is_available = TRUE \
           AND s.status = 'approved' \
           AND s.is_active = TRUE \
         ORDER BY p.name ASC",
    )
    .bind(store_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Search available products by name, case-insensitively, across eligible
/// stores. `store_id` narrows the search to one store's menu.
///
/// `%` and `_` in the query are escaped so customer input cannot widen the
/// pattern.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn search_products(
    pool: &PgPool,
    query: &str,
    store_id: Option<Uuid>,
    limit: i64,
) -> Result<Vec<ProductRow>, DbError> {
    let pattern = format!("%{}%", escape_like(query));

    let rows = if let Some(store) = store_id {
        sqlx::query_as::<_, ProductRow>(
            "SELECT p.id, p.store_id, s.name AS store_name, p.name, p.description, \
                    p.price, p.image_url, p.is_available, p.created_at \
             FROM products p \
             JOIN stores s ON s.id = p.store_id \
             WHERE p.is_available = TRUE \
               AND s.status = 'approved' \
               AND s.is_active = TRUE \
               AND p.name ILIKE $1 \
               AND p.store_id = $2 \
             ORDER BY p.name ASC \
             LIMIT $3",
        )
        .bind(&pattern)
        .bind(store)
        .bind(limit)
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as::<_, ProductRow>(
            "SELECT p.id, p.store_id, s.name AS store_name, p.name, p.description, \
                    p.price, p.image_url, p.is_available, p.created_at \
             FROM products p \
             JOIN stores s ON s.id = p.store_id \
             WHERE p.is_available = TRUE \
               AND s.status = 'approved' \
               AND s.is_active = TRUE \
               AND p.name ILIKE $1 \
             ORDER BY p.name ASC \
             LIMIT $2",
        )
        .bind(&pattern)
        .bind(limit)
        .fetch_all(pool)
        .await?
    };

    Ok(rows)
}

fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
