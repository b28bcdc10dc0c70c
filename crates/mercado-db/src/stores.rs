//! Read queries over the `stores` table for discovery.

use mercado_core::{Coordinate, StoreRecord};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A store row as fetched for discovery, NUMERIC columns still in `Decimal`.
///
/// Conversion to the engine's [`StoreRecord`] happens in [`Self::into_record`]
/// so the lossy Decimal-to-f64 step is confined to one boundary.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EligibleStoreRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category_ids: Vec<Uuid>,
    pub rating: Option<Decimal>,
    pub delivery_fee: Option<Decimal>,
    pub min_order: Option<Decimal>,
    pub delivery_time_min: Option<i32>,
    pub delivery_time_max: Option<i32>,
    pub delivery_radius_km: Option<Decimal>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
}

impl EligibleStoreRow {
    /// Convert the row into the engine's snapshot type.
    ///
    /// A store only gets a location when both coordinate columns are set;
    /// a half-geocoded row is treated as not geocoded at all.
    #[must_use]
    pub fn into_record(self) -> StoreRecord {
        let location = match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => match (lat.to_f64(), lon.to_f64()) {
                (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
                _ => None,
            },
            _ => None,
        };

        StoreRecord {
            id: self.id,
            name: self.name,
            description: self.description,
            category_ids: self.category_ids,
            rating: self.rating.and_then(|d| d.to_f64()),
            delivery_fee: self.delivery_fee.and_then(|d| d.to_f64()),
            min_order: self.min_order.and_then(|d| d.to_f64()),
            delivery_time_min: self.delivery_time_min.and_then(|t| u32::try_from(t).ok()),
            delivery_time_max: self.delivery_time_max.and_then(|t| u32::try_from(t).ok()),
            delivery_radius_km: self.delivery_radius_km.and_then(|d| d.to_f64()),
            location,
        }
    }
}

/// List stores eligible for discovery, optionally restricted to a category.
///
/// Pre-filters to `status = 'approved' AND is_active = TRUE`; the engine does
/// not re-check either flag. When `category_id` is set the predicate is pushed
/// into the query, which is cheaper than filtering the full catalog in memory
/// (the engine re-applies it anyway and behaves identically without it).
///
/// Results are ordered by `name ASC` purely for a deterministic baseline; the
/// engine re-sorts.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_eligible_stores(
    pool: &PgPool,
    category_id: Option<Uuid>,
) -> Result<Vec<EligibleStoreRow>, DbError> {
    let rows = if let Some(category) = category_id {
        sqlx::query_as::<_, EligibleStoreRow>(
            "SELECT s.id, s.name, s.description, \
                    COALESCE(ARRAY_AGG(sc.category_id) \
                             FILTER (WHERE sc.category_id IS NOT NULL), '{}') AS category_ids, \
                    s.rating, s.delivery_fee, s.min_order, \
                    s.delivery_time_min, s.delivery_time_max, \
                    s.delivery_radius_km, s.latitude, s.longitude \
             FROM stores s \
             LEFT JOIN store_categories sc ON sc.store_id = s.id \
             WHERE s.status = 'approved' \
               AND s.is_active = TRUE \
               AND EXISTS (SELECT 1 FROM store_categories f \
                           WHERE f.store_id = s.id AND f.category_id = $1) \
             GROUP BY s.id \
             ORDER BY s.name ASC",
        )
        .bind(category)
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as::<_, EligibleStoreRow>(
            "SELECT s.id, s.name, s.description, \
                    COALESCE(ARRAY_AGG(sc.category_id) \
                             FILTER (WHERE sc.category_id IS NOT NULL), '{}') AS category_ids, \
                    s.rating, s.delivery_fee, s.min_order, \
                    s.delivery_time_min, s.delivery_time_max, \
                    s.delivery_radius_km, s.latitude, s.longitude \
             FROM stores s \
             LEFT JOIN store_categories sc ON sc.store_id = s.id \
             WHERE s.status = 'approved' \
               AND s.is_active = TRUE \
             GROUP BY s.id \
             ORDER BY s.name ASC",
        )
        .fetch_all(pool)
        .await?
    };

    Ok(rows)
}
