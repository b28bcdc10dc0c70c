use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct ProductItem {
    id: Uuid,
    store_id: Uuid,
    store_name: String,
    name: String,
    description: Option<String>,
    /// Decimal price rendered as a string, e.g. `"12.99"`.
    price: String,
    image_url: Option<String>,
    is_available: bool,
    created_at: DateTime<Utc>,
}

impl From<mercado_db::ProductRow> for ProductItem {
    fn from(row: mercado_db::ProductRow) -> Self {
        Self {
            id: row.id,
            store_id: row.store_id,
            store_name: row.store_name,
            name: row.name,
            description: row.description,
            price: row.price.to_string(),
            image_url: row.image_url,
            is_available: row.is_available,
            created_at: row.created_at,
        }
    }
}

pub(super) async fn list_store_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(store_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ProductItem>>>, ApiError> {
    let rows = mercado_db::list_products(&state.pool, store_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(ProductItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, Deserialize)]
pub(super) struct ProductSearchQuery {
    pub q: String,
    pub store_id: Option<Uuid>,
    pub limit: Option<i64>,
}

pub(super) async fn search_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ProductSearchQuery>,
) -> Result<Json<ApiResponse<Vec<ProductItem>>>, ApiError> {
    if query.q.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "search query must be non-empty",
        ));
    }

    let rows = mercado_db::search_products(
        &state.pool,
        query.q.trim(),
        query.store_id,
        normalize_limit(query.limit),
    )
    .await
    .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(ProductItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}
