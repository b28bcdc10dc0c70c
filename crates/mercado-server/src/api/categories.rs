use axum::{extract::State, Extension, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{map_db_error, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct CategoryItem {
    id: Uuid,
    slug: String,
    name: String,
    icon: String,
}

pub(super) async fn list_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<CategoryItem>>>, super::ApiError> {
    let rows = mercado_db::list_active_categories(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| CategoryItem {
            id: row.id,
            slug: row.slug,
            name: row.name,
            icon: row.icon,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
