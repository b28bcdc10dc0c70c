use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct GeocodeQuery {
    pub q: String,
}

#[derive(Debug, Serialize)]
pub(super) struct GeocodeItem {
    latitude: f64,
    longitude: f64,
}

/// Resolve a city name, first against the static table, then via the remote
/// geocoder when `MERCADO_GEOCODER_BASE_URL` is configured.
///
/// Unlike store discovery, a miss here is reported as `not_found` so the
/// frontend can tell the customer their city is not covered yet.
pub(super) async fn geocode_city(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<GeocodeQuery>,
) -> Result<Json<ApiResponse<GeocodeItem>>, ApiError> {
    let remote = state.remote_geocoder.as_deref();
    let Some(coordinate) = mercado_geo::resolve_place(&state.cities, remote, &query.q).await
    else {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("no coordinates found for '{}'", query.q.trim()),
        ));
    };

    Ok(Json(ApiResponse {
        data: GeocodeItem {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
