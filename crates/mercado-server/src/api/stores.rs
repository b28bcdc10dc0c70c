use axum::{
    extract::{Query, State},
    Extension, Json,
};
use mercado_core::{Coordinate, FilterSpec, RankedStore, SortBy};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// Query-string mirror of the engine's `FilterSpec`.
///
/// The customer position comes either as explicit `lat`/`lon` (device
/// geolocation, forwarded by the frontend) or as a `city` name resolved
/// through the static table. When a named city is unknown the request falls
/// back to the table's default position rather than failing the whole page.
#[derive(Debug, Deserialize)]
pub(super) struct DiscoverQuery {
    pub q: Option<String>,
    /// Category slug as shown in the URL, resolved to its id server-side.
    pub category: Option<String>,
    pub min_rating: Option<f64>,
    pub max_delivery_time: Option<u32>,
    pub free_delivery: Option<bool>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub city: Option<String>,
    pub max_distance_km: Option<f64>,
    pub sort_by: Option<String>,
}

pub(super) async fn discover_stores(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<DiscoverQuery>,
) -> Result<Json<ApiResponse<Vec<RankedStore>>>, ApiError> {
    let sort_by = match query.sort_by.as_deref() {
        None => None,
        Some(raw) => Some(
            raw.parse::<SortBy>()
                .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e))?,
        ),
    };

    let category_id = match query.category.as_deref() {
        None => None,
        Some(slug) => {
            let Some(category) = mercado_db::find_category_by_slug(&state.pool, slug)
                .await
                .map_err(|e| map_db_error(req_id.0.clone(), &e))?
            else {
                // Unknown category matches nothing; answer with an empty page
                // instead of a hard error so stale links degrade gracefully.
                return Ok(Json(ApiResponse {
                    data: vec![],
                    meta: ResponseMeta::new(req_id.0),
                }));
            };
            Some(category.id)
        }
    };

    let user_location = resolve_location(&state, &query);

    let spec = FilterSpec {
        search_query: query.q,
        category_id,
        min_rating: query.min_rating.unwrap_or(0.0),
        max_delivery_time_minutes: query.max_delivery_time,
        free_delivery_only: query.free_delivery.unwrap_or(false),
        user_location,
        max_distance_km: query.max_distance_km,
        sort_by,
    };

    let rows = mercado_db::list_eligible_stores(&state.pool, spec.category_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    let catalog = rows.into_iter().map(mercado_db::EligibleStoreRow::into_record).collect();

    let data = mercado_discovery::discover(catalog, &spec);

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn resolve_location(state: &AppState, query: &DiscoverQuery) -> Option<Coordinate> {
    if let (Some(lat), Some(lon)) = (query.lat, query.lon) {
        return Some(Coordinate::new(lat, lon));
    }
    query.city.as_deref().map(|city| {
        state
            .cities
            .lookup(city)
            .unwrap_or_else(|| state.cities.fallback())
    })
}
