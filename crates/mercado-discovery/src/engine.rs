use mercado_core::{Coordinate, FilterSpec, RankedStore, StoreRecord};

use crate::distance::haversine_km;
use crate::sort;

/// Filter, rank, and order a catalog snapshot against one request.
///
/// Stages run in a fixed order: category, rating, delivery time, free
/// delivery, text search, then distance plus geofence (only when the customer
/// position is known), then sort. The category predicate is normally pushed
/// into the catalog query; it is re-applied here so the engine behaves the
/// same when handed an unfiltered snapshot.
#[must_use]
pub fn discover(catalog: Vec<StoreRecord>, spec: &FilterSpec) -> Vec<RankedStore> {
    let mut ranked: Vec<RankedStore> = catalog
        .into_iter()
        .filter(|store| passes_category(store, spec))
        .filter(|store| passes_rating(store, spec))
        .filter(|store| passes_delivery_time(store, spec))
        .filter(|store| passes_free_delivery(store, spec))
        .filter(|store| passes_search(store, spec))
        .map(|store| rank(store, spec.user_location))
        .collect();

    if spec.has_location() {
        ranked.retain(|candidate| within_geofence(candidate, spec.max_distance_km));
    }

    let key = sort::effective_sort(spec.sort_by, spec.has_location());
    ranked.sort_by(|a, b| sort::compare(a, b, key));
    ranked
}

fn passes_category(store: &StoreRecord, spec: &FilterSpec) -> bool {
    spec.category_id
        .is_none_or(|category| store.category_ids.contains(&category))
}

/// Applied only when the caller raised the rating floor above 0; a store that
/// was never rated fails any raised floor.
fn passes_rating(store: &StoreRecord, spec: &FilterSpec) -> bool {
    if spec.min_rating <= 0.0 {
        return true;
    }
    store.rating.is_some_and(|r| r >= spec.min_rating)
}

fn passes_delivery_time(store: &StoreRecord, spec: &FilterSpec) -> bool {
    spec.max_delivery_time_minutes
        .is_none_or(|bound| store.delivery_time_max.is_some_and(|t| t <= bound))
}

fn passes_free_delivery(store: &StoreRecord, spec: &FilterSpec) -> bool {
    if !spec.free_delivery_only {
        return true;
    }
    store.delivery_fee.is_some_and(|fee| fee.abs() < f64::EPSILON)
}

fn passes_search(store: &StoreRecord, spec: &FilterSpec) -> bool {
    let Some(term) = spec.search_term() else {
        return true;
    };
    let needle = term.to_lowercase();
    store.name.to_lowercase().contains(&needle)
        || store.description.to_lowercase().contains(&needle)
}

fn rank(store: StoreRecord, user_location: Option<Coordinate>) -> RankedStore {
    let distance_km = match (user_location, store.location) {
        (Some(user), Some(store_location)) => Some(haversine_km(user, store_location)),
        _ => None,
    };
    RankedStore { store, distance_km }
}

/// The store's own declared radius is the primary gate; the customer's
/// max-distance preference tightens it further. A store with no computed
/// distance (no coordinate on record) is unreachable once a position is known.
fn within_geofence(candidate: &RankedStore, max_distance_km: Option<f64>) -> bool {
    let Some(distance) = candidate.distance_km else {
        return false;
    };
    distance <= candidate.store.effective_delivery_radius_km()
        && max_distance_km.is_none_or(|bound| distance <= bound)
}
