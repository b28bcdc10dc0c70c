use std::cmp::Ordering;

use mercado_core::{RankedStore, SortBy};

/// Fallbacks applied when a record is missing the field being sorted on.
/// Each value makes the incomplete record lose to any complete one under its
/// order: ratings sort descending so 0 lands last, the others sort ascending
/// so a large value lands last.
const FALLBACK_RATING: f64 = 0.0;
const FALLBACK_DELIVERY_TIME_MIN: f64 = 60.0;
const FALLBACK_DELIVERY_FEE: f64 = 999.0;

/// Resolve the sort order for a request.
///
/// An explicit choice always wins. Without one, customers with a known
/// position see nearest-first; everyone else sees best-rated-first. This is
/// the single place the default is decided, so a caller passing
/// `Some(SortBy::Rating)` together with a location keeps rating order.
#[must_use]
pub fn effective_sort(requested: Option<SortBy>, has_location: bool) -> SortBy {
    match requested {
        Some(key) => key,
        None if has_location => SortBy::Distance,
        None => SortBy::Rating,
    }
}

/// Total order over ranked stores for the given key.
///
/// Ties fall through to the store id, so the same catalog produces the same
/// ordering regardless of the order the rows were fetched in.
pub(crate) fn compare(a: &RankedStore, b: &RankedStore, key: SortBy) -> Ordering {
    let by_key = match key {
        SortBy::Distance => compare_distance(a.distance_km, b.distance_km),
        SortBy::Rating => b
            .store
            .rating
            .unwrap_or(FALLBACK_RATING)
            .total_cmp(&a.store.rating.unwrap_or(FALLBACK_RATING)),
        SortBy::DeliveryTime => a
            .store
            .delivery_time_min
            .map_or(FALLBACK_DELIVERY_TIME_MIN, f64::from)
            .total_cmp(
                &b.store
                    .delivery_time_min
                    .map_or(FALLBACK_DELIVERY_TIME_MIN, f64::from),
            ),
        SortBy::DeliveryFee => a
            .store
            .delivery_fee
            .unwrap_or(FALLBACK_DELIVERY_FEE)
            .total_cmp(&b.store.delivery_fee.unwrap_or(FALLBACK_DELIVERY_FEE)),
    };

    by_key.then_with(|| a.store.id.cmp(&b.store.id))
}

/// Ascending by distance; an unknown distance sorts after any known one.
fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
