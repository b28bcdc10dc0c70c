use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fallback service radius applied when a store never declared one.
///
/// Matches the marketplace onboarding default, so a store that skipped the
/// delivery-area step still serves nearby customers instead of nobody.
pub const DEFAULT_DELIVERY_RADIUS_KM: f64 = 5.0;

/// A geographic point in decimal degrees.
///
/// Used both for the customer's position and for store locations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A read-only snapshot of a store eligible for discovery.
///
/// Records reach the engine already filtered to `status = approved` and
/// `is_active = true` by the catalog query; the engine does not re-check
/// either flag. Numeric fields are optional because the catalog schema allows
/// NULL for stores that never completed onboarding; the discovery pipeline
/// documents how each absence is treated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreRecord {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Categories the store is listed under.
    pub category_ids: Vec<Uuid>,
    /// Average customer rating in `[0, 5]`, when the store has been rated.
    pub rating: Option<f64>,
    /// Flat delivery fee in the marketplace currency; `Some(0.0)` means free.
    pub delivery_fee: Option<f64>,
    /// Minimum order amount, if the store enforces one.
    pub min_order: Option<f64>,
    /// Estimated delivery window in minutes, `min <= max` when both present.
    pub delivery_time_min: Option<u32>,
    pub delivery_time_max: Option<u32>,
    /// Self-declared service radius. Absent falls back to
    /// [`DEFAULT_DELIVERY_RADIUS_KM`] at the geofence.
    pub delivery_radius_km: Option<f64>,
    /// Geocoded storefront position; absent for stores that were never geocoded.
    pub location: Option<Coordinate>,
}

impl StoreRecord {
    /// Returns `true` if the store has a geocoded position.
    #[must_use]
    pub fn has_location(&self) -> bool {
        self.location.is_some()
    }

    /// The radius used by the geofence: declared radius or the onboarding default.
    #[must_use]
    pub fn effective_delivery_radius_km(&self) -> f64 {
        self.delivery_radius_km
            .unwrap_or(DEFAULT_DELIVERY_RADIUS_KM)
    }
}

/// A [`StoreRecord`] annotated with its computed distance from the customer.
///
/// `distance_km` is `None` when no customer location was supplied or the
/// store itself has no coordinate; an absent distance always sorts after any
/// present one.
#[derive(Debug, Clone, Serialize)]
pub struct RankedStore {
    #[serde(flatten)]
    pub store: StoreRecord,
    pub distance_km: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_store() -> StoreRecord {
        StoreRecord {
            id: Uuid::new_v4(),
            name: "Cantina da Praça".to_string(),
            description: "Comida caseira".to_string(),
            category_ids: vec![],
            rating: None,
            delivery_fee: None,
            min_order: None,
            delivery_time_min: None,
            delivery_time_max: None,
            delivery_radius_km: None,
            location: None,
        }
    }

    #[test]
    fn effective_radius_defaults_when_undeclared() {
        let store = bare_store();
        assert!((store.effective_delivery_radius_km() - DEFAULT_DELIVERY_RADIUS_KM).abs() < f64::EPSILON);
    }

    #[test]
    fn effective_radius_uses_declared_value() {
        let mut store = bare_store();
        store.delivery_radius_km = Some(12.0);
        assert!((store.effective_delivery_radius_km() - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ranked_store_serializes_flat() {
        let ranked = RankedStore {
            store: bare_store(),
            distance_km: Some(2.5),
        };
        let value = serde_json::to_value(&ranked).expect("serialize");
        assert_eq!(value["name"], "Cantina da Praça");
        assert!((value["distance_km"].as_f64().unwrap() - 2.5).abs() < f64::EPSILON);
    }
}
