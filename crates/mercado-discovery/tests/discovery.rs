//! End-to-end scenarios for the discovery pipeline: filter composition,
//! geofencing, default sort selection, and ordering determinism.

use mercado_core::{Coordinate, FilterSpec, RankedStore, SortBy, StoreRecord};
use mercado_discovery::discover;
use uuid::Uuid;

const CUSTOMER: Coordinate = Coordinate {
    latitude: -23.5505,
    longitude: -46.6333,
};

/// A coordinate roughly `km` kilometers north of the customer.
fn km_north(km: f64) -> Coordinate {
    // One degree of latitude is ~111.2 km everywhere on the sphere.
    Coordinate::new(CUSTOMER.latitude + km / 111.2, CUSTOMER.longitude)
}

fn store(name: &str) -> StoreRecord {
    StoreRecord {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: String::new(),
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

fn names(results: &[RankedStore]) -> Vec<&str> {
    results.iter().map(|r| r.store.name.as_str()).collect()
}

/// The two-store catalog from the marketplace's canonical example: StoreA is
/// rated 4.5 with free delivery 2 km away, StoreB is rated 3.0 with a paid
/// fee 8 km away.
fn canonical_catalog() -> Vec<StoreRecord> {
    let mut a = store("StoreA");
    a.rating = Some(4.5);
    a.delivery_fee = Some(0.0);
    a.delivery_radius_km = Some(5.0);
    a.location = Some(km_north(2.0));

    let mut b = store("StoreB");
    b.rating = Some(3.0);
    b.delivery_fee = Some(5.0);
    b.delivery_radius_km = Some(10.0);
    b.location = Some(km_north(8.0));

    vec![a, b]
}

#[test]
fn free_delivery_with_location_keeps_only_store_a() {
    let spec = FilterSpec {
        free_delivery_only: true,
        user_location: Some(CUSTOMER),
        ..FilterSpec::default()
    };
    let results = discover(canonical_catalog(), &spec);
    assert_eq!(names(&results), ["StoreA"]);
    let distance = results[0].distance_km.expect("distance computed");
    assert!((1.5..=2.5).contains(&distance), "got {distance} km");
}

#[test]
fn rating_sort_without_location_keeps_both_stores() {
    let spec = FilterSpec {
        sort_by: Some(SortBy::Rating),
        ..FilterSpec::default()
    };
    let results = discover(canonical_catalog(), &spec);
    assert_eq!(names(&results), ["StoreA", "StoreB"]);
    assert!(results.iter().all(|r| r.distance_km.is_none()));
}

#[test]
fn filters_compose_as_intersection() {
    let mut catalog = canonical_catalog();
    let mut c = store("StoreC");
    c.rating = Some(4.8);
    c.delivery_fee = Some(3.0);
    catalog.push(c);

    let spec = FilterSpec {
        min_rating: 3.0,
        free_delivery_only: true,
        ..FilterSpec::default()
    };
    let results = discover(catalog, &spec);
    for r in &results {
        assert!(r.store.rating.expect("rated") >= 3.0);
        assert!(r.store.delivery_fee.expect("fee").abs() < f64::EPSILON);
    }
    assert_eq!(names(&results), ["StoreA"]);
}

#[test]
fn category_filter_applies_even_on_unfiltered_catalog() {
    let pizza = Uuid::new_v4();
    let mut catalog = canonical_catalog();
    catalog[0].category_ids = vec![pizza];

    let spec = FilterSpec {
        category_id: Some(pizza),
        ..FilterSpec::default()
    };
    let results = discover(catalog, &spec);
    assert_eq!(names(&results), ["StoreA"]);
}

#[test]
fn geofence_excludes_store_outside_its_own_radius() {
    let mut catalog = canonical_catalog();
    // StoreB sits 8 km out; shrink its declared radius below that.
    catalog[1].delivery_radius_km = Some(6.0);

    let spec = FilterSpec {
        user_location: Some(CUSTOMER),
        ..FilterSpec::default()
    };
    let results = discover(catalog, &spec);
    assert_eq!(names(&results), ["StoreA"]);
}

#[test]
fn geofence_retains_store_inside_its_radius() {
    let spec = FilterSpec {
        user_location: Some(CUSTOMER),
        ..FilterSpec::default()
    };
    // Canonical radii (5 km and 10 km) both cover their distances.
    let results = discover(canonical_catalog(), &spec);
    assert_eq!(names(&results), ["StoreA", "StoreB"]);
}

#[test]
fn max_distance_tightens_the_geofence() {
    let spec = FilterSpec {
        user_location: Some(CUSTOMER),
        max_distance_km: Some(5.0),
        ..FilterSpec::default()
    };
    let results = discover(canonical_catalog(), &spec);
    assert_eq!(names(&results), ["StoreA"]);
}

#[test]
fn store_without_coordinate_is_unreachable_with_location() {
    let mut catalog = canonical_catalog();
    catalog.push(store("NoCoordinate"));

    let with_location = FilterSpec {
        user_location: Some(CUSTOMER),
        ..FilterSpec::default()
    };
    let results = discover(catalog.clone(), &with_location);
    assert!(!names(&results).contains(&"NoCoordinate"));

    // Without a customer position the geofence is skipped entirely.
    let results = discover(catalog, &FilterSpec::default());
    assert!(names(&results).contains(&"NoCoordinate"));
}

#[test]
fn default_sort_is_distance_with_location() {
    let spec = FilterSpec {
        user_location: Some(CUSTOMER),
        ..FilterSpec::default()
    };
    let results = discover(canonical_catalog(), &spec);
    assert_eq!(names(&results), ["StoreA", "StoreB"]);
    let distances: Vec<f64> = results.iter().map(|r| r.distance_km.unwrap()).collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn default_sort_is_rating_without_location() {
    let mut catalog = canonical_catalog();
    catalog.reverse();
    let results = discover(catalog, &FilterSpec::default());
    assert_eq!(names(&results), ["StoreA", "StoreB"]);
}

#[test]
fn explicit_rating_sort_survives_a_location() {
    // StoreB is nearer after swapping positions, but the explicit key wins.
    let mut catalog = canonical_catalog();
    catalog[0].location = Some(km_north(8.0));
    catalog[0].delivery_radius_km = Some(10.0);
    catalog[1].location = Some(km_north(2.0));

    let spec = FilterSpec {
        user_location: Some(CUSTOMER),
        sort_by: Some(SortBy::Rating),
        ..FilterSpec::default()
    };
    let results = discover(catalog, &spec);
    assert_eq!(names(&results), ["StoreA", "StoreB"]);
}

#[test]
fn delivery_fee_sort_puts_unpriced_stores_last() {
    let mut catalog = canonical_catalog();
    let unpriced = store("Unpriced");
    catalog.insert(0, unpriced);

    let spec = FilterSpec {
        sort_by: Some(SortBy::DeliveryFee),
        ..FilterSpec::default()
    };
    let results = discover(catalog, &spec);
    assert_eq!(names(&results), ["StoreA", "StoreB", "Unpriced"]);
}

#[test]
fn delivery_time_sort_treats_missing_estimate_as_an_hour() {
    let mut quick = store("Quick");
    quick.delivery_time_min = Some(15);
    let mut slow = store("Slow");
    slow.delivery_time_min = Some(90);
    let unknown = store("Unknown");

    let spec = FilterSpec {
        sort_by: Some(SortBy::DeliveryTime),
        ..FilterSpec::default()
    };
    let results = discover(vec![slow, unknown, quick], &spec);
    assert_eq!(names(&results), ["Quick", "Unknown", "Slow"]);
}

#[test]
fn ties_break_deterministically_by_id() {
    let mut first = store("Tied");
    first.rating = Some(4.0);
    let mut second = store("Also Tied");
    second.rating = Some(4.0);

    let forward = discover(
        vec![first.clone(), second.clone()],
        &FilterSpec::default(),
    );
    let reversed = discover(vec![second, first], &FilterSpec::default());

    let forward_ids: Vec<Uuid> = forward.iter().map(|r| r.store.id).collect();
    let reversed_ids: Vec<Uuid> = reversed.iter().map(|r| r.store.id).collect();
    assert_eq!(forward_ids, reversed_ids);
    assert!(forward_ids.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn discover_is_idempotent() {
    let spec = FilterSpec {
        user_location: Some(CUSTOMER),
        min_rating: 3.0,
        ..FilterSpec::default()
    };
    let once = discover(canonical_catalog(), &spec);
    let twice = discover(canonical_catalog(), &spec);
    assert_eq!(names(&once), names(&twice));
    let d1: Vec<Option<f64>> = once.iter().map(|r| r.distance_km).collect();
    let d2: Vec<Option<f64>> = twice.iter().map(|r| r.distance_km).collect();
    assert_eq!(d1, d2);
}

#[test]
fn empty_catalog_yields_empty_result() {
    let results = discover(Vec::new(), &FilterSpec::default());
    assert!(results.is_empty());
}
