use mercado_core::Coordinate;

/// Mean Earth radius in kilometers, as used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in kilometers.
///
/// Haversine formula over a spherical Earth. Accurate to well under a
/// kilometer at delivery-radius scales, which is all the geofence needs.
#[must_use]
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAO_PAULO: Coordinate = Coordinate {
        latitude: -23.5505,
        longitude: -46.6333,
    };
    const RIO_DE_JANEIRO: Coordinate = Coordinate {
        latitude: -22.9068,
        longitude: -43.1729,
    };

    #[test]
    fn distance_to_self_is_zero() {
        assert!(haversine_km(SAO_PAULO, SAO_PAULO).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let there = haversine_km(SAO_PAULO, RIO_DE_JANEIRO);
        let back = haversine_km(RIO_DE_JANEIRO, SAO_PAULO);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn sao_paulo_to_rio_is_about_360_km() {
        let d = haversine_km(SAO_PAULO, RIO_DE_JANEIRO);
        assert!((357.0..=361.0).contains(&d), "got {d} km");
    }

    #[test]
    fn short_hop_is_small() {
        let near = Coordinate::new(-23.5510, -46.6340);
        let d = haversine_km(SAO_PAULO, near);
        assert!(d < 0.2, "got {d} km");
    }
}
