use serde::{Deserialize, Serialize};

use crate::config::{GEOFENCE_ANCHOR_LAT, GEOFENCE_ANCHOR_LON};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A validated WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Returns `None` for non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        valid.then_some(Self {
            latitude,
            longitude,
        })
    }

    pub fn campus() -> Self {
        Self {
            latitude: GEOFENCE_ANCHOR_LAT,
            longitude: GEOFENCE_ANCHOR_LON,
        }
    }
}

/// Great-circle distance between two points using the haversine formula.
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Circular allowed area around a fixed anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geofence {
    pub anchor: Coordinate,
    pub radius_m: f64,
}

impl Geofence {
    pub fn new(anchor: Coordinate, radius_m: f64) -> Self {
        Self { anchor, radius_m }
    }

    pub fn distance_to(&self, point: Coordinate) -> f64 {
        haversine_distance(self.anchor, point)
    }

    /// Boundary is inclusive.
    pub fn contains(&self, point: Coordinate) -> bool {
        self.distance_to(point) <= self.radius_m
    }
}

impl Default for Geofence {
    fn default() -> Self {
        Self::new(Coordinate::campus(), crate::config::GEOFENCE_RADIUS_M)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn point(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = Coordinate::campus();
        assert_eq!(haversine_distance(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = point(17.2986622, 78.5173568);
        let b = point(48.8566, 2.3522);
        let ab = haversine_distance(a, b);
        let ba = haversine_distance(b, a);
        assert!((ab - ba).abs() < 1e-6);
    }

    #[test]
    fn antipodal_points_are_half_circumference_apart() {
        let d = haversine_distance(point(0.0, 0.0), point(0.0, 180.0));
        assert!((d - PI * EARTH_RADIUS_M).abs() < 1.0);
    }

    #[test]
    fn campus_fence_accepts_nearby_point() {
        let fence = Geofence::default();
        let nearby = point(17.2987622, 78.5173568);
        let d = fence.distance_to(nearby);
        assert!((d - 11.1).abs() < 0.5, "distance was {d}");
        assert!(fence.contains(nearby));
    }

    #[test]
    fn campus_fence_rejects_point_a_kilometer_away() {
        let fence = Geofence::default();
        let far = point(17.3086622, 78.5173568);
        let d = fence.distance_to(far);
        assert!((d - 1112.0).abs() < 5.0, "distance was {d}");
        assert!(!fence.contains(far));
    }

    #[test]
    fn nan_radius_contains_nothing() {
        let fence = Geofence::new(Coordinate::campus(), f64::NAN);
        assert!(!fence.contains(Coordinate::campus()));
    }

    #[test]
    fn invalid_coordinates_are_rejected() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_none());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_none());
        assert!(Coordinate::new(90.5, 0.0).is_none());
        assert!(Coordinate::new(0.0, -180.5).is_none());
        assert!(Coordinate::new(-90.0, 180.0).is_some());
    }
}
