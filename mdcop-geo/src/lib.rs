//! Concrete [`NeighborPredicate`] implementations: planar Euclidean distance
//! and great-circle (Haversine) distance over latitude/longitude.
//!
//! `mdcop-core` never names a coordinate system or a distance formula; it
//! only calls `neighbors(a, b)`. These two predicates are this crate's
//! canonical answers to "what does neighboring mean".

use mdcop_core::{Instance, MdcopError};
pub use mdcop_core::NeighborPredicate;

/// Planar distance: two instances are neighbors iff their Euclidean distance
/// is at most `dt`. The threshold is squared once at construction time so
/// `neighbors` never takes a square root.
#[derive(Debug, Clone, Copy)]
pub struct EuclideanDistance {
    squared_dt: f64,
}

impl EuclideanDistance {
    pub fn new(dt: f64) -> Result<Self, MdcopError> {
        if !(dt > 0.0) {
            return Err(MdcopError::InvalidDistanceThreshold { value: dt });
        }
        Ok(EuclideanDistance { squared_dt: dt * dt })
    }
}

impl NeighborPredicate for EuclideanDistance {
    fn neighbors(&self, a: &Instance, b: &Instance) -> bool {
        let dx = a.x - b.x;
        let dy = a.y - b.y;
        (dx * dx + dy * dy) <= self.squared_dt
    }
}

/// Great-circle distance over (latitude, longitude) pairs, using the
/// Haversine formula and a mean Earth radius of 6371 km. By convention
/// `Instance::x` is latitude and `Instance::y` is longitude, both in
/// degrees; `dt` is in kilometers.
#[derive(Debug, Clone, Copy)]
pub struct LatLonDistance {
    dt: f64,
}

const EARTH_RADIUS_KM: f64 = 6371.0;

impl LatLonDistance {
    pub fn new(dt: f64) -> Result<Self, MdcopError> {
        if !(dt > 0.0) {
            return Err(MdcopError::InvalidDistanceThreshold { value: dt });
        }
        Ok(LatLonDistance { dt })
    }
}

fn deg_to_rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

impl NeighborPredicate for LatLonDistance {
    fn neighbors(&self, a: &Instance, b: &Instance) -> bool {
        let (lat1, lat2) = (a.x, b.x);
        let (lon1, lon2) = (a.y, b.y);

        let phi1 = deg_to_rad(lat1);
        let phi2 = deg_to_rad(lat2);
        let dphi = deg_to_rad(lat2 - lat1);
        let dlambda = deg_to_rad(lon2 - lon1);

        let sin_dphi = (dphi / 2.0).sin();
        let sin_dlambda = (dlambda / 2.0).sin();
        let a = sin_dphi * sin_dphi + phi1.cos() * phi2.cos() * sin_dlambda * sin_dlambda;
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c <= self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdcop_core::{EventType, InstanceId, TimeSlot};

    fn inst(x: f64, y: f64) -> Instance {
        Instance::new(EventType::from("A"), InstanceId(0), x, y, TimeSlot(0))
    }

    #[test]
    fn euclidean_rejects_non_positive_threshold() {
        assert!(EuclideanDistance::new(0.0).is_err());
        assert!(EuclideanDistance::new(-1.0).is_err());
    }

    #[test]
    fn euclidean_neighbors_matches_squared_distance() {
        let predicate = EuclideanDistance::new(5.0).unwrap();
        let a = inst(0.0, 0.0);
        let b = inst(3.0, 4.0);
        assert!(predicate.neighbors(&a, &b));

        let predicate = EuclideanDistance::new(4.9).unwrap();
        assert!(!predicate.neighbors(&a, &b));
    }

    #[test]
    fn euclidean_is_symmetric() {
        let predicate = EuclideanDistance::new(2.0).unwrap();
        let a = inst(0.0, 0.0);
        let b = inst(1.0, 1.0);
        assert_eq!(predicate.neighbors(&a, &b), predicate.neighbors(&b, &a));
    }

    #[test]
    fn latlon_same_point_is_always_a_neighbor() {
        let predicate = LatLonDistance::new(1.0).unwrap();
        let a = inst(51.5074, -0.1278);
        assert!(predicate.neighbors(&a, &a));
    }

    /// London to Paris is roughly 344 km.
    #[test]
    fn latlon_london_to_paris_within_400km() {
        let predicate = LatLonDistance::new(400.0).unwrap();
        let london = inst(51.5074, -0.1278);
        let paris = inst(48.8566, 2.3522);
        assert!(predicate.neighbors(&london, &paris));

        let predicate = LatLonDistance::new(300.0).unwrap();
        assert!(!predicate.neighbors(&london, &paris));
    }
}
