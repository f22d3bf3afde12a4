//! Straight-line distance estimate used when directions are unavailable.

use super::state::GeoPoint;
use crate::provider::Coordinate;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default pace of the duration estimate: 300 s per km (12 km/h).
pub const DEFAULT_SECONDS_PER_KM: f64 = 300.0;

/// Great-circle distance between two coordinates, in kilometers.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let (lat1, lng1) = (a.lat.to_radians(), a.lng.to_radians());
    let (lat2, lng2) = (b.lat.to_radians(), b.lng.to_radians());
    let dlat = lat2 - lat1;
    let dlng = lng2 - lng1;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Sum of great-circle distances between consecutive points.
pub fn path_distance_km(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_km(pair[0].coordinate(), pair[1].coordinate()))
        .sum()
}

/// Distance and duration estimate for a path with no routed directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackEstimator {
    seconds_per_km: f64,
}

impl Default for FallbackEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_SECONDS_PER_KM)
    }
}

impl FallbackEstimator {
    pub fn new(seconds_per_km: f64) -> Self {
        Self { seconds_per_km }
    }

    /// `round(distance_km × seconds_per_km)`
    pub fn duration_seconds(&self, distance_km: f64) -> u64 {
        (distance_km * self.seconds_per_km).round().max(0.0) as u64
    }

    /// Returns `(distance_km, duration_seconds)` for `points`.
    pub fn estimate(&self, points: &[GeoPoint]) -> (f64, u64) {
        let distance_km = path_distance_km(points);
        (distance_km, self.duration_seconds(distance_km))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::state::PointKind;

    fn point(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng, None, PointKind::Waypoint).unwrap()
    }

    #[test]
    fn test_identical_points_are_zero() {
        let p = point(34.859034, 135.677555);
        let estimator = FallbackEstimator::default();
        assert_eq!(estimator.estimate(&[p.clone(), p]), (0.0, 0));
    }

    #[test]
    fn test_single_or_empty_path_is_zero() {
        let estimator = FallbackEstimator::default();
        assert_eq!(estimator.estimate(&[]), (0.0, 0));
        assert_eq!(estimator.estimate(&[point(1.0, 1.0)]), (0.0, 0));
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // 6371 * π / 180
        let d = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert!((d - 111.19492664455873).abs() < 1e-9);
    }

    #[test]
    fn test_kuzuha_to_osaka_castle() {
        // 樟葉駅 → 大阪城公園, roughly 20 km as the crow flies
        let d = haversine_km(
            Coordinate::new(34.859034, 135.677555),
            Coordinate::new(34.689012, 135.645678),
        );
        assert!(d > 18.0 && d < 21.0, "got {}", d);
    }

    #[test]
    fn test_path_sums_consecutive_segments() {
        let a = point(0.0, 0.0);
        let b = point(1.0, 0.0);
        let c = point(1.0, 1.0);
        let total = path_distance_km(&[a.clone(), b.clone(), c.clone()]);
        let expected = haversine_km(a.coordinate(), b.coordinate())
            + haversine_km(b.coordinate(), c.coordinate());
        assert_eq!(total, expected);
    }

    #[test]
    fn test_duration_rounds() {
        let estimator = FallbackEstimator::default();
        assert_eq!(estimator.duration_seconds(10.0), 3000);
        assert_eq!(estimator.duration_seconds(0.0015), 0);
        assert_eq!(estimator.duration_seconds(0.0017), 1);
        assert_eq!(estimator.duration_seconds(45.5), 13650);
    }

    #[test]
    fn test_custom_pace() {
        let estimator = FallbackEstimator::new(180.0);
        assert_eq!(estimator.duration_seconds(10.0), 1800);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn haversine_is_symmetric(
                lat1 in -90.0f64..=90.0, lng1 in -180.0f64..=180.0,
                lat2 in -90.0f64..=90.0, lng2 in -180.0f64..=180.0,
            ) {
                let a = Coordinate::new(lat1, lng1);
                let b = Coordinate::new(lat2, lng2);
                prop_assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
            }

            #[test]
            fn haversine_is_bounded(
                lat1 in -90.0f64..=90.0, lng1 in -180.0f64..=180.0,
                lat2 in -90.0f64..=90.0, lng2 in -180.0f64..=180.0,
            ) {
                let d = haversine_km(Coordinate::new(lat1, lng1), Coordinate::new(lat2, lng2));
                prop_assert!(d >= 0.0);
                prop_assert!(d <= EARTH_RADIUS_KM * std::f64::consts::PI + 1e-6);
            }

            #[test]
            fn duration_is_rounded_distance_times_pace(distance in 0.0f64..5000.0) {
                let estimator = FallbackEstimator::default();
                prop_assert_eq!(
                    estimator.duration_seconds(distance),
                    (distance * 300.0).round() as u64
                );
            }
        }
    }
}
