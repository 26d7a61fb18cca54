use crate::domain::{Coordinate, Ring};

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters
pub fn haversine_m(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Distance in meters from `point` to the segment `start`-`end`.
///
/// The projection is done in degree space and clamped to the segment,
/// then measured with [`haversine_m`]. Good enough at county scale.
pub fn distance_to_segment_m(point: Coordinate, start: Coordinate, end: Coordinate) -> f64 {
    let d_lat = end.lat - start.lat;
    let d_lng = end.lng - start.lng;
    let len_sq = d_lat * d_lat + d_lng * d_lng;

    let t = if len_sq > 0.0 {
        (((point.lat - start.lat) * d_lat + (point.lng - start.lng) * d_lng) / len_sq)
            .clamp(0.0, 1.0)
    } else {
        0.0
    };

    let nearest = Coordinate::new(start.lat + t * d_lat, start.lng + t * d_lng);
    haversine_m(point, nearest)
}

/// Minimum distance in meters from `point` to any edge of any ring.
///
/// Returns `f64::INFINITY` for empty geometry, which passes every
/// "at least N meters" check.
pub fn min_distance_to_boundary(point: Coordinate, rings: &[Ring]) -> f64 {
    rings
        .iter()
        .flat_map(|ring| ring.edges())
        .map(|(a, b)| distance_to_segment_m(point, a, b))
        .fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_one_degree_latitude() {
        let d = haversine_m(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        // 2 * pi * R / 360
        assert!((d - 111_194.9).abs() < 1.0);
    }

    #[test]
    fn test_haversine_symmetric() {
        let a = Coordinate::new(40.0, -75.0);
        let b = Coordinate::new(40.5, -74.2);
        assert!((haversine_m(a, b) - haversine_m(b, a)).abs() < 1e-6);
        assert_eq!(haversine_m(a, a), 0.0);
    }

    #[test]
    fn test_segment_projection_and_clamping() {
        let start = Coordinate::new(0.0, 0.0);
        let end = Coordinate::new(0.0, 2.0);

        // Perpendicular foot lies on the segment
        let mid = distance_to_segment_m(Coordinate::new(1.0, 1.0), start, end);
        let expected = haversine_m(Coordinate::new(1.0, 1.0), Coordinate::new(0.0, 1.0));
        assert!((mid - expected).abs() < 1e-6);

        // Beyond the end: clamps to the endpoint
        let past = distance_to_segment_m(Coordinate::new(0.0, 3.0), start, end);
        assert!((past - haversine_m(Coordinate::new(0.0, 3.0), end)).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_segment() {
        let p = Coordinate::new(1.0, 1.0);
        let v = Coordinate::new(0.0, 0.0);
        assert!((distance_to_segment_m(p, v, v) - haversine_m(p, v)).abs() < 1e-6);
    }

    #[test]
    fn test_min_distance_to_boundary() {
        let ring = Ring::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(0.0, 0.0),
        ])
        .unwrap();

        let d = min_distance_to_boundary(Coordinate::new(0.5, 0.9), &[ring]);
        let to_east_edge = haversine_m(Coordinate::new(0.5, 0.9), Coordinate::new(0.5, 1.0));
        assert!((d - to_east_edge).abs() < 1e-6);

        assert_eq!(
            min_distance_to_boundary(Coordinate::new(0.5, 0.5), &[]),
            f64::INFINITY
        );
    }
}
