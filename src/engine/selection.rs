use crate::domain::Coordinate;
use crate::geometry::haversine_m;

/// The `n` items whose centroid is closest to `point`, nearest first.
///
/// The sort is stable, so items at exactly equal distance keep their
/// source order.
pub fn nearest<T, F>(items: Vec<T>, point: Coordinate, n: usize, centroid: F) -> Vec<T>
where
    F: Fn(&T) -> Coordinate,
{
    let mut ranked: Vec<(f64, T)> = items
        .into_iter()
        .map(|item| (haversine_m(point, centroid(&item)), item))
        .collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked.into_iter().take(n).map(|(_, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::distance::EARTH_RADIUS_M;

    /// Point `km` kilometers due north of the origin
    fn north_of_origin(km: f64) -> Coordinate {
        let deg = (km * 1000.0 / EARTH_RADIUS_M).to_degrees();
        Coordinate::new(deg, 0.0)
    }

    #[test]
    fn test_three_closest_in_order() {
        let candidates: Vec<(u64, Coordinate)> = [3.0, 1.0, 5.0, 2.0, 4.0]
            .iter()
            .map(|&km| (km as u64, north_of_origin(km)))
            .collect();

        let picked = nearest(candidates, Coordinate::new(0.0, 0.0), 3, |c| c.1);
        let ids: Vec<u64> = picked.iter().map(|c| c.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_ties_keep_source_order() {
        let east = Coordinate::new(0.0, 0.01);
        let west = Coordinate::new(0.0, -0.01);
        let candidates = vec![(10u64, east), (20u64, west), (30u64, east)];

        let picked = nearest(candidates, Coordinate::new(0.0, 0.0), 2, |c| c.1);
        let ids: Vec<u64> = picked.iter().map(|c| c.0).collect();
        assert_eq!(ids, vec![10, 20]);
    }

    #[test]
    fn test_fewer_than_n() {
        let picked = nearest(vec![Coordinate::new(1.0, 1.0)], Coordinate::new(0.0, 0.0), 3, |c| *c);
        assert_eq!(picked.len(), 1);
    }
}
