use super::contains;
use crate::domain::{BoundingBox, Coordinate, Ring, Viewport};

/// Default lattice resolution: 10 steps, 11x11 = 121 sample points
pub const DEFAULT_GRID_STEPS: usize = 10;

/// Estimate the fraction of a polygon's area inside the viewport.
///
/// Samples a `(steps + 1)²` lattice over the polygon's bounding box. The
/// denominator counts lattice points inside the polygon, the numerator
/// the subset of those that also fall inside the viewport. Because the
/// lattice is anchored to the polygon rather than to the viewport, a
/// smaller viewport can only remove samples, so the ratio never grows
/// when the viewport shrinks.
///
/// Returns 0 when the viewport misses the bounding box or when no lattice
/// point lands inside the polygon.
pub fn visible_area_ratio(rings: &[Ring], viewport: &Viewport, steps: usize) -> f64 {
    let Some(bbox) = rings
        .iter()
        .map(Ring::bounding_box)
        .reduce(|a, b| a.union(&b))
    else {
        return 0.0;
    };
    if viewport.bounds.intersection(&bbox).is_none() {
        return 0.0;
    }

    let mut inside_polygon = 0usize;
    let mut inside_visible = 0usize;
    for point in lattice(&bbox, steps.max(1)) {
        if !contains(point, rings) {
            continue;
        }
        inside_polygon += 1;
        if viewport.contains(point) {
            inside_visible += 1;
        }
    }

    if inside_polygon == 0 {
        return 0.0;
    }
    inside_visible as f64 / inside_polygon as f64
}

fn lattice(bbox: &BoundingBox, steps: usize) -> impl Iterator<Item = Coordinate> + '_ {
    let n = steps as f64;
    (0..=steps).flat_map(move |i| {
        let lat = bbox.south + bbox.height_deg() * (i as f64 / n);
        (0..=steps).map(move |j| {
            let lng = bbox.west + bbox.width_deg() * (j as f64 / n);
            Coordinate::new(lat, lng)
        })
    })
}
