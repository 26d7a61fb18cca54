use crate::domain::{Coordinate, Ring};

/// Even-odd ray cast against a single ring.
///
/// Treats longitude as x and latitude as y and casts a ray towards +x.
/// An edge counts when its endpoints straddle the point's latitude
/// (half-open: `y > lat` on exactly one side) and its crossing lies
/// strictly east of the point. Consequently points on a ring's
/// south/west edges test inside and points on its north/east edges test
/// outside; the result is deterministic for every vertex.
pub fn ring_contains(point: Coordinate, ring: &Ring) -> bool {
    let mut inside = false;
    for (a, b) in ring.edges() {
        if (a.lat > point.lat) != (b.lat > point.lat) {
            let crossing = (b.lng - a.lng) * (point.lat - a.lat) / (b.lat - a.lat) + a.lng;
            if point.lng < crossing {
                inside = !inside;
            }
        }
    }
    inside
}

/// True when any ring contains the point; rings are never subtracted as holes.
/// No rings means no containment.
pub fn contains(point: Coordinate, rings: &[Ring]) -> bool {
    rings.iter().any(|ring| ring_contains(point, ring))
}
