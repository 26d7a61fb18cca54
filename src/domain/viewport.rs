use super::{BoundingBox, Coordinate};

/// Snapshot of the visible map area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub bounds: BoundingBox,
    pub center: Coordinate,
}

impl Viewport {
    pub fn new(bounds: BoundingBox, center: Coordinate) -> Self {
        Self { bounds, center }
    }

    /// Viewport centered on its bounds
    pub fn from_bounds(bounds: BoundingBox) -> Self {
        Self {
            bounds,
            center: bounds.center(),
        }
    }

    /// Viewport of `span_lat` x `span_lng` degrees around `center`
    pub fn around(center: Coordinate, span_lat: f64, span_lng: f64) -> Self {
        Self {
            bounds: BoundingBox::around(center, span_lat / 2.0, span_lng / 2.0),
            center,
        }
    }

    pub fn contains(&self, c: Coordinate) -> bool {
        self.bounds.contains(c)
    }

    pub fn intersects(&self, bbox: &BoundingBox) -> bool {
        self.bounds.intersects(bbox)
    }
}
