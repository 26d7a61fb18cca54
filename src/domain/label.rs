use super::Coordinate;

/// Where a county's name label goes for the current viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub feature_id: u64,
    pub position: Coordinate,
}

impl LabelPlacement {
    pub fn new(feature_id: u64, position: Coordinate) -> Self {
        Self {
            feature_id,
            position,
        }
    }
}
