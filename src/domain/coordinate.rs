use geo::{Coord, Rect};

/// Endpoint matching tolerance in degrees
pub const COORD_EPSILON: f64 = 1e-7;

/// WGS84 position in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both axes differ by less than [`COORD_EPSILON`]
    pub fn approx_eq(&self, other: &Coordinate) -> bool {
        (self.lat - other.lat).abs() < COORD_EPSILON && (self.lng - other.lng).abs() < COORD_EPSILON
    }

    /// Arithmetic mean of a set of coordinates, `None` when empty
    pub fn mean<'a, I>(coords: I) -> Option<Coordinate>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        let mut count = 0usize;
        let mut sum_lat = 0.0;
        let mut sum_lng = 0.0;
        for c in coords {
            sum_lat += c.lat;
            sum_lng += c.lng;
            count += 1;
        }
        if count == 0 {
            return None;
        }
        Some(Coordinate::new(
            sum_lat / count as f64,
            sum_lng / count as f64,
        ))
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(c: Coordinate) -> Self {
        geo::coord! { x: c.lng, y: c.lat }
    }
}

impl From<Coord<f64>> for Coordinate {
    fn from(c: Coord<f64>) -> Self {
        Coordinate::new(c.y, c.x)
    }
}

/// Axis-aligned lat/lng box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// Box of `center ± half_lat` / `center ± half_lng`
    pub fn around(center: Coordinate, half_lat: f64, half_lng: f64) -> Self {
        Self::new(
            center.lat - half_lat,
            center.lng - half_lng,
            center.lat + half_lat,
            center.lng + half_lng,
        )
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::new(
            self.south.min(other.south),
            self.west.min(other.west),
            self.north.max(other.north),
            self.east.max(other.east),
        )
    }

    /// Overlap of two boxes; `None` unless the overlap has positive extent on both axes
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let south = self.south.max(other.south);
        let north = self.north.min(other.north);
        let west = self.west.max(other.west);
        let east = self.east.min(other.east);
        if south >= north || west >= east {
            return None;
        }
        Some(BoundingBox::new(south, west, north, east))
    }

    /// Inclusive on all edges
    pub fn contains(&self, c: Coordinate) -> bool {
        c.lat >= self.south && c.lat <= self.north && c.lng >= self.west && c.lng <= self.east
    }

    /// Inclusive on all edges, so touching boxes intersect
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        other.south <= self.north
            && other.north >= self.south
            && other.west <= self.east
            && other.east >= self.west
    }

    pub fn height_deg(&self) -> f64 {
        self.north - self.south
    }

    pub fn width_deg(&self) -> f64 {
        self.east - self.west
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    pub fn south_west(&self) -> Coordinate {
        Coordinate::new(self.south, self.west)
    }

    pub fn north_west(&self) -> Coordinate {
        Coordinate::new(self.north, self.west)
    }

    pub fn south_east(&self) -> Coordinate {
        Coordinate::new(self.south, self.east)
    }
}

impl From<Rect<f64>> for BoundingBox {
    fn from(rect: Rect<f64>) -> Self {
        BoundingBox::new(rect.min().y, rect.min().x, rect.max().y, rect.max().x)
    }
}
