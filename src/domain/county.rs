use super::{BoundingBox, Coordinate, Relation};
use crate::error::GeometryError;
use crate::geometry::assemble_rings;
use geo::{BoundingRect, LineString};
use std::collections::HashMap;

/// Closed boundary ring, stored as a geo `LineString` with x = longitude, y = latitude
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    line: LineString<f64>,
    bbox: BoundingBox,
}

impl Ring {
    /// Validate closure (within [`super::COORD_EPSILON`]) and minimum length
    pub fn new(points: Vec<Coordinate>) -> Result<Self, GeometryError> {
        if points.len() < 4 {
            return Err(GeometryError::TooShort(points.len()));
        }
        let (first, last) = (points[0], points[points.len() - 1]);
        if !first.approx_eq(&last) {
            return Err(GeometryError::OpenRing);
        }

        let line: LineString<f64> = points.into_iter().map(geo::Coord::from).collect();
        let bbox = line
            .bounding_rect()
            .map(BoundingBox::from)
            .ok_or(GeometryError::TooShort(0))?;

        Ok(Self { line, bbox })
    }

    pub fn len(&self) -> usize {
        self.line.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line.0.is_empty()
    }

    pub fn coords(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.line.coords().map(|c| Coordinate::from(*c))
    }

    /// Consecutive vertex pairs, including the closing edge
    pub fn edges(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.line
            .lines()
            .map(|l| (Coordinate::from(l.start), Coordinate::from(l.end)))
    }

    pub fn first(&self) -> Coordinate {
        Coordinate::from(self.line.0[0])
    }

    pub fn last(&self) -> Coordinate {
        Coordinate::from(self.line.0[self.line.0.len() - 1])
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }
}

/// Highlight role used for styling and label priority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureRole {
    Main,
    Context,
}

/// A county polygon ready for rendering and labelling.
///
/// Geometry is fixed at construction; only the role changes afterwards.
#[derive(Debug, Clone)]
pub struct CountyFeature {
    pub id: u64,
    pub name: String,
    pub tags: HashMap<String, String>,
    rings: Vec<Ring>,
    bbox: BoundingBox,
    centroid: Coordinate,
    role: FeatureRole,
}

impl CountyFeature {
    /// Build from already-assembled rings. `rings` must not be empty.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        tags: HashMap<String, String>,
        rings: Vec<Ring>,
        centroid: Coordinate,
    ) -> Result<Self, GeometryError> {
        let bbox = rings
            .iter()
            .map(Ring::bounding_box)
            .reduce(|a, b| a.union(&b))
            .ok_or(GeometryError::Unassembled { relation_id: id })?;

        Ok(Self {
            id,
            name: name.into(),
            tags,
            rings,
            bbox,
            centroid,
            role: FeatureRole::Context,
        })
    }

    /// Assemble the relation's outer members into rings.
    ///
    /// The centroid is the mean of every member vertex; if the relation
    /// carries no member points at all it falls back to the ring vertices.
    pub fn from_relation(relation: &Relation) -> Result<Self, GeometryError> {
        let segments = relation.outer_segments();
        if segments.is_empty() {
            return Err(GeometryError::NoOuterMembers {
                relation_id: relation.id,
            });
        }

        let rings = assemble_rings(segments);
        if rings.is_empty() {
            return Err(GeometryError::Unassembled {
                relation_id: relation.id,
            });
        }

        let centroid = match relation.vertex_centroid() {
            Some(c) => c,
            None => ring_vertex_mean(&rings).ok_or(GeometryError::Unassembled {
                relation_id: relation.id,
            })?,
        };

        Self::new(
            relation.id,
            relation.name(),
            relation.tags.clone(),
            rings,
            centroid,
        )
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    /// Vertex-mean centroid (not area weighted)
    pub fn centroid(&self) -> Coordinate {
        self.centroid
    }

    pub fn role(&self) -> FeatureRole {
        self.role
    }

    pub fn is_main(&self) -> bool {
        self.role == FeatureRole::Main
    }

    pub(crate) fn set_role(&mut self, role: FeatureRole) {
        self.role = role;
    }
}

fn ring_vertex_mean(rings: &[Ring]) -> Option<Coordinate> {
    let points: Vec<Coordinate> = rings.iter().flat_map(|r| r.coords()).collect();
    Coordinate::mean(&points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Member, MemberRole};

    fn coords(points: &[(f64, f64)]) -> Vec<Coordinate> {
        points
            .iter()
            .map(|&(lat, lng)| Coordinate::new(lat, lng))
            .collect()
    }

    #[test]
    fn test_ring_validation() {
        assert_eq!(
            Ring::new(coords(&[(0.0, 0.0), (0.0, 1.0), (0.0, 0.0)])),
            Err(GeometryError::TooShort(3))
        );
        assert_eq!(
            Ring::new(coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])),
            Err(GeometryError::OpenRing)
        );

        let ring = Ring::new(coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.0, 0.0)])).unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.edges().count(), 3);
        assert_eq!(ring.bounding_box(), BoundingBox::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_from_relation_without_outer_members() {
        let relation = Relation {
            id: 9,
            tags: HashMap::new(),
            members: vec![Member {
                role: MemberRole::Inner,
                points: coords(&[(0.0, 0.0), (1.0, 1.0)]),
            }],
        };
        assert_eq!(
            CountyFeature::from_relation(&relation).unwrap_err(),
            GeometryError::NoOuterMembers { relation_id: 9 }
        );
    }

    #[test]
    fn test_from_relation_unassembled() {
        let relation = Relation {
            id: 10,
            tags: HashMap::new(),
            members: vec![Member {
                role: MemberRole::Outer,
                points: coords(&[(0.0, 0.0), (1.0, 1.0)]),
            }],
        };
        assert_eq!(
            CountyFeature::from_relation(&relation).unwrap_err(),
            GeometryError::Unassembled { relation_id: 10 }
        );
    }

    #[test]
    fn test_l_shaped_relation_end_to_end() {
        // Two open boundary pieces of an L, the second stored in reverse
        let relation = Relation {
            id: 42,
            tags: HashMap::from([("name".to_string(), "L County".to_string())]),
            members: vec![
                Member {
                    role: MemberRole::Outer,
                    points: coords(&[(0.0, 0.0), (0.0, 4.0), (2.0, 4.0), (2.0, 2.0)]),
                },
                Member {
                    role: MemberRole::Outer,
                    points: coords(&[(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (2.0, 2.0)]),
                },
            ],
        };

        let feature = CountyFeature::from_relation(&relation).unwrap();
        assert_eq!(feature.name, "L County");
        assert_eq!(feature.rings().len(), 1);

        let ring = &feature.rings()[0];
        assert_eq!(ring.len(), 7);
        assert!(ring.first().approx_eq(&ring.last()));
        let distinct: Vec<Coordinate> = ring.coords().take(ring.len() - 1).collect();
        assert_eq!(distinct.len(), 6);

        assert_eq!(feature.centroid(), Coordinate::new(1.75, 1.75));
        assert!(crate::geometry::contains(feature.centroid(), feature.rings()));
    }

    #[test]
    fn test_new_feature_defaults_to_context() {
        let ring = Ring::new(coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.0, 0.0)])).unwrap();
        let feature = CountyFeature::new(
            1,
            "Test",
            HashMap::new(),
            vec![ring],
            Coordinate::new(0.3, 0.6),
        )
        .unwrap();
        assert!(!feature.is_main());
        assert_eq!(feature.bounding_box(), BoundingBox::new(0.0, 0.0, 1.0, 1.0));
    }
}
