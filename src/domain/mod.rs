pub mod coordinate;
pub mod county;
pub mod label;
pub mod relation;
pub mod viewport;

pub use coordinate::{BoundingBox, COORD_EPSILON, Coordinate};
pub use county::{CountyFeature, FeatureRole, Ring};
pub use label::LabelPlacement;
pub use relation::{Member, MemberRole, Relation, StateInfo, UNKNOWN_COUNTY};
pub use viewport::Viewport;
