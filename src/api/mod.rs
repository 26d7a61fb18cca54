pub mod overpass;

pub use overpass::{OverpassClient, OverpassResponse};

use crate::domain::{Coordinate, Relation, StateInfo};
use crate::error::SourceError;

/// Where administrative boundaries come from.
///
/// Implementations are called at most once per load cycle; callers never
/// issue a second request while one is outstanding.
pub trait BoundarySource {
    /// County-level relations around `center`, with member geometry
    fn fetch_counties(&self, center: Coordinate) -> Result<Vec<Relation>, SourceError>;

    /// Enclosing state, if the source knows it
    fn fetch_state(&self, center: Coordinate) -> Result<Option<StateInfo>, SourceError>;
}
