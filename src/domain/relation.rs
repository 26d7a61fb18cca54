use super::Coordinate;
use std::collections::HashMap;

pub const UNKNOWN_COUNTY: &str = "Unknown County";

/// Role of a relation member in the boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberRole {
    Outer,
    Inner,
    Other(String),
}

impl MemberRole {
    pub fn from_tag(role: &str) -> Self {
        match role {
            "outer" => MemberRole::Outer,
            "inner" => MemberRole::Inner,
            other => MemberRole::Other(other.to_string()),
        }
    }
}

/// A way member with its resolved geometry
#[derive(Debug, Clone)]
pub struct Member {
    pub role: MemberRole,
    pub points: Vec<Coordinate>,
}

/// Raw administrative boundary as delivered by the data source
#[derive(Debug, Clone)]
pub struct Relation {
    pub id: u64,
    pub tags: HashMap<String, String>,
    pub members: Vec<Member>,
}

impl Relation {
    pub fn name(&self) -> &str {
        self.tags
            .get("name")
            .map(String::as_str)
            .unwrap_or(UNKNOWN_COUNTY)
    }

    /// Outer-role members usable as assembly segments (2+ points)
    pub fn outer_segments(&self) -> Vec<Vec<Coordinate>> {
        self.members
            .iter()
            .filter(|m| m.role == MemberRole::Outer && m.points.len() >= 2)
            .map(|m| m.points.clone())
            .collect()
    }

    /// Mean of every member vertex, shared endpoints counted once per member
    pub fn vertex_centroid(&self) -> Option<Coordinate> {
        Coordinate::mean(self.members.iter().flat_map(|m| m.points.iter()))
    }
}

/// Enclosing state/province of the main county
#[derive(Debug, Clone, PartialEq)]
pub struct StateInfo {
    pub name: String,
    pub id: Option<u64>,
}

impl StateInfo {
    /// Fallback when the state lookup finds nothing: read hints off the county tags
    pub fn from_county_tags(tags: &HashMap<String, String>) -> Option<Self> {
        ["is_in:state", "addr:state", "state"]
            .iter()
            .find_map(|key| tags.get(*key))
            .map(|name| StateInfo {
                name: name.clone(),
                id: None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(role: &str, points: &[(f64, f64)]) -> Member {
        Member {
            role: MemberRole::from_tag(role),
            points: points
                .iter()
                .map(|&(lat, lng)| Coordinate::new(lat, lng))
                .collect(),
        }
    }

    #[test]
    fn test_outer_segments_filter() {
        let relation = Relation {
            id: 1,
            tags: HashMap::new(),
            members: vec![
                member("outer", &[(0.0, 0.0), (0.0, 1.0)]),
                member("inner", &[(0.2, 0.2), (0.3, 0.3)]),
                member("outer", &[(1.0, 1.0)]),
                member("subarea", &[(0.5, 0.5), (0.6, 0.6)]),
            ],
        };
        assert_eq!(relation.outer_segments().len(), 1);
        assert_eq!(relation.name(), UNKNOWN_COUNTY);
    }

    #[test]
    fn test_vertex_centroid_uses_all_members() {
        let relation = Relation {
            id: 2,
            tags: HashMap::new(),
            members: vec![
                member("outer", &[(0.0, 0.0), (0.0, 2.0)]),
                member("inner", &[(2.0, 2.0), (2.0, 0.0)]),
            ],
        };
        assert_eq!(relation.vertex_centroid(), Some(Coordinate::new(1.0, 1.0)));
    }

    #[test]
    fn test_state_from_tags() {
        let mut tags = HashMap::new();
        tags.insert("addr:state".to_string(), "PA".to_string());
        assert_eq!(
            StateInfo::from_county_tags(&tags),
            Some(StateInfo {
                name: "PA".to_string(),
                id: None
            })
        );
        assert_eq!(StateInfo::from_county_tags(&HashMap::new()), None);
    }
}
