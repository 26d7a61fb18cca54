use crate::api::OverpassResponse;
use crate::api::overpass::RelationMember;
use crate::domain::{Coordinate, Member, MemberRole, Relation, StateInfo};

/// Parse Overpass relations into domain relations
///
/// # Algorithm
/// 1. Keep `relation` elements whose `admin_level` tag matches
/// 2. For each `way` member, resolve inline geometry to coordinates,
///    skipping clipped (`null`) points
/// 3. Drop members without geometry; the role is kept for later filtering
pub fn parse_relations(response: &OverpassResponse, admin_level: &str) -> Vec<Relation> {
    let mut relations = Vec::new();

    for element in &response.elements {
        if element.type_ != "relation" {
            continue;
        }

        let tags = match &element.tags {
            Some(t) => t,
            None => continue,
        };

        if tags.get("admin_level").map(String::as_str) != Some(admin_level) {
            continue;
        }

        let members: Vec<Member> = element
            .members
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(resolve_way_member)
            .collect();

        relations.push(Relation {
            id: element.id,
            tags: tags.clone(),
            members,
        });
    }

    log::debug!(
        "Parsed {} relations at admin_level {}",
        relations.len(),
        admin_level
    );
    relations
}

fn resolve_way_member(member: &RelationMember) -> Option<Member> {
    if member.type_ != "way" {
        return None;
    }

    let points: Vec<Coordinate> = member
        .geometry
        .as_ref()?
        .iter()
        .flatten()
        .map(|p| Coordinate::new(p.lat, p.lon))
        .collect();

    if points.is_empty() {
        return None;
    }

    Some(Member {
        role: MemberRole::from_tag(&member.role),
        points,
    })
}

/// First state-level relation in the response, named by `name` then `name:en`
pub fn parse_state(response: &OverpassResponse, admin_level: &str) -> Option<StateInfo> {
    response
        .elements
        .iter()
        .filter(|e| e.type_ == "relation")
        .find_map(|e| {
            let tags = e.tags.as_ref()?;
            if tags.get("admin_level").map(String::as_str) != Some(admin_level) {
                return None;
            }
            let name = tags
                .get("name")
                .or_else(|| tags.get("name:en"))
                .cloned()
                .unwrap_or_else(|| "Unknown".to_string());
            Some(StateInfo {
                name,
                id: Some(e.id),
            })
        })
}
