use super::BoundarySource;
use crate::config::OverpassConfig;
use crate::domain::{BoundingBox, Coordinate, Relation, StateInfo};
use crate::error::SourceError;
use crate::osm::{parse_relations, parse_state};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const USER_AGENT: &str = "countymap/0.1.0";

/// Raw Overpass API response
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    pub elements: Vec<Element>,
}

/// A single element from Overpass; only relations carry members
#[derive(Debug, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub type_: String,
    pub id: u64,
    #[serde(default)]
    pub tags: Option<HashMap<String, String>>,
    #[serde(default)]
    pub members: Option<Vec<RelationMember>>,
}

/// Relation member as returned by `out geom;`
#[derive(Debug, Deserialize)]
pub struct RelationMember {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default, rename = "ref")]
    pub ref_: Option<u64>,
    #[serde(default)]
    pub role: String,
    /// Entries are `null` for nodes Overpass clipped away
    #[serde(default)]
    pub geometry: Option<Vec<Option<GeometryPoint>>>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct GeometryPoint {
    pub lat: f64,
    pub lon: f64,
}

/// County relations with full member geometry inside `center ± radius_deg`
pub fn county_query(center: Coordinate, radius_deg: f64, admin_level: &str) -> String {
    let bbox = BoundingBox::around(center, radius_deg, radius_deg);
    format!(
        r#"[out:json][timeout:30];
(
  rel["admin_level"="{level}"]["boundary"="administrative"]({south},{west},{north},{east});
);
out geom;"#,
        level = admin_level,
        south = bbox.south,
        west = bbox.west,
        north = bbox.north,
        east = bbox.east
    )
}

/// Tags of state-level relations around `center`
pub fn state_query(center: Coordinate, radius_deg: f64, admin_level: &str) -> String {
    let bbox = BoundingBox::around(center, radius_deg, radius_deg);
    format!(
        r#"[out:json][timeout:25];
(
  rel["admin_level"="{level}"]["boundary"="administrative"]({south},{west},{north},{east});
  rel["admin_level"="{level}"]["place"="state"]({south},{west},{north},{east});
);
out tags;"#,
        level = admin_level,
        south = bbox.south,
        west = bbox.west,
        north = bbox.north,
        east = bbox.east
    )
}

/// Blocking Overpass client. Failed requests are not retried.
pub struct OverpassClient {
    client: reqwest::blocking::Client,
    config: OverpassConfig,
}

impl OverpassClient {
    pub fn new(config: OverpassConfig) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn execute(&self, query: &str) -> Result<OverpassResponse, SourceError> {
        log::debug!("Overpass query against {}:\n{}", self.config.url, query);

        // Overpass expects form-encoded POST data: data=<query>
        let response = self
            .client
            .post(&self.config.url)
            .form(&[("data", query)])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::from_status(status.as_u16()));
        }

        let parsed: OverpassResponse = response.json()?;
        log::debug!("Overpass returned {} elements", parsed.elements.len());
        Ok(parsed)
    }
}

impl BoundarySource for OverpassClient {
    fn fetch_counties(&self, center: Coordinate) -> Result<Vec<Relation>, SourceError> {
        let query = county_query(
            center,
            self.config.search_radius_deg,
            &self.config.admin_level,
        );
        let response = self.execute(&query)?;
        Ok(parse_relations(&response, &self.config.admin_level))
    }

    fn fetch_state(&self, center: Coordinate) -> Result<Option<StateInfo>, SourceError> {
        let query = state_query(
            center,
            self.config.state_radius_deg,
            &self.config.state_admin_level,
        );
        let response = self.execute(&query)?;
        Ok(parse_state(&response, &self.config.state_admin_level))
    }
}
