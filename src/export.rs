//! GeoJSON output of the current county selection

use crate::domain::{CountyFeature, LabelPlacement};
use crate::layers::{LabelStyle, OutlineStyle};
use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::path::Path;

/// FeatureCollection with one polygon per county and one point per label.
///
/// Coordinates are `[lon, lat]`; each assembled ring becomes one ring of
/// the polygon.
pub fn to_feature_collection(features: &[CountyFeature], labels: &[LabelPlacement]) -> Value {
    let mut out: Vec<Value> = features.iter().map(polygon_feature).collect();

    for label in labels {
        let Some(county) = features.iter().find(|f| f.id == label.feature_id) else {
            continue;
        };
        out.push(json!({
            "type": "Feature",
            "properties": {
                "kind": "label",
                "county_id": county.id,
                "name": county.name,
                "label_style": LabelStyle::for_role(county.role()),
            },
            "geometry": {
                "type": "Point",
                "coordinates": [label.position.lng, label.position.lat],
            },
        }));
    }

    json!({
        "type": "FeatureCollection",
        "features": out,
    })
}

fn polygon_feature(feature: &CountyFeature) -> Value {
    let rings: Vec<Vec<[f64; 2]>> = feature
        .rings()
        .iter()
        .map(|ring| ring.coords().map(|c| [c.lng, c.lat]).collect())
        .collect();

    json!({
        "type": "Feature",
        "properties": {
            "kind": "county",
            "id": feature.id,
            "name": feature.name,
            "tags": feature.tags,
            "is_main": feature.is_main(),
            "style": OutlineStyle::for_role(feature.role()),
        },
        "geometry": {
            "type": "Polygon",
            "coordinates": rings,
        },
    })
}

pub fn write_geojson(path: &Path, collection: &Value) -> Result<()> {
    let contents =
        serde_json::to_string_pretty(collection).context("Failed to serialize GeoJSON")?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write GeoJSON file: {}", path.display()))
}
