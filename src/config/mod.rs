use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Label placement tuning. Distances in meters, fractions of the visible box.
pub mod defaults {
    /// Labels only for polygons with more than this share visible
    pub const MIN_VISIBLE_RATIO: f64 = 0.5;
    pub const GRID_STEPS: usize = 10;
    /// Minimum label distance from the reference marker
    pub const MARKER_DISTANCE_M: f64 = 60.0;
    /// Extra marker margin applied during the spiral search
    pub const MARKER_MARGIN: f64 = 1.2;
    /// Boundary clearance as a share of the visible box's shorter side
    pub const BOUNDARY_FRACTION: f64 = 0.30;
    /// Clearance multiplier for the second, relaxed search pass
    pub const RELAXED_FRACTION: f64 = 0.5;
    pub const ANGLE_STEP_DEG: f64 = 3.0;
    /// Radial step = larger visible dimension / this
    pub const RADIAL_DIVISIONS: f64 = 120.0;

    pub const MAX_FEATURES: usize = 3;

    pub const SPAN_LAT: f64 = 0.25;
    pub const SPAN_LON: f64 = 0.35;
}

fn default_span_lat() -> f64 {
    defaults::SPAN_LAT
}
fn default_span_lon() -> f64 {
    defaults::SPAN_LON
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default = "default_span_lat")]
    pub span_lat: f64,
    #[serde(default = "default_span_lon")]
    pub span_lon: f64,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub geojson: Option<PathBuf>,
    #[serde(default)]
    pub overpass: Option<OverpassConfig>,
    #[serde(default)]
    pub labels: Option<LabelConfig>,
    #[serde(default)]
    pub selection: Option<SelectionConfig>,
}

fn default_overpass_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_search_radius_deg() -> f64 {
    0.2
}

fn default_state_radius_deg() -> f64 {
    0.1
}

fn default_admin_level() -> String {
    "6".to_string()
}

fn default_state_admin_level() -> String {
    "4".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct OverpassConfig {
    #[serde(default = "default_overpass_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Half-width of the county search box in degrees
    #[serde(default = "default_search_radius_deg")]
    pub search_radius_deg: f64,
    #[serde(default = "default_state_radius_deg")]
    pub state_radius_deg: f64,
    #[serde(default = "default_admin_level")]
    pub admin_level: String,
    #[serde(default = "default_state_admin_level")]
    pub state_admin_level: String,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            url: default_overpass_url(),
            timeout_secs: default_timeout_secs(),
            search_radius_deg: default_search_radius_deg(),
            state_radius_deg: default_state_radius_deg(),
            admin_level: default_admin_level(),
            state_admin_level: default_state_admin_level(),
        }
    }
}

fn default_min_visible_ratio() -> f64 {
    defaults::MIN_VISIBLE_RATIO
}
fn default_grid_steps() -> usize {
    defaults::GRID_STEPS
}
fn default_marker_distance_m() -> f64 {
    defaults::MARKER_DISTANCE_M
}
fn default_marker_margin() -> f64 {
    defaults::MARKER_MARGIN
}
fn default_boundary_fraction() -> f64 {
    defaults::BOUNDARY_FRACTION
}
fn default_relaxed_fraction() -> f64 {
    defaults::RELAXED_FRACTION
}
fn default_angle_step_deg() -> f64 {
    defaults::ANGLE_STEP_DEG
}
fn default_radial_divisions() -> f64 {
    defaults::RADIAL_DIVISIONS
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LabelConfig {
    #[serde(default = "default_min_visible_ratio")]
    pub min_visible_ratio: f64,
    #[serde(default = "default_grid_steps")]
    pub grid_steps: usize,
    #[serde(default = "default_marker_distance_m")]
    pub marker_distance_m: f64,
    #[serde(default = "default_marker_margin")]
    pub marker_margin: f64,
    #[serde(default = "default_boundary_fraction")]
    pub boundary_fraction: f64,
    #[serde(default = "default_relaxed_fraction")]
    pub relaxed_fraction: f64,
    #[serde(default = "default_angle_step_deg")]
    pub angle_step_deg: f64,
    #[serde(default = "default_radial_divisions")]
    pub radial_divisions: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            min_visible_ratio: defaults::MIN_VISIBLE_RATIO,
            grid_steps: defaults::GRID_STEPS,
            marker_distance_m: defaults::MARKER_DISTANCE_M,
            marker_margin: defaults::MARKER_MARGIN,
            boundary_fraction: defaults::BOUNDARY_FRACTION,
            relaxed_fraction: defaults::RELAXED_FRACTION,
            angle_step_deg: defaults::ANGLE_STEP_DEG,
            radial_divisions: defaults::RADIAL_DIVISIONS,
        }
    }
}

fn default_max_features() -> usize {
    defaults::MAX_FEATURES
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SelectionConfig {
    #[serde(default = "default_max_features")]
    pub max_features: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_features: defaults::MAX_FEATURES,
        }
    }
}

impl FileConfig {
    /// First readable config among the standard locations
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        log::warn!("Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).context("Failed to parse config file")
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("countymap.toml"));
    paths.push(PathBuf::from(".countymap.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("countymap").join("config.toml"));
        paths.push(config_dir.join("countymap.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".countymap.toml"));
        paths.push(home.join(".config").join("countymap").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.span_lat, defaults::SPAN_LAT);
        assert!(config.labels.is_none());
        assert_eq!(LabelConfig::default().marker_distance_m, 60.0);
        assert_eq!(SelectionConfig::default().max_features, 3);
    }

    #[test]
    fn test_from_path_partial_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
lat = 40.0
lon = -75.5

[overpass]
timeout_secs = 60

[labels]
marker_distance_m = 100.0
"#
        )
        .unwrap();

        let config = FileConfig::from_path(file.path()).unwrap();
        assert_eq!(config.lat, Some(40.0));

        let overpass = config.overpass.unwrap();
        assert_eq!(overpass.timeout_secs, 60);
        assert_eq!(overpass.admin_level, "6");

        let labels = config.labels.unwrap();
        assert_eq!(labels.marker_distance_m, 100.0);
        assert_eq!(labels.boundary_fraction, defaults::BOUNDARY_FRACTION);
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileConfig::from_path(&dir.path().join("nope.toml")).is_err());
    }
}
