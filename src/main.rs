use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Instant;

use countymap::api::OverpassClient;
use countymap::config::{FileConfig, defaults};
use countymap::domain::{Coordinate, Viewport};
use countymap::engine::CountySelectionEngine;
use countymap::export::{to_feature_collection, write_geojson};
use countymap::geometry::haversine_m;

/// Find the counties around a point and place their labels
///
/// Examples:
///   # Counties around Philadelphia
///   countymap --lat 39.9526 --lon -75.1652
///
///   # Wider view, with a location marker at the map center
///   countymap --lat 39.9526 --lon -75.1652 --span-lat 0.6 --span-lon 0.8 --mark-center
///
///   # Make a neighbouring county the main one and export GeoJSON
///   countymap --lat 39.9526 --lon -75.1652 --select 188472 --geojson counties.geojson
///
///   # Use a config file
///   countymap --config my-settings.toml
#[derive(Parser, Debug)]
#[command(name = "countymap")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches countymap.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Latitude of the map center (use with --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of the map center (use with --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Viewport height in degrees of latitude
    #[arg(long)]
    span_lat: Option<f64>,

    /// Viewport width in degrees of longitude
    #[arg(long)]
    span_lon: Option<f64>,

    /// Latitude of a location marker labels must stay clear of
    #[arg(long, requires = "marker_lon", allow_hyphen_values = true)]
    marker_lat: Option<f64>,

    /// Longitude of a location marker labels must stay clear of
    #[arg(long, requires = "marker_lat", allow_hyphen_values = true)]
    marker_lon: Option<f64>,

    /// Put the location marker at the map center
    #[arg(long, conflicts_with = "marker_lat")]
    mark_center: bool,

    /// Relation id of a loaded county to make the main county
    #[arg(long)]
    select: Option<u64>,

    /// Write the selection and labels as GeoJSON
    #[arg(long)]
    geojson: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();
    let env_filter = init_logging(args.verbose);

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            Some(FileConfig::from_path(config_path)?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };

    let verbose = args.verbose || file_config.as_ref().map(|c| c.verbose).unwrap_or(false);
    if verbose && !env_filter {
        log::set_max_level(LevelFilter::Debug);
    }

    let lat = args.lat.or_else(|| file_config.as_ref().and_then(|c| c.lat));
    let lon = args.lon.or_else(|| file_config.as_ref().and_then(|c| c.lon));
    let (Some(lat), Some(lon)) = (lat, lon) else {
        bail!("Must provide --lat and --lon (or set lat/lon in the config file)");
    };

    let span_lat = args
        .span_lat
        .or_else(|| file_config.as_ref().map(|c| c.span_lat))
        .unwrap_or(defaults::SPAN_LAT);
    let span_lon = args
        .span_lon
        .or_else(|| file_config.as_ref().map(|c| c.span_lon))
        .unwrap_or(defaults::SPAN_LON);
    if span_lat <= 0.0 || span_lon <= 0.0 {
        bail!("Viewport spans must be positive (got {} x {})", span_lat, span_lon);
    }

    let geojson = args
        .geojson
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.geojson.clone()));

    let overpass_config = file_config
        .as_ref()
        .and_then(|c| c.overpass.clone())
        .unwrap_or_default();
    let label_config = file_config
        .as_ref()
        .and_then(|c| c.labels.clone())
        .unwrap_or_default();
    let selection_config = file_config
        .as_ref()
        .and_then(|c| c.selection.clone())
        .unwrap_or_default();

    let center = Coordinate::new(lat, lon);
    let marker = match (args.marker_lat, args.marker_lon) {
        (Some(mlat), Some(mlon)) => Some(Coordinate::new(mlat, mlon)),
        _ if args.mark_center => Some(center),
        _ => None,
    };

    println!("countymap - County Finder");
    println!("=========================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Center: ({:.4}, {:.4})", lat, lon);
        println!("  Viewport: {}° x {}°", span_lat, span_lon);
        if let Some(m) = marker {
            println!("  Marker: ({:.4}, {:.4})", m.lat, m.lng);
        }
        println!("  Overpass: {}", overpass_config.url);
        println!("  Search radius: {}°", overpass_config.search_radius_deg);
        println!("  Max counties: {}", selection_config.max_features);
        println!();
    }

    let client = OverpassClient::new(overpass_config).context("Failed to create HTTP client")?;
    let mut engine = CountySelectionEngine::new(label_config, selection_config);

    let step_start = Instant::now();
    let spinner = create_spinner("Finding county at map center...");
    let outcome = match engine.load_near(&client, center) {
        Ok(outcome) => outcome,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e).context(engine.status().to_string());
        }
    };
    spinner.finish_with_message(format!(
        "{} [{:.1}s]",
        engine.status(),
        step_start.elapsed().as_secs_f64()
    ));

    let viewport = Viewport::around(center, span_lat, span_lon);

    let step_start = Instant::now();
    let spinner = create_spinner("Placing labels...");
    let placed = engine.on_viewport_changed(&viewport, marker).len();
    spinner.finish_with_message(format!(
        "Placed {} of {} labels [{:.1}s]",
        placed,
        outcome.feature_ids.len(),
        step_start.elapsed().as_secs_f64()
    ));

    if let Some(id) = args.select {
        let switched = engine
            .on_feature_activated(id, &viewport, marker)
            .context("Failed to change the main county")?;
        if switched {
            println!("Main county is now {}", id);
        } else {
            println!("{} is already the main county", id);
        }
    }

    println!();
    print_summary(&engine, center);

    if let Some(path) = geojson {
        let collection = to_feature_collection(engine.features(), engine.labels());
        write_geojson(&path, &collection)?;
        println!();
        println!("Output: {}", path.display());
    }

    println!(
        "Total time: {:.1}s",
        total_start.elapsed().as_secs_f64()
    );

    Ok(())
}

fn print_summary(engine: &CountySelectionEngine, center: Coordinate) {
    let state = engine
        .state_info()
        .map(|s| s.name.as_str())
        .unwrap_or("unknown");
    println!("State: {}", state);
    println!();

    for feature in engine.features() {
        let marker = if feature.is_main() { "*" } else { " " };
        let km = haversine_m(center, feature.centroid()) / 1000.0;
        let label = engine
            .labels()
            .iter()
            .find(|l| l.feature_id == feature.id)
            .map(|l| format!("label at ({:.4}, {:.4})", l.position.lat, l.position.lng))
            .unwrap_or_else(|| "no label".to_string());

        println!(
            "{} {:>10}  {:<28} {:>7.1} km  {}",
            marker, feature.id, feature.name, km, label
        );
    }
    println!();
    println!("{}", engine.status());
}

/// Start the logger before the config is read so its warnings are shown.
///
/// Without `RUST_LOG` the logger itself passes debug records and
/// `log::max_level` does the filtering, so a `verbose` flag found in the
/// config file can still raise it. Returns true when `RUST_LOG` is in charge.
fn init_logging(verbose: bool) -> bool {
    let env_filter = std::env::var_os("RUST_LOG").is_some();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .init();
    if !env_filter {
        let level = if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        };
        log::set_max_level(level);
    }
    env_filter
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
