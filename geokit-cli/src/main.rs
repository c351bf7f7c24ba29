//! geokit: command-line front end for geokit-core.
//!
//! Supports:
//! - Great-circle distance between two points
//! - Geohash encode, decode, and validation
//! - Viewing and saving the defaults in `~/.geokit/config.yaml`

use clap::{Parser, Subcommand};
use comfy_table::{Cell, Table};
use serde::Serialize;
use thiserror::Error;

use geokit_core::{Coordinate, DistanceUnit, GeokitError};

use crate::config::Config;

mod config;

/// Errors surfaced by the binary.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Geokit(#[from] GeokitError),
    #[error("config error: {0}")]
    Config(#[from] std::io::Error),
}

#[derive(Parser)]
#[command(
    name = "geokit",
    version,
    about = "Geohash and great-circle distance toolkit"
)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Great-circle distance between two coordinates
    #[command(allow_negative_numbers = true)]
    Distance {
        start_lat: f64,
        start_lng: f64,
        end_lat: f64,
        end_lng: f64,

        /// "miles" for statute miles; anything else means kilometers
        #[arg(short, long)]
        unit: Option<String>,
    },

    /// Encode a coordinate as a geohash
    #[command(allow_negative_numbers = true)]
    Hash {
        lat: f64,
        lng: f64,

        /// Number of characters in the hash
        #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
        precision: Option<u16>,
    },

    /// Decode a geohash to the centre of its cell
    Decode {
        geohash: String,
    },

    /// Check whether a string is a valid geohash
    Validate {
        geohash: String,
    },

    /// Show or change saved defaults
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Save new defaults
    Set {
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        precision: Option<u16>,

        #[arg(long)]
        unit: Option<String>,
    },
}

#[derive(Serialize)]
struct DistanceOutput {
    start: Coordinate,
    end: Coordinate,
    unit: DistanceUnit,
    distance: f64,
}

#[derive(Serialize)]
struct HashOutput {
    coordinate: Coordinate,
    precision: usize,
    geohash: String,
}

#[derive(Serialize)]
struct ValidateOutput {
    geohash: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Dispatch a parsed command. `Ok(false)` means the command ran but the
/// answer was negative (an invalid geohash).
fn run(cli: Cli) -> Result<bool, CliError> {
    let json = cli.json;

    match cli.command {
        Commands::Distance {
            start_lat,
            start_lng,
            end_lat,
            end_lng,
            unit,
        } => {
            let config = config::load_config().apply_env();
            let unit = unit
                .as_deref()
                .map_or(config.distance.unit, DistanceUnit::from_name);
            cmd_distance(
                Coordinate::new(start_lat, start_lng),
                Coordinate::new(end_lat, end_lng),
                unit,
                json,
            )?;
        }
        Commands::Hash { lat, lng, precision } => {
            let config = config::load_config().apply_env();
            let precision = precision.map_or(config.geohash.precision, usize::from);
            cmd_hash(Coordinate::new(lat, lng), precision, json)?;
        }
        Commands::Decode { geohash } => cmd_decode(&geohash, json)?,
        Commands::Validate { geohash } => return Ok(cmd_validate(&geohash, json)),
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd_config_show(json),
            ConfigAction::Set { precision, unit } => cmd_config_set(precision, unit)?,
        },
    }

    Ok(true)
}

fn cmd_distance(
    start: Coordinate,
    end: Coordinate,
    unit: DistanceUnit,
    json: bool,
) -> Result<(), GeokitError> {
    let d = geokit_core::distance(&start, &end, unit)?;
    tracing::debug!(%start, %end, %unit, distance = d, "computed distance");

    if json {
        print_json(&DistanceOutput {
            start,
            end,
            unit,
            distance: d,
        });
    } else {
        println!("{d:.6} {unit}");
    }
    Ok(())
}

fn cmd_hash(coord: Coordinate, precision: usize, json: bool) -> Result<(), GeokitError> {
    let geohash = geokit_core::hash(&coord, precision)?;

    if json {
        print_json(&HashOutput {
            coordinate: coord,
            precision,
            geohash,
        });
    } else {
        println!("{geohash}");
    }
    Ok(())
}

fn cmd_decode(geohash: &str, json: bool) -> Result<(), GeokitError> {
    let coord = geokit_core::decode_hash(geohash)?;

    if json {
        print_json(&coord);
    } else {
        println!("{:.8} {:.8}", coord.lat, coord.lng);
    }
    Ok(())
}

fn cmd_validate(geohash: &str, json: bool) -> bool {
    let reason = geokit_core::validate_hash(geohash).err().map(|e| match e {
        GeokitError::InvalidGeohash { reason, .. } => reason.to_string(),
        other => other.to_string(),
    });
    let valid = reason.is_none();

    if json {
        print_json(&ValidateOutput {
            geohash: geohash.to_string(),
            valid,
            reason,
        });
    } else {
        match reason {
            None => println!("valid"),
            Some(r) => println!("invalid: {r}"),
        }
    }
    valid
}

fn cmd_config_show(json: bool) {
    let path = config::config_file();
    let config = config::load_config().apply_env();

    if json {
        print_json(&serde_json::json!({
            "path": path.display().to_string(),
            "precision": config.geohash.precision,
            "unit": config.distance.unit,
        }));
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Setting", "Value"]);
    table.add_row(vec![Cell::new("file"), Cell::new(path.display())]);
    table.add_row(vec![
        Cell::new("geohash.precision"),
        Cell::new(config.geohash.precision),
    ]);
    table.add_row(vec![
        Cell::new("distance.unit"),
        Cell::new(config.distance.unit),
    ]);
    println!("{table}");
}

fn cmd_config_set(precision: Option<u16>, unit: Option<String>) -> Result<(), CliError> {
    let mut config: Config = config::load_config();
    if let Some(p) = precision {
        config.geohash.precision = usize::from(p);
    }
    if let Some(u) = unit.as_deref() {
        config.distance.unit = DistanceUnit::from_name(u);
    }

    let path = config::save_config(&config)?;
    println!("Saved {}", path.display());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Error: {e}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("geokit").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_distance_negative_numbers() {
        let cli = parse(&["distance", "-33.86", "151.2", "51.5", "-0.12", "--unit", "miles"]);
        match cli.command {
            Commands::Distance {
                start_lat,
                end_lng,
                unit,
                ..
            } => {
                assert_eq!(start_lat, -33.86);
                assert_eq!(end_lng, -0.12);
                assert_eq!(unit.as_deref(), Some("miles"));
            }
            _ => panic!("expected distance"),
        }
    }

    #[test]
    fn test_parse_hash_precision() {
        let cli = parse(&["hash", "57.64911", "10.40744", "-p", "6", "--json"]);
        assert!(cli.json);
        match cli.command {
            Commands::Hash { precision, .. } => assert_eq!(precision, Some(6)),
            _ => panic!("expected hash"),
        }
    }

    #[test]
    fn test_zero_precision_rejected() {
        let res = Cli::try_parse_from(["geokit", "hash", "0", "0", "--precision", "0"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_parse_config_set() {
        let cli = parse(&["config", "set", "--precision", "8", "--unit", "km"]);
        match cli.command {
            Commands::Config {
                action: ConfigAction::Set { precision, unit },
            } => {
                assert_eq!(precision, Some(8));
                assert_eq!(unit.as_deref(), Some("km"));
            }
            _ => panic!("expected config set"),
        }
    }

    #[test]
    fn test_validate_reports_validity() {
        assert!(cmd_validate("u4pruy", false));
        assert!(!cmd_validate("abc", false));
        assert!(!cmd_validate("", true));
    }

    #[test]
    fn test_invalid_coordinate_surfaces_error() {
        let err = cmd_hash(Coordinate::new(95.0, 0.0), 6, false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "latitude must be within the range -90 to 90"
        );
    }

    #[test]
    fn test_distance_output_json_shape() {
        let out = DistanceOutput {
            start: Coordinate::new(0.0, 0.0),
            end: Coordinate::new(0.0, 1.0),
            unit: DistanceUnit::Miles,
            distance: 69.17,
        };
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "start": {"lat": 0.0, "lng": 0.0},
                "end": {"lat": 0.0, "lng": 1.0},
                "unit": "miles",
                "distance": 69.17,
            })
        );

        let km = serde_json::to_value(DistanceUnit::Kilometers).unwrap();
        assert_eq!(km, serde_json::json!("km"));
    }

    #[test]
    fn test_hash_output_json_shape() {
        let out = HashOutput {
            coordinate: Coordinate::new(57.64911, 10.40744),
            precision: 6,
            geohash: geokit_core::hash(&Coordinate::new(57.64911, 10.40744), 6).unwrap(),
        };
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "coordinate": {"lat": 57.64911, "lng": 10.40744},
                "precision": 6,
                "geohash": "u4pruy",
            })
        );
    }

    #[test]
    fn test_cmd_distance() {
        let origin = Coordinate::new(0.0, 0.0);
        let east = Coordinate::new(10.0, 10.0);
        assert!(cmd_distance(origin, east, DistanceUnit::Kilometers, true).is_ok());

        let bad = Coordinate::new(91.0, 0.0);
        let err = cmd_distance(bad, origin, DistanceUnit::Kilometers, false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Start coordinates: latitude must be within the range -90 to 90"
        );
    }

    #[test]
    fn test_io_failure_maps_to_config_error() {
        let err = CliError::from(std::io::Error::other("denied"));
        assert_eq!(err.to_string(), "config error: denied");
    }

    #[test]
    fn test_decode_rejects_bad_hash() {
        assert!(cmd_decode("hello", false).is_err());
        assert!(cmd_decode("u4pruy", true).is_ok());
    }
}
