//! WRF grid check.
//!
//! Reconstructs the Lambert Conformal grid of one WRF output file from its
//! global attributes and reports how well it agrees with the file's own
//! `XLONG`/`XLAT` fields.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use wrf_dataset::{MemoryDataset, WrfDataset};
use wrf_grid::{reproduce_grid, GridCheckConfig};

#[derive(Parser, Debug)]
#[command(name = "wrf-grid-check")]
#[command(about = "Reconstruct a WRF grid and check it against the stored lat/lon")]
struct Args {
    /// wrfout file (NetCDF) or JSON dataset dump
    dataset: PathBuf,

    /// Configuration file path (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Allow WRF_* overrides from a .env file
    dotenvy::dotenv().ok();

    let config = match &args.config {
        Some(path) => GridCheckConfig::from_yaml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => GridCheckConfig::default(),
    }
    .with_env_overrides();

    info!(
        dataset = %args.dataset.display(),
        sphere_radius = config.sphere_radius,
        reference = %config.reference_datum,
        "Starting grid check"
    );

    let dataset = open_dataset(&args.dataset)?;
    let grid = reproduce_grid(dataset.as_ref(), &config)
        .with_context(|| format!("reproducing grid of {}", args.dataset.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&grid.report)?);
    } else {
        print!("{}", grid.report);
    }

    Ok(())
}

/// Open a dataset by extension: `.json` dumps in memory, anything else as NetCDF.
fn open_dataset(path: &Path) -> Result<Box<dyn WrfDataset>> {
    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
        let dataset = MemoryDataset::from_json_file(path)
            .with_context(|| format!("reading {}", path.display()))?;
        return Ok(Box::new(dataset));
    }

    open_netcdf(path)
}

#[cfg(feature = "netcdf")]
fn open_netcdf(path: &Path) -> Result<Box<dyn WrfDataset>> {
    let dataset = wrf_dataset::NetCdfDataset::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    Ok(Box::new(dataset))
}

#[cfg(not(feature = "netcdf"))]
fn open_netcdf(path: &Path) -> Result<Box<dyn WrfDataset>> {
    anyhow::bail!(
        "{} is not a JSON dump and NetCDF support was not compiled in (enable the `netcdf` feature)",
        path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "wrf-grid-check",
            "wrfout_d01.json",
            "--json",
            "--config",
            "grid-check.yaml",
        ])
        .unwrap();
        assert_eq!(args.dataset, PathBuf::from("wrfout_d01.json"));
        assert!(args.json);
        assert_eq!(args.config, Some(PathBuf::from("grid-check.yaml")));
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_open_json_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wrfout_d01.JSON");
        std::fs::write(&path, r#"{ "attributes": { "MAP_PROJ": 1 } }"#).unwrap();

        let dataset = open_dataset(&path).unwrap();
        assert_eq!(dataset.attribute_i64("MAP_PROJ").unwrap(), 1);
    }

    #[test]
    fn test_open_missing_dataset() {
        assert!(open_dataset(Path::new("/nonexistent/wrfout_d01.json")).is_err());
        assert!(open_dataset(Path::new("/nonexistent/wrfout_d01")).is_err());
    }
}
