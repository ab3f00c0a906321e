//! Batch binary for the Beeworld simulation.
//!
//! Loads a terrain map and a parameter file, runs the full parameter sweep
//! (bee counts x nectar amounts x strategies), writes the results table to
//! `parameter_sweep_results.csv`, and logs a per-run summary.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Resolve the map and parameter file paths from the command line
//! 3. Load and validate parameters (a missing file is fatal)
//! 4. Parse the terrain map
//! 5. Run the sweep and persist the results CSV

mod error;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use beeworld_core::{Parameters, log_sweep_report, run_parameter_sweep, write_sweep_csv};
use beeworld_world::{TerrainLayout, WORLD_HEIGHT, WORLD_WIDTH};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Default terrain map path when none is given on the command line.
const DEFAULT_MAP_FILE: &str = "map1.csv";

/// Default parameter file path when none is given on the command line.
const DEFAULT_PARAM_FILE: &str = "para1.csv";

/// Output path for the sweep results table.
const RESULTS_FILE: &str = "parameter_sweep_results.csv";

/// Application entry point for the Beeworld batch sweep.
///
/// # Errors
///
/// Returns an error if the map or parameter file fails to load, or if the
/// results file cannot be written.
fn main() -> Result<(), EngineError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("beeworld-engine starting");

    let mut args = std::env::args().skip(1);
    let map_path = PathBuf::from(args.next().unwrap_or_else(|| String::from(DEFAULT_MAP_FILE)));
    let param_path =
        PathBuf::from(args.next().unwrap_or_else(|| String::from(DEFAULT_PARAM_FILE)));

    let params = Parameters::from_file(&param_path)?;
    info!(
        path = %param_path.display(),
        sim_length = params.sim_length,
        comm_prob = params.comm_prob,
        strategy = %params.strategy,
        "parameters loaded"
    );

    let layout = TerrainLayout::from_file(&map_path, WORLD_WIDTH, WORLD_HEIGHT)?;
    info!(
        path = %map_path.display(),
        features = layout.feature_count(),
        "terrain map loaded"
    );

    let records = run_parameter_sweep(&layout, &params);
    for record in &records {
        info!(
            num_bees = record.num_bees,
            nectar_amount = record.nectar_amount,
            strategy = %record.strategy,
            total_honey = record.total_honey,
            avg_honey_per_bee = format!("{:.2}", record.avg_honey_per_bee),
            success_rate = format!("{:.2}", record.success_rate),
            "sweep result"
        );
    }

    log_sweep_report(&records);

    let file = File::create(RESULTS_FILE)?;
    let mut writer = BufWriter::new(file);
    write_sweep_csv(&records, &mut writer)?;
    info!(path = RESULTS_FILE, runs = records.len(), "results written");

    Ok(())
}
