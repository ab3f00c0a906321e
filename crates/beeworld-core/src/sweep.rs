//! The batch parameter sweep.
//!
//! Runs one simulation per combination of bee count, nectar amount, and
//! strategy, collecting a [`SweepRecord`] per run and writing the results
//! as a flat CSV table.

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::info;

use beeworld_types::Strategy;
use beeworld_world::TerrainLayout;

use crate::params::Parameters;
use crate::simulation::Simulation;

/// Bee counts the sweep iterates, in order.
pub const SWEEP_BEE_COUNTS: [u32; 3] = [5, 10, 15];

/// Initial nectar amounts the sweep iterates, in order.
pub const SWEEP_NECTAR_AMOUNTS: [u32; 3] = [50, 100, 200];

/// One row of sweep output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRecord {
    /// Roster size for the run.
    pub num_bees: u32,
    /// Initial nectar per flower for the run.
    pub nectar_amount: u32,
    /// Strategy for the run.
    pub strategy: Strategy,
    /// Total honey deposited over the run.
    pub total_honey: u32,
    /// Total honey divided by the roster size.
    pub avg_honey_per_bee: f64,
    /// Fraction of bees that ever carried or accumulated nectar.
    pub success_rate: f64,
}

/// Run the full sweep grid against one terrain layout.
///
/// Every run inherits `base` (notably `sim_length`, `comm_prob`, and the
/// seed) and overrides the three swept axes. Records come back in sweep
/// order: bee count outermost, then nectar amount, then strategy.
pub fn run_parameter_sweep(layout: &TerrainLayout, base: &Parameters) -> Vec<SweepRecord> {
    let mut records = Vec::new();

    for num_bees in SWEEP_BEE_COUNTS {
        for nectar_amount in SWEEP_NECTAR_AMOUNTS {
            for strategy in Strategy::ALL {
                let params = Parameters {
                    num_bees,
                    nectar_amount,
                    strategy,
                    ..base.clone()
                };
                let mut sim = Simulation::new(layout.clone(), params);
                sim.run();
                let summary = sim.summary();
                info!(
                    num_bees,
                    nectar_amount,
                    %strategy,
                    total_honey = summary.total_honey,
                    "sweep run complete"
                );
                records.push(SweepRecord {
                    num_bees,
                    nectar_amount,
                    strategy,
                    total_honey: summary.total_honey,
                    avg_honey_per_bee: summary.avg_honey_per_bee,
                    success_rate: summary.success_rate,
                });
            }
        }
    }

    records
}

/// Log a grouped summary of sweep results.
///
/// For each (strategy, nectar amount) pair, reports the mean honey-per-bee
/// and mean success rate across the swept bee counts.
pub fn log_sweep_report(records: &[SweepRecord]) {
    for strategy in Strategy::ALL {
        for nectar_amount in SWEEP_NECTAR_AMOUNTS {
            let (runs, honey_sum, success_sum) = records
                .iter()
                .filter(|r| r.strategy == strategy && r.nectar_amount == nectar_amount)
                .fold((0_u32, 0.0_f64, 0.0_f64), |(n, honey, success), r| {
                    (
                        n.saturating_add(1),
                        honey + r.avg_honey_per_bee,
                        success + r.success_rate,
                    )
                });
            if runs == 0 {
                continue;
            }
            let runs = f64::from(runs);
            info!(
                %strategy,
                nectar_amount,
                avg_honey_per_bee = format!("{:.2}", honey_sum / runs),
                success_rate = format!("{:.2}", success_sum / runs),
                "sweep summary"
            );
        }
    }
}

/// Write sweep records as a CSV table with a header row.
///
/// # Errors
///
/// Returns any I/O error from the underlying writer.
pub fn write_sweep_csv<W: Write>(records: &[SweepRecord], writer: &mut W) -> std::io::Result<()> {
    writeln!(
        writer,
        "num_bees,nectar_amount,strategy_type,total_honey,avg_honey_per_bee,success_rate"
    )?;
    for record in records {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            record.num_bees,
            record.nectar_amount,
            record.strategy,
            record.total_honey,
            record.avg_honey_per_bee,
            record.success_rate,
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use beeworld_world::{WORLD_HEIGHT, WORLD_WIDTH};

    use super::*;

    const MAP: &str = "\
kind,x,y,name,color
flower,21,21,rose,red
";

    fn layout() -> TerrainLayout {
        TerrainLayout::parse(MAP, WORLD_WIDTH, WORLD_HEIGHT).unwrap()
    }

    fn base() -> Parameters {
        Parameters {
            sim_length: 3,
            ..Parameters::default()
        }
    }

    #[test]
    fn sweep_covers_the_full_grid() {
        let records = run_parameter_sweep(&layout(), &base());
        assert_eq!(records.len(), 27);

        // Outermost axis is the bee count.
        assert_eq!(records.first().map(|r| r.num_bees), Some(5));
        assert_eq!(records.last().map(|r| r.num_bees), Some(15));

        for count in SWEEP_BEE_COUNTS {
            let with_count = records.iter().filter(|r| r.num_bees == count).count();
            assert_eq!(with_count, 9);
        }
        for strategy in Strategy::ALL {
            let with_strategy = records.iter().filter(|r| r.strategy == strategy).count();
            assert_eq!(with_strategy, 9);
        }
    }

    #[test]
    fn csv_output_has_header_and_one_row_per_record() {
        let records = run_parameter_sweep(&layout(), &base());
        let mut out = Vec::new();
        let written = write_sweep_csv(&records, &mut out);
        assert!(written.is_ok());

        let text = String::from_utf8(out).unwrap_or_default();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("num_bees,nectar_amount,strategy_type,total_honey,avg_honey_per_bee,success_rate")
        );
        assert_eq!(lines.count(), 27);
    }

    #[test]
    fn csv_rows_name_strategies_in_lowercase() {
        let records = vec![SweepRecord {
            num_bees: 5,
            nectar_amount: 50,
            strategy: Strategy::Intelligent,
            total_honey: 12,
            avg_honey_per_bee: 2.4,
            success_rate: 0.6,
        }];
        let mut out = Vec::new();
        let written = write_sweep_csv(&records, &mut out);
        assert!(written.is_ok());
        let text = String::from_utf8(out).unwrap_or_default();
        assert!(text.contains("5,50,intelligent,12,2.4,0.6"));
    }
}
