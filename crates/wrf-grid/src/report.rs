//! Rendering of discrepancy reports.

use std::fmt;

use tracing::info;

use crate::consistency::{ComponentStats, DirectionStats, DiscrepancyReport};

fn component_labels(stats: &DirectionStats) -> (&'static str, &'static str) {
    if stats.target_is_geographic {
        ("longitude", "latitude")
    } else {
        ("x", "y")
    }
}

fn write_component(f: &mut fmt::Formatter<'_>, label: &str, stats: &ComponentStats) -> fmt::Result {
    writeln!(f, "      sum {} error:  {:.6e}", label, stats.sum)?;
    writeln!(f, "      mean {} error: {:.6e}", label, stats.mean)?;
    match stats.argmax {
        Some((row, col)) => writeln!(
            f,
            "      max {} error:  {:.6e} at ({}, {})",
            label, stats.max, row, col
        )?,
        None => writeln!(f, "      max {} error:  n/a", label)?,
    }
    if stats.skipped > 0 {
        writeln!(f, "      skipped {} values: {}", label, stats.skipped)?;
    }
    Ok(())
}

impl fmt::Display for DiscrepancyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid consistency")?;
        writeln!(f, "  source: {}", self.source_projection)?;
        writeln!(f, "  target: {}", self.target_projection)?;

        for entry in &self.variants {
            writeln!(f, "  {}", entry.variant)?;
            for stats in [&entry.forward, &entry.inverse] {
                writeln!(f, "    {}", stats.direction)?;
                let (x_label, y_label) = component_labels(stats);
                write_component(f, x_label, &stats.x)?;
                write_component(f, y_label, &stats.y)?;
            }
        }

        Ok(())
    }
}

/// Emit one structured event per variant and direction.
pub fn log_report(report: &DiscrepancyReport) {
    for entry in &report.variants {
        for stats in [&entry.forward, &entry.inverse] {
            let (x_label, y_label) = component_labels(stats);
            info!(
                variant = %entry.variant,
                direction = %stats.direction,
                x_component = x_label,
                y_component = y_label,
                x_sum = stats.x.sum,
                x_mean = stats.x.mean,
                x_max = stats.x.max,
                x_argmax = ?stats.x.argmax,
                y_sum = stats.y.sum,
                y_mean = stats.y.mean,
                y_max = stats.y.max,
                y_argmax = ?stats.y.argmax,
                skipped = stats.x.skipped + stats.y.skipped,
                "Grid discrepancy"
            );
        }
    }
}
