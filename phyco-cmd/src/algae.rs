//! Algae monitoring reshaper: long-format export in, two feature tables out.

use anyhow::Context;
use log::info;
use phyco_data::pivot::{reshape, Aggregation, FeatureTable};
use phyco_utils::io::open_input;
use phyco_wqx::MonitoringRecord;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// Reshape `input` and write the chlorophyll-bearing rows to `output` and
/// the fully populated rows to `complete_output`.
///
/// When the export has none of the recognised characteristics nothing is
/// written and the command still succeeds.
pub fn run_clean_algae(
    input: &Path,
    output: &Path,
    complete_output: &Path,
    aggregation: Aggregation,
) -> anyhow::Result<()> {
    info!("Reading monitoring records from {}", input.display());
    let reader = open_input(input)?;
    let records = MonitoringRecord::read_csv(reader)
        .with_context(|| format!("Failed to parse monitoring CSV {}", input.display()))?;
    info!("Read {} records (aggregation: {})", records.len(), aggregation);

    let Some(reshaped) = reshape(&records, aggregation) else {
        return Ok(());
    };

    if let Some((first, last)) = reshaped.with_target.date_span() {
        info!("Chlorophyll rows span {} to {}", first, last);
    }

    write_table(&reshaped.with_target, output)?;
    info!("Cleaned data saved to {}", output.display());
    write_table(&reshaped.complete, complete_output)?;
    info!("Complete cleaned data saved to {}", complete_output.display());
    Ok(())
}

fn write_table(table: &FeatureTable, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    table
        .write_csv(BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
