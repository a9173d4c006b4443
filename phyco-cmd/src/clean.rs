//! Generic instrument CSV cleaner.

use anyhow::Context;
use log::info;
use phyco_data::clean::clean_csv;
use phyco_utils::io::open_input;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Clean `input` into `output`, dropping the units row and incomplete records.
pub fn run_clean_csv(input: &Path, output: &Path) -> anyhow::Result<()> {
    let reader = open_input(input)?;
    let file =
        File::create(output).with_context(|| format!("Failed to create {}", output.display()))?;

    let summary = clean_csv(reader, BufWriter::new(file))
        .with_context(|| format!("Failed to clean {}", input.display()))?;

    info!("Original rows: {}", summary.original_rows);
    info!(
        "Rows after cleaning: {} ({} dropped)",
        summary.kept_rows,
        summary.dropped_rows()
    );
    info!("Cleaned data saved to {}", output.display());
    Ok(())
}
