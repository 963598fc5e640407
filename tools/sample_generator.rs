//! Screening Sample Generator
//!
//! Writes a CSV of synthetic cytology samples for exercising the batch
//! screening endpoint.

use anyhow::{Context, Result};
use cancer_screening_service::types::sample::FEATURE_COLUMNS;
use rand::Rng;
use tracing::info;

/// Generator for synthetic cytology rows
struct SampleGenerator {
    rng: rand::rngs::ThreadRng,
}

impl SampleGenerator {
    fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }

    /// Generate one row of feature values.
    ///
    /// Suspicious rows skew towards the high end of the 1-10 measurement
    /// scale, unremarkable ones towards the low end.
    fn generate_row(&mut self) -> Vec<String> {
        let suspicious = self.rng.gen_bool(0.3);
        (0..FEATURE_COLUMNS.len())
            .map(|_| {
                let value: u8 = if suspicious {
                    self.rng.gen_range(5..=10)
                } else {
                    self.rng.gen_range(1..=4)
                };
                value.to_string()
            })
            .collect()
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let mut args = std::env::args().skip(1);
    let rows: usize = args
        .next()
        .map(|v| v.parse())
        .transpose()
        .context("Row count must be a number")?
        .unwrap_or(25);
    let path = args
        .next()
        .unwrap_or_else(|| "screening_samples.csv".to_string());

    let mut writer =
        csv::Writer::from_path(&path).with_context(|| format!("Failed to create {path}"))?;

    let mut header = vec!["sample_id"];
    header.extend_from_slice(&FEATURE_COLUMNS);
    writer.write_record(&header)?;

    let mut generator = SampleGenerator::new();
    for i in 0..rows {
        let mut record = vec![format!("p-{:04}", i + 1)];
        record.extend(generator.generate_row());
        writer.write_record(&record)?;
    }
    writer.flush()?;

    info!(rows, path = %path, "Wrote synthetic screening samples");
    Ok(())
}
