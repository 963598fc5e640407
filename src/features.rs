//! Feature vector parsing and the model input matrix.
//!
//! Normalizes both input modes into the fixed-width numeric form the
//! classifier expects: nine values per row, canonical column order,
//! integral `bare_nuclei`.

use crate::error::ScreeningError;
use crate::types::sample::{BARE_NUCLEI_INDEX, FEATURE_COUNT};
use crate::types::CytologySample;

/// Row-major N×9 matrix handed to the predictor.
///
/// Shape travels with the data so the engine can build the input tensor
/// without re-deriving dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    rows: usize,
    values: Vec<f32>,
}

impl FeatureMatrix {
    /// Build a matrix from parsed samples.
    pub fn from_samples(samples: &[CytologySample]) -> Self {
        let mut values = Vec::with_capacity(samples.len() * FEATURE_COUNT);
        for sample in samples {
            values.extend_from_slice(&sample.features());
        }
        Self {
            rows: samples.len(),
            values,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (always the model's feature count).
    pub fn cols(&self) -> usize {
        FEATURE_COUNT
    }

    /// Flat row-major view of the values.
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Consume the matrix into its flat buffer.
    pub fn into_values(self) -> Vec<f32> {
        self.values
    }
}

/// Parse a single comma-separated feature vector.
///
/// Exactly nine values; whitespace around tokens is tolerated. The value at
/// `bare_nuclei` position is parsed as an integer, everything else as a
/// float. Either the whole line parses or no sample is produced.
pub fn parse_feature_vector(line: &str) -> Result<CytologySample, ScreeningError> {
    let tokens: Vec<&str> = line.split(',').map(str::trim).collect();

    if tokens.len() != FEATURE_COUNT {
        return Err(ScreeningError::WrongValueCount {
            expected: FEATURE_COUNT,
            actual: tokens.len(),
        });
    }

    let mut values = [0.0f32; FEATURE_COUNT];
    let mut bare_nuclei = 0i64;

    for (i, token) in tokens.iter().enumerate() {
        if i == BARE_NUCLEI_INDEX {
            bare_nuclei =
                token
                    .parse::<i64>()
                    .map_err(|_| ScreeningError::NonIntegralToken {
                        position: i + 1,
                        value: (*token).to_string(),
                    })?;
            values[i] = bare_nuclei as f32;
        } else {
            values[i] = token
                .parse::<f32>()
                .map_err(|_| ScreeningError::InvalidToken {
                    position: i + 1,
                    value: (*token).to_string(),
                })?;
        }
    }

    Ok(CytologySample::new(
        values[0],
        values[1],
        values[2],
        values[3],
        values[4],
        bare_nuclei,
        values[6],
        values[7],
        values[8],
    ))
}
