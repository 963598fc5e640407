//! Diagnosis labels derived from raw classifier output

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw label the classifier emits for a malignant sample.
///
/// Carried over from the source dataset's encoding: 4 means malignant,
/// any other value means benign. External contract, not configurable.
pub const POSITIVE_LABEL: i64 = 4;

/// Screening diagnosis for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Diagnosis {
    Positive,
    Negative,
}

impl Diagnosis {
    /// Classify a raw model label.
    pub fn from_label(label: i64) -> Self {
        if label == POSITIVE_LABEL {
            Diagnosis::Positive
        } else {
            Diagnosis::Negative
        }
    }

    /// Human-readable report string shown to the user and written into the
    /// downloaded table.
    pub fn report_str(&self) -> &'static str {
        match self {
            Diagnosis::Positive => "Positive for Cancer",
            Diagnosis::Negative => "Negative for Cancer",
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.report_str())
    }
}

/// One screened row: sample position (1-based, as presented to the user)
/// plus its diagnosis. Created per input row, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRecord {
    /// 1-based position of the sample in the submitted table
    pub patient: usize,
    /// Derived diagnosis
    pub diagnosis: Diagnosis,
}

impl PredictionRecord {
    /// Build a record from a 0-based row index and a raw model label.
    pub fn from_label(row: usize, label: i64) -> Self {
        Self {
            patient: row + 1,
            diagnosis: Diagnosis::from_label(label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnosis_from_label() {
        assert_eq!(Diagnosis::from_label(4), Diagnosis::Positive);
        assert_eq!(Diagnosis::from_label(2), Diagnosis::Negative);
        assert_eq!(Diagnosis::from_label(0), Diagnosis::Negative);
        assert_eq!(Diagnosis::from_label(-1), Diagnosis::Negative);
    }

    #[test]
    fn test_report_strings() {
        assert_eq!(Diagnosis::Positive.report_str(), "Positive for Cancer");
        assert_eq!(Diagnosis::Negative.report_str(), "Negative for Cancer");
    }

    #[test]
    fn test_prediction_record_numbering() {
        let record = PredictionRecord::from_label(0, 4);
        assert_eq!(record.patient, 1);
        assert_eq!(record.diagnosis, Diagnosis::Positive);
    }
}
