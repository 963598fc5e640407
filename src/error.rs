//! Error types for the screening service

use thiserror::Error;

/// Errors that can occur while validating input or running inference.
///
/// Every variant keeps a message distinguishable from the others; the HTTP
/// layer maps them onto status codes and the messages are surfaced to the
/// caller verbatim.
#[derive(Debug, Error)]
pub enum ScreeningError {
    /// The uploaded table is missing one or more required columns.
    #[error("uploaded table is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The uploaded table validated its header but contains no data rows.
    #[error("uploaded table contains no data rows")]
    EmptyTable,

    /// A cell in the uploaded table could not be parsed as a feature value.
    #[error("invalid value {value:?} for column '{column}' in row {row}")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
    },

    /// The single-vector input had the wrong number of values.
    #[error("expected exactly {expected} comma-separated values, got {actual}")]
    WrongValueCount { expected: usize, actual: usize },

    /// A token in the single-vector input was not numeric.
    #[error("invalid input format: value {value:?} at position {position} is not numeric")]
    InvalidToken { position: usize, value: String },

    /// The 6th value must be an integer per the dataset encoding.
    #[error("invalid input format: value {value:?} at position {position} must be an integer")]
    NonIntegralToken { position: usize, value: String },

    /// Failure reading the delimited input itself.
    #[error("malformed delimited input: {0}")]
    Csv(#[from] csv::Error),

    /// The model artifact failed validation at load time.
    #[error("model artifact rejected: {0}")]
    InvalidArtifact(String),

    /// Inference produced output the engine could not interpret.
    #[error("inference failed: {0}")]
    Inference(String),

    /// ONNX Runtime error during load or inference.
    #[error("model runtime error: {0}")]
    Runtime(#[from] ort::Error),

    /// Screening was requested after the session ended.
    #[error("screening session has ended; restart the service to resume")]
    SessionEnded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_distinguishable() {
        let missing = ScreeningError::MissingColumns(vec!["bare_nuclei".into()]);
        let count = ScreeningError::WrongValueCount {
            expected: 9,
            actual: 8,
        };
        let token = ScreeningError::InvalidToken {
            position: 1,
            value: "a".into(),
        };

        assert!(missing.to_string().contains("missing required columns"));
        assert!(missing.to_string().contains("bare_nuclei"));
        assert!(count.to_string().contains("exactly 9"));
        assert!(token.to_string().contains("not numeric"));
        assert_ne!(missing.to_string(), token.to_string());
    }
}
