//! ONNX classifier artifact loader.
//!
//! The artifact is an explicit, versioned ONNX export of the trained
//! classifier. It is validated before use: one graph input whose trailing
//! dimension matches the feature count, and a resolvable label output.

use crate::error::ScreeningError;
use crate::types::sample::FEATURE_COUNT;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::ValueType;
use std::path::Path;
use tracing::info;

/// Loaded classifier with resolved graph names.
pub struct LoadedModel {
    /// ONNX Runtime session
    pub session: Session,
    /// Input name for the feature matrix
    pub input_name: String,
    /// Output name carrying the predicted labels
    pub label_output: String,
}

/// Loader for the classifier artifact.
pub struct ModelLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ModelLoader {
    /// Create a new model loader with default settings (1 thread).
    pub fn new() -> Result<Self, ScreeningError> {
        Self::with_threads(1)
    }

    /// Create a new model loader with the given number of intra-op threads.
    pub fn with_threads(onnx_threads: usize) -> Result<Self, ScreeningError> {
        ort::init().commit()?;
        info!(onnx_threads, "ONNX Runtime initialized");
        Ok(Self { onnx_threads })
    }

    /// Load and validate the classifier artifact.
    pub fn load_model<P: AsRef<Path>>(&self, path: P) -> Result<LoadedModel, ScreeningError> {
        let path = path.as_ref();

        info!(path = %path.display(), threads = self.onnx_threads, "Loading classifier artifact");

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(self.onnx_threads)?
            .commit_from_file(path)
            .map_err(|e| {
                ScreeningError::InvalidArtifact(format!(
                    "failed to load {}: {e}",
                    path.display()
                ))
            })?;

        let (input_name, label_output) = resolve_graph_names(&session)?;

        info!(
            input = %input_name,
            label_output = %label_output,
            features = FEATURE_COUNT,
            "Classifier artifact validated"
        );

        Ok(LoadedModel {
            session,
            input_name,
            label_output,
        })
    }
}

/// Validate graph shape and resolve the input and label-output names.
fn resolve_graph_names(session: &Session) -> Result<(String, String), ScreeningError> {
    if session.inputs.len() != 1 {
        return Err(ScreeningError::InvalidArtifact(format!(
            "expected exactly one graph input, found {}",
            session.inputs.len()
        )));
    }
    let input = &session.inputs[0];

    // Trailing dimension must match the feature count; a negative dimension
    // is dynamic and accepted.
    match &input.input_type {
        ValueType::Tensor { shape, .. } => {
            if let Some(&dim) = shape.iter().last() {
                if dim >= 0 && dim != FEATURE_COUNT as i64 {
                    return Err(ScreeningError::InvalidArtifact(format!(
                        "model expects {dim} features per row, this service provides {FEATURE_COUNT}"
                    )));
                }
            }
        }
        other => {
            return Err(ScreeningError::InvalidArtifact(format!(
                "graph input '{}' is not a tensor: {other:?}",
                input.name
            )));
        }
    }

    // Classifier exports name the label output "label" or "output_label";
    // fall back to the first non-probability output.
    let label_output = session
        .outputs
        .iter()
        .find(|o| o.name.contains("label"))
        .or_else(|| session.outputs.iter().find(|o| !o.name.contains("prob")))
        .map(|o| o.name.clone())
        .ok_or_else(|| {
            ScreeningError::InvalidArtifact("model has no usable outputs".to_string())
        })?;

    Ok((input.name.clone(), label_output))
}
