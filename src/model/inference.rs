//! Inference over the loaded classifier artifact.

use crate::config::AppConfig;
use crate::error::ScreeningError;
use crate::features::FeatureMatrix;
use crate::model::loader::{LoadedModel, ModelLoader};
use ort::value::Tensor;
use std::path::Path;
use std::sync::RwLock;
use tracing::debug;

/// Anything that can turn a feature matrix into raw classifier labels.
///
/// The HTTP layer depends on this seam rather than on the ONNX session, so
/// handlers can be exercised against a deterministic stand-in.
pub trait Predictor: Send + Sync {
    /// Predict one raw label per matrix row.
    ///
    /// Pure and deterministic given the loaded artifact; in-process, no
    /// retries or timeouts.
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<i64>, ScreeningError>;
}

/// Inference engine backed by the ONNX classifier.
pub struct InferenceEngine {
    /// Loaded model (RwLock because session runs need mutable access)
    model: RwLock<LoadedModel>,
}

impl InferenceEngine {
    /// Create an inference engine from configuration.
    pub fn new(config: &AppConfig) -> Result<Self, ScreeningError> {
        Self::from_file(&config.model.path, config.model.onnx_threads)
    }

    /// Create an inference engine from an artifact path.
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        onnx_threads: usize,
    ) -> Result<Self, ScreeningError> {
        let loader = ModelLoader::with_threads(onnx_threads)?;
        let model = loader.load_model(path)?;
        Ok(Self {
            model: RwLock::new(model),
        })
    }
}

impl Predictor for InferenceEngine {
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<i64>, ScreeningError> {
        let rows = features.rows();
        if rows == 0 {
            return Ok(Vec::new());
        }

        let shape = vec![rows as i64, features.cols() as i64];
        let input_tensor = Tensor::from_array((shape, features.as_slice().to_vec()))?;

        let mut guard = self
            .model
            .write()
            .map_err(|e| ScreeningError::Inference(format!("model lock poisoned: {e}")))?;
        let model = &mut *guard;

        let outputs = model
            .session
            .run(ort::inputs![&model.input_name => input_tensor])?;

        let labels = extract_labels(&outputs, &model.label_output, rows)?;

        debug!(rows, "Inference complete");
        Ok(labels)
    }
}

/// Extract one raw label per row from the session outputs.
///
/// Classifier exports emit the label tensor as i64; some runtimes hand back
/// f32, which is rounded. Probability outputs are skipped.
fn extract_labels(
    outputs: &ort::session::SessionOutputs,
    label_output: &str,
    rows: usize,
) -> Result<Vec<i64>, ScreeningError> {
    if let Some(output) = outputs.get(label_output) {
        if let Some(labels) = labels_from_value(output, rows) {
            return Ok(labels);
        }
    }

    // Fallback: scan remaining outputs for a usable label tensor.
    for (name, output) in outputs.iter() {
        if name == label_output || name.contains("prob") {
            continue;
        }
        if let Some(labels) = labels_from_value(&output, rows) {
            debug!(output = %name, "Extracted labels from fallback output");
            return Ok(labels);
        }
    }

    Err(ScreeningError::Inference(format!(
        "no label tensor with {rows} rows in model output"
    )))
}

fn labels_from_value(value: &ort::value::DynValue, rows: usize) -> Option<Vec<i64>> {
    if let Ok((_, data)) = value.try_extract_tensor::<i64>() {
        if data.len() == rows {
            return Some(data.to_vec());
        }
    }
    if let Ok((_, data)) = value.try_extract_tensor::<f32>() {
        if data.len() == rows {
            return Some(data.iter().map(|&v| v.round() as i64).collect());
        }
    }
    None
}
