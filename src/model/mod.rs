//! Classifier loading and inference

pub mod inference;
pub mod loader;

pub use inference::{InferenceEngine, Predictor};
pub use loader::ModelLoader;
