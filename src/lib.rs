//! Cancer Screening Service Library
//!
//! An HTTP inference service for breast cancer screening: validates
//! uploaded cytology feature data, runs a pre-trained ONNX classifier,
//! and presents per-sample diagnoses.

pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod info;
pub mod model;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use dataset::ScreeningTable;
pub use error::ScreeningError;
pub use features::{parse_feature_vector, FeatureMatrix};
pub use model::{InferenceEngine, Predictor};
pub use server::{router, AppState};
pub use types::{CytologySample, Diagnosis};
