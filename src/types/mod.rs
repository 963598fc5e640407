//! Type definitions for the screening service

pub mod diagnosis;
pub mod sample;

pub use diagnosis::{Diagnosis, PredictionRecord};
pub use sample::CytologySample;
