//! Cytology sample data structures for breast cancer screening

use serde::{Deserialize, Serialize};

/// Number of features the classifier was trained on.
pub const FEATURE_COUNT: usize = 9;

/// Required feature columns, in the exact order expected by the model.
///
/// Order matches the training data; `bare_nuclei` (index 5) is integral
/// in the source dataset encoding.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "clump_thickness",
    "uniformity_of_cell_size",
    "uniformity_of_cell_shape",
    "marginal_adhesion",
    "single_epithelial_cell_size",
    "bare_nuclei",
    "bland_chromatin",
    "normal_nucleoli",
    "mitosis",
];

/// Index of the integral-only `bare_nuclei` attribute.
pub const BARE_NUCLEI_INDEX: usize = 5;

/// One cell sample described by the nine cytology measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CytologySample {
    /// Thickness of the cell clump
    pub clump_thickness: f32,

    /// Uniformity of cell size
    pub uniformity_of_cell_size: f32,

    /// Uniformity of cell shape
    pub uniformity_of_cell_shape: f32,

    /// Marginal adhesion
    pub marginal_adhesion: f32,

    /// Single epithelial cell size
    pub single_epithelial_cell_size: f32,

    /// Bare nuclei count (integral in the dataset encoding)
    pub bare_nuclei: i64,

    /// Bland chromatin
    pub bland_chromatin: f32,

    /// Normal nucleoli
    pub normal_nucleoli: f32,

    /// Mitosis rate
    pub mitosis: f32,
}

impl CytologySample {
    /// Build a sample from values in canonical column order.
    ///
    /// `bare_nuclei` is taken separately so callers cannot lose the integral
    /// constraint on the way in.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        clump_thickness: f32,
        uniformity_of_cell_size: f32,
        uniformity_of_cell_shape: f32,
        marginal_adhesion: f32,
        single_epithelial_cell_size: f32,
        bare_nuclei: i64,
        bland_chromatin: f32,
        normal_nucleoli: f32,
        mitosis: f32,
    ) -> Self {
        Self {
            clump_thickness,
            uniformity_of_cell_size,
            uniformity_of_cell_shape,
            marginal_adhesion,
            single_epithelial_cell_size,
            bare_nuclei,
            bland_chromatin,
            normal_nucleoli,
            mitosis,
        }
    }

    /// Return the model input row in canonical column order.
    pub fn features(&self) -> [f32; FEATURE_COUNT] {
        [
            self.clump_thickness,
            self.uniformity_of_cell_size,
            self.uniformity_of_cell_shape,
            self.marginal_adhesion,
            self.single_epithelial_cell_size,
            self.bare_nuclei as f32,
            self.bland_chromatin,
            self.normal_nucleoli,
            self.mitosis,
        ]
    }
}
