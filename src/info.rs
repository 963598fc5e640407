//! Static informational panel content.
//!
//! Read-only reference material served alongside screening: three fixed
//! content choices, no state dependency.

/// Informational panel topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoTopic {
    Statistics,
    Symptoms,
    DiagnosisMethods,
}

impl InfoTopic {
    /// All available topics, in presentation order.
    pub const ALL: [InfoTopic; 3] = [
        InfoTopic::Statistics,
        InfoTopic::Symptoms,
        InfoTopic::DiagnosisMethods,
    ];

    /// Resolve a URL slug to a topic.
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "statistics" => Some(InfoTopic::Statistics),
            "symptoms" => Some(InfoTopic::Symptoms),
            "diagnosis-methods" => Some(InfoTopic::DiagnosisMethods),
            _ => None,
        }
    }

    /// URL slug for the topic.
    pub fn slug(&self) -> &'static str {
        match self {
            InfoTopic::Statistics => "statistics",
            InfoTopic::Symptoms => "symptoms",
            InfoTopic::DiagnosisMethods => "diagnosis-methods",
        }
    }

    /// Panel title.
    pub fn title(&self) -> &'static str {
        match self {
            InfoTopic::Statistics => "Breast Cancer Statistics",
            InfoTopic::Symptoms => "Common Symptoms of Breast Cancer",
            InfoTopic::DiagnosisMethods => "Diagnosis Methods",
        }
    }

    /// Panel body.
    pub fn content(&self) -> &'static str {
        match self {
            InfoTopic::Statistics => {
                "- Breast cancer is the most common cancer among women worldwide.\n\
                 - Approximately 1 in 8 women will be diagnosed with breast cancer in their lifetime.\n\
                 - Early detection can significantly increase the chances of successful treatment."
            }
            InfoTopic::Symptoms => {
                "- A lump or mass in the breast or underarm area.\n\
                 - Changes in the size, shape, or contour of the breast.\n\
                 - Unexplained swelling or irritation of the breast or nipple.\n\
                 - Discharge from the nipple that may be blood-stained or clear fluid."
            }
            InfoTopic::DiagnosisMethods => {
                "- Mammogram: an X-ray of the breast used to detect tumors.\n\
                 - Ultrasound: uses sound waves to create images of the breast.\n\
                 - Biopsy: a sample of breast tissue is examined for cancer cells.\n\
                 - MRI: magnetic resonance imaging for further evaluation of suspicious areas."
            }
        }
    }
}
