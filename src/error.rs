//! Error types for eligibility calculation and limit/case loading

use thiserror::Error;

/// Failures raised while evaluating a case
///
/// `MissingRequiredData` and `UnsupportedScenario` mean the answer is not
/// known yet, which is different from a case being ineligible.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EligibilityError {
    #[error("required data missing: {0}")]
    MissingRequiredData(String),

    #[error("unsupported scenario: {0}")]
    UnsupportedScenario(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl EligibilityError {
    /// True when the failure should be reported as an `unknown` outcome
    pub fn is_unknown_outcome(&self) -> bool {
        matches!(
            self,
            EligibilityError::MissingRequiredData(_) | EligibilityError::UnsupportedScenario(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, EligibilityError>;

/// Failures raised while loading limit tables or case files
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parse error in {file}: {message}")]
    Parse { file: String, message: String },

    #[error("invalid step table {name}: {message}")]
    Table { name: String, message: String },

    #[error(transparent)]
    Invalid(#[from] EligibilityError),
}
