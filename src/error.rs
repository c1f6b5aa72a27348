//! Error handling for Drømmekopp
//!
//! Invalid input never touches the layer store: every operation validates
//! before it mutates, so an error always leaves the cup as it was.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for Drømmekopp operations
pub type Result<T> = std::result::Result<T, CupError>;

/// Main error type for Drømmekopp operations
#[derive(Error, Debug)]
pub enum CupError {
    // Input Errors
    #[error("Invalid ingredient: {reason}")]
    InvalidIngredient { reason: String },

    #[error("Invalid color value: '{value}'")]
    InvalidColor { value: String },

    // Session Errors
    #[error("Unknown ingredient id: {id}")]
    UnknownIngredient { id: u32 },

    #[error("No ingredient is selected")]
    NothingSelected,

    #[error("Selection index {index} out of range (list holds {len})")]
    SelectionOutOfRange { index: usize, len: usize },

    #[error("Invalid step '{input}': expected add:<id>, remove:<position> or clear")]
    InvalidStep { input: String },

    // Configuration Errors
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Failed to read file: {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CupError {
    /// Shorthand for an [`CupError::InvalidIngredient`] with a formatted reason
    pub fn invalid_ingredient(reason: impl Into<String>) -> Self {
        CupError::InvalidIngredient {
            reason: reason.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            CupError::InvalidIngredient { .. } => "INVALID_INGREDIENT",
            CupError::InvalidColor { .. } => "INVALID_COLOR",
            CupError::UnknownIngredient { .. } => "UNKNOWN_INGREDIENT",
            CupError::NothingSelected => "NOTHING_SELECTED",
            CupError::SelectionOutOfRange { .. } => "SELECTION_OUT_OF_RANGE",
            CupError::InvalidStep { .. } => "INVALID_STEP",
            CupError::InvalidConfig { .. } => "INVALID_CONFIG",
            CupError::FileRead { .. } => "FILE_READ_ERROR",
            CupError::Io(_) => "IO_ERROR",
            CupError::Json(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error is recoverable
    ///
    /// Recoverable errors are the ones a UI can log and ignore: the cup is
    /// untouched and the user can simply pick something else.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CupError::InvalidIngredient { .. }
                | CupError::InvalidColor { .. }
                | CupError::UnknownIngredient { .. }
                | CupError::NothingSelected
                | CupError::SelectionOutOfRange { .. }
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            CupError::InvalidIngredient { .. } => vec![
                "Check that the ingredient has an id, a color and a fill level",
                "Fill levels must be numeric and not negative",
            ],
            CupError::InvalidColor { .. } => vec![
                "Use a hex color such as #6f4e37 or #fff",
                "Update the ingredient color in the admin dashboard",
            ],
            CupError::UnknownIngredient { .. } => vec![
                "Refresh the ingredient catalog",
                "The ingredient may have been removed by an administrator",
            ],
            CupError::NothingSelected => vec!["Pick an ingredient from the list first"],
            CupError::SelectionOutOfRange { .. } => {
                vec!["The selection list changed; refresh and try again"]
            }
            CupError::InvalidConfig { .. } => vec![
                "Capacity must be between 1 and 100",
                "Animation timings must be finite and not negative",
            ],
            CupError::FileRead { .. } => vec![
                "Check the file path is correct",
                "Verify the file is readable",
            ],
            _ => vec![],
        }
    }
}
