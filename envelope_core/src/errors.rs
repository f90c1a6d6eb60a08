//! # Error Types
//!
//! Structured error types for envelope_core. These errors are designed to be
//! informative for both humans and machine consumers, providing enough context
//! to understand and fix issues programmatically.
//!
//! Only genuine failures travel through [`CalcResult`]. An incomplete layer
//! stack or a layer whose catalog selection does not resolve are ordinary
//! states of the editor and are reported as data, not as errors.
//!
//! ## Example
//!
//! ```rust
//! use envelope_core::errors::{CalcError, CalcResult};
//!
//! fn validate_thickness(thickness_cm: f64) -> CalcResult<()> {
//!     if !thickness_cm.is_finite() {
//!         return Err(CalcError::InvalidInput {
//!             field: "thickness_cm".to_string(),
//!             value: thickness_cm.to_string(),
//!             reason: "Thickness must be a finite number".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for envelope_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for envelope operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by callers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Material selection not found in the catalog
    #[error("Material not found: {material} / {manufacturer} / {product}")]
    MaterialNotFound {
        material: String,
        manufacturer: String,
        product: String,
    },

    /// The standards table has no entry for this project type
    #[error("Invalid project type: {project_type}")]
    InvalidProjectType { project_type: String },

    /// The project type has no entry for this element type
    #[error("Invalid element type: {element_type}")]
    InvalidElementType {
        project_type: String,
        element_type: String,
    },

    /// The element has no resistance values for this climate zone
    #[error("Invalid project location: {project_location}")]
    InvalidProjectLocation {
        element_type: String,
        project_location: String,
    },

    /// No layer with the given id exists in the project
    #[error("Layer not found: {layer_id}")]
    LayerNotFound { layer_id: String },

    /// No saved model with the given name exists
    #[error("Saved model not found: {name}")]
    ModelNotFound { name: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(
        material: impl Into<String>,
        manufacturer: impl Into<String>,
        product: impl Into<String>,
    ) -> Self {
        CalcError::MaterialNotFound {
            material: material.into(),
            manufacturer: manufacturer.into(),
            product: product.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Check if this error comes from the standards table lookup
    /// (parameters present but naming an unsupported combination).
    pub fn is_standards_lookup(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidProjectType { .. }
                | CalcError::InvalidElementType { .. }
                | CalcError::InvalidProjectLocation { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::InvalidProjectType { .. } => "INVALID_PROJECT_TYPE",
            CalcError::InvalidElementType { .. } => "INVALID_ELEMENT_TYPE",
            CalcError::InvalidProjectLocation { .. } => "INVALID_PROJECT_LOCATION",
            CalcError::LayerNotFound { .. } => "LAYER_NOT_FOUND",
            CalcError::ModelNotFound { .. } => "MODEL_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
