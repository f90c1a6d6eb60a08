//! # Envelope Calculations
//!
//! Each calculation follows the pattern:
//!
//! - input records (JSON-serializable)
//! - a result record (JSON-serializable)
//! - a pure function from one to the other
//!
//! ## Available Calculations
//!
//! - [`compliance`] - thermal resistance, U-value, areal mass and the
//!   required-resistance verdict
//! - [`metrics`] - total thickness and insulation share of a layer stack

pub mod compliance;
pub mod metrics;

// Re-export commonly used types
pub use compliance::{
    evaluate, evaluate_with, ComplianceResult, EvaluationStatus, ResolvedItem, INCOMPLETE_MESSAGE,
};
pub use metrics::{assembly_metrics, AssemblyMetrics};
