//! # envelope_core - Building Envelope Thermal Compliance Engine
//!
//! `envelope_core` checks a multi-layer building-envelope cross-section
//! (wall, roof or floor) against a regulatory thermal-resistance requirement.
//! All inputs and outputs are JSON-serializable, so any front-end can drive it.
//!
//! ## Design Philosophy
//!
//! - **Stateless engine**: [`calculations::evaluate`] is a pure function of
//!   resolved layers and project parameters
//! - **Explicit state**: the editable cross-section lives in a [`Project`]
//!   value owned by the caller
//! - **Data as TOML**: the material catalog and standards table are embedded
//!   TOML documents and can be replaced at runtime
//! - **Rich Errors**: structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use envelope_core::calculations::{evaluate, ResolvedItem};
//! use envelope_core::parameters::*;
//!
//! let params = ProjectParameters::new(
//!     ProjectType::Residential,
//!     ClimateZone::A,
//!     ElementType::Roof,
//!     IsolationPlacement::Exterior,
//!     ExteriorColor::Light,
//! );
//! // 30 cm of λ = 0.15 W/(m·K), 400 kg/m³
//! let items = vec![ResolvedItem::new(30.0, 0.15, 400.0)];
//!
//! let result = evaluate(&items, &params);
//! assert_eq!(result.total_thermal_resistance, 2.0);
//! assert_eq!(result.required_resistance, Some(1.5));
//! assert!(result.passes());
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - compliance engine and assembly metrics
//! - [`standards`] - required-resistance table and interpolation
//! - [`materials`] - material catalog
//! - [`parameters`] - project parameters and their option sets
//! - [`layer`] - user-configured layers
//! - [`project`] - project state: layers, parameters, saved models
//! - [`units`] - type-safe unit wrappers
//! - [`errors`] - structured error types
//! - [`file_io`] - project, catalog and standards loaders

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod layer;
pub mod materials;
pub mod parameters;
pub mod project;
pub mod standards;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{evaluate, ComplianceResult, EvaluationStatus, ResolvedItem};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_catalog, load_project, load_standards};
pub use layer::Layer;
pub use materials::{MaterialCatalog, MaterialRecord};
pub use parameters::ProjectParameters;
pub use project::{Project, ProjectMetadata};
pub use standards::StandardsTable;
