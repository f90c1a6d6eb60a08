//! # Materials Database
//!
//! Construction products available for envelope layers, with the physical
//! properties the compliance engine needs.
//!
//! ## Selection Flow
//!
//! The editor narrows a layer's selection in three steps, each backed by a
//! catalog query:
//!
//! 1. [`MaterialCatalog::list_materials`] - material categories
//! 2. [`MaterialCatalog::list_manufacturers`] - manufacturers for a category
//! 3. [`MaterialCatalog::list_products`] - products for a category + manufacturer
//!
//! A complete selection resolves to one [`MaterialRecord`].
//!
//! ## Example
//!
//! ```rust
//! use envelope_core::materials::MaterialCatalog;
//!
//! let catalog = MaterialCatalog::builtin();
//! let record = catalog
//!     .resolve("Insulation board", "Polybid", "Polyash Premium")
//!     .expect("catalog entry");
//! println!("λ = {} W/(m·K), ρ = {} kg/m³", record.thermal_conductivity, record.specific_mass);
//! ```

pub mod catalog;

pub use catalog::{is_insulation_category, MaterialCatalog, MaterialRecord};
