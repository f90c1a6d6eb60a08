//! # File Loading
//!
//! Read-only loaders for the three document kinds the front-ends hand to
//! the engine:
//!
//! - **Projects** (`.envp`): JSON, with a schema version in `meta.version`
//! - **Material catalogs**: TOML, `[[material]]` records
//! - **Standards tables**: TOML, `[project.element]` tables
//!
//! Nothing here writes to disk.
//!
//! ## Example
//!
//! ```rust,no_run
//! use envelope_core::file_io::{load_catalog, load_project};
//! use std::path::Path;
//!
//! let catalog = load_catalog(Path::new("materials.toml"))?;
//! let project = load_project(Path::new("house.envp"))?;
//! let result = project.evaluate(&catalog);
//! println!("{}", result.message());
//! # Ok::<(), envelope_core::errors::CalcError>(())
//! ```

use std::fs;
use std::path::Path;

use crate::errors::{CalcError, CalcResult};
use crate::materials::MaterialCatalog;
use crate::project::{Project, SCHEMA_VERSION};
use crate::standards::StandardsTable;

fn read_to_string(path: &Path) -> CalcResult<String> {
    fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))
}

/// Load a project from a `.envp` file.
///
/// # Errors
///
/// * `FileError` - the file cannot be read
/// * `SerializationError` - the contents are not a valid project
/// * `VersionMismatch` - the schema version is not supported
/// * `InvalidInput` - two layers in one list share an id
///
/// Thicknesses are kept as stored; they are clamped into the product's
/// range when layers are resolved for a calculation.
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let contents = read_to_string(path)?;
    let project: Project = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;
    validate_version(&project.meta.version)?;
    project.check_layer_ids()?;
    tracing::debug!(path = %path.display(), layers = project.layers.len(), "loaded project");
    Ok(project)
}

/// Parse a project from an in-memory JSON document.
pub fn project_from_json(json: &str) -> CalcResult<Project> {
    let project: Project = serde_json::from_str(json)
        .map_err(|e| CalcError::serialization(format!("Invalid project JSON: {}", e)))?;
    validate_version(&project.meta.version)?;
    project.check_layer_ids()?;
    Ok(project)
}

/// Load and validate a material catalog from a TOML file.
pub fn load_catalog(path: &Path) -> CalcResult<MaterialCatalog> {
    let catalog = MaterialCatalog::from_toml_str(&read_to_string(path)?)?;
    tracing::debug!(path = %path.display(), records = catalog.len(), "loaded material catalog");
    Ok(catalog)
}

/// Load and validate a standards table from a TOML file.
pub fn load_standards(path: &Path) -> CalcResult<StandardsTable> {
    let table = StandardsTable::from_toml_str(&read_to_string(path)?)?;
    tracing::debug!(path = %path.display(), "loaded standards table");
    Ok(table)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // 0.x: a newer minor may contain breaking changes
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}
