//! # Project Data Structures
//!
//! The `Project` struct is the explicit application state for one
//! cross-section: what the user picked, in what order, and any named
//! snapshots they kept. Front-ends own a `Project` and pass it into the
//! engine; the engine itself keeps nothing between calls.
//!
//! Projects serialize to `.envp` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (schema version, name, timestamps)
//! ├── parameters: ProjectParameters (project type, zone, element, ...)
//! ├── layers: Vec<Layer> (ordered, outermost first)
//! └── saved_models: BTreeMap<String, Vec<Layer>> (named layer snapshots)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use envelope_core::materials::MaterialCatalog;
//! use envelope_core::project::Project;
//!
//! let catalog = MaterialCatalog::builtin();
//! let mut project = Project::new("Courtyard house");
//!
//! let id = project.add_layer();
//! project.select_material(catalog, &id, "Block")?;
//! project.select_manufacturer(catalog, &id, "Ytong")?;
//! project.select_product(catalog, &id, "Ytong block")?;
//! project.set_thickness(catalog, &id, 25.0)?;
//!
//! let result = project.evaluate(catalog);
//! assert_eq!(result.per_layer_resistance.len(), 1);
//! # Ok::<(), envelope_core::errors::CalcError>(())
//! ```

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{assembly_metrics, evaluate_with, AssemblyMetrics, ComplianceResult, ResolvedItem};
use crate::errors::{CalcError, CalcResult};
use crate::layer::{resolve_layers, Layer};
use crate::materials::MaterialCatalog;
use crate::parameters::ProjectParameters;
use crate::standards::StandardsTable;

/// Current schema version for .envp files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, name, timestamps)
    pub meta: ProjectMetadata,

    /// Parameters selecting the requirement
    #[serde(default)]
    pub parameters: ProjectParameters,

    /// Layers in display order
    ///
    /// Order only affects stacking in views; calculations sum over layers.
    #[serde(default)]
    pub layers: Vec<Layer>,

    /// Named snapshots of the layer list
    #[serde(default)]
    pub saved_models: BTreeMap<String, Vec<Layer>>,
}

impl Project {
    /// Create a new empty project.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                name: name.into(),
                created: now,
                modified: now,
            },
            parameters: ProjectParameters::default(),
            layers: Vec::new(),
            saved_models: BTreeMap::new(),
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Get a layer by id.
    pub fn layer(&self, id: &Uuid) -> Option<&Layer> {
        self.layers.iter().find(|l| &l.id == id)
    }

    fn layer_mut(&mut self, id: &Uuid) -> CalcResult<&mut Layer> {
        self.layers
            .iter_mut()
            .find(|l| &l.id == id)
            .ok_or_else(|| CalcError::LayerNotFound {
                layer_id: id.to_string(),
            })
    }

    // ------------------------------------------------------------------
    // Layer list editing
    // ------------------------------------------------------------------

    /// Append an empty layer and return its id.
    pub fn add_layer(&mut self) -> Uuid {
        let layer = Layer::new();
        let id = layer.id;
        self.layers.push(layer);
        self.touch();
        id
    }

    /// Remove a layer by id.
    ///
    /// Returns the removed layer if it existed.
    pub fn remove_layer(&mut self, id: &Uuid) -> Option<Layer> {
        let index = self.layers.iter().position(|l| &l.id == id)?;
        let layer = self.layers.remove(index);
        self.touch();
        Some(layer)
    }

    /// Remove every layer. Saved models are kept.
    pub fn remove_all_layers(&mut self) {
        self.layers.clear();
        self.touch();
    }

    /// Exchange the layers at two positions.
    pub fn swap_layers(&mut self, a: usize, b: usize) -> CalcResult<()> {
        self.check_index("a", a)?;
        self.check_index("b", b)?;
        self.layers.swap(a, b);
        self.touch();
        Ok(())
    }

    /// Move the layer at `from` so that it ends up at index `to`.
    pub fn move_layer(&mut self, from: usize, to: usize) -> CalcResult<()> {
        self.check_index("from", from)?;
        self.check_index("to", to)?;
        let layer = self.layers.remove(from);
        self.layers.insert(to, layer);
        self.touch();
        Ok(())
    }

    /// Reject duplicate layer ids in the current layers or in any saved model.
    ///
    /// Editing looks layers up by id, so ids must be unique within a list.
    pub fn check_layer_ids(&self) -> CalcResult<()> {
        let lists = std::iter::once(("layers", &self.layers))
            .chain(self.saved_models.iter().map(|(name, layers)| (name.as_str(), layers)));
        for (list, layers) in lists {
            let mut seen = HashSet::new();
            if let Some(dup) = layers.iter().find(|l| !seen.insert(l.id)) {
                return Err(CalcError::invalid_input(
                    "layers",
                    dup.id.to_string(),
                    format!("Duplicate layer id in '{}'", list),
                ));
            }
        }
        Ok(())
    }

    fn check_index(&self, field: &str, index: usize) -> CalcResult<()> {
        if index >= self.layers.len() {
            return Err(CalcError::invalid_input(
                field,
                index.to_string(),
                format!("Layer index out of range (project has {} layers)", self.layers.len()),
            ));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Selection (material -> manufacturer -> product -> thickness)
    // ------------------------------------------------------------------

    /// Choose a material category. Clears manufacturer, product and thickness.
    ///
    /// An empty value clears the selection.
    pub fn select_material(
        &mut self,
        catalog: &MaterialCatalog,
        id: &Uuid,
        material: &str,
    ) -> CalcResult<()> {
        if !material.is_empty() && !catalog.list_materials().contains(&material) {
            return Err(CalcError::invalid_input("material", material, "Not offered by the catalog"));
        }
        let layer = self.layer_mut(id)?;
        layer.material = material.to_string();
        layer.manufacturer.clear();
        layer.product.clear();
        layer.thickness_cm = 0.0;
        self.touch();
        Ok(())
    }

    /// Choose a manufacturer for the layer's material. Clears product and thickness.
    pub fn select_manufacturer(
        &mut self,
        catalog: &MaterialCatalog,
        id: &Uuid,
        manufacturer: &str,
    ) -> CalcResult<()> {
        let layer = self.layer_mut(id)?;
        if !manufacturer.is_empty() && !catalog.list_manufacturers(&layer.material).contains(&manufacturer) {
            return Err(CalcError::invalid_input(
                "manufacturer",
                manufacturer,
                format!("Not offered for material '{}'", layer.material),
            ));
        }
        layer.manufacturer = manufacturer.to_string();
        layer.product.clear();
        layer.thickness_cm = 0.0;
        self.touch();
        Ok(())
    }

    /// Choose a product. On success the thickness starts at the product's minimum.
    pub fn select_product(
        &mut self,
        catalog: &MaterialCatalog,
        id: &Uuid,
        product: &str,
    ) -> CalcResult<()> {
        let layer = self.layer_mut(id)?;
        if product.is_empty() {
            layer.product.clear();
            layer.thickness_cm = 0.0;
        } else {
            let record = catalog
                .resolve(&layer.material, &layer.manufacturer, product)
                .ok_or_else(|| {
                    CalcError::invalid_input(
                        "product",
                        product,
                        format!("Not offered for '{}' / '{}'", layer.material, layer.manufacturer),
                    )
                })?;
            layer.product = product.to_string();
            layer.thickness_cm = record.min_thickness_cm;
        }
        self.touch();
        Ok(())
    }

    /// Set the thickness, clamped into the resolved product's range.
    ///
    /// Layers without a resolved product keep the value as given.
    /// Returns the stored thickness.
    pub fn set_thickness(
        &mut self,
        catalog: &MaterialCatalog,
        id: &Uuid,
        thickness_cm: f64,
    ) -> CalcResult<f64> {
        if !thickness_cm.is_finite() {
            return Err(CalcError::invalid_input(
                "thickness_cm",
                thickness_cm.to_string(),
                "Thickness must be a finite number",
            ));
        }
        let layer = self.layer_mut(id)?;
        let stored = match layer.resolve(catalog) {
            Some(record) => record.clamp_thickness(thickness_cm),
            None => thickness_cm,
        };
        layer.thickness_cm = stored;
        self.touch();
        Ok(stored)
    }

    /// Set the display colour of a layer.
    pub fn set_color(&mut self, id: &Uuid, color: impl Into<String>) -> CalcResult<()> {
        self.layer_mut(id)?.color = color.into();
        self.touch();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Calculations
    // ------------------------------------------------------------------

    /// Engine inputs for every layer whose selection resolves.
    pub fn resolved_items(&self, catalog: &MaterialCatalog) -> Vec<ResolvedItem> {
        resolve_layers(&self.layers, catalog)
    }

    /// Check against the built-in standards table.
    pub fn evaluate(&self, catalog: &MaterialCatalog) -> ComplianceResult {
        self.evaluate_with(catalog, StandardsTable::builtin())
    }

    /// Check against a caller-supplied standards table.
    pub fn evaluate_with(&self, catalog: &MaterialCatalog, table: &StandardsTable) -> ComplianceResult {
        evaluate_with(table, &self.resolved_items(catalog), &self.parameters)
    }

    pub fn metrics(&self, catalog: &MaterialCatalog) -> AssemblyMetrics {
        assembly_metrics(&self.resolved_items(catalog))
    }

    // ------------------------------------------------------------------
    // Saved models
    // ------------------------------------------------------------------

    /// Store a copy of the current layers under `name`, replacing any
    /// snapshot with the same name.
    pub fn save_model(&mut self, name: &str) -> CalcResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CalcError::missing_field("name"));
        }
        self.saved_models.insert(name.to_string(), self.layers.clone());
        self.touch();
        Ok(())
    }

    /// Replace the current layers with a copy of a saved snapshot.
    pub fn load_model(&mut self, name: &str) -> CalcResult<()> {
        let layers = self
            .saved_models
            .get(name)
            .cloned()
            .ok_or_else(|| CalcError::ModelNotFound { name: name.to_string() })?;
        self.layers = layers;
        self.touch();
        Ok(())
    }

    /// Delete a saved snapshot, returning its layers.
    pub fn delete_model(&mut self, name: &str) -> CalcResult<Vec<Layer>> {
        let layers = self
            .saved_models
            .remove(name)
            .ok_or_else(|| CalcError::ModelNotFound { name: name.to_string() })?;
        self.touch();
        Ok(layers)
    }

    /// Names of saved snapshots, sorted.
    pub fn saved_model_names(&self) -> Vec<&str> {
        self.saved_models.keys().map(String::as_str).collect()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Project name
    #[serde(default)]
    pub name: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::EvaluationStatus;
    use crate::parameters::*;

    fn catalog() -> &'static MaterialCatalog {
        MaterialCatalog::builtin()
    }

    fn add_product(project: &mut Project, material: &str, manufacturer: &str, product: &str) -> Uuid {
        let id = project.add_layer();
        project.select_material(catalog(), &id, material).unwrap();
        project.select_manufacturer(catalog(), &id, manufacturer).unwrap();
        project.select_product(catalog(), &id, product).unwrap();
        id
    }

    fn wall_project() -> Project {
        let mut project = Project::new("Test wall");
        project.parameters = ProjectParameters::new(
            ProjectType::Residential,
            ClimateZone::A,
            ElementType::ExternalWall,
            IsolationPlacement::Exterior,
            ExteriorColor::Light,
        );
        project
    }

    #[test]
    fn test_project_creation() {
        let project = Project::new("Courtyard house");
        assert_eq!(project.meta.name, "Courtyard house");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.layer_count(), 0);
        assert!(!project.parameters.is_complete());
    }

    #[test]
    fn test_add_remove_layers() {
        let mut project = Project::new("P");
        let a = project.add_layer();
        let b = project.add_layer();
        assert_eq!(project.layer_count(), 2);

        let removed = project.remove_layer(&a).unwrap();
        assert_eq!(removed.id, a);
        assert!(project.remove_layer(&a).is_none());
        assert_eq!(project.layers[0].id, b);

        project.remove_all_layers();
        assert_eq!(project.layer_count(), 0);
    }

    #[test]
    fn test_reorder_keeps_ids() {
        let mut project = Project::new("P");
        let ids: Vec<Uuid> = (0..3).map(|_| project.add_layer()).collect();

        project.swap_layers(0, 2).unwrap();
        assert_eq!(project.layers[0].id, ids[2]);
        assert_eq!(project.layers[2].id, ids[0]);

        project.move_layer(0, 1).unwrap();
        let order: Vec<Uuid> = project.layers.iter().map(|l| l.id).collect();
        assert_eq!(order, vec![ids[1], ids[2], ids[0]]);

        assert!(project.swap_layers(0, 3).is_err());
        assert!(project.move_layer(5, 0).is_err());
    }

    #[test]
    fn test_selection_cascade() {
        let mut project = Project::new("P");
        let id = add_product(&mut project, "Block", "Ytong", "Ytong block");
        let layer = project.layer(&id).unwrap();
        assert_eq!(layer.thickness_cm, 20.0);

        project.select_manufacturer(catalog(), &id, "Thermodan").unwrap();
        let layer = project.layer(&id).unwrap();
        assert_eq!(layer.material, "Block");
        assert!(layer.product.is_empty());
        assert_eq!(layer.thickness_cm, 0.0);

        project.select_material(catalog(), &id, "Stone").unwrap();
        let layer = project.layer(&id).unwrap();
        assert!(layer.manufacturer.is_empty());
        assert!(layer.product.is_empty());
    }

    #[test]
    fn test_selection_rejects_unknown_values() {
        let mut project = Project::new("P");
        let id = project.add_layer();
        assert!(project.select_material(catalog(), &id, "Adobe").is_err());

        project.select_material(catalog(), &id, "Block").unwrap();
        assert!(project.select_manufacturer(catalog(), &id, "Granite").is_err());

        project.select_manufacturer(catalog(), &id, "Ytong").unwrap();
        assert!(project.select_product(catalog(), &id, "Pumice Gold 22").is_err());

        let missing = Uuid::new_v4();
        let err = project.select_material(catalog(), &missing, "Block").unwrap_err();
        assert_eq!(err.error_code(), "LAYER_NOT_FOUND");
    }

    #[test]
    fn test_thickness_clamping() {
        let mut project = Project::new("P");
        let id = add_product(&mut project, "Concrete", "Normal concrete", "Normal concrete");
        assert_eq!(project.set_thickness(catalog(), &id, 2.0).unwrap(), 5.0);
        assert_eq!(project.set_thickness(catalog(), &id, 150.0).unwrap(), 100.0);
        assert_eq!(project.set_thickness(catalog(), &id, 18.0).unwrap(), 18.0);
        assert!(project.set_thickness(catalog(), &id, f64::NAN).is_err());

        let fixed = add_product(&mut project, "Block", "Ravid Block", "Pumice Gold 25");
        assert_eq!(project.set_thickness(catalog(), &fixed, 30.0).unwrap(), 25.0);

        // unresolved layers are unconstrained
        let empty = project.add_layer();
        assert_eq!(project.set_thickness(catalog(), &empty, 7.5).unwrap(), 7.5);
    }

    #[test]
    fn test_evaluate_skips_unresolved_layers() {
        let mut project = wall_project();
        add_product(&mut project, "Block", "Ytong", "Ytong block");
        let partial = project.add_layer();
        project.select_material(catalog(), &partial, "Stone").unwrap();

        let items = project.resolved_items(catalog());
        assert_eq!(items.len(), 1);

        let result = project.evaluate(catalog());
        assert_eq!(result.per_layer_resistance.len(), 1);
        assert_eq!(result.status, EvaluationStatus::Evaluated);
        // 20 cm / 0.1305 W/(m·K)
        assert!((result.total_thermal_resistance - 0.2 / 0.1305).abs() < 1e-12);
        // 0.2 m * 400 kg/m³ = 80 kg/m², lightest tier in zone A
        assert_eq!(result.required_resistance, Some(1.25));
        assert_eq!(result.is_sufficient, Some(true));
    }

    #[test]
    fn test_empty_project_is_incomplete() {
        let project = wall_project();
        let result = project.evaluate(catalog());
        assert_eq!(result.status, EvaluationStatus::Incomplete);
        assert_eq!(result.required_resistance, None);
    }

    #[test]
    fn test_saved_models() {
        let mut project = wall_project();
        add_product(&mut project, "Stone", "Marble", "Marble");
        project.save_model("marble facade").unwrap();

        project.remove_all_layers();
        add_product(&mut project, "Concrete", "Normal concrete", "Normal concrete");
        add_product(&mut project, "Mortar", "Mortar", "Cement mortar");
        project.save_model("concrete").unwrap();
        assert_eq!(project.saved_model_names(), vec!["concrete", "marble facade"]);

        project.load_model("marble facade").unwrap();
        assert_eq!(project.layer_count(), 1);
        assert_eq!(project.layers[0].product, "Marble");

        // editing the loaded copy leaves the snapshot untouched
        project.add_layer();
        assert_eq!(project.saved_models["marble facade"].len(), 1);

        assert!(project.load_model("missing").is_err());
        assert!(project.save_model("   ").is_err());

        let removed = project.delete_model("concrete").unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(project.saved_model_names(), vec!["marble facade"]);
    }

    #[test]
    fn test_duplicate_layer_ids_rejected() {
        let mut project = wall_project();
        project.add_layer();
        project.add_layer();
        project.save_model("two").unwrap();
        assert!(project.check_layer_ids().is_ok());

        let copy = project.layers[0].clone();
        project.layers.push(copy);
        let err = project.check_layer_ids().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        project.layers.pop();
        let snapshot = project.saved_models.get_mut("two").unwrap();
        let copy = snapshot[1].clone();
        snapshot.push(copy);
        assert!(project.check_layer_ids().is_err());
    }

    #[test]
    fn test_metrics() {
        let mut project = wall_project();
        let block = add_product(&mut project, "Block", "Ytong", "Ytong block");
        project.set_thickness(catalog(), &block, 20.0).unwrap();
        let board = add_product(&mut project, "Insulation board", "Milgal", "Solarglas");
        project.set_thickness(catalog(), &board, 10.0).unwrap();

        let metrics = project.metrics(catalog());
        assert_eq!(metrics.total_thickness_cm, 30.0);
        assert!((metrics.insulation_ratio - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_project_serialization() {
        let mut project = wall_project();
        add_product(&mut project, "Stone", "Granite", "Granite");
        project.save_model("granite").unwrap();

        let json = serde_json::to_string_pretty(&project).unwrap();
        assert!(json.contains("Test wall"));
        assert!(json.contains("external-wall"));

        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.layers, project.layers);
        assert_eq!(roundtrip.parameters, project.parameters);
        assert_eq!(roundtrip.saved_model_names(), vec!["granite"]);
    }
}
