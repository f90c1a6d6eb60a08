//! Material Catalog
//!
//! Read-only table of construction products, each identified by the triple
//! (material, manufacturer, product). The built-in table is embedded from
//! `data/materials.toml` at compile time and parsed once on first use.
//!
//! Queries are linear scans in table order. The table is small and callers
//! (drop-down lists) rely on first-seen ordering, so no index is kept.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{KgPerM3, WPerMK};

const BUILTIN_CATALOG_TOML: &str = include_str!("../../data/materials.toml");

static BUILTIN_CATALOG: Lazy<MaterialCatalog> = Lazy::new(|| {
    MaterialCatalog::from_toml_str(BUILTIN_CATALOG_TOML)
        .expect("embedded data/materials.toml must pass catalog validation")
});

/// A single catalog entry.
///
/// ## JSON Example
///
/// ```json
/// {
///   "material": "Block",
///   "manufacturer": "Ytong",
///   "product": "Ytong block",
///   "min_thickness_cm": 20.0,
///   "max_thickness_cm": 30.0,
///   "thermal_conductivity": 0.1305,
///   "specific_mass": 400.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// Material category (e.g., "Block", "Insulation board")
    pub material: String,

    /// Manufacturer name
    pub manufacturer: String,

    /// Product name
    pub product: String,

    /// Smallest allowed thickness in centimetres
    pub min_thickness_cm: f64,

    /// Largest allowed thickness in centimetres (equal to min for fixed products)
    pub max_thickness_cm: f64,

    /// Thermal conductivity λ in W/(m·K), always > 0
    pub thermal_conductivity: f64,

    /// Density in kg/m³, always >= 0
    pub specific_mass: f64,
}

impl MaterialRecord {
    /// True when the product is sold in a single thickness.
    pub fn is_fixed_thickness(&self) -> bool {
        self.min_thickness_cm == self.max_thickness_cm
    }

    /// Clamp a thickness into this product's allowed range.
    pub fn clamp_thickness(&self, thickness_cm: f64) -> f64 {
        thickness_cm.clamp(self.min_thickness_cm, self.max_thickness_cm)
    }

    /// Check whether a thickness lies within the allowed range (inclusive).
    pub fn accepts_thickness(&self, thickness_cm: f64) -> bool {
        thickness_cm >= self.min_thickness_cm && thickness_cm <= self.max_thickness_cm
    }

    /// True for insulation products (category name mentions insulation).
    pub fn is_insulation(&self) -> bool {
        is_insulation_category(&self.material)
    }

    pub fn conductivity(&self) -> WPerMK {
        WPerMK(self.thermal_conductivity)
    }

    pub fn density(&self) -> KgPerM3 {
        KgPerM3(self.specific_mass)
    }

    /// Display name in "material / manufacturer / product" form
    pub fn display_name(&self) -> String {
        format!("{} / {} / {}", self.material, self.manufacturer, self.product)
    }

    fn matches(&self, material: &str, manufacturer: &str, product: &str) -> bool {
        self.material == material && self.manufacturer == manufacturer && self.product == product
    }

    fn validate(&self) -> CalcResult<()> {
        let name = self.display_name();
        if self.material.is_empty() || self.manufacturer.is_empty() || self.product.is_empty() {
            return Err(CalcError::invalid_input(
                "material",
                name,
                "Material, manufacturer and product must all be named",
            ));
        }
        if !(self.thermal_conductivity > 0.0) {
            return Err(CalcError::invalid_input(
                "thermal_conductivity",
                format!("{} ({})", self.thermal_conductivity, name),
                "Thermal conductivity must be positive",
            ));
        }
        if !(self.specific_mass >= 0.0) {
            return Err(CalcError::invalid_input(
                "specific_mass",
                format!("{} ({})", self.specific_mass, name),
                "Specific mass cannot be negative",
            ));
        }
        if !(self.min_thickness_cm >= 0.0 && self.min_thickness_cm <= self.max_thickness_cm) {
            return Err(CalcError::invalid_input(
                "min_thickness_cm",
                format!("{}..{} ({})", self.min_thickness_cm, self.max_thickness_cm, name),
                "Thickness range must satisfy 0 <= min <= max",
            ));
        }
        Ok(())
    }
}

/// Category names that denote insulation products.
pub fn is_insulation_category(material: &str) -> bool {
    material.to_lowercase().contains("insulation")
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    material: Vec<MaterialRecord>,
}

/// Immutable table of [`MaterialRecord`]s.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialCatalog {
    records: Vec<MaterialRecord>,
}

impl MaterialCatalog {
    /// Build a catalog, rejecting invalid records and duplicate identities.
    pub fn new(records: Vec<MaterialRecord>) -> CalcResult<Self> {
        for (i, record) in records.iter().enumerate() {
            record.validate()?;
            let duplicate = records[..i]
                .iter()
                .any(|r| r.matches(&record.material, &record.manufacturer, &record.product));
            if duplicate {
                return Err(CalcError::invalid_input(
                    "material",
                    record.display_name(),
                    "Duplicate material/manufacturer/product entry",
                ));
            }
        }
        Ok(MaterialCatalog { records })
    }

    /// Parse a catalog from TOML (`[[material]]` array of tables).
    ///
    /// # Example
    ///
    /// ```rust
    /// use envelope_core::materials::MaterialCatalog;
    ///
    /// let catalog = MaterialCatalog::from_toml_str(r#"
    ///     [[material]]
    ///     material = "Concrete"
    ///     manufacturer = "Generic"
    ///     product = "C30"
    ///     min_thickness_cm = 5.0
    ///     max_thickness_cm = 100.0
    ///     thermal_conductivity = 2.1
    ///     specific_mass = 2400.0
    /// "#)?;
    /// assert_eq!(catalog.list_materials(), vec!["Concrete"]);
    /// # Ok::<(), envelope_core::errors::CalcError>(())
    /// ```
    pub fn from_toml_str(source: &str) -> CalcResult<Self> {
        let file: CatalogFile = toml::from_str(source)
            .map_err(|e| CalcError::serialization(format!("Invalid material catalog: {}", e)))?;
        MaterialCatalog::new(file.material)
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> &'static MaterialCatalog {
        &BUILTIN_CATALOG
    }

    /// All records in table order.
    pub fn records(&self) -> &[MaterialRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct material categories in first-seen order.
    pub fn list_materials(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for record in &self.records {
            if !out.contains(&record.material.as_str()) {
                out.push(&record.material);
            }
        }
        out
    }

    /// Distinct manufacturers offering `material`, first-seen order.
    ///
    /// Empty or unknown material yields an empty list.
    pub fn list_manufacturers(&self, material: &str) -> Vec<&str> {
        if material.is_empty() {
            return Vec::new();
        }
        let mut out: Vec<&str> = Vec::new();
        for record in self.records.iter().filter(|r| r.material == material) {
            if !out.contains(&record.manufacturer.as_str()) {
                out.push(&record.manufacturer);
            }
        }
        out
    }

    /// Products for an exact (material, manufacturer) pair, in table order.
    pub fn list_products(&self, material: &str, manufacturer: &str) -> Vec<&str> {
        if material.is_empty() || manufacturer.is_empty() {
            return Vec::new();
        }
        self.records
            .iter()
            .filter(|r| r.material == material && r.manufacturer == manufacturer)
            .map(|r| r.product.as_str())
            .collect()
    }

    /// Exact triple lookup. `None` is a normal outcome for an incomplete
    /// or stale selection.
    pub fn resolve(&self, material: &str, manufacturer: &str, product: &str) -> Option<&MaterialRecord> {
        self.records
            .iter()
            .find(|r| r.matches(material, manufacturer, product))
    }

    /// Like [`resolve`](Self::resolve), but reports a miss as an error.
    pub fn require(&self, material: &str, manufacturer: &str, product: &str) -> CalcResult<&MaterialRecord> {
        self.resolve(material, manufacturer, product)
            .ok_or_else(|| CalcError::material_not_found(material, manufacturer, product))
    }
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        MaterialCatalog::builtin().clone()
    }
}
