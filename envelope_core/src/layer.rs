//! # Layers
//!
//! A layer is one course of the cross-section as the user configures it.
//! Its selection is narrowed field by field (material, then manufacturer,
//! then product) and only contributes to calculations once the triple
//! resolves to a catalog record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::ResolvedItem;
use crate::materials::{MaterialCatalog, MaterialRecord};

/// A single course in the cross-section.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "5b1e8a52-7f5e-4c55-8d0e-2b8f3f0a9c41",
///   "material": "Insulation board",
///   "manufacturer": "Polybid",
///   "product": "Polyash Extra",
///   "thickness_cm": 4.0,
///   "color": "#5b1e8a"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Stable id, unchanged by reordering
    pub id: Uuid,

    #[serde(default)]
    pub material: String,

    #[serde(default)]
    pub manufacturer: String,

    #[serde(default)]
    pub product: String,

    /// Thickness in centimetres; 0 until a product is chosen
    #[serde(default)]
    pub thickness_cm: f64,

    /// Display colour (`#rrggbb`), not used in calculations
    #[serde(default)]
    pub color: String,
}

impl Layer {
    /// Create an empty layer with a fresh id.
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        Layer {
            id,
            material: String::new(),
            manufacturer: String::new(),
            product: String::new(),
            thickness_cm: 0.0,
            color: color_for(&id),
        }
    }

    /// True when material, manufacturer and product are all chosen.
    pub fn is_selection_complete(&self) -> bool {
        !self.material.is_empty() && !self.manufacturer.is_empty() && !self.product.is_empty()
    }

    /// Catalog record for the current selection, if any.
    pub fn resolve<'a>(&self, catalog: &'a MaterialCatalog) -> Option<&'a MaterialRecord> {
        catalog.resolve(&self.material, &self.manufacturer, &self.product)
    }

    /// Engine input for this layer; `None` while the selection does not resolve.
    ///
    /// The thickness is clamped into the product's range.
    pub fn to_resolved_item(&self, catalog: &MaterialCatalog) -> Option<ResolvedItem> {
        self.resolve(catalog)
            .map(|record| ResolvedItem::from_record(self.id, record, self.thickness_cm))
    }
}

impl Default for Layer {
    fn default() -> Self {
        Layer::new()
    }
}

/// Colour derived from the first three bytes of the id.
fn color_for(id: &Uuid) -> String {
    let bytes = id.as_bytes();
    format!("#{:02x}{:02x}{:02x}", bytes[0], bytes[1], bytes[2])
}

/// Resolve every layer, skipping those whose selection has no record.
pub fn resolve_layers(layers: &[Layer], catalog: &MaterialCatalog) -> Vec<ResolvedItem> {
    layers
        .iter()
        .filter_map(|layer| layer.to_resolved_item(catalog))
        .collect()
}
