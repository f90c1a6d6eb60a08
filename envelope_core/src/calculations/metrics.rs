//! Assembly metrics: overall thickness and how much of it is insulation.

use serde::{Deserialize, Serialize};

use super::compliance::ResolvedItem;
use crate::materials::is_insulation_category;

/// Insulation share above which an assembly counts as well insulated.
pub const WELL_INSULATED_RATIO: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssemblyMetrics {
    /// Sum of layer thicknesses (cm)
    pub total_thickness_cm: f64,

    /// Thickness of the first insulation layer over the total, 0 when absent
    pub insulation_ratio: f64,

    /// insulation_ratio > 0.5
    pub is_well_insulated: bool,
}

/// Summarize a layer stack.
///
/// Only the first insulation layer counts toward the ratio.
pub fn assembly_metrics(items: &[ResolvedItem]) -> AssemblyMetrics {
    let total_thickness_cm: f64 = items.iter().map(|i| i.thickness_cm).sum();
    let insulation = items.iter().find(|i| is_insulation_category(&i.material));

    let insulation_ratio = match insulation {
        Some(layer) if total_thickness_cm > 0.0 => layer.thickness_cm / total_thickness_cm,
        _ => 0.0,
    };

    AssemblyMetrics {
        total_thickness_cm,
        insulation_ratio,
        is_well_insulated: insulation_ratio > WELL_INSULATED_RATIO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::MaterialCatalog;
    use uuid::Uuid;

    fn item(material: &str, manufacturer: &str, product: &str, thickness_cm: f64) -> ResolvedItem {
        let record = MaterialCatalog::builtin()
            .resolve(material, manufacturer, product)
            .unwrap();
        ResolvedItem::from_record(Uuid::new_v4(), record, thickness_cm)
    }

    #[test]
    fn test_no_insulation() {
        let metrics = assembly_metrics(&[item("Concrete", "Normal concrete", "Normal concrete", 20.0)]);
        assert_eq!(metrics.total_thickness_cm, 20.0);
        assert_eq!(metrics.insulation_ratio, 0.0);
        assert!(!metrics.is_well_insulated);
    }

    #[test]
    fn test_insulation_ratio() {
        let items = vec![
            item("Mortar", "Mortar", "Cement mortar", 2.0),
            item("Insulation board", "Milgal", "Foamglas", 6.0),
            item("Insulation board", "Polybid", "Polyash 200", 4.0),
        ];
        let metrics = assembly_metrics(&items);
        assert_eq!(metrics.total_thickness_cm, 12.0);
        assert_eq!(metrics.insulation_ratio, 0.5);
        // ratio must exceed one half
        assert!(!metrics.is_well_insulated);

        let items = vec![
            item("Mortar", "Mortar", "Cement mortar", 2.0),
            item("Insulation board", "Milgal", "Foamglas", 10.0),
        ];
        assert!(assembly_metrics(&items).is_well_insulated);
    }

    #[test]
    fn test_empty_stack() {
        let metrics = assembly_metrics(&[]);
        assert_eq!(metrics.total_thickness_cm, 0.0);
        assert_eq!(metrics.insulation_ratio, 0.0);
    }
}
