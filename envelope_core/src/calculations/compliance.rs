//! # Thermal Compliance Check
//!
//! Evaluates a stack of resolved layers against the required thermal
//! resistance for the project's parameters.
//!
//! ## Procedure
//!
//! 1. Per-layer resistance: R_i = (t_i / 100) / λ_i, thickness in cm
//! 2. Total resistance: ΣR_i (layer order does not matter)
//! 3. Total R-value: ΣR_i + surface resistance of the element type
//! 4. U-value: 1 / R-value
//! 5. Areal mass: Σ (t_i / 100) · ρ_i, halved for interior insulation
//! 6. Required resistance from the standards table (see [`crate::standards`])
//! 7. Verdict: ΣR_i > required (strict; equality fails)
//!
//! Steps 1-5 always run so partial stacks still get feedback. Steps 6-7 need
//! at least one layer and all four required parameters; otherwise the result
//! is marked incomplete. A parameter combination missing from the standards
//! table is reported in the result's `error`, never as a panic.
//!
//! ## Example
//!
//! ```rust
//! use envelope_core::calculations::compliance::{evaluate, ResolvedItem};
//! use envelope_core::parameters::*;
//!
//! let items = vec![
//!     ResolvedItem::new(20.0, 0.1305, 400.0), // 20 cm aerated block
//!     ResolvedItem::new(5.0, 0.0456, 100.0),  // 5 cm insulation board
//! ];
//! let params = ProjectParameters::new(
//!     ProjectType::Residential,
//!     ClimateZone::B,
//!     ElementType::ExternalWall,
//!     IsolationPlacement::Exterior,
//!     ExteriorColor::Light,
//! );
//!
//! let result = evaluate(&items, &params);
//! assert_eq!(result.per_layer_resistance.len(), 2);
//! assert_eq!(result.is_sufficient, Some(true));
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CalcError;
use crate::materials::MaterialRecord;
use crate::parameters::ProjectParameters;
use crate::standards::{surface_resistance, StandardsTable};
use crate::units::{Centimeters, KgPerM2, KgPerM3, M2KPerW, Meters, WPerMK};

/// User-facing prompt for an incomplete configuration.
pub const INCOMPLETE_MESSAGE: &str = "Please complete all parameters and add at least one layer.";

/// A layer joined with its catalog record: the engine's input unit.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "1c7e3c9a-5a0c-4b7e-9a57-3f2f2d0f6a11",
///   "material": "Block",
///   "manufacturer": "Ytong",
///   "product": "Ytong block",
///   "thickness_cm": 25.0,
///   "thermal_conductivity": 0.1305,
///   "specific_mass": 400.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedItem {
    /// Id of the originating layer
    pub id: Uuid,

    #[serde(default)]
    pub material: String,

    #[serde(default)]
    pub manufacturer: String,

    #[serde(default)]
    pub product: String,

    /// Layer thickness in centimetres
    pub thickness_cm: f64,

    /// λ in W/(m·K)
    pub thermal_conductivity: f64,

    /// Density in kg/m³
    pub specific_mass: f64,
}

impl ResolvedItem {
    /// Anonymous item from raw physical values.
    pub fn new(thickness_cm: f64, thermal_conductivity: f64, specific_mass: f64) -> Self {
        ResolvedItem {
            id: Uuid::new_v4(),
            material: String::new(),
            manufacturer: String::new(),
            product: String::new(),
            thickness_cm,
            thermal_conductivity,
            specific_mass,
        }
    }

    /// Join a layer id and thickness with a catalog record.
    ///
    /// The thickness is clamped into the record's range, so a stored value
    /// outside it (hand-edited file, stale saved model) never reaches the engine.
    pub fn from_record(id: Uuid, record: &MaterialRecord, thickness_cm: f64) -> Self {
        let clamped = record.clamp_thickness(thickness_cm);
        if clamped != thickness_cm {
            tracing::debug!(%id, thickness_cm, clamped, product = %record.product, "thickness clamped");
        }
        ResolvedItem {
            id,
            material: record.material.clone(),
            manufacturer: record.manufacturer.clone(),
            product: record.product.clone(),
            thickness_cm: clamped,
            thermal_conductivity: record.conductivity().value(),
            specific_mass: record.density().value(),
        }
    }

    /// Thermal resistance of this layer in m²·K/W.
    pub fn resistance(&self) -> f64 {
        let thickness: Meters = Centimeters(self.thickness_cm).into();
        (thickness / WPerMK(self.thermal_conductivity)).value()
    }

    /// Mass per unit area of this layer in kg/m².
    pub fn areal_mass(&self) -> f64 {
        let thickness: Meters = Centimeters(self.thickness_cm).into();
        (thickness * KgPerM3(self.specific_mass)).value()
    }
}

/// Which of the three mutually exclusive outcomes a call produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    /// No layers, or a required parameter is empty
    Incomplete,
    /// Requirement found and compared
    Evaluated,
    /// Parameters present but not covered by the standards table
    LookupFailed,
}

/// Output of [`evaluate`].
///
/// Numeric fields carry full precision; rounding is left to the display.
///
/// ## JSON Example
///
/// ```json
/// {
///   "per_layer_resistance": [1.532567049808429, 1.0964912280701753],
///   "total_thermal_resistance": 2.629058277878604,
///   "total_r_value": 2.799058277878604,
///   "u_value": 0.3572629541262813,
///   "total_areal_mass": 85.0,
///   "required_resistance": 1.5,
///   "is_sufficient": true,
///   "status": "evaluated",
///   "missing": [],
///   "error": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    /// Resistance of each item, parallel to the input (m²·K/W)
    pub per_layer_resistance: Vec<f64>,

    /// Sum of layer resistances (m²·K/W)
    pub total_thermal_resistance: f64,

    /// Layer total plus the element's surface resistance (m²·K/W)
    pub total_r_value: f64,

    /// 1 / total_r_value (W/(m²·K))
    pub u_value: f64,

    /// Areal mass used for the lookup (kg/m²), halved for interior insulation
    pub total_areal_mass: f64,

    /// Required resistance (m²·K/W); `None` unless evaluated
    pub required_resistance: Option<f64>,

    /// total_thermal_resistance > required_resistance; `None` unless evaluated
    pub is_sufficient: Option<bool>,

    pub status: EvaluationStatus,

    /// Inputs still missing when incomplete ("layers" or a parameter name)
    #[serde(default)]
    pub missing: Vec<String>,

    /// Standards lookup failure, verbatim
    pub error: Option<CalcError>,
}

impl ComplianceResult {
    pub fn status(&self) -> EvaluationStatus {
        self.status
    }

    /// True only for an evaluated, sufficient assembly.
    pub fn passes(&self) -> bool {
        self.is_sufficient == Some(true)
    }

    /// One-line message for the user.
    pub fn message(&self) -> String {
        match (&self.status, &self.error) {
            (EvaluationStatus::Incomplete, _) => INCOMPLETE_MESSAGE.to_string(),
            (EvaluationStatus::LookupFailed, Some(error)) => error.to_string(),
            (EvaluationStatus::LookupFailed, None) => "Standards lookup failed".to_string(),
            (EvaluationStatus::Evaluated, _) => {
                if self.passes() {
                    "The insulation meets the required standard.".to_string()
                } else {
                    "Consider adding more insulation to meet the required standard.".to_string()
                }
            }
        }
    }
}

/// Evaluate items against the built-in standards table.
pub fn evaluate(items: &[ResolvedItem], params: &ProjectParameters) -> ComplianceResult {
    evaluate_with(StandardsTable::builtin(), items, params)
}

/// Evaluate items against a caller-supplied standards table.
///
/// Inputs are only read. The call is deterministic and keeps no state.
pub fn evaluate_with(
    table: &StandardsTable,
    items: &[ResolvedItem],
    params: &ProjectParameters,
) -> ComplianceResult {
    let per_layer_resistance: Vec<f64> = items.iter().map(ResolvedItem::resistance).collect();
    for (item, r) in items.iter().zip(&per_layer_resistance) {
        tracing::trace!(id = %item.id, thickness_cm = item.thickness_cm, resistance = r, "layer");
    }

    let total: M2KPerW = per_layer_resistance.iter().copied().map(M2KPerW).sum();
    let total_thermal_resistance = total.value();
    let total_r_value = (total + M2KPerW(surface_resistance(&params.element_type))).value();
    let u_value = 1.0 / total_r_value;

    let raw_mass: KgPerM2 = items.iter().map(|i| KgPerM2(i.areal_mass())).sum();
    let total_areal_mass = if params.is_interior_insulation() {
        raw_mass / 2.0
    } else {
        raw_mass
    }
    .value();

    let mut result = ComplianceResult {
        per_layer_resistance,
        total_thermal_resistance,
        total_r_value,
        u_value,
        total_areal_mass,
        required_resistance: None,
        is_sufficient: None,
        status: EvaluationStatus::Incomplete,
        missing: Vec::new(),
        error: None,
    };

    let mut missing: Vec<String> = Vec::new();
    if items.is_empty() {
        missing.push("layers".to_string());
    }
    missing.extend(params.missing_fields().into_iter().map(String::from));
    if !missing.is_empty() {
        tracing::debug!(?missing, "compliance check incomplete");
        result.missing = missing;
        return result;
    }

    match table.required_resistance(params, total_areal_mass) {
        Ok(required) => {
            let sufficient = total_thermal_resistance > required;
            tracing::debug!(
                total_thermal_resistance,
                required,
                total_areal_mass,
                sufficient,
                "compliance check evaluated"
            );
            result.required_resistance = Some(required);
            result.is_sufficient = Some(sufficient);
            result.status = EvaluationStatus::Evaluated;
        }
        Err(error) => {
            tracing::warn!(%error, "standards lookup failed");
            result.status = EvaluationStatus::LookupFailed;
            result.error = Some(error);
        }
    }
    result
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::parameters::*;
    use proptest::prelude::*;

    fn item_strategy() -> impl Strategy<Value = ResolvedItem> {
        (0.5_f64..60.0, 0.02_f64..3.5, 0.0_f64..2800.0)
            .prop_map(|(t, lambda, rho)| ResolvedItem::new(t, lambda, rho))
    }

    fn params_strategy() -> impl Strategy<Value = ProjectParameters> {
        (
            prop::sample::select(ProjectType::ALL.to_vec()),
            prop::sample::select(ClimateZone::ALL.to_vec()),
            prop::sample::select(ElementType::ALL.to_vec()),
            prop::sample::select(ExteriorColor::ALL.to_vec()),
        )
            .prop_map(|(p, z, e, c)| ProjectParameters::new(p, z, e, IsolationPlacement::Exterior, c))
    }

    proptest! {
        #[test]
        fn total_is_order_independent(
            items in prop::collection::vec(item_strategy(), 1..8),
            params in params_strategy(),
            shift in 0usize..8,
        ) {
            let forward = evaluate(&items, &params);

            let mut reversed = items.clone();
            reversed.reverse();
            let backward = evaluate(&reversed, &params);

            let mut rotated = items.clone();
            let len = rotated.len();
            rotated.rotate_left(shift % len);
            let rotated = evaluate(&rotated, &params);

            let manual: f64 = items.iter().map(|i| i.thickness_cm / 100.0 / i.thermal_conductivity).sum();
            let tol = 1e-9 * manual.abs().max(1.0);
            prop_assert!((forward.total_thermal_resistance - manual).abs() < tol);
            prop_assert!((forward.total_thermal_resistance - backward.total_thermal_resistance).abs() < tol);
            prop_assert!((forward.total_thermal_resistance - rotated.total_thermal_resistance).abs() < tol);
            let mass_tol = 1e-9 * forward.total_areal_mass.max(1.0);
            prop_assert!((forward.total_areal_mass - backward.total_areal_mass).abs() < mass_tol);
        }

        #[test]
        fn u_value_is_reciprocal(
            items in prop::collection::vec(item_strategy(), 1..8),
            params in params_strategy(),
        ) {
            let result = evaluate(&items, &params);
            prop_assert_eq!(result.u_value, 1.0 / result.total_r_value);
        }

        #[test]
        fn interior_insulation_halves_mass(
            items in prop::collection::vec(item_strategy(), 0..8),
            params in params_strategy(),
        ) {
            let mut interior = params.clone();
            interior.isolation_placement = IsolationPlacement::Interior.code().to_string();
            let ext = evaluate(&items, &params);
            let int = evaluate(&items, &interior);
            prop_assert_eq!(int.total_areal_mass, ext.total_areal_mass / 2.0);
        }

        #[test]
        fn verdict_matches_comparison(
            items in prop::collection::vec(item_strategy(), 1..8),
            params in params_strategy(),
        ) {
            let result = evaluate(&items, &params);
            match (result.required_resistance, result.is_sufficient) {
                (Some(required), Some(sufficient)) => {
                    prop_assert_eq!(sufficient, result.total_thermal_resistance > required);
                    prop_assert_eq!(result.status, EvaluationStatus::Evaluated);
                }
                (None, None) => prop_assert_eq!(result.status, EvaluationStatus::LookupFailed),
                _ => prop_assert!(false, "required and verdict must be set together"),
            }
        }

        #[test]
        fn requirement_stays_within_tiers(mass in 0.0_f64..500.0) {
            let masses = [300.0, 200.0, 150.0, 100.0];
            let values = [0.6, 0.8, 1.0, 1.25];
            let r = crate::standards::interpolate_tier(&masses, &values, mass);
            prop_assert!(r >= 0.6 - 1e-12 && r <= 1.25 + 1e-12);
        }
    }
}
