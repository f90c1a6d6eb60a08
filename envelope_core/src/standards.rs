//! # Thermal Resistance Standards
//!
//! Required thermal resistance of an envelope element, looked up by project
//! type, element type and climate zone, and interpolated over the element's
//! areal mass.
//!
//! ## Table Layout
//!
//! ```text
//! StandardsTable
//! └── project type ("residential", "office")
//!     └── element type ("external-wall", "roof", ...)
//!         ├── masses: [300, 200, 150, 100]        (kg/m², heaviest first)
//!         └── resistance
//!             ├── A: [0.6, 0.8, 1.0, 1.25]        (m²·K/W, parallel to masses)
//!             └── ...
//! ```
//!
//! The built-in table is embedded from `data/standards.toml`. The commercial
//! project type is absent: selecting it yields
//! [`CalcError::InvalidProjectType`].
//!
//! ## Lookup Rules
//!
//! - mass at or above the heaviest breakpoint: heaviest tier, no extrapolation
//! - mass at or below the lightest breakpoint: lightest tier, no extrapolation
//! - otherwise: scan from the heaviest breakpoint for the first one `<= mass`
//!   and interpolate linearly against the breakpoint just before it
//! - residential, dark exterior: external walls add 0.3 (zones A-C) or
//!   0.5 (zone D); roofs add 0.2
//!
//! ## Example
//!
//! ```rust
//! use envelope_core::standards::StandardsTable;
//!
//! let table = StandardsTable::builtin();
//! let r = table.base_resistance("residential", "external-wall", "A", 175.0)?;
//! assert!((r - 0.9).abs() < 1e-9);
//! # Ok::<(), envelope_core::errors::CalcError>(())
//! ```

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::parameters::{ClimateZone, ElementType, ProjectParameters, ProjectType};

const BUILTIN_STANDARDS_TOML: &str = include_str!("../data/standards.toml");

static BUILTIN_STANDARDS: Lazy<StandardsTable> = Lazy::new(|| {
    StandardsTable::from_toml_str(BUILTIN_STANDARDS_TOML)
        .expect("embedded data/standards.toml must pass standards validation")
});

/// Surface (air film) resistance added to the layer total, m²·K/W.
///
/// Element types without a defined constant contribute 0.
pub fn surface_resistance(element_type: &str) -> f64 {
    match ElementType::from_code(element_type) {
        Some(ElementType::ExternalWall) => 0.17,
        Some(ElementType::SeparationWall) => 0.26,
        Some(ElementType::Roof) => 0.14,
        _ => 0.0,
    }
}

/// Straight line through (x0, y0) and (x1, y1), evaluated at x.
pub fn linear_interpolate(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    y0 + (x - x0) * ((y1 - y0) / (x1 - x0))
}

/// Resistance for `mass` from parallel breakpoint/value lists.
///
/// `masses` must be in descending order. A mass that cannot be placed
/// (NaN, or mismatched lists) yields NaN.
pub fn interpolate_tier(masses: &[f64], values: &[f64], mass: f64) -> f64 {
    let (Some(&heaviest), Some(&lightest)) = (masses.first(), masses.last()) else {
        return f64::NAN;
    };
    let value_at = |i: usize| values.get(i).copied().unwrap_or(f64::NAN);

    if mass >= heaviest {
        return value_at(0);
    }
    if mass <= lightest {
        return match values.last() {
            Some(&v) => v,
            None => f64::NAN,
        };
    }

    // First breakpoint <= mass, scanning heaviest to lightest. Tie at an
    // interior breakpoint lands here with mass == lower_mass.
    let mut lower_index = None;
    for (i, &m) in masses.iter().enumerate() {
        if m <= mass {
            lower_index = Some(i);
            break;
        }
    }

    match lower_index {
        Some(lower) if lower > 0 => {
            let upper = lower - 1;
            linear_interpolate(mass, masses[lower], masses[upper], value_at(lower), value_at(upper))
        }
        _ => f64::NAN,
    }
}

/// Extra resistance demanded for dark exteriors.
///
/// Applies only to residential projects: external walls add 0.3 in the
/// first three zones and 0.5 in the fourth, roofs add 0.2 in any zone.
pub fn color_correction(params: &ProjectParameters) -> f64 {
    if !params.is_dark() || params.project_type != ProjectType::Residential.code() {
        return 0.0;
    }
    match ElementType::from_code(&params.element_type) {
        Some(ElementType::ExternalWall) => match ClimateZone::from_code(&params.project_location) {
            Some(ClimateZone::A | ClimateZone::B | ClimateZone::C) => 0.3,
            Some(ClimateZone::D) => 0.5,
            None => 0.0,
        },
        Some(ElementType::Roof) => 0.2,
        _ => 0.0,
    }
}

/// Requirements for one element type of one project type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementStandard {
    /// Areal-mass breakpoints in kg/m², strictly descending
    pub masses: Vec<f64>,

    /// Required resistance per climate zone code, parallel to `masses`
    pub resistance: BTreeMap<String, Vec<f64>>,
}

impl ElementStandard {
    /// Resistance values for a zone code.
    pub fn zone_values(&self, zone: &str) -> Option<&[f64]> {
        self.resistance.get(zone).map(Vec::as_slice)
    }

    /// Zone codes defined for this element.
    pub fn zones(&self) -> Vec<&str> {
        self.resistance.keys().map(String::as_str).collect()
    }

    fn validate(&self, project_type: &str, element_type: &str) -> CalcResult<()> {
        let field = format!("{}.{}", project_type, element_type);
        if self.masses.is_empty() {
            return Err(CalcError::invalid_input(field, "[]", "At least one mass breakpoint is required"));
        }
        if self.masses.iter().any(|m| !m.is_finite()) {
            return Err(CalcError::invalid_input(
                field,
                format!("{:?}", self.masses),
                "Mass breakpoints must be finite",
            ));
        }
        if self.masses.windows(2).any(|w| w[0] <= w[1]) {
            return Err(CalcError::invalid_input(
                field,
                format!("{:?}", self.masses),
                "Mass breakpoints must be strictly descending",
            ));
        }
        if self.resistance.is_empty() {
            return Err(CalcError::invalid_input(field, "{}", "No climate zones defined"));
        }
        for (zone, values) in &self.resistance {
            if values.len() != self.masses.len() {
                return Err(CalcError::invalid_input(
                    format!("{}.resistance.{}", field, zone),
                    format!("{:?}", values),
                    format!("Expected {} values, one per mass breakpoint", self.masses.len()),
                ));
            }
        }
        Ok(())
    }
}

/// Nested standards table: project type -> element type -> requirements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StandardsTable {
    projects: BTreeMap<String, BTreeMap<String, ElementStandard>>,
}

impl StandardsTable {
    /// Build a table, validating every element entry.
    pub fn new(projects: BTreeMap<String, BTreeMap<String, ElementStandard>>) -> CalcResult<Self> {
        for (project_type, elements) in &projects {
            for (element_type, standard) in elements {
                standard.validate(project_type, element_type)?;
            }
        }
        Ok(StandardsTable { projects })
    }

    /// Parse a table from TOML (`[project.element]` tables).
    pub fn from_toml_str(source: &str) -> CalcResult<Self> {
        let projects: BTreeMap<String, BTreeMap<String, ElementStandard>> = toml::from_str(source)
            .map_err(|e| CalcError::serialization(format!("Invalid standards table: {}", e)))?;
        StandardsTable::new(projects)
    }

    /// The table shipped with the crate.
    pub fn builtin() -> &'static StandardsTable {
        &BUILTIN_STANDARDS
    }

    /// Project types that have requirements.
    pub fn project_types(&self) -> Vec<&str> {
        self.projects.keys().map(String::as_str).collect()
    }

    /// Element types defined under a project type (empty if unknown).
    pub fn element_types(&self, project_type: &str) -> Vec<&str> {
        self.projects
            .get(project_type)
            .map(|elements| elements.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Requirements for (project type, element type).
    pub fn entry(&self, project_type: &str, element_type: &str) -> CalcResult<&ElementStandard> {
        let elements = self.projects.get(project_type).ok_or_else(|| CalcError::InvalidProjectType {
            project_type: project_type.to_string(),
        })?;
        elements.get(element_type).ok_or_else(|| CalcError::InvalidElementType {
            project_type: project_type.to_string(),
            element_type: element_type.to_string(),
        })
    }

    /// Uncorrected required resistance for a mass.
    pub fn base_resistance(
        &self,
        project_type: &str,
        element_type: &str,
        zone: &str,
        mass: f64,
    ) -> CalcResult<f64> {
        let standard = self.entry(project_type, element_type)?;
        let values = standard
            .zone_values(zone)
            .ok_or_else(|| CalcError::InvalidProjectLocation {
                element_type: element_type.to_string(),
                project_location: zone.to_string(),
            })?;

        let base = interpolate_tier(&standard.masses, values, mass);
        tracing::trace!(project_type, element_type, zone, mass, base, "base resistance");
        Ok(base)
    }

    /// Required resistance for the given parameters and areal mass,
    /// including the dark-colour correction.
    pub fn required_resistance(&self, params: &ProjectParameters, mass: f64) -> CalcResult<f64> {
        let base = self.base_resistance(
            &params.project_type,
            &params.element_type,
            &params.project_location,
            mass,
        )?;
        Ok(base + color_correction(params))
    }
}

impl Default for StandardsTable {
    fn default() -> Self {
        StandardsTable::builtin().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::{ExteriorColor, IsolationPlacement};

    const EXTERNAL_WALL_MASSES: [f64; 4] = [300.0, 200.0, 150.0, 100.0];
    const ZONE_A: [f64; 4] = [0.6, 0.8, 1.0, 1.25];

    fn params(
        project: ProjectType,
        zone: ClimateZone,
        element: ElementType,
        color: ExteriorColor,
    ) -> ProjectParameters {
        ProjectParameters::new(project, zone, element, IsolationPlacement::Exterior, color)
    }

    #[test]
    fn test_builtin_table_loads() {
        let table = StandardsTable::builtin();
        assert_eq!(table.project_types(), vec!["office", "residential"]);
        assert_eq!(table.element_types("residential").len(), 4);
        assert_eq!(table.element_types("office").len(), 5);
        assert!(table.element_types("commercial").is_empty());
    }

    #[test]
    fn test_no_extrapolation() {
        assert_eq!(interpolate_tier(&EXTERNAL_WALL_MASSES, &ZONE_A, 300.0), 0.6);
        assert_eq!(interpolate_tier(&EXTERNAL_WALL_MASSES, &ZONE_A, 1000.0), 0.6);
        assert_eq!(interpolate_tier(&EXTERNAL_WALL_MASSES, &ZONE_A, 100.0), 1.25);
        assert_eq!(interpolate_tier(&EXTERNAL_WALL_MASSES, &ZONE_A, 0.0), 1.25);
    }

    #[test]
    fn test_midpoint_interpolation() {
        let r = interpolate_tier(&EXTERNAL_WALL_MASSES, &ZONE_A, 175.0);
        assert!((r - 0.9).abs() < 1e-12);

        let r = interpolate_tier(&EXTERNAL_WALL_MASSES, &ZONE_A, 250.0);
        assert!((r - 0.7).abs() < 1e-12);

        let r = interpolate_tier(&EXTERNAL_WALL_MASSES, &ZONE_A, 125.0);
        assert!((r - 1.125).abs() < 1e-12);
    }

    #[test]
    fn test_interior_breakpoint_collapses_to_tier() {
        assert_eq!(interpolate_tier(&EXTERNAL_WALL_MASSES, &ZONE_A, 200.0), 0.8);
        assert_eq!(interpolate_tier(&EXTERNAL_WALL_MASSES, &ZONE_A, 150.0), 1.0);
    }

    #[test]
    fn test_single_breakpoint() {
        assert_eq!(interpolate_tier(&[0.0], &[1.5], 250.0), 1.5);
        assert_eq!(interpolate_tier(&[0.0], &[1.5], 0.0), 1.5);
    }

    #[test]
    fn test_nan_mass_does_not_panic() {
        assert!(interpolate_tier(&EXTERNAL_WALL_MASSES, &ZONE_A, f64::NAN).is_nan());
        assert!(interpolate_tier(&[], &[], 10.0).is_nan());
    }

    #[test]
    fn test_linear_interpolate() {
        assert_eq!(linear_interpolate(150.0, 150.0, 200.0, 1.0, 0.8), 1.0);
        assert!((linear_interpolate(200.0, 150.0, 200.0, 1.0, 0.8) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_surface_resistance() {
        assert_eq!(surface_resistance("external-wall"), 0.17);
        assert_eq!(surface_resistance("separation-wall"), 0.26);
        assert_eq!(surface_resistance("roof"), 0.14);
        assert_eq!(surface_resistance("floor-over-open-air"), 0.0);
        assert_eq!(surface_resistance(""), 0.0);
        assert_eq!(surface_resistance("balcony"), 0.0);
    }

    #[test]
    fn test_dark_external_wall_correction() {
        let table = StandardsTable::builtin();
        let p = params(
            ProjectType::Residential,
            ClimateZone::A,
            ElementType::ExternalWall,
            ExteriorColor::Dark,
        );
        let r = table.required_resistance(&p, 300.0).unwrap();
        assert!((r - 0.9).abs() < 1e-12);

        let p = params(
            ProjectType::Residential,
            ClimateZone::D,
            ElementType::ExternalWall,
            ExteriorColor::Dark,
        );
        let r = table.required_resistance(&p, 300.0).unwrap();
        assert!((r - 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_dark_roof_correction_any_zone() {
        let table = StandardsTable::builtin();
        for zone in ClimateZone::ALL {
            let p = params(ProjectType::Residential, zone, ElementType::Roof, ExteriorColor::Dark);
            let base = table.base_resistance("residential", "roof", zone.code(), 120.0).unwrap();
            assert_eq!(table.required_resistance(&p, 120.0).unwrap(), base + 0.2);
        }
    }

    #[test]
    fn test_no_correction_outside_residential_dark() {
        let table = StandardsTable::builtin();

        let light = params(
            ProjectType::Residential,
            ClimateZone::A,
            ElementType::ExternalWall,
            ExteriorColor::Light,
        );
        assert_eq!(table.required_resistance(&light, 300.0).unwrap(), 0.6);

        let office = params(
            ProjectType::Office,
            ClimateZone::A,
            ElementType::ExternalWall,
            ExteriorColor::Dark,
        );
        assert_eq!(table.required_resistance(&office, 300.0).unwrap(), 0.4);

        let office_roof = params(
            ProjectType::Office,
            ClimateZone::D,
            ElementType::Roof,
            ExteriorColor::Dark,
        );
        assert_eq!(table.required_resistance(&office_roof, 300.0).unwrap(), 1.6);

        let separation = params(
            ProjectType::Residential,
            ClimateZone::A,
            ElementType::SeparationWall,
            ExteriorColor::Dark,
        );
        assert_eq!(table.required_resistance(&separation, 200.0).unwrap(), 0.45);
    }

    #[test]
    fn test_lookup_errors_name_the_key() {
        let table = StandardsTable::builtin();

        let err = table.base_resistance("commercial", "external-wall", "A", 200.0).unwrap_err();
        assert_eq!(err, CalcError::InvalidProjectType { project_type: "commercial".to_string() });

        let err = table.base_resistance("office", "floor-over-open-air", "A", 200.0).unwrap_err();
        assert!(matches!(err, CalcError::InvalidElementType { .. }));

        let err = table.base_resistance("residential", "roof", "E", 200.0).unwrap_err();
        assert_eq!(err.to_string(), "Invalid project location: E");
    }

    #[test]
    fn test_validation_rejects_bad_tables() {
        let ascending = r#"
            [residential.roof]
            masses = [100.0, 300.0]
            [residential.roof.resistance]
            A = [1.0, 1.4]
        "#;
        assert!(StandardsTable::from_toml_str(ascending).is_err());

        let ragged = r#"
            [residential.roof]
            masses = [300.0, 100.0]
            [residential.roof.resistance]
            A = [1.0]
        "#;
        assert!(StandardsTable::from_toml_str(ragged).is_err());

        let empty = r#"
            [residential.roof]
            masses = []
            [residential.roof.resistance]
            A = []
        "#;
        assert!(StandardsTable::from_toml_str(empty).is_err());
    }

    #[test]
    fn test_custom_table() {
        let table = StandardsTable::from_toml_str(
            r#"
            [commercial.external-wall]
            masses = [400.0, 100.0]
            [commercial.external-wall.resistance]
            A = [0.5, 1.1]
            "#,
        )
        .unwrap();
        let r = table.base_resistance("commercial", "external-wall", "A", 250.0).unwrap();
        assert!((r - 0.8).abs() < 1e-12);
    }
}
