//! # Project Parameters
//!
//! The settings that select which requirement an assembly is checked against:
//! project type, climate zone, element type, insulation placement and
//! exterior colour.
//!
//! Parameters are stored as string codes so that combinations the standards
//! table does not cover (for instance the commercial project type) remain
//! representable and surface as lookup errors instead of parse failures.
//! The enums below list the selectable options and produce those codes.
//!
//! ## Example
//!
//! ```rust
//! use envelope_core::parameters::*;
//!
//! let params = ProjectParameters::new(
//!     ProjectType::Residential,
//!     ClimateZone::A,
//!     ElementType::ExternalWall,
//!     IsolationPlacement::Exterior,
//!     ExteriorColor::Light,
//! );
//! assert_eq!(params.project_type, "residential");
//! assert!(params.is_complete());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Building use category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    Residential,
    Office,
    /// Selectable, but the standards table defines no requirements for it
    Commercial,
}

impl ProjectType {
    /// All project types for UI selection
    pub const ALL: [ProjectType; 3] = [
        ProjectType::Residential,
        ProjectType::Office,
        ProjectType::Commercial,
    ];

    /// Code used in [`ProjectParameters`] and the standards table
    pub fn code(&self) -> &'static str {
        match self {
            ProjectType::Residential => "residential",
            ProjectType::Office => "office",
            ProjectType::Commercial => "commercial",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectType::Residential => "Residential",
            ProjectType::Office => "Office",
            ProjectType::Commercial => "Commercial",
        }
    }

    /// Parse from a code (exact match)
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Climate zone (project location), four tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClimateZone {
    A,
    B,
    C,
    D,
}

impl ClimateZone {
    /// All zones, in tier order
    pub const ALL: [ClimateZone; 4] = [ClimateZone::A, ClimateZone::B, ClimateZone::C, ClimateZone::D];

    pub fn code(&self) -> &'static str {
        match self {
            ClimateZone::A => "A",
            ClimateZone::B => "B",
            ClimateZone::C => "C",
            ClimateZone::D => "D",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ClimateZone::A => "Zone A",
            ClimateZone::B => "Zone B",
            ClimateZone::C => "Zone C",
            ClimateZone::D => "Zone D",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|z| z.code() == code)
    }
}

impl std::fmt::Display for ClimateZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Envelope element being evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementType {
    ExternalWall,
    SeparationWall,
    Roof,
    /// Residential floor above outdoor air
    FloorOverOpenAir,
    /// Office floor above open (unenclosed) space
    FloorOverOpenSpace,
    /// Office floor above enclosed space that is neither heated nor cooled
    FloorOverUnconditionedSpace,
}

impl ElementType {
    pub const ALL: [ElementType; 6] = [
        ElementType::ExternalWall,
        ElementType::SeparationWall,
        ElementType::Roof,
        ElementType::FloorOverOpenAir,
        ElementType::FloorOverOpenSpace,
        ElementType::FloorOverUnconditionedSpace,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ElementType::ExternalWall => "external-wall",
            ElementType::SeparationWall => "separation-wall",
            ElementType::Roof => "roof",
            ElementType::FloorOverOpenAir => "floor-over-open-air",
            ElementType::FloorOverOpenSpace => "floor-over-open-space",
            ElementType::FloorOverUnconditionedSpace => "floor-over-unconditioned-space",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ElementType::ExternalWall => "External wall",
            ElementType::SeparationWall => "Separation wall",
            ElementType::Roof => "Roof",
            ElementType::FloorOverOpenAir => "Floor over open air",
            ElementType::FloorOverOpenSpace => "Floor over open space",
            ElementType::FloorOverUnconditionedSpace => "Floor over unconditioned enclosed space",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.code() == code)
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Side of the structure carrying the insulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IsolationPlacement {
    Exterior,
    /// Interior insulation counts only half of the areal mass
    Interior,
}

impl IsolationPlacement {
    pub const ALL: [IsolationPlacement; 2] = [IsolationPlacement::Exterior, IsolationPlacement::Interior];

    pub fn code(&self) -> &'static str {
        match self {
            IsolationPlacement::Exterior => "exterior",
            IsolationPlacement::Interior => "interior",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            IsolationPlacement::Exterior => "Exterior insulation",
            IsolationPlacement::Interior => "Interior insulation",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }
}

impl std::fmt::Display for IsolationPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Exterior surface colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExteriorColor {
    Light,
    Dark,
}

impl ExteriorColor {
    pub const ALL: [ExteriorColor; 2] = [ExteriorColor::Light, ExteriorColor::Dark];

    pub fn code(&self) -> &'static str {
        match self {
            ExteriorColor::Light => "light",
            ExteriorColor::Dark => "dark",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ExteriorColor::Light => "Light",
            ExteriorColor::Dark => "Dark",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl std::fmt::Display for ExteriorColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Parameters feeding the required-resistance lookup.
///
/// An empty string means "not chosen yet". `exterior_color` is optional;
/// the other four are required before a verdict can be produced.
///
/// ## JSON Example
///
/// ```json
/// {
///   "project_type": "residential",
///   "project_location": "A",
///   "element_type": "external-wall",
///   "isolation_placement": "exterior",
///   "exterior_color": "dark"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectParameters {
    #[serde(default)]
    pub project_type: String,

    /// Climate zone code
    #[serde(default)]
    pub project_location: String,

    #[serde(default)]
    pub element_type: String,

    #[serde(default)]
    pub isolation_placement: String,

    /// Only affects residential external walls and roofs
    #[serde(default)]
    pub exterior_color: String,
}

impl ProjectParameters {
    /// Build a complete parameter set from typed options.
    pub fn new(
        project_type: ProjectType,
        zone: ClimateZone,
        element_type: ElementType,
        placement: IsolationPlacement,
        color: ExteriorColor,
    ) -> Self {
        ProjectParameters {
            project_type: project_type.code().to_string(),
            project_location: zone.code().to_string(),
            element_type: element_type.code().to_string(),
            isolation_placement: placement.code().to_string(),
            exterior_color: color.code().to_string(),
        }
    }

    /// Names of required parameters that are still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.project_type.is_empty() {
            missing.push("project_type");
        }
        if self.project_location.is_empty() {
            missing.push("project_location");
        }
        if self.element_type.is_empty() {
            missing.push("element_type");
        }
        if self.isolation_placement.is_empty() {
            missing.push("isolation_placement");
        }
        missing
    }

    /// True when every required parameter is chosen.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Only the exact `interior` code halves the mass.
    pub fn is_interior_insulation(&self) -> bool {
        self.isolation_placement == IsolationPlacement::Interior.code()
    }

    pub fn is_dark(&self) -> bool {
        self.exterior_color == ExteriorColor::Dark.code()
    }

    /// Set a parameter by field name, as a form would.
    ///
    /// Values are not checked against the option lists here; unsupported
    /// codes are reported by the standards lookup.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> CalcResult<()> {
        let value = value.into();
        match field {
            "project_type" => self.project_type = value,
            "project_location" => self.project_location = value,
            "element_type" => self.element_type = value,
            "isolation_placement" => self.isolation_placement = value,
            "exterior_color" => self.exterior_color = value,
            _ => {
                return Err(CalcError::invalid_input(
                    "field",
                    field,
                    "Unknown project parameter",
                ))
            }
        }
        Ok(())
    }
}
