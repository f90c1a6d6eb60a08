//! # Unit Types
//!
//! Type-safe wrappers for building-physics units. These provide compile-time
//! safety against unit confusion while remaining lightweight (just f64 wrappers).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - Envelope calculations use a small, fixed set of units
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! ## SI Units
//!
//! - Layer thickness: centimetres (cm) as entered by the user, metres (m) in formulas
//! - Thermal conductivity λ: W/(m·K)
//! - Density (specific mass): kg/m³
//! - Thermal resistance R: m²·K/W
//! - Areal mass: kg/m²
//!
//! ## Example
//!
//! ```rust
//! use envelope_core::units::{Centimeters, Meters, WPerMK, M2KPerW};
//!
//! let thickness = Centimeters(20.0);
//! let meters: Meters = thickness.into();
//! assert_eq!(meters.0, 0.2);
//!
//! let r: M2KPerW = meters / WPerMK(0.5);
//! assert!((r.0 - 0.4).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in centimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / 100.0)
    }
}

impl From<Meters> for Centimeters {
    fn from(m: Meters) -> Self {
        Centimeters(m.0 * 100.0)
    }
}

// ============================================================================
// Material Properties
// ============================================================================

/// Thermal conductivity λ in W/(m·K)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WPerMK(pub f64);

/// Density (specific mass) in kg/m³
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerM3(pub f64);

// ============================================================================
// Assembly Quantities
// ============================================================================

/// Thermal resistance R in m²·K/W
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct M2KPerW(pub f64);

/// Areal mass in kg/m²
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerM2(pub f64);

/// R = d / λ
///
/// A zero or negative conductivity propagates `inf`/`NaN` rather than panicking.
impl Div<WPerMK> for Meters {
    type Output = M2KPerW;
    fn div(self, rhs: WPerMK) -> Self::Output {
        M2KPerW(self.0 / rhs.0)
    }
}

/// m'' = d · ρ
impl Mul<KgPerM3> for Meters {
    type Output = KgPerM2;
    fn mul(self, rhs: KgPerM3) -> Self::Output {
        KgPerM2(self.0 * rhs.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|v| v.0).sum())
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Centimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(WPerMK);
impl_arithmetic!(KgPerM3);
impl_arithmetic!(M2KPerW);
impl_arithmetic!(KgPerM2);
