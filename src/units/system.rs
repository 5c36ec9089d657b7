//! Unit systems and conversion constants
//!
//! Provides the metric/imperial flag, tagged measurements and the fixed factors
//! used to reach SI.

use serde::{Deserialize, Serialize};

use crate::error::{CalcResult, InvalidInputError};

// ============================================================================
// Conversion Constants
// ============================================================================

/// Centimeters per meter
pub const CM_PER_M: f64 = 100.0;
/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;
/// Meters per inch
pub const M_PER_INCH: f64 = 0.0254;
/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;
/// Pounds per kilogram (display conversion, not the exact inverse of KG_PER_LB)
pub const LB_PER_KG: f64 = 2.20462;

/// Measurement system selected by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Centimeters and kilograms
    #[default]
    Metric,
    /// Feet + inches and pounds
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "si" | "m" => Some(UnitSystem::Metric),
            "imperial" | "english" | "us" | "i" => Some(UnitSystem::Imperial),
            _ => None,
        }
    }

    /// Parse, reporting unknown names as invalid input
    pub fn parse(s: &str) -> CalcResult<Self> {
        Self::from_str(s).ok_or_else(|| InvalidInputError::UnknownUnitSystem {
            value: s.to_string(),
        })
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "Metric (kg, cm)",
            UnitSystem::Imperial => "English (lbs, ft/in)",
        }
    }

    /// Weight unit label used when displaying results
    pub fn weight_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "kg",
            UnitSystem::Imperial => "lbs",
        }
    }

    /// Height unit label for the primary height field
    pub fn height_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "cm",
            UnitSystem::Imperial => "ft",
        }
    }

    /// Whether height is entered as two fields (feet and inches)
    pub fn uses_split_height(&self) -> bool {
        matches!(self, UnitSystem::Imperial)
    }
}

/// Physical dimension of a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Length,
    Mass,
}

/// A parsed magnitude in its native unit.
///
/// Native units: metric length in centimeters, imperial length in inches,
/// metric mass in kilograms, imperial mass in pounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    magnitude: f64,
    system: UnitSystem,
    dimension: Dimension,
}

impl Measurement {
    /// Build a measurement, rejecting negative and non-finite magnitudes
    pub fn new(
        magnitude: f64,
        system: UnitSystem,
        dimension: Dimension,
        field: &'static str,
    ) -> CalcResult<Self> {
        if !magnitude.is_finite() || magnitude < 0.0 {
            return Err(InvalidInputError::OutOfRange { field, value: magnitude });
        }
        Ok(Self { magnitude, system, dimension })
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn system(&self) -> UnitSystem {
        self.system
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Unit label of the stored magnitude
    pub fn native_unit(&self) -> &'static str {
        match (self.dimension, self.system) {
            (Dimension::Length, UnitSystem::Metric) => "cm",
            (Dimension::Length, UnitSystem::Imperial) => "in",
            (Dimension::Mass, UnitSystem::Metric) => "kg",
            (Dimension::Mass, UnitSystem::Imperial) => "lbs",
        }
    }

    /// Value in SI: meters for length, kilograms for mass
    pub fn to_si(&self) -> f64 {
        match (self.dimension, self.system) {
            (Dimension::Length, UnitSystem::Metric) => self.magnitude / CM_PER_M,
            (Dimension::Length, UnitSystem::Imperial) => self.magnitude * M_PER_INCH,
            (Dimension::Mass, UnitSystem::Metric) => self.magnitude,
            (Dimension::Mass, UnitSystem::Imperial) => self.magnitude * KG_PER_LB,
        }
    }
}

// ============================================================================
// Display Rounding
// ============================================================================

/// Round half up to the nearest integer (2.5 -> 3, -2.5 -> -2)
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Round half up to one decimal place
pub fn round_to_tenth(value: f64) -> f64 {
    round_half_up(value * 10.0) as f64 / 10.0
}
