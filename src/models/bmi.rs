//! BMI model
//!
//! Body Mass Index from SI height and weight, the four-band classification and
//! the Normal-band weight range at a given height.
//!
//! Band membership is decided by strict `<` checks against 18.5, 24.9 and 29.9,
//! evaluated in order. The displayed ranges of Overweight (25.0 - 29.9) and
//! Obese (30.0+) do not line up with those checks: a BMI of 24.95 is
//! Overweight even though its displayed range starts at 25.0. The checks are
//! authoritative; displayed bounds are informational.

use serde::{Deserialize, Serialize};

use crate::error::{CalcResult, InvalidInputError};
use crate::units::{kg_to_lb, round_half_up, round_to_tenth, UnitSystem};

/// Lower BMI limit of the Normal band
pub const NORMAL_MIN_BMI: f64 = 18.5;
/// Branch boundary between Normal and Overweight
pub const NORMAL_MAX_BMI: f64 = 24.9;
/// Branch boundary between Overweight and Obese
pub const OVERWEIGHT_MAX_BMI: f64 = 29.9;

/// BMI band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Classify a raw (unrounded) BMI value
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < NORMAL_MIN_BMI {
            BmiCategory::Underweight
        } else if bmi < NORMAL_MAX_BMI {
            BmiCategory::Normal
        } else if bmi < OVERWEIGHT_MAX_BMI {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normal",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        }
    }

    /// Status label shown to the user
    pub fn display_name(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal Weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// Display-color identifier for the status text and indicator
    pub fn color(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "color_underweight",
            BmiCategory::Normal => "color_normal",
            BmiCategory::Overweight => "color_overweight",
            BmiCategory::Obese => "color_obese",
        }
    }

    /// Displayed lower bound of the band
    pub fn lower_bound(&self) -> f64 {
        match self {
            BmiCategory::Underweight => 0.0,
            BmiCategory::Normal => 18.5,
            BmiCategory::Overweight => 25.0,
            BmiCategory::Obese => 30.0,
        }
    }

    /// Displayed upper bound of the band; Obese is unbounded
    pub fn upper_bound(&self) -> Option<f64> {
        match self {
            BmiCategory::Underweight => Some(18.5),
            BmiCategory::Normal => Some(24.9),
            BmiCategory::Overweight => Some(29.9),
            BmiCategory::Obese => None,
        }
    }

    pub fn classification(&self) -> BmiClassification {
        BmiClassification {
            category: *self,
            status: self.display_name(),
            color: self.color(),
            lower_bound: self.lower_bound(),
            upper_bound: self.upper_bound(),
        }
    }

    pub fn all() -> [BmiCategory; 4] {
        [
            BmiCategory::Underweight,
            BmiCategory::Normal,
            BmiCategory::Overweight,
            BmiCategory::Obese,
        ]
    }
}

/// Status, color and displayed range of one band
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiClassification {
    pub category: BmiCategory,
    pub status: &'static str,
    pub color: &'static str,
    pub lower_bound: f64,
    pub upper_bound: Option<f64>,
}

/// Result of a BMI calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiResult {
    /// Unrounded BMI; classification uses this value
    pub bmi: f64,
    pub classification: BmiClassification,
}

impl BmiResult {
    /// BMI rounded half up to one decimal place
    pub fn display_bmi(&self) -> f64 {
        round_to_tenth(self.bmi)
    }
}

/// Normal-band weight range at a height, in the caller's display units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NormalWeightRange {
    pub min: i64,
    pub max: i64,
    pub unit: &'static str,
}

fn check_positive(value: f64, field: &'static str) -> CalcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(InvalidInputError::OutOfRange { field, value })
    }
}

/// Body Mass Index: kilograms over meters squared
pub fn bmi(height_m: f64, weight_kg: f64) -> f64 {
    weight_kg / height_m.powi(2)
}

/// Compute and classify BMI from SI inputs
pub fn classify(height_m: f64, weight_kg: f64) -> CalcResult<BmiResult> {
    check_positive(height_m, "height")?;
    check_positive(weight_kg, "weight")?;

    let value = bmi(height_m, weight_kg);
    let category = BmiCategory::from_bmi(value);
    tracing::debug!("BMI {:.3} -> {}", value, category.as_str());

    Ok(BmiResult {
        bmi: value,
        classification: category.classification(),
    })
}

/// Weight bounds of the Normal band at `height_m`
///
/// Bounds are computed in kilograms, converted to pounds for imperial display,
/// and only then rounded, each bound on its own.
pub fn normal_weight_range(height_m: f64, system: UnitSystem) -> CalcResult<NormalWeightRange> {
    check_positive(height_m, "height")?;

    let height_sq = height_m.powi(2);
    let min_kg = NORMAL_MIN_BMI * height_sq;
    let max_kg = NORMAL_MAX_BMI * height_sq;

    let (min, max) = match system {
        UnitSystem::Metric => (min_kg, max_kg),
        UnitSystem::Imperial => (kg_to_lb(min_kg), kg_to_lb(max_kg)),
    };

    Ok(NormalWeightRange {
        min: round_half_up(min),
        max: round_half_up(max),
        unit: system.weight_unit(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{to_canonical_height, to_canonical_weight};

    #[test]
    fn test_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.49999), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.89999), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.9), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(24.95), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(29.89999), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(29.9), BmiCategory::Obese);
        assert_eq!(BmiCategory::from_bmi(45.0), BmiCategory::Obese);
    }

    #[test]
    fn test_displayed_ranges_are_informational() {
        // 24.95 sits below the displayed Overweight floor but is classified Overweight
        let c = BmiCategory::from_bmi(24.95).classification();
        assert_eq!(c.lower_bound, 25.0);
        assert_eq!(c.status, "Overweight");
        assert_eq!(BmiCategory::Obese.upper_bound(), None);
    }

    #[test]
    fn test_classify_scenario() {
        let result = classify(1.8, 75.0).unwrap();
        assert!((result.bmi - 75.0 / 3.24).abs() < 1e-12);
        assert_eq!(result.display_bmi(), 23.1);
        assert_eq!(result.classification.category, BmiCategory::Normal);
        assert_eq!(result.classification.color, "color_normal");
    }

    #[test]
    fn test_metric_formula_exact() {
        for h in [150.0, 165.5, 180.0, 201.0] {
            for w in [45.0, 70.2, 99.9, 140.0] {
                let height_m = to_canonical_height(&h.to_string(), None, UnitSystem::Metric).unwrap();
                let result = classify(height_m, w).unwrap();
                assert_eq!(result.bmi, w / (h / 100.0_f64).powi(2));
            }
        }
    }

    #[test]
    fn test_imperial_matches_direct_formula_band() {
        // Direct imperial BMI derived from the same constants
        let factor = 0.453592 / (0.0254_f64 * 0.0254);
        for feet in 4..=6 {
            for inches in [0.0, 3.5, 7.0, 11.0] {
                for lbs in [90.0, 130.0, 165.0, 190.0, 240.0, 320.0] {
                    let height_m = to_canonical_height(
                        &feet.to_string(),
                        Some(&inches.to_string()),
                        UnitSystem::Imperial,
                    )
                    .unwrap();
                    let weight_kg = to_canonical_weight(&lbs.to_string(), UnitSystem::Imperial).unwrap();
                    let via_si = classify(height_m, weight_kg).unwrap();

                    let total_in = feet as f64 * 12.0 + inches;
                    let direct = factor * lbs / (total_in * total_in);
                    assert!((via_si.bmi - direct).abs() < 1e-9);
                    assert_eq!(via_si.classification.category, BmiCategory::from_bmi(direct));
                }
            }
        }
    }

    #[test]
    fn test_classify_is_idempotent() {
        let first = classify(1.72, 68.4).unwrap();
        let second = classify(1.72, 68.4).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_classify_rejects_non_positive() {
        assert!(classify(0.0, 70.0).is_err());
        assert!(classify(1.7, 0.0).is_err());
        assert!(classify(f64::NAN, 70.0).is_err());
        assert!(classify(1.7, -5.0).is_err());
    }

    #[test]
    fn test_normal_weight_range_metric() {
        // 1.8 m: 18.5 * 3.24 = 59.94, 24.9 * 3.24 = 80.676
        let range = normal_weight_range(1.8, UnitSystem::Metric).unwrap();
        assert_eq!(range, NormalWeightRange { min: 60, max: 81, unit: "kg" });
    }

    #[test]
    fn test_normal_weight_range_imperial_rounds_after_conversion() {
        // 59.94 kg * 2.20462 = 132.145 lbs, 80.676 kg * 2.20462 = 177.860 lbs
        let range = normal_weight_range(1.8, UnitSystem::Imperial).unwrap();
        assert_eq!(range, NormalWeightRange { min: 132, max: 178, unit: "lbs" });
    }
}
