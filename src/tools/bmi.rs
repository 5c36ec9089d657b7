//! BMI Calculator Tool
//!
//! Takes the raw BMI form fields, converts them to SI and shapes the result card.

use serde::Serialize;

use crate::error::CalcResult;
use crate::models::{classify, normal_weight_range, NormalWeightRange, Sex};
use crate::units::{to_canonical_height, to_canonical_weight, UnitSystem};

/// Raw BMI form fields
#[derive(Debug, Clone, Copy)]
pub struct BmiInput<'a> {
    /// Centimeters (metric) or feet (imperial)
    pub height: &'a str,
    /// Inches; required for imperial, ignored for metric
    pub inches: Option<&'a str>,
    /// Kilograms (metric) or pounds (imperial)
    pub weight: &'a str,
    pub unit_system: UnitSystem,
    /// Recorded only; classification does not depend on sex
    pub sex: Option<&'a str>,
}

/// Response for calculate_bmi
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiResponse {
    /// BMI rounded to one decimal place
    pub bmi: f64,
    pub bmi_raw: f64,
    pub category: String,
    pub status: String,
    pub color: String,
    pub band_lower: f64,
    pub band_upper: Option<f64>,
    pub normal_weight_range: NormalWeightRange,
    pub normal_range_text: String,
    pub unit_system: String,
    pub sex: Option<String>,
}

/// Calculate BMI from raw form fields
pub fn calculate_bmi(input: BmiInput<'_>) -> CalcResult<BmiResponse> {
    let system = input.unit_system;
    let height_m = to_canonical_height(input.height, input.inches, system)?;
    let weight_kg = to_canonical_weight(input.weight, system)?;

    let sex = match input.sex {
        Some(raw) if !raw.trim().is_empty() => Some(Sex::parse(raw)?),
        _ => None,
    };

    let result = classify(height_m, weight_kg)?;
    let range = normal_weight_range(height_m, system)?;
    let classification = &result.classification;

    tracing::info!(
        "BMI {:.1} ({}) for {} input",
        result.display_bmi(),
        classification.category.as_str(),
        system.as_str()
    );

    Ok(BmiResponse {
        bmi: result.display_bmi(),
        bmi_raw: result.bmi,
        category: classification.category.as_str().to_string(),
        status: classification.status.to_string(),
        color: classification.color.to_string(),
        band_lower: classification.lower_bound,
        band_upper: classification.upper_bound,
        normal_range_text: format_normal_range(&range),
        normal_weight_range: range,
        unit_system: system.as_str().to_string(),
        sex: sex.map(|s| s.as_str().to_string()),
    })
}

/// "Normal weight for your height: 60 - 81 kg"
pub fn format_normal_range(range: &NormalWeightRange) -> String {
    format!(
        "Normal weight for your height: {} - {} {}",
        range.min, range.max, range.unit
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidInputError;

    fn metric<'a>(height: &'a str, weight: &'a str) -> BmiInput<'a> {
        BmiInput {
            height,
            inches: None,
            weight,
            unit_system: UnitSystem::Metric,
            sex: None,
        }
    }

    #[test]
    fn test_metric_scenario() {
        let response = calculate_bmi(metric("180", "75")).unwrap();
        assert_eq!(response.bmi, 23.1);
        assert_eq!(response.category, "normal");
        assert_eq!(response.status, "Normal Weight");
        assert_eq!(response.normal_weight_range.min, 60);
        assert_eq!(response.normal_weight_range.max, 81);
        assert_eq!(response.normal_range_text, "Normal weight for your height: 60 - 81 kg");
        assert_eq!(response.unit_system, "metric");
    }

    #[test]
    fn test_imperial_scenario() {
        // 5'11" (1.8034 m), 200 lbs (90.7184 kg) -> BMI 27.89
        let response = calculate_bmi(BmiInput {
            height: "5",
            inches: Some("11"),
            weight: "200",
            unit_system: UnitSystem::Imperial,
            sex: Some("male"),
        })
        .unwrap();
        assert_eq!(response.bmi, 27.9);
        assert_eq!(response.category, "overweight");
        assert_eq!(response.normal_weight_range.unit, "lbs");
        assert_eq!(response.sex.as_deref(), Some("male"));
    }

    #[test]
    fn test_empty_height() {
        assert_eq!(
            calculate_bmi(metric("", "75")),
            Err(InvalidInputError::Missing { field: "height" })
        );
    }

    #[test]
    fn test_imperial_missing_inches() {
        let result = calculate_bmi(BmiInput {
            height: "5",
            inches: None,
            weight: "150",
            unit_system: UnitSystem::Imperial,
            sex: None,
        });
        assert_eq!(result, Err(InvalidInputError::Missing { field: "inches" }));
    }

    #[test]
    fn test_invalid_sex() {
        let mut input = metric("170", "65");
        input.sex = Some("robot");
        assert!(matches!(calculate_bmi(input), Err(InvalidInputError::UnknownSex { .. })));
    }
}
