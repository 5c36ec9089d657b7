//! Unit conversion functions
//!
//! Parses raw text fields and converts them to canonical SI values.

use super::system::{
    Dimension, Measurement, UnitSystem, CM_PER_M, INCHES_PER_FOOT, KG_PER_LB, LB_PER_KG,
    M_PER_INCH,
};
use crate::error::{CalcResult, InvalidInputError};

/// Parse a raw text field into a finite, non-negative number
///
/// Surrounding whitespace is ignored. Empty input is reported as missing.
pub fn parse_magnitude(raw: &str, field: &'static str) -> CalcResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InvalidInputError::Missing { field });
    }

    let value: f64 = trimmed.parse().map_err(|_| InvalidInputError::NotANumber {
        field,
        value: trimmed.to_string(),
    })?;

    // "inf" and "NaN" parse as f64 but are not magnitudes
    if !value.is_finite() {
        return Err(InvalidInputError::NotANumber {
            field,
            value: trimmed.to_string(),
        });
    }
    if value < 0.0 {
        return Err(InvalidInputError::OutOfRange { field, value });
    }

    Ok(value)
}

/// Convert a raw height entry to meters
///
/// Metric: `primary` is centimeters and `secondary` is ignored.
/// Imperial: `primary` is feet and `secondary` is inches; both are required.
pub fn to_canonical_height(
    primary: &str,
    secondary: Option<&str>,
    system: UnitSystem,
) -> CalcResult<f64> {
    let measurement = match system {
        UnitSystem::Metric => {
            let cm = parse_magnitude(primary, "height")?;
            Measurement::new(cm, system, Dimension::Length, "height")?
        }
        UnitSystem::Imperial => {
            let feet = parse_magnitude(primary, "height")?;
            let inches = parse_magnitude(
                secondary.ok_or(InvalidInputError::Missing { field: "inches" })?,
                "inches",
            )?;
            let total_inches = feet * INCHES_PER_FOOT + inches;
            Measurement::new(total_inches, system, Dimension::Length, "height")?
        }
    };

    let meters = measurement.to_si();
    if meters <= 0.0 {
        return Err(InvalidInputError::OutOfRange { field: "height", value: measurement.magnitude() });
    }

    tracing::debug!(
        "Height {} {} -> {:.4} m",
        measurement.magnitude(),
        measurement.native_unit(),
        meters
    );
    Ok(meters)
}

/// Convert a raw weight entry (kilograms or pounds) to kilograms
pub fn to_canonical_weight(weight: &str, system: UnitSystem) -> CalcResult<f64> {
    let value = parse_magnitude(weight, "weight")?;
    let measurement = Measurement::new(value, system, Dimension::Mass, "weight")?;

    let kg = measurement.to_si();
    if kg <= 0.0 {
        return Err(InvalidInputError::OutOfRange { field: "weight", value });
    }

    tracing::debug!("Weight {} {} -> {:.4} kg", value, measurement.native_unit(), kg);
    Ok(kg)
}

/// Kilograms to pounds, using the display factor
pub fn kg_to_lb(kg: f64) -> f64 {
    kg * LB_PER_KG
}

/// Pounds to kilograms
pub fn lb_to_kg(lb: f64) -> f64 {
    lb * KG_PER_LB
}

/// Meters to centimeters
pub fn meters_to_cm(meters: f64) -> f64 {
    meters * CM_PER_M
}

/// Split a height in meters into whole feet and remaining inches
pub fn meters_to_feet_inches(meters: f64) -> (f64, f64) {
    let total_inches = meters / M_PER_INCH;
    let feet = (total_inches / INCHES_PER_FOOT).floor();
    (feet, total_inches - feet * INCHES_PER_FOOT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::system::round_half_up;

    #[test]
    fn test_parse_magnitude() {
        assert_eq!(parse_magnitude("180", "height"), Ok(180.0));
        assert_eq!(parse_magnitude("  72.5 ", "weight"), Ok(72.5));
        assert_eq!(parse_magnitude("0", "inches"), Ok(0.0));
    }

    #[test]
    fn test_parse_magnitude_errors() {
        assert_eq!(
            parse_magnitude("", "height"),
            Err(InvalidInputError::Missing { field: "height" })
        );
        assert_eq!(
            parse_magnitude("   ", "height"),
            Err(InvalidInputError::Missing { field: "height" })
        );
        assert_eq!(
            parse_magnitude("tall", "height"),
            Err(InvalidInputError::NotANumber { field: "height", value: "tall".into() })
        );
        assert_eq!(
            parse_magnitude("-3", "weight"),
            Err(InvalidInputError::OutOfRange { field: "weight", value: -3.0 })
        );
        assert!(parse_magnitude("inf", "weight").is_err());
        assert!(parse_magnitude("NaN", "weight").is_err());
    }

    #[test]
    fn test_metric_height() {
        let m = to_canonical_height("180", None, UnitSystem::Metric).unwrap();
        assert!((m - 1.8).abs() < 1e-12);

        // Inches are ignored in metric mode
        let m = to_canonical_height("180", Some("junk"), UnitSystem::Metric).unwrap();
        assert!((m - 1.8).abs() < 1e-12);
    }

    #[test]
    fn test_imperial_height() {
        // 5 ft 10 in = 70 in = 1.778 m
        let m = to_canonical_height("5", Some("10"), UnitSystem::Imperial).unwrap();
        assert!((m - 1.778).abs() < 1e-12);

        // 0 ft 60 in is still a valid height
        let m = to_canonical_height("0", Some("60"), UnitSystem::Imperial).unwrap();
        assert!((m - 1.524).abs() < 1e-12);

        // Inches past 12 are carried, not rejected
        let m = to_canonical_height("5", Some("14"), UnitSystem::Imperial).unwrap();
        assert!((m - 74.0 * 0.0254).abs() < 1e-12);
    }

    #[test]
    fn test_imperial_height_requires_inches() {
        assert_eq!(
            to_canonical_height("5", None, UnitSystem::Imperial),
            Err(InvalidInputError::Missing { field: "inches" })
        );
        assert_eq!(
            to_canonical_height("5", Some(""), UnitSystem::Imperial),
            Err(InvalidInputError::Missing { field: "inches" })
        );
    }

    #[test]
    fn test_height_must_be_positive() {
        assert!(to_canonical_height("0", None, UnitSystem::Metric).is_err());
        assert!(to_canonical_height("0", Some("0"), UnitSystem::Imperial).is_err());
        assert!(to_canonical_height("", None, UnitSystem::Metric).is_err());
    }

    #[test]
    fn test_weight() {
        assert_eq!(to_canonical_weight("75", UnitSystem::Metric), Ok(75.0));

        let kg = to_canonical_weight("150", UnitSystem::Imperial).unwrap();
        assert!((kg - 68.0388).abs() < 1e-9);

        assert!(to_canonical_weight("0", UnitSystem::Metric).is_err());
        assert!(to_canonical_weight("-70", UnitSystem::Imperial).is_err());
        assert!(to_canonical_weight("heavy", UnitSystem::Metric).is_err());
    }

    #[test]
    fn test_meters_to_feet_inches() {
        let (feet, inches) = meters_to_feet_inches(1.778);
        assert_eq!(feet, 5.0);
        assert!((inches - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip_within_one_unit() {
        for cm in (120..=220).step_by(5) {
            let meters = cm as f64 / 100.0;
            let (feet, inches) = meters_to_feet_inches(meters);
            let back = to_canonical_height(
                &feet.to_string(),
                Some(&inches.to_string()),
                UnitSystem::Imperial,
            )
            .unwrap();
            assert!((round_half_up(meters_to_cm(back)) - cm).abs() <= 1, "height {cm} cm");
        }

        for kg in (40..=160).step_by(7) {
            let lbs = kg_to_lb(kg as f64);
            let back = to_canonical_weight(&lbs.to_string(), UnitSystem::Imperial).unwrap();
            assert!((round_half_up(back) - kg).abs() <= 1, "weight {kg} kg");
            assert!((lb_to_kg(lbs) - back).abs() < 1e-9);
        }
    }
}
