//! TDEE Calculator Tool
//!
//! Takes the raw TDEE form fields and produces BMR and TDEE for display.

use serde::Serialize;

use crate::error::CalcResult;
use crate::models::{compute, ActivityLevel, ActivityResolution, Sex};
use crate::units::{meters_to_cm, parse_magnitude, to_canonical_height, to_canonical_weight, UnitSystem};

/// Raw TDEE form fields
#[derive(Debug, Clone, Copy)]
pub struct TdeeInput<'a> {
    pub age: &'a str,
    /// Centimeters (metric) or feet (imperial)
    pub height: &'a str,
    /// Inches; required for imperial, ignored for metric
    pub inches: Option<&'a str>,
    /// Kilograms (metric) or pounds (imperial)
    pub weight: &'a str,
    pub sex: &'a str,
    /// Menu index, menu entry or level name; `None` selects Sedentary
    pub activity_level: Option<&'a str>,
    pub unit_system: UnitSystem,
    /// Reject unknown activity levels instead of falling back to Sedentary
    pub strict_activity: bool,
}

/// Response for calculate_tdee
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TdeeResponse {
    /// BMR in kcal/day, rounded
    pub bmr: i64,
    /// TDEE in kcal/day, rounded
    pub tdee: i64,
    pub bmr_raw: f64,
    pub tdee_raw: f64,
    pub activity_level: String,
    pub activity_label: String,
    pub activity_factor: f64,
    /// Set when the activity selection was not recognized and Sedentary was used
    pub activity_fallback: bool,
    pub sex: String,
    pub unit_system: String,
    pub weight_kg: f64,
    pub height_cm: f64,
}

fn resolve_activity(selection: Option<&str>, strict: bool) -> CalcResult<ActivityResolution> {
    let selection = selection.filter(|s| !s.trim().is_empty());
    if strict {
        let level = match selection {
            Some(raw) => ActivityLevel::parse(raw)?,
            None => ActivityLevel::Sedentary,
        };
        return Ok(ActivityResolution { level, fell_back: false });
    }
    Ok(ActivityLevel::resolve_or_default(selection))
}

/// Calculate BMR and TDEE from raw form fields
pub fn calculate_tdee(input: TdeeInput<'_>) -> CalcResult<TdeeResponse> {
    let system = input.unit_system;
    let age = parse_magnitude(input.age, "age")?;
    let height_cm = meters_to_cm(to_canonical_height(input.height, input.inches, system)?);
    let weight_kg = to_canonical_weight(input.weight, system)?;
    let sex = Sex::parse(input.sex)?;
    let activity = resolve_activity(input.activity_level, input.strict_activity)?;

    let result = compute(weight_kg, height_cm, age, sex, activity.level)?;

    tracing::info!(
        "TDEE {} kcal (BMR {}) at {} activity",
        result.display_tdee(),
        result.display_bmr(),
        activity.level.as_str()
    );

    Ok(TdeeResponse {
        bmr: result.display_bmr(),
        tdee: result.display_tdee(),
        bmr_raw: result.bmr,
        tdee_raw: result.tdee,
        activity_level: activity.level.as_str().to_string(),
        activity_label: activity.level.display_name().to_string(),
        activity_factor: activity.level.factor(),
        activity_fallback: activity.fell_back,
        sex: sex.as_str().to_string(),
        unit_system: system.as_str().to_string(),
        weight_kg,
        height_cm,
    })
}

/// One entry of the activity level menu
#[derive(Debug, Clone, Serialize)]
pub struct ActivityLevelEntry {
    pub index: u8,
    pub level: String,
    pub label: String,
    pub description: String,
    pub factor: f64,
}

/// Response for list_activity_levels
#[derive(Debug, Serialize)]
pub struct ListActivityLevelsResponse {
    pub levels: Vec<ActivityLevelEntry>,
    pub default: String,
}

/// List the activity levels in menu order
pub fn list_activity_levels() -> ListActivityLevelsResponse {
    let levels = ActivityLevel::all()
        .iter()
        .map(|level| ActivityLevelEntry {
            index: level.menu_index(),
            level: level.as_str().to_string(),
            label: level.menu_label(),
            description: level.description().to_string(),
            factor: level.factor(),
        })
        .collect();

    ListActivityLevelsResponse {
        levels,
        default: ActivityLevel::default().as_str().to_string(),
    }
}
