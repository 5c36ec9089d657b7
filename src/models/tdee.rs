//! TDEE model
//!
//! Basal Metabolic Rate via the Mifflin-St Jeor equation, scaled by an activity
//! factor into Total Daily Energy Expenditure.
//!
//! `BMR = 10 * weight_kg + 6.25 * height_cm - 5 * age + s`, with `s = +5` for
//! males and `s = -161` for females.

use serde::{Deserialize, Serialize};

use crate::error::{CalcResult, InvalidInputError};
use crate::units::round_half_up;

/// Sex, used only to pick the Mifflin-St Jeor offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "man" => Some(Sex::Male),
            "female" | "f" | "woman" => Some(Sex::Female),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> CalcResult<Self> {
        if s.trim().is_empty() {
            return Err(InvalidInputError::Missing { field: "sex" });
        }
        Self::from_str(s).ok_or_else(|| InvalidInputError::UnknownSex { value: s.to_string() })
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }

    /// Mifflin-St Jeor constant term
    pub fn bmr_offset(&self) -> f64 {
        match self {
            Sex::Male => 5.0,
            Sex::Female => -161.0,
        }
    }
}

/// Activity level with its fixed TDEE multiplier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtremelyActive,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtremelyActive => "extremely_active",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::LightlyActive => "Lightly Active",
            ActivityLevel::ModeratelyActive => "Moderately Active",
            ActivityLevel::VeryActive => "Very Active",
            ActivityLevel::ExtremelyActive => "Extremely Active",
        }
    }

    /// Short description of the level, as listed in the selection menu
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "little or no exercise",
            ActivityLevel::LightlyActive => "light exercise 1-3 days/week",
            ActivityLevel::ModeratelyActive => "moderate exercise 3-5 days/week",
            ActivityLevel::VeryActive => "hard exercise 6-7 days/week",
            ActivityLevel::ExtremelyActive => "very hard exercise or physical job",
        }
    }

    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtremelyActive => 1.9,
        }
    }

    /// 1-based position in the selection menu
    pub fn menu_index(&self) -> u8 {
        match self {
            ActivityLevel::Sedentary => 1,
            ActivityLevel::LightlyActive => 2,
            ActivityLevel::ModeratelyActive => 3,
            ActivityLevel::VeryActive => 4,
            ActivityLevel::ExtremelyActive => 5,
        }
    }

    pub fn from_menu_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(ActivityLevel::Sedentary),
            2 => Some(ActivityLevel::LightlyActive),
            3 => Some(ActivityLevel::ModeratelyActive),
            4 => Some(ActivityLevel::VeryActive),
            5 => Some(ActivityLevel::ExtremelyActive),
            _ => None,
        }
    }

    /// Menu entry text, e.g. "3. Moderately Active (moderate exercise 3-5 days/week)"
    pub fn menu_label(&self) -> String {
        format!("{}. {} ({})", self.menu_index(), self.display_name(), self.description())
    }

    /// Resolve a selection: a menu index ("3"), a menu entry with a numeric
    /// prefix ("3. Moderately Active ..."), or a level name.
    pub fn from_str(s: &str) -> Option<Self> {
        let trimmed = s.trim();

        let prefix = trimmed.split('.').next().unwrap_or("").trim();
        if let Ok(index) = prefix.parse::<u8>() {
            return Self::from_menu_index(index);
        }

        match trimmed.to_lowercase().replace(['-', '_'], " ").as_str() {
            "sedentary" => Some(ActivityLevel::Sedentary),
            "lightly active" | "light" | "lightly" => Some(ActivityLevel::LightlyActive),
            "moderately active" | "moderate" | "moderately" => Some(ActivityLevel::ModeratelyActive),
            "very active" | "very" => Some(ActivityLevel::VeryActive),
            "extremely active" | "extreme" | "extra active" => Some(ActivityLevel::ExtremelyActive),
            _ => None,
        }
    }

    /// Strict resolution: unknown selections are invalid input
    pub fn parse(s: &str) -> CalcResult<Self> {
        Self::from_str(s).ok_or_else(|| InvalidInputError::UnknownActivityLevel {
            value: s.to_string(),
        })
    }

    /// Permissive resolution: unknown or missing selections fall back to Sedentary
    pub fn resolve_or_default(selection: Option<&str>) -> ActivityResolution {
        let Some(raw) = selection else {
            return ActivityResolution { level: ActivityLevel::Sedentary, fell_back: false };
        };

        match Self::from_str(raw) {
            Some(level) => ActivityResolution { level, fell_back: false },
            None => {
                tracing::warn!(
                    "Unknown activity level '{}'. Falling back to {}.",
                    raw,
                    ActivityLevel::Sedentary.display_name()
                );
                ActivityResolution { level: ActivityLevel::Sedentary, fell_back: true }
            }
        }
    }

    pub fn all() -> [ActivityLevel; 5] {
        [
            ActivityLevel::Sedentary,
            ActivityLevel::LightlyActive,
            ActivityLevel::ModeratelyActive,
            ActivityLevel::VeryActive,
            ActivityLevel::ExtremelyActive,
        ]
    }
}

/// Outcome of resolving an activity selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityResolution {
    pub level: ActivityLevel,
    /// True when the selection was not recognized and Sedentary was used
    pub fell_back: bool,
}

/// Result of a TDEE calculation, unrounded
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TdeeResult {
    pub bmr: f64,
    pub tdee: f64,
}

impl TdeeResult {
    pub fn display_bmr(&self) -> i64 {
        round_half_up(self.bmr)
    }

    pub fn display_tdee(&self) -> i64 {
        round_half_up(self.tdee)
    }
}

fn check_positive(value: f64, field: &'static str) -> CalcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(InvalidInputError::OutOfRange { field, value })
    }
}

/// Mifflin-St Jeor BMR in kcal/day
pub fn bmr(weight_kg: f64, height_cm: f64, age_years: f64, sex: Sex) -> f64 {
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years + sex.bmr_offset()
}

/// Compute BMR and TDEE. Height is in centimeters.
///
/// TDEE is scaled from the unrounded BMR.
pub fn compute(
    weight_kg: f64,
    height_cm: f64,
    age_years: f64,
    sex: Sex,
    activity: ActivityLevel,
) -> CalcResult<TdeeResult> {
    check_positive(weight_kg, "weight")?;
    check_positive(height_cm, "height")?;
    check_positive(age_years, "age")?;

    let bmr = bmr(weight_kg, height_cm, age_years, sex);
    let tdee = bmr * activity.factor();
    tracing::debug!(
        "BMR {:.2} x {} ({}) -> TDEE {:.2}",
        bmr,
        activity.factor(),
        activity.as_str(),
        tdee
    );

    Ok(TdeeResult { bmr, tdee })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_male_moderate() {
        let result = compute(80.0, 175.0, 30.0, Sex::Male, ActivityLevel::ModeratelyActive).unwrap();
        assert!((result.bmr - 1748.75).abs() < 1e-9);
        assert_eq!(result.display_bmr(), 1749);
        // 1748.75 * 1.55 = 2710.5625
        assert!((result.tdee - 2710.5625).abs() < 1e-9);
        assert_eq!(result.display_tdee(), 2711);
    }

    #[test]
    fn test_female_offset() {
        let male = bmr(60.0, 165.0, 40.0, Sex::Male);
        let female = bmr(60.0, 165.0, 40.0, Sex::Female);
        assert!((male - female - 166.0).abs() < 1e-9);
        // 600 + 1031.25 - 200 - 161
        assert!((female - 1270.25).abs() < 1e-9);
    }

    #[test]
    fn test_activity_factors() {
        let factors: Vec<f64> = ActivityLevel::all().iter().map(|l| l.factor()).collect();
        assert_eq!(factors, vec![1.2, 1.375, 1.55, 1.725, 1.9]);
    }

    #[test]
    fn test_activity_from_str() {
        assert_eq!(ActivityLevel::from_str("3"), Some(ActivityLevel::ModeratelyActive));
        assert_eq!(
            ActivityLevel::from_str("4. Very Active (hard exercise 6-7 days/week)"),
            Some(ActivityLevel::VeryActive)
        );
        assert_eq!(ActivityLevel::from_str("lightly_active"), Some(ActivityLevel::LightlyActive));
        assert_eq!(ActivityLevel::from_str("Extremely Active"), Some(ActivityLevel::ExtremelyActive));
        assert_eq!(ActivityLevel::from_str("9"), None);
        assert_eq!(ActivityLevel::from_str("couch"), None);
    }

    #[test]
    fn test_menu_labels_resolve_to_themselves() {
        for level in ActivityLevel::all() {
            assert_eq!(ActivityLevel::from_str(&level.menu_label()), Some(level));
            assert_eq!(ActivityLevel::from_str(level.as_str()), Some(level));
        }
    }

    #[test]
    fn test_activity_fallback() {
        let resolved = ActivityLevel::resolve_or_default(Some("couch potato"));
        assert_eq!(resolved.level, ActivityLevel::Sedentary);
        assert!(resolved.fell_back);

        let resolved = ActivityLevel::resolve_or_default(None);
        assert_eq!(resolved.level, ActivityLevel::Sedentary);
        assert!(!resolved.fell_back);

        let resolved = ActivityLevel::resolve_or_default(Some("2"));
        assert_eq!(resolved.level, ActivityLevel::LightlyActive);
        assert!(!resolved.fell_back);
    }

    #[test]
    fn test_activity_strict() {
        assert_eq!(
            ActivityLevel::parse("couch"),
            Err(InvalidInputError::UnknownActivityLevel { value: "couch".into() })
        );
    }

    #[test]
    fn test_sex_parse() {
        assert_eq!(Sex::parse("Male"), Ok(Sex::Male));
        assert_eq!(Sex::parse(" f "), Ok(Sex::Female));
        assert_eq!(Sex::parse(""), Err(InvalidInputError::Missing { field: "sex" }));
        assert!(matches!(Sex::parse("other"), Err(InvalidInputError::UnknownSex { .. })));
    }

    #[test]
    fn test_compute_rejects_non_positive() {
        assert!(compute(80.0, 175.0, 0.0, Sex::Male, ActivityLevel::Sedentary).is_err());
        assert!(compute(0.0, 175.0, 30.0, Sex::Male, ActivityLevel::Sedentary).is_err());
        assert!(compute(80.0, -1.0, 30.0, Sex::Male, ActivityLevel::Sedentary).is_err());
        assert!(compute(80.0, 175.0, f64::INFINITY, Sex::Male, ActivityLevel::Sedentary).is_err());
    }

    #[test]
    fn test_compute_is_idempotent() {
        let a = compute(72.0, 168.0, 45.0, Sex::Female, ActivityLevel::VeryActive).unwrap();
        let b = compute(72.0, 168.0, 45.0, Sex::Female, ActivityLevel::VeryActive).unwrap();
        assert_eq!(a, b);
    }
}
