//! Status, About and Instructions Tools
//!
//! Runtime status of the service, the about card, and the usage guide that
//! plays the role of the main menu.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::config::Settings;

/// Calculator usage instructions for AI assistants
pub const CALCULATOR_INSTRUCTIONS: &str = r#"
# BMI Calculator Instructions

Two calculators are available. Both accept the user's values as typed, as strings.

## Unit Systems

| unit_system | height | inches | weight |
|-------------|--------|--------|--------|
| `metric` (default) | centimeters | not used | kilograms |
| `imperial` | feet | inches (**required**, use "0" for whole feet) | pounds |

Switching unit systems means re-entering every value in the new units.

---

## calculate_bmi

Body Mass Index = kg / m².

**Parameters:** `height`, `weight`, `inches` (imperial only), `unit_system`, `sex` (optional, recorded only)

**Bands** (checked in order, first match wins):

| BMI | Status |
|-----|--------|
| below 18.5 | Underweight |
| below 24.9 | Normal Weight |
| below 29.9 | Overweight |
| 29.9 and above | Obese |

The displayed ranges for Overweight (25.0 - 29.9) and Obese (30.0+) are
informational. A BMI of 24.95 is reported as Overweight.

The response also contains the normal weight range for the given height
(BMI 18.5 to 24.9), in kg or lbs, each bound rounded to a whole number.

**Example:**
```
calculate_bmi(height: "180", weight: "75")
→ bmi 23.1, Normal Weight, normal range 60 - 81 kg
```

---

## calculate_tdee

Total Daily Energy Expenditure from the Mifflin-St Jeor BMR.

BMR = 10 × weight(kg) + 6.25 × height(cm) − 5 × age + (5 for male, −161 for female)
TDEE = BMR × activity factor

**Parameters:** `age`, `height`, `weight`, `sex` (male/female), `inches` (imperial only),
`activity_level`, `unit_system`

**Activity levels** (call `list_activity_levels` for the full menu):

| # | Level | Factor |
|---|-------|--------|
| 1 | Sedentary | 1.2 |
| 2 | Lightly Active | 1.375 |
| 3 | Moderately Active | 1.55 |
| 4 | Very Active | 1.725 |
| 5 | Extremely Active | 1.9 |

`activity_level` accepts the number, the menu entry, or the name. An unrecognized
value is treated as Sedentary and the response sets `activity_fallback: true`,
unless the server runs with `BMICAL_STRICT_ACTIVITY=1`, in which case it is an error.

**Example:**
```
calculate_tdee(age: "30", height: "175", weight: "80", sex: "male", activity_level: "3")
→ bmr 1749, tdee 2711
```

---

## Errors

Empty fields, non-numeric text, and zero or negative height/weight/age are
rejected with a message naming the field. Ask the user to correct the value and
call the tool again.
"#;

/// Response for the about tool
#[derive(Debug, Clone, Serialize)]
pub struct AboutResponse {
    pub title: &'static str,
    pub version: String,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub description: &'static str,
    pub authors: &'static str,
    pub calculators: Vec<&'static str>,
}

/// Build the about card
pub fn about() -> AboutResponse {
    let info = BuildInfo::current();
    AboutResponse {
        title: info.title,
        version: info.version_label(),
        build_number: info.build_number,
        build_timestamp: info.build_timestamp,
        description: info.description,
        authors: info.authors,
        calculators: vec!["calculate_bmi", "calculate_tdee"],
    }
}

/// Service status information
#[derive(Debug, Clone, Serialize)]
pub struct BmicalStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,
    pub started_at: String,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
    pub settings: Settings,
}

/// Status tracker for the service
pub struct StatusTracker {
    start_time: Instant,
    started_at: chrono::DateTime<chrono::Utc>,
    settings: Settings,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(settings: Settings) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: chrono::Utc::now(),
            settings,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> BmicalStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        BmicalStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            started_at: self.started_at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
            settings: self.settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_about() {
        let card = about();
        assert_eq!(card.title, "BMI Calculator");
        assert!(card.version.starts_with("Version "));
        assert_eq!(card.calculators.len(), 2);
    }

    #[test]
    fn test_status() {
        let tracker = StatusTracker::new(Settings::default());
        let status = tracker.get_status();
        assert_eq!(status.process_id, std::process::id());
        assert_eq!(status.settings, Settings::default());
        assert!(status.started_at.ends_with('Z'));
    }

    #[test]
    fn test_instructions_mention_tools() {
        assert!(CALCULATOR_INSTRUCTIONS.contains("calculate_bmi"));
        assert!(CALCULATOR_INSTRUCTIONS.contains("calculate_tdee"));
        assert!(CALCULATOR_INSTRUCTIONS.contains("list_activity_levels"));
    }
}
