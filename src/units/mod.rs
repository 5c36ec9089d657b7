//! Unit conversion module
//!
//! Turns raw user-entered magnitudes into canonical SI values (meters, kilograms).

pub mod converter;
pub mod system;

pub use converter::{
    kg_to_lb, lb_to_kg, meters_to_cm, meters_to_feet_inches, parse_magnitude,
    to_canonical_height, to_canonical_weight,
};
pub use system::{round_half_up, round_to_tenth, Dimension, Measurement, UnitSystem};
