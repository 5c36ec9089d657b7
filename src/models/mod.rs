//! Calculator models
//!
//! Pure engines over SI inputs. Nothing here parses text or keeps state.

pub mod bmi;
pub mod tdee;

pub use bmi::{
    classify, normal_weight_range, BmiCategory, BmiClassification, BmiResult, NormalWeightRange,
};
pub use tdee::{compute, ActivityLevel, ActivityResolution, Sex, TdeeResult};
