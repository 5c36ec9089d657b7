//! BMI Calculator (bmical) Library
//!
//! Unit-aware Body Mass Index and Total Daily Energy Expenditure calculators.

pub mod build_info;
pub mod config;
pub mod error;
pub mod mcp;
pub mod models;
pub mod tools;
pub mod units;

pub use error::{CalcResult, InvalidInputError};
