//! bmical Tools module
//!
//! Tool implementations shared by the MCP server and the command line.

pub mod bmi;
pub mod status;
pub mod tdee;
