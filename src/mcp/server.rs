//! bmical MCP Server Implementation
//!
//! Implements the MCP server with the calculator tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::Settings;
use crate::error::InvalidInputError;
use crate::tools::bmi::{self, BmiInput};
use crate::tools::status::{self, StatusTracker};
use crate::tools::tdee::{self, TdeeInput};
use crate::units::UnitSystem;

/// bmical MCP Service
#[derive(Clone)]
pub struct BmicalService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    settings: Settings,
    tool_router: ToolRouter<BmicalService>,
}

impl BmicalService {
    pub fn new(settings: Settings) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(settings))),
            settings,
            tool_router: Self::tool_router(),
        }
    }

    /// Unit system named by the request, or the configured default
    fn unit_system(&self, requested: Option<&str>) -> Result<UnitSystem, McpError> {
        match requested {
            Some(raw) if !raw.trim().is_empty() => UnitSystem::parse(raw).map_err(invalid_input),
            _ => Ok(self.settings.default_unit_system),
        }
    }
}

/// Validation failures go back to the client as invalid params so it can re-prompt
fn invalid_input(err: InvalidInputError) -> McpError {
    tracing::debug!("Rejected input for {}: {}", err.field(), err);
    McpError::invalid_params(err.to_string(), Some(serde_json::json!({ "field": err.field() })))
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Calculator Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateBmiParams {
    /// Height in centimeters (metric) or feet (imperial), as entered
    pub height: String,
    /// Inches, required when unit_system is imperial
    pub inches: Option<String>,
    /// Weight in kilograms (metric) or pounds (imperial), as entered
    pub weight: String,
    /// "metric" or "imperial" (defaults to the server setting)
    pub unit_system: Option<String>,
    /// Optional, recorded only ("male" or "female")
    pub sex: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateTdeeParams {
    /// Age in years
    pub age: String,
    /// Height in centimeters (metric) or feet (imperial), as entered
    pub height: String,
    /// Inches, required when unit_system is imperial
    pub inches: Option<String>,
    /// Weight in kilograms (metric) or pounds (imperial), as entered
    pub weight: String,
    /// "male" or "female"
    pub sex: String,
    /// Activity level 1-5, menu entry, or name (defaults to sedentary)
    pub activity_level: Option<String>,
    /// "metric" or "imperial" (defaults to the server setting)
    pub unit_system: Option<String>,
}

#[tool_router]
impl BmicalService {
    // --- Status ---

    #[tool(description = "Get the current status of the bmical service including build info, settings, and process information")]
    async fn bmical_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        json_result(&tracker.get_status())
    }

    #[tool(description = "Get instructions for the BMI and TDEE calculators: units, parameters, bands and activity levels. Call this first when unsure how to use the calculators.")]
    fn calculator_instructions(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(status::CALCULATOR_INSTRUCTIONS)]))
    }

    #[tool(description = "Get information about this application: title, version, build and author")]
    fn about(&self) -> Result<CallToolResult, McpError> {
        json_result(&status::about())
    }

    // --- Calculators ---

    #[tool(description = "Calculate Body Mass Index, its status band and the normal weight range for the given height. Metric: height in cm, weight in kg. Imperial: height in feet plus inches, weight in lbs.")]
    fn calculate_bmi(&self, Parameters(p): Parameters<CalculateBmiParams>) -> Result<CallToolResult, McpError> {
        let unit_system = self.unit_system(p.unit_system.as_deref())?;
        let result = bmi::calculate_bmi(BmiInput {
            height: &p.height,
            inches: p.inches.as_deref(),
            weight: &p.weight,
            unit_system,
            sex: p.sex.as_deref(),
        })
        .map_err(invalid_input)?;
        json_result(&result)
    }

    #[tool(description = "Calculate Basal Metabolic Rate (Mifflin-St Jeor) and Total Daily Energy Expenditure. Metric: height in cm, weight in kg. Imperial: height in feet plus inches, weight in lbs.")]
    fn calculate_tdee(&self, Parameters(p): Parameters<CalculateTdeeParams>) -> Result<CallToolResult, McpError> {
        let unit_system = self.unit_system(p.unit_system.as_deref())?;
        let result = tdee::calculate_tdee(TdeeInput {
            age: &p.age,
            height: &p.height,
            inches: p.inches.as_deref(),
            weight: &p.weight,
            sex: &p.sex,
            activity_level: p.activity_level.as_deref(),
            unit_system,
            strict_activity: self.settings.strict_activity,
        })
        .map_err(invalid_input)?;
        json_result(&result)
    }

    #[tool(description = "List the TDEE activity levels with their menu numbers and multipliers")]
    fn list_activity_levels(&self) -> Result<CallToolResult, McpError> {
        json_result(&tdee::list_activity_levels())
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for BmicalService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "bmical".into(),
                version: crate::build_info::VERSION.into(),
                title: Some(crate::build_info::APP_TITLE.into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "BMI Calculator - Body Mass Index and Total Daily Energy Expenditure. \
                 IMPORTANT: Call calculator_instructions before the first calculation. \
                 Calculators: calculate_bmi, calculate_tdee, list_activity_levels. \
                 Pass user values as strings; imperial height needs both feet (height) and inches. \
                 Info: about, bmical_status."
                    .into(),
            ),
        }
    }
}
