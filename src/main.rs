//! BMI Calculator (bmical)
//!
//! An MCP server exposing the BMI and TDEE calculators.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use bmical::build_info;
use bmical::config::Settings;
use bmical::mcp::BmicalService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr so it does not interfere with MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("bmical=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let settings = Settings::from_env();
    tracing::info!(
        "Default unit system: {}, strict activity levels: {}",
        settings.default_unit_system.as_str(),
        settings.strict_activity
    );

    let service = BmicalService::new(settings);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
