//! One-shot command line calculator
//!
//! Usage: bmical-cli [--units imperial] bmi --height 5 --inches 10 --weight 160

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use bmical::config::Settings;
use bmical::tools::bmi::{calculate_bmi, BmiInput};
use bmical::tools::status::about;
use bmical::tools::tdee::{calculate_tdee, list_activity_levels, TdeeInput};
use bmical::units::UnitSystem;

#[derive(Parser)]
#[command(name = "bmical-cli", version, about = "BMI and TDEE calculator")]
struct Cli {
    /// Unit system: metric (cm, kg) or imperial (ft + in, lbs)
    #[arg(long, global = true)]
    units: Option<String>,

    /// Print the result as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Body Mass Index and normal weight range
    Bmi {
        /// Height in cm, or feet with --units imperial
        #[arg(long)]
        height: String,
        /// Inches (imperial only)
        #[arg(long)]
        inches: Option<String>,
        /// Weight in kg, or lbs with --units imperial
        #[arg(long)]
        weight: String,
        /// male or female (recorded only)
        #[arg(long)]
        sex: Option<String>,
    },
    /// Basal Metabolic Rate and Total Daily Energy Expenditure
    Tdee {
        /// Age in years
        #[arg(long)]
        age: String,
        /// Height in cm, or feet with --units imperial
        #[arg(long)]
        height: String,
        /// Inches (imperial only)
        #[arg(long)]
        inches: Option<String>,
        /// Weight in kg, or lbs with --units imperial
        #[arg(long)]
        weight: String,
        /// male or female
        #[arg(long)]
        sex: String,
        /// Activity level: 1-5 or a name such as "moderately active"
        #[arg(long)]
        activity: Option<String>,
        /// Reject unknown activity levels instead of using Sedentary
        #[arg(long)]
        strict: bool,
    },
    /// List activity levels and their multipliers
    ActivityLevels,
    /// Show version and build information
    About,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env();
    let unit_system = match cli.units.as_deref() {
        Some(raw) => UnitSystem::parse(raw)?,
        None => settings.default_unit_system,
    };

    match cli.command {
        Commands::Bmi { height, inches, weight, sex } => {
            let result = calculate_bmi(BmiInput {
                height: &height,
                inches: inches.as_deref(),
                weight: &weight,
                unit_system,
                sex: sex.as_deref(),
            })?;
            if cli.json {
                return print_json(&result);
            }
            println!("BMI: {}", result.bmi);
            println!("Status: {}", result.status);
            println!("{}", result.normal_range_text);
        }
        Commands::Tdee { age, height, inches, weight, sex, activity, strict } => {
            let result = calculate_tdee(TdeeInput {
                age: &age,
                height: &height,
                inches: inches.as_deref(),
                weight: &weight,
                sex: &sex,
                activity_level: activity.as_deref(),
                unit_system,
                strict_activity: strict || settings.strict_activity,
            })?;
            if cli.json {
                return print_json(&result);
            }
            if result.activity_fallback {
                eprintln!("warning: unknown activity level, using {}", result.activity_label);
            }
            println!("BMR: {} kcal/day", result.bmr);
            println!("TDEE: {} kcal/day ({}, x{})", result.tdee, result.activity_label, result.activity_factor);
        }
        Commands::ActivityLevels => {
            let levels = list_activity_levels();
            if cli.json {
                return print_json(&levels);
            }
            for entry in &levels.levels {
                println!("{}  x{}", entry.label, entry.factor);
            }
        }
        Commands::About => {
            let card = about();
            if cli.json {
                return print_json(&card);
            }
            println!("{}", card.title);
            println!("{} (build {}, {})", card.version, card.build_number, card.build_timestamp);
            println!("{}", card.description);
            println!("by {}", card.authors);
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("bmical=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    Ok(())
}
