//! Cost Estimator
//!
//! Reads a Terraform JSON plan (`terraform show -json plan.out`) and breaks
//! each supported resource down into cost components ready for price lookup.

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::FromEnv;
use eyre::Result;
use std::path::PathBuf;
use tracing::info;

mod config;
mod estimator;
mod output;

use config::Config;
use estimator::CostEstimator;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "cost-estimator")]
#[command(about = "Break infrastructure plans down into priced cost components")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map every resource in a plan to cost components
    Breakdown {
        /// Path to a Terraform plan rendered as JSON
        #[arg(short, long)]
        path: PathBuf,

        /// Usage file with per-resource usage values (YAML)
        #[arg(short, long)]
        usage_file: Option<PathBuf>,

        /// Region for resources that do not declare one. Defaults to AWS_DEFAULT_REGION.
        #[arg(short, long)]
        region: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List supported resource types
    Resources,
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let config = <Config as FromEnv>::from_env()?;
    init_tracing(&config.environment, config.log_format);

    let cli = Cli::parse();
    let estimator = CostEstimator::new(config);

    match cli.command {
        Commands::Breakdown {
            path,
            usage_file,
            region,
            format,
        } => {
            info!(path = %path.display(), "Starting breakdown");

            let breakdown = estimator
                .breakdown(&path, usage_file.as_deref(), region)
                .await?;

            println!("{}", output::render(&breakdown, format)?);
        }

        Commands::Resources => {
            for resource_type in estimator.supported_types() {
                println!("{}", resource_type);
            }
        }
    }

    Ok(())
}
