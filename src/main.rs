use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use sales_cleaner::config::{CleanerConfig, Overrides};
use sales_cleaner::data::missing::DualClassPolicy;

#[derive(Parser)]
#[command(name = "sales-cleaner")]
#[command(about = "Standardize column names and resolve missing values in a sales table")]
#[command(version)]
struct Cli {
    /// Input table (.csv, .json or .parquet)
    #[arg(short, long, env = "SALES_CLEANER_INPUT")]
    input: Option<PathBuf>,

    /// Where to write the cleaned CSV
    #[arg(short, long, env = "SALES_CLEANER_OUTPUT")]
    output: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "SALES_CLEANER_CONFIG")]
    config: Option<PathBuf>,

    /// Drop rows unless quantity > 0 and price >= 0
    #[arg(long)]
    positive_only: bool,

    /// Treatment for columns matching both price and quantity keywords:
    /// both, price-only or quantity-only
    #[arg(long)]
    dual_class: Option<DualClassPolicy>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    let cli = Cli::parse();
    let overrides = Overrides {
        input: cli.input,
        output: cli.output,
        positive_only: cli.positive_only,
        dual_class: cli.dual_class,
    };

    let result = CleanerConfig::resolve(cli.config.as_deref(), overrides)
        .and_then(|config| sales_cleaner::run(&config));

    match result {
        Ok(summary) => {
            info!("Done: {summary:?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
