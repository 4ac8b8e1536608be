mod collect;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "locinsight-cli")]
#[command(about = "Store location insight command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch every store from the public locator and write the dataset
    Collect {
        /// Destination JSON file
        #[arg(long)]
        output: PathBuf,
        /// Collect a single province instead of the whole catalog
        #[arg(long)]
        province: Option<String>,
        /// Print the provinces that would be fetched and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the dashboard for a region selection
    Report {
        /// Dataset path; defaults to `LOCINSIGHT_DATASET_PATH`
        #[arg(long)]
        dataset: Option<PathBuf>,
        #[arg(long)]
        province: Option<String>,
        #[arg(long)]
        district: Option<String>,
        /// Emit the full dashboard as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the districts of a province
    Districts {
        #[arg(long)]
        province: String,
        #[arg(long)]
        dataset: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = locinsight_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Collect {
            output,
            province,
            dry_run,
        }) => collect::run_collect(&config, &output, province.as_deref(), dry_run).await?,
        Some(Commands::Report {
            dataset,
            province,
            district,
            json,
        }) => report::run_report(
            &config,
            dataset.as_deref(),
            province.as_deref(),
            district.as_deref(),
            json,
        )?,
        Some(Commands::Districts { province, dataset }) => {
            report::run_districts(&config, dataset.as_deref(), &province)?;
        }
        None => {
            println!("locinsight-cli: use --help to list commands");
        }
    }

    Ok(())
}
