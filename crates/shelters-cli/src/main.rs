mod list;
mod render;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::list::ListArgs;

#[derive(Debug, Parser)]
#[command(name = "shelters")]
#[command(about = "Shelter bed and room availability from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List shelters with optional filters, ordering, and distance ranking
    List(ListArgs),
    /// Show the distinct values accepted by each filter
    Options {
        /// Print the options as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = shelters_core::load_app_config()?;

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Some(Commands::List(args)) => list::run_list(&config, &args, &mut stdout).await,
        Some(Commands::Options { json }) => list::run_options(&config, json, &mut stdout).await,
        None => list::run_list(&config, &ListArgs::default(), &mut stdout).await,
    }
}
