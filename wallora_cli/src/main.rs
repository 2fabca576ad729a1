mod commands;
mod output;
mod xml_output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use wallora_lib::validation;
use wallora_lib::FeedConfig;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "wallora")]
#[command(about = "Browse wallpapers and categories from the Wallora service")]
struct Cli {
    /// Output format: table, json, csv, markdown or xml
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API base URL (overrides WALLORA_API_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a wallpaper feed page by page
    Wallpapers(commands::wallpapers::WallpapersArgs),
    /// List wallpaper categories
    Categories,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wallora=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = OutputFormat::parse(&cli.output)?;

    let mut config = FeedConfig::from_env()?;
    if let Some(ref base_url) = cli.base_url {
        config = config.with_base_url(&validation::validate_base_url(base_url)?);
    }

    match &cli.command {
        Commands::Wallpapers(args) => commands::wallpapers::run(args, &config, &format).await?,
        Commands::Categories => commands::categories::run(&config, &format).await?,
    }

    Ok(())
}
