use anyhow::{bail, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use wallora_lib::validation;
use wallora_lib::{FeedConfig, FeedStatus, HttpFetcher, PagedFeedController, PlainTitles};

use crate::output::{
    print_json, print_wallpapers_csv, print_wallpapers_markdown, print_wallpapers_table,
    print_wallpapers_xml, OutputFormat,
};

#[derive(Args)]
pub struct WallpapersArgs {
    /// Only show wallpapers from this category (e.g. nature, cars, anime, space)
    #[arg(long)]
    pub category: Option<String>,

    /// Records per page (overrides WALLORA_PAGE_SIZE)
    #[arg(long)]
    pub page_size: Option<i64>,

    /// Number of pages to load before printing
    #[arg(long, default_value = "1")]
    pub pages: i64,

    /// Refresh the feed after loading, replacing it with a fresh first page
    #[arg(long)]
    pub refresh: bool,

    /// Title style: catalog (generated per category) or plain
    #[arg(long, default_value = "catalog")]
    pub titles: String,
}

pub async fn run(args: &WallpapersArgs, config: &FeedConfig, format: &OutputFormat) -> Result<()> {
    let mut config = config.clone();
    if let Some(page_size) = args.page_size {
        config = config.with_page_size(validation::validate_page_size(page_size)?);
    }
    if let Some(ref category) = args.category {
        config = config.with_category(&validation::validate_category(category)?);
    }
    let pages = validation::validate_pages(args.pages)?;

    let mut feed = match args.titles.as_str() {
        "catalog" => PagedFeedController::from_config(&config),
        "plain" => PagedFeedController::new(
            HttpFetcher::new(&config).with_display(PlainTitles),
            config.page_size,
        ),
        other => bail!("unknown title style '{}'. Valid values: catalog, plain", other),
    };

    let pb = ProgressBar::new(u64::from(pages));
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?,
    );
    pb.set_message("loading wallpapers...");

    feed.initialize().await;
    pb.inc(1);
    let mut loaded = 1;
    while loaded < pages && feed.has_more() && feed.status() == FeedStatus::Idle {
        feed.load_more().await;
        loaded += 1;
        pb.inc(1);
    }
    if args.refresh {
        pb.set_message("refreshing...");
        feed.refresh().await;
    }
    pb.finish_and_clear();

    let snapshot = feed.snapshot();
    if let Some(ref err) = snapshot.last_error {
        let failed = feed
            .last_failed()
            .map(|op| format!("{:?}", op))
            .unwrap_or_else(|| "fetch".to_string());
        if snapshot.items.is_empty() {
            bail!("{} failed: {}", failed, err);
        }
        eprintln!("Warning: {} failed: {} (showing what was loaded)", failed, err);
    }

    eprintln!(
        "{} wallpapers, {} of {} pages loaded ({})",
        snapshot.items.len(),
        feed.page_number().saturating_sub(1),
        pages,
        if snapshot.has_more {
            "more available"
        } else {
            "end of feed"
        }
    );

    match format {
        OutputFormat::Table => print_wallpapers_table(&snapshot.items),
        OutputFormat::Json => print_json(&snapshot.items),
        OutputFormat::Csv => print_wallpapers_csv(&snapshot.items)?,
        OutputFormat::Markdown => print_wallpapers_markdown(&snapshot.items),
        OutputFormat::Xml => print_wallpapers_xml(&snapshot.items)?,
    }

    Ok(())
}
