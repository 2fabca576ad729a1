use anyhow::Result;
use wallora_lib::{FeedConfig, HttpFetcher};

use crate::output::{
    print_categories_csv, print_categories_markdown, print_categories_table, print_categories_xml,
    print_json, OutputFormat,
};

pub async fn run(config: &FeedConfig, format: &OutputFormat) -> Result<()> {
    let fetcher = HttpFetcher::new(config);
    let categories = fetcher.get_categories().await?;

    eprintln!("{} categories", categories.len());

    match format {
        OutputFormat::Table => print_categories_table(&categories),
        OutputFormat::Json => print_json(&categories),
        OutputFormat::Csv => print_categories_csv(&categories)?,
        OutputFormat::Markdown => print_categories_markdown(&categories),
        OutputFormat::Xml => print_categories_xml(&categories)?,
    }

    Ok(())
}
