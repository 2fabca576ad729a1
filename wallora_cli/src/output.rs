use anyhow::{bail, Result};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use wallora_lib::{Category, Wallpaper};

use crate::xml_output;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
    Xml,
}

impl OutputFormat {
    pub fn parse(input: &str) -> Result<Self> {
        match input.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "xml" => Ok(OutputFormat::Xml),
            other => bail!(
                "unknown output format '{}'. Valid values: table, json, csv, markdown, xml",
                other
            ),
        }
    }
}

#[derive(Tabled, Serialize)]
struct WallpaperRow {
    #[tabled(rename = "#")]
    #[serde(rename = "#")]
    position: usize,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    #[serde(rename = "Category")]
    category: String,
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Image")]
    #[serde(rename = "Image")]
    image: String,
}

#[derive(Tabled, Serialize)]
struct CategoryRow {
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Slug")]
    #[serde(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Icon")]
    #[serde(rename = "Icon")]
    icon: String,
    #[tabled(rename = "Description")]
    #[serde(rename = "Description")]
    description: String,
}

// -- Row builders --

fn build_wallpaper_rows(wallpapers: &[Wallpaper]) -> Vec<WallpaperRow> {
    wallpapers
        .iter()
        .enumerate()
        .map(|(i, w)| WallpaperRow {
            position: i + 1,
            title: w.title.clone(),
            category: w.category.clone(),
            id: shorten(&w.id, 24),
            image: w.image_url.clone(),
        })
        .collect()
}

fn build_category_rows(categories: &[Category]) -> Vec<CategoryRow> {
    categories
        .iter()
        .map(|c| CategoryRow {
            name: c.name.clone(),
            slug: c.id.clone(),
            icon: c.icon.clone(),
            description: c.description.clone(),
        })
        .collect()
}

// -- Table output --

pub fn print_wallpapers_table(wallpapers: &[Wallpaper]) {
    println!("{}", Table::new(build_wallpaper_rows(wallpapers)));
}

pub fn print_categories_table(categories: &[Category]) {
    println!("{}", Table::new(build_category_rows(categories)));
}

// -- Markdown output --

pub fn print_wallpapers_markdown(wallpapers: &[Wallpaper]) {
    let mut table = Table::new(build_wallpaper_rows(wallpapers));
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_categories_markdown(categories: &[Category]) {
    let mut table = Table::new(build_category_rows(categories));
    table.with(Style::markdown());
    println!("{}", table);
}

// -- CSV output --

pub fn print_wallpapers_csv(wallpapers: &[Wallpaper]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_wallpaper_rows(wallpapers) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_categories_csv(categories: &[Category]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_category_rows(categories) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- XML output --

pub fn print_wallpapers_xml(wallpapers: &[Wallpaper]) -> Result<()> {
    println!("{}", xml_output::wallpapers_to_xml(wallpapers)?);
    Ok(())
}

pub fn print_categories_xml(categories: &[Category]) -> Result<()> {
    println!("{}", xml_output::categories_to_xml(categories)?);
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// Cuts long ids (URL fallbacks) down to `max` characters for table display.
fn shorten(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
