use super::*;

use wallora_lib::types::RawWallpaper;
use wallora_lib::{CatalogTitles, DeriveDisplayFields};

fn load_wallpapers_fixture() -> Vec<Wallpaper> {
    let json_str = include_str!("../../wallora_api/tests/fixtures/wallpapers.json");
    let raw: Vec<RawWallpaper> = serde_json::from_str(json_str).unwrap();
    raw.into_iter()
        .filter_map(|r| CatalogTitles.derive(r, None))
        .collect()
}

fn load_categories_fixture() -> Vec<Category> {
    let json_str = include_str!("../../wallora_api/tests/fixtures/categories.json");
    let slugs: Vec<String> = serde_json::from_str(json_str).unwrap();
    slugs.iter().map(|s| Category::from_slug(s)).collect()
}

// -- OutputFormat parsing --

#[test]
fn test_output_format_parse() {
    assert_eq!(OutputFormat::parse("json").unwrap(), OutputFormat::Json);
    assert_eq!(OutputFormat::parse(" CSV ").unwrap(), OutputFormat::Csv);
    assert_eq!(OutputFormat::parse("md").unwrap(), OutputFormat::Markdown);
    assert_eq!(OutputFormat::parse("xml").unwrap(), OutputFormat::Xml);
    assert_eq!(OutputFormat::parse("table").unwrap(), OutputFormat::Table);
}

#[test]
fn test_output_format_rejects_unknown() {
    let err = OutputFormat::parse("yaml").unwrap_err();
    assert!(err.to_string().contains("unknown output format"));
}

// -- shorten --

#[test]
fn test_shorten_leaves_short_ids() {
    assert_eq!(shorten("nat-001", 24), "nat-001");
}

#[test]
fn test_shorten_cuts_long_ids() {
    let id = "https://images.example.com/nature/very-long-name.jpg";
    let short = shorten(id, 24);
    assert_eq!(short.chars().count(), 24);
    assert!(short.ends_with("..."));
}

// -- Row builder tests --

#[test]
fn test_build_wallpaper_rows_mapping() {
    let wallpapers = load_wallpapers_fixture();
    let rows = build_wallpaper_rows(&wallpapers);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].position, 1);
    assert_eq!(rows[0].id, "nat-001");
    assert_eq!(rows[0].category, "nature");
    assert_eq!(
        rows[0].image,
        "https://images.example.com/nature/nat-001.jpg"
    );
    assert_eq!(rows[2].title, "Pillars of Creation");
}

#[test]
fn test_build_wallpaper_rows_generated_titles_are_stable() {
    let first = build_wallpaper_rows(&load_wallpapers_fixture());
    let second = build_wallpaper_rows(&load_wallpapers_fixture());
    assert_eq!(first[1].title, second[1].title);
    assert!(!first[1].title.is_empty());
}

#[test]
fn test_build_category_rows_mapping() {
    let categories = load_categories_fixture();
    let rows = build_category_rows(&categories);
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].name, "Nature");
    assert_eq!(rows[0].icon, "leaf.fill");
    assert_eq!(rows[4].slug, "minimal");
    assert_eq!(rows[4].icon, "photo.fill");
}

#[test]
fn test_build_rows_empty() {
    assert!(build_wallpaper_rows(&[]).is_empty());
    assert!(build_category_rows(&[]).is_empty());
}

// -- Markdown --

#[test]
fn test_wallpaper_markdown_table() {
    let mut table = Table::new(build_wallpaper_rows(&load_wallpapers_fixture()));
    table.with(Style::markdown());
    let rendered = table.to_string();
    let header = rendered.lines().next().unwrap();
    assert!(header.contains("| #"));
    assert!(header.contains("Title"));
    assert!(header.contains("Image"));
    assert_eq!(rendered.lines().count(), 2 + 3);
}

// -- CSV --

#[test]
fn test_wallpaper_csv_header_and_rows() {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for row in build_wallpaper_rows(&load_wallpapers_fixture()) {
        wtr.serialize(row).unwrap();
    }
    let data = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
    let mut lines = data.lines();
    assert_eq!(lines.next().unwrap(), "#,Title,Category,ID,Image");
    assert_eq!(lines.count(), 3);
}

#[test]
fn test_category_csv_quotes_commas() {
    let categories = vec![Category {
        id: "misc".to_string(),
        name: "Misc".to_string(),
        icon: "photo.fill".to_string(),
        description: "Odds, ends".to_string(),
    }];
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for row in build_category_rows(&categories) {
        wtr.serialize(row).unwrap();
    }
    let data = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
    assert!(data.contains("\"Odds, ends\""));
}
