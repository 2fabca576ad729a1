use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;
use std::io::Cursor;

use wallora_lib::{Category, Wallpaper};

/// Recursively write a serde_json::Value as XML elements.
fn write_value<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: &serde_json::Value,
) -> Result<(), quick_xml::Error> {
    match value {
        serde_json::Value::Null => {
            // Omit null fields entirely
        }
        serde_json::Value::Bool(b) => {
            write_text(writer, tag, if *b { "true" } else { "false" })?;
        }
        serde_json::Value::Number(n) => {
            write_text(writer, tag, &n.to_string())?;
        }
        serde_json::Value::String(s) => {
            write_text(writer, tag, s)?;
        }
        serde_json::Value::Array(arr) => {
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            for item in arr {
                write_value(writer, "item", item)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
        serde_json::Value::Object(map) => {
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            for (key, val) in map {
                write_value(writer, key, val)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
    }
    Ok(())
}

fn write_text<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Serialize a slice of Serialize items into an XML string.
fn items_to_xml<T: Serialize>(
    root_tag: &str,
    item_tag: &str,
    items: &[T],
) -> anyhow::Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    if items.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(root_tag)))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new(root_tag)))?;

        for item in items {
            let val = serde_json::to_value(item)?;
            write_value(&mut writer, item_tag, &val)?;
        }

        writer.write_event(Event::End(BytesEnd::new(root_tag)))?;
    }

    let buf = writer.into_inner().into_inner();
    Ok(String::from_utf8(buf)?)
}

pub fn wallpapers_to_xml(wallpapers: &[Wallpaper]) -> anyhow::Result<String> {
    items_to_xml("wallpapers", "wallpaper", wallpapers)
}

pub fn categories_to_xml(categories: &[Category]) -> anyhow::Result<String> {
    items_to_xml("categories", "category", categories)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallpaper(id: &str, title: &str, timestamp: Option<&str>) -> Wallpaper {
        Wallpaper {
            id: id.to_string(),
            category: "nature".to_string(),
            title: title.to_string(),
            image_url: format!("https://images.example.com/{}.jpg", id),
            thumbnail_url: format!("https://images.example.com/{}_t.jpg", id),
            timestamp: timestamp.map(str::to_string),
        }
    }

    fn assert_xml_parseable(xml: &str) {
        use quick_xml::Reader;

        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);
        loop {
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Err(e) => panic!(
                    "XML parse error at position {}: {e}",
                    reader.error_position()
                ),
                _ => {}
            }
        }
    }

    #[test]
    fn test_wallpaper_xml_wellformed() {
        let xml = wallpapers_to_xml(&[
            wallpaper("a", "Forest Path", Some("2024-05-02")),
            wallpaper("b", "Ocean Waves", None),
        ])
        .unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<wallpapers>"));
        assert_eq!(xml.matches("<wallpaper>").count(), 2);
        assert!(xml.contains("<imageUrl>https://images.example.com/a.jpg</imageUrl>"));
        assert_xml_parseable(&xml);
    }

    #[test]
    fn test_missing_timestamp_omitted() {
        let xml = wallpapers_to_xml(&[wallpaper("b", "Ocean Waves", None)]).unwrap();
        assert!(!xml.contains("<timestamp>"));
    }

    #[test]
    fn test_empty_array_produces_self_closing_root() {
        let xml = wallpapers_to_xml(&[]).unwrap();
        assert!(xml.contains("<wallpapers/>"));
        assert!(!xml.contains("</wallpapers>"));
    }

    #[test]
    fn test_category_xml() {
        let xml = categories_to_xml(&[Category::from_slug("space")]).unwrap();
        assert!(xml.contains("<category>"));
        assert!(xml.contains("<icon>globe.americas.fill</icon>"));
        assert_xml_parseable(&xml);
    }

    #[test]
    fn test_xml_special_chars_escaped() {
        let xml = wallpapers_to_xml(&[wallpaper("c", "Rock & <Roll>", None)]).unwrap();
        assert!(xml.contains("Rock &amp; &lt;Roll&gt;"));
        assert_xml_parseable(&xml);
    }
}
