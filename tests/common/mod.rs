#![allow(dead_code)]

use epub_stream_pager::MemorySource;
use epub_stream_pager_flow::{FlowLayoutConfig, FlowNavigator, FlowSurface};

/// 10 characters per line, 2 lines per page.
pub fn narrow_layout() -> FlowLayoutConfig {
    FlowLayoutConfig {
        width_px: 100,
        height_px: 40,
        margin_px: 0,
        char_width_px: 10,
        line_height_px: 20,
    }
}

pub fn surface(id: u64) -> FlowSurface {
    FlowSurface::new(id, narrow_layout())
}

fn paragraph(ch: char, count: usize) -> String {
    let text: String = std::iter::repeat(ch).take(count).collect();
    format!("<p>{}</p>", text)
}

/// Three components of 5, 3 and 4 pages under [`narrow_layout`].
///
/// `c1` has an `introduction` anchor on its third page, `c3` a `notes`
/// anchor on its fourth.
pub fn three_part_manifest() -> String {
    let c1 = format!(
        "<html><head><title>One</title></head><body>{}<h2 id=\\\"introduction\\\">{}</h2></body></html>",
        paragraph('a', 40),
        paragraph('b', 60)
    );
    let c2 = format!("<body>{}</body>", paragraph('c', 60));
    let c3 = format!(
        "<body>{}<div id=\\\"notes\\\">{}</div></body>",
        paragraph('d', 70),
        paragraph('e', 10)
    );
    format!(
        r#"{{
            "components": [
                {{"id": "c1", "content": "{c1}"}},
                {{"id": "c2", "content": "{c2}"}},
                {{"id": "c3", "content": "{c3}"}}
            ],
            "contents": [
                {{"title": "One", "src": "c1", "children": [
                    {{"title": "Introduction", "src": "c1#introduction"}}
                ]}},
                {{"title": "Two", "src": "c2"}},
                {{"title": "Three", "src": "c3", "children": [
                    {{"title": "Notes", "src": "c3#notes"}}
                ]}}
            ],
            "metadata": {{"title": "Three Parts", "language": "en"}}
        }}"#
    )
}

pub fn three_part_book() -> FlowNavigator<MemorySource> {
    let source = MemorySource::from_json(&three_part_manifest()).expect("manifest should load");
    FlowNavigator::new(source).expect("book has components")
}
