use quick_xml::events::Event;
use quick_xml::reader::Reader;

/// Flow layout metrics for a surface.
///
/// Every glyph is assumed to be `char_width_px` wide, so a page holds a
/// fixed number of characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlowLayoutConfig {
    /// Page width in pixels.
    pub width_px: u32,
    /// Page height in pixels.
    pub height_px: u32,
    /// Margin applied on every side.
    pub margin_px: u32,
    /// Advance width of one character.
    pub char_width_px: u32,
    /// Line height.
    pub line_height_px: u32,
}

impl Default for FlowLayoutConfig {
    fn default() -> Self {
        Self::for_display(480, 800)
    }
}

impl FlowLayoutConfig {
    /// Metrics for a display of the given size with default typography.
    pub fn for_display(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px,
            height_px,
            margin_px: 16,
            char_width_px: 8,
            line_height_px: 20,
        }
    }

    /// Characters that fit on one page, never less than one.
    pub fn chars_per_page(&self) -> usize {
        let inner_w = self.width_px.saturating_sub(self.margin_px.saturating_mul(2));
        let inner_h = self
            .height_px
            .saturating_sub(self.margin_px.saturating_mul(2));
        let cols = (inner_w / self.char_width_px.max(1)).max(1) as usize;
        let rows = (inner_h / self.line_height_px.max(1)).max(1) as usize;
        cols.saturating_mul(rows)
    }

    /// Pages needed for `chars` characters, at least one.
    pub fn pages_for(&self, chars: usize) -> u32 {
        let per_page = self.chars_per_page();
        let pages = chars.div_ceil(per_page).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// 1-based page holding character `offset`.
    pub fn page_of_offset(&self, offset: usize) -> u32 {
        let page = offset / self.chars_per_page() + 1;
        u32::try_from(page).unwrap_or(u32::MAX)
    }
}

/// Text volume and anchor positions of a component's markup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlowText {
    /// Visible characters, with whitespace runs collapsed.
    pub chars: usize,
    /// `id`/`name` anchors with the character offset where they start.
    pub anchors: Vec<(String, usize)>,
}

impl FlowText {
    /// Character offset of anchor `name`.
    pub fn anchor_offset(&self, name: &str) -> Option<usize> {
        self.anchors
            .iter()
            .find(|(anchor, _)| anchor == name)
            .map(|(_, offset)| *offset)
    }
}

/// Scan XHTML markup for visible text and anchors.
pub fn scan_markup(markup: &str) -> Result<FlowText, quick_xml::Error> {
    let mut reader = Reader::from_reader(markup.as_bytes());
    reader.config_mut().trim_text(false);
    reader.config_mut().check_end_names = false;
    let mut buf = Vec::with_capacity(64);
    let mut text = FlowText::default();
    // Element whose content is being skipped, matched by name on close.
    let mut skipping: Option<Vec<u8>> = None;
    let mut last_was_space = true;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if skipping.is_none() => {
                let name = e.local_name();
                if should_skip_tag(name.as_ref()) {
                    skipping = Some(name.as_ref().to_vec());
                } else {
                    record_anchors(&reader, &e, text.chars, &mut text.anchors);
                }
            }
            Event::Empty(e) if skipping.is_none() => {
                record_anchors(&reader, &e, text.chars, &mut text.anchors);
            }
            Event::End(e) => {
                if skipping.as_deref() == Some(e.local_name().as_ref()) {
                    skipping = None;
                }
            }
            Event::Text(e) if skipping.is_none() => {
                let decoded = e.decode()?;
                count_chars(&decoded, &mut text.chars, &mut last_was_space);
            }
            Event::CData(e) if skipping.is_none() => {
                let decoded = reader.decoder().decode(&e)?;
                count_chars(&decoded, &mut text.chars, &mut last_was_space);
            }
            Event::GeneralRef(_) if skipping.is_none() => {
                text.chars += 1;
                last_was_space = false;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

fn should_skip_tag(name: &[u8]) -> bool {
    matches!(name, b"head" | b"script" | b"style")
}

fn record_anchors(
    reader: &Reader<&[u8]>,
    e: &quick_xml::events::BytesStart<'_>,
    offset: usize,
    anchors: &mut Vec<(String, usize)>,
) {
    for attr in e.attributes().flatten() {
        let key = attr.key.local_name();
        if key.as_ref() != b"id" && key.as_ref() != b"name" {
            continue;
        }
        let value = match reader.decoder().decode(&attr.value) {
            Ok(v) => v.trim().to_string(),
            Err(_) => continue,
        };
        if !value.is_empty() && !anchors.iter().any(|(name, _)| *name == value) {
            anchors.push((value, offset));
        }
    }
}

fn count_chars(text: &str, chars: &mut usize, last_was_space: &mut bool) {
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !*last_was_space {
                *chars += 1;
                *last_was_space = true;
            }
        } else {
            *chars += 1;
            *last_was_space = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chars_per_page_respects_margins() {
        let config = FlowLayoutConfig {
            width_px: 100,
            height_px: 60,
            margin_px: 10,
            char_width_px: 10,
            line_height_px: 20,
        };
        assert_eq!(config.chars_per_page(), 8 * 2);
        assert_eq!(config.pages_for(0), 1);
        assert_eq!(config.pages_for(16), 1);
        assert_eq!(config.pages_for(17), 2);
        assert_eq!(config.page_of_offset(0), 1);
        assert_eq!(config.page_of_offset(16), 2);
    }

    #[test]
    fn tiny_viewport_still_holds_one_char() {
        let config = FlowLayoutConfig::for_display(10, 10);
        assert_eq!(config.chars_per_page(), 1);
    }

    #[test]
    fn scan_collapses_whitespace_and_skips_head() {
        let markup = "<html><head><title>Ignored</title></head>\
                      <body><p>ab  cd</p>\n<p>ef</p></body></html>";
        let text = scan_markup(markup).expect("markup should scan");
        // "ab cd" + " " + "ef"
        assert_eq!(text.chars, 8);
    }

    #[test]
    fn scan_records_anchor_offsets() {
        let markup = "<body><p>abcd</p><h2 id=\"s1\">ef</h2><a name=\"s2\"/>gh</body>";
        let text = scan_markup(markup).expect("markup should scan");
        assert_eq!(text.anchor_offset("s1"), Some(4));
        assert_eq!(text.anchor_offset("s2"), Some(6));
        assert_eq!(text.anchor_offset("missing"), None);
    }

    #[test]
    fn unclosed_tags_inside_head_do_not_swallow_body() {
        let markup = "<html><head><meta charset=\"utf-8\"><title>T</title></head><body>abc</body></html>";
        let text = scan_markup(markup).expect("markup should scan");
        assert_eq!(text.chars, 3);
    }

    #[test]
    fn scan_counts_entities_as_one_char() {
        let text = scan_markup("<p>a&amp;b</p>").expect("markup should scan");
        assert_eq!(text.chars, 3);
    }

    #[test]
    fn scan_tolerates_unclosed_html_tags() {
        let text = scan_markup("<body><p>one<br>two</p></body>").expect("lenient scan");
        assert_eq!(text.chars, 6);
    }
}
