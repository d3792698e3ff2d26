//! Table-of-contents tree and per-component chapter indexes.
//!
//! The data source hands over the book's table of contents as a forest of
//! [`NavPoint`]s whose `href` names a component, optionally followed by a
//! `#fragment`. Each component keeps the subset of entries that point into
//! it, in document order, as a list of [`Chapter`]s.
//!
//! ```rust
//! use epub_stream_pager::navigation::{chapters_for_component, NavPoint};
//!
//! let toc = vec![
//!     NavPoint::new("Opening", "c2"),
//!     NavPoint::new("Section 1", "c2#s1"),
//!     NavPoint::new("Elsewhere", "c3"),
//! ];
//! let chapters = chapters_for_component(&toc, "c2");
//! assert_eq!(chapters.len(), 2);
//! assert_eq!(chapters[0].fragment, None);
//! assert_eq!(chapters[1].fragment.as_deref(), Some("s1"));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A single table-of-contents entry.
///
/// Entries nest to represent chapters containing sections.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavPoint {
    /// Display label for this entry
    #[serde(alias = "title")]
    pub label: String,
    /// Component id, possibly with `#fragment`
    #[serde(alias = "src", default)]
    pub href: String,
    /// Nested entries
    #[serde(default)]
    pub children: Vec<NavPoint>,
}

impl NavPoint {
    /// Leaf entry with no children.
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            children: Vec::new(),
        }
    }

    /// Attach nested entries.
    pub fn with_children(mut self, children: Vec<NavPoint>) -> Self {
        self.children = children;
        self
    }
}

/// Chapter entry that belongs to one component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chapter {
    /// Title from the table of contents.
    pub title: String,
    /// Sub-location inside the component, `None` when the chapter starts the component.
    pub fragment: Option<String>,
}

/// Per-component chapter list. Most components carry one or two chapters.
pub type ChapterList = SmallVec<[Chapter; 4]>;

/// Derive the chapter list for `component_id` from the table of contents.
///
/// Walks the tree depth-first and keeps every entry whose href is exactly
/// `component_id` or `component_id#fragment` with a non-empty fragment.
/// Duplicate entries are passed through.
pub fn chapters_for_component(toc: &[NavPoint], component_id: &str) -> ChapterList {
    let mut chapters = ChapterList::new();
    collect_chapters(toc, component_id, &mut chapters);
    chapters
}

fn collect_chapters(points: &[NavPoint], component_id: &str, out: &mut ChapterList) {
    for point in points {
        if let Some(fragment) = match_component_href(&point.href, component_id) {
            out.push(Chapter {
                title: point.label.clone(),
                fragment: fragment.map(String::from),
            });
        }
        collect_chapters(&point.children, component_id, out);
    }
}

/// `Some(None)` for the component start, `Some(Some(fragment))` for a
/// sub-location, `None` when `href` points elsewhere.
fn match_component_href<'a>(href: &'a str, component_id: &str) -> Option<Option<&'a str>> {
    let rest = href.strip_prefix(component_id)?;
    if rest.is_empty() {
        return Some(None);
    }
    let fragment = rest.strip_prefix('#')?;
    if fragment.is_empty() {
        return None;
    }
    Some(Some(fragment))
}

/// Split `component#fragment` into its parts.
///
/// The split happens at the first `#`. An empty fragment is treated as absent.
pub fn split_href_fragment(href: &str) -> (&str, Option<&str>) {
    let (base, fragment) = match href.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (href, None),
    };
    let fragment = fragment.filter(|value| !value.is_empty());
    (base, fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_toc() -> Vec<NavPoint> {
        vec![
            NavPoint::new("Part One", "c1").with_children(vec![
                NavPoint::new("Introduction", "c1#introduction"),
                NavPoint::new("Second", "c2"),
                NavPoint::new("Second, section 1", "c2#s1"),
            ]),
            NavPoint::new("Third", "c3"),
            NavPoint::new("Appendix", "c10"),
        ]
    }

    #[test]
    fn chapters_keep_document_order_and_skip_other_components() {
        let toc = vec![
            NavPoint::new("Two", "c2"),
            NavPoint::new("Two, part 1", "c2#s1"),
            NavPoint::new("Three", "c3"),
        ];
        let chapters = chapters_for_component(&toc, "c2");
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].title, "Two");
        assert_eq!(chapters[0].fragment, None);
        assert_eq!(chapters[1].fragment.as_deref(), Some("s1"));
    }

    #[test]
    fn chapters_descend_into_nested_entries() {
        let chapters = chapters_for_component(&sample_toc(), "c1");
        let fragments: Vec<_> = chapters.iter().map(|c| c.fragment.as_deref()).collect();
        assert_eq!(fragments, vec![None, Some("introduction")]);

        let chapters = chapters_for_component(&sample_toc(), "c2");
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[1].title, "Second, section 1");
    }

    #[test]
    fn prefix_of_another_component_id_does_not_match() {
        let chapters = chapters_for_component(&sample_toc(), "c1");
        assert!(chapters.iter().all(|c| c.title != "Appendix"));
    }

    #[test]
    fn empty_fragment_is_not_a_chapter() {
        let toc = vec![NavPoint::new("Dangling", "c1#")];
        assert!(chapters_for_component(&toc, "c1").is_empty());
    }

    #[test]
    fn duplicate_entries_pass_through() {
        let toc = vec![NavPoint::new("A", "c1"), NavPoint::new("A again", "c1")];
        assert_eq!(chapters_for_component(&toc, "c1").len(), 2);
    }

    #[test]
    fn missing_href_never_matches() {
        let toc = vec![NavPoint {
            label: "No target".into(),
            href: String::new(),
            children: vec![NavPoint::new("Child", "c1")],
        }];
        let chapters = chapters_for_component(&toc, "c1");
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title, "Child");
    }

    #[test]
    fn split_href_handles_fragment_variants() {
        assert_eq!(split_href_fragment("c1"), ("c1", None));
        assert_eq!(
            split_href_fragment("c1#introduction"),
            ("c1", Some("introduction"))
        );
        assert_eq!(split_href_fragment("c1#"), ("c1", None));
        assert_eq!(split_href_fragment("c1#a#b"), ("c1", Some("a#b")));
    }

    #[test]
    fn nav_point_deserializes_from_src_title_shape() {
        let json = r#"{"title":"Intro","src":"c1#intro","children":[{"title":"Deeper","src":"c1#deep"}]}"#;
        let point: NavPoint = serde_json::from_str(json).expect("nav point should parse");
        assert_eq!(point.label, "Intro");
        assert_eq!(point.href, "c1#intro");
        assert_eq!(point.children[0].href, "c1#deep");
    }
}
