//! Dropdown markup generation.

use std::fmt::Write as _;

use horizon_autocomplete_core::PerfSpan;
use horizon_autocomplete_core::logging::span_names;

use super::highlight::{Highlighter, Segment};
use crate::dom::ClickTarget;
use crate::options::ClassNames;

/// Attribute carrying an item's committed value.
pub const VALUE_ATTRIBUTE: &str = "data-autocomplete-value";

/// One candidate, split around the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    /// The candidate string, committed into the input when chosen.
    pub value: String,
    /// The candidate split into plain and highlighted text.
    pub segments: Vec<Segment>,
}

impl RenderedItem {
    /// Whether any part of the candidate is highlighted.
    pub fn has_highlight(&self) -> bool {
        self.segments.iter().any(Segment::is_match)
    }

    /// Describe this item's `<li>` the way a host reports a click on it.
    pub fn click_target(&self, classes: &ClassNames, selected: bool) -> ClickTarget {
        let mut list = vec![classes.item.clone()];
        if selected {
            list.push(classes.selected.clone());
        }
        ClickTarget::new(list, Some(self.value.clone()))
    }
}

/// The highlighted candidates of one fetch.
///
/// Built once per accepted fetch; markup is regenerated from it whenever the
/// selection changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListModel {
    items: Vec<RenderedItem>,
}

impl ListModel {
    /// Split every candidate around the highlighter's query.
    pub fn build(candidates: &[String], highlighter: &Highlighter) -> Self {
        let items = candidates
            .iter()
            .map(|value| RenderedItem {
                value: value.clone(),
                segments: highlighter.segments(value),
            })
            .collect();
        Self { items }
    }

    /// The rendered items in candidate order.
    pub fn items(&self) -> &[RenderedItem] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Generate the dropdown markup.
    ///
    /// An empty model renders as an empty string.
    pub fn to_html(&self, classes: &ClassNames, selected: Option<usize>) -> String {
        if self.items.is_empty() {
            return String::new();
        }

        let _span = PerfSpan::new(span_names::RENDER);
        let mut html = String::new();
        let _ = write!(html, r#"<ul class="{}">"#, escape_html(&classes.list));
        for (index, item) in self.items.iter().enumerate() {
            let _ = write!(html, r#"<li class="{}"#, escape_html(&classes.item));
            if selected == Some(index) {
                let _ = write!(html, " {}", escape_html(&classes.selected));
            }
            let _ = write!(
                html,
                r#"" {}="{}">"#,
                VALUE_ATTRIBUTE,
                escape_html(&item.value)
            );
            for segment in &item.segments {
                match segment {
                    Segment::Text(text) => html.push_str(&escape_html(text)),
                    Segment::Match(text) => {
                        let _ = write!(
                            html,
                            r#"<span class="{}">{}</span>"#,
                            escape_html(&classes.highlight),
                            escape_html(text)
                        );
                    }
                }
            }
            html.push_str("</li>");
        }
        html.push_str("</ul>");
        html
    }
}

/// Escape text for use in HTML content and double-quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
