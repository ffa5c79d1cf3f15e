//! Query highlighting.
//!
//! A candidate is split into [`Segment`]s: plain text and query occurrences.
//! Occurrences are case-sensitive, non-overlapping and found left to right.

use regex::Regex;

use crate::options::HighlightMode;

/// A piece of a candidate string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text outside any query occurrence.
    Text(String),
    /// A query occurrence.
    Match(String),
}

impl Segment {
    /// The segment's text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Match(s) => s,
        }
    }

    /// Whether this segment is a query occurrence.
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match(_))
    }
}

/// Splits candidates around the occurrences of one query.
#[derive(Debug, Clone)]
pub struct Highlighter {
    query: String,
    pattern: Option<Regex>,
}

impl Highlighter {
    /// Create a highlighter for `query`.
    ///
    /// In [`HighlightMode::Pattern`] the query is compiled once here; a query
    /// that is not a valid regular expression is matched literally instead.
    pub fn new(query: &str, mode: HighlightMode) -> Self {
        let pattern = match mode {
            HighlightMode::Literal => None,
            HighlightMode::Pattern => match Regex::new(query) {
                Ok(regex) => Some(regex),
                Err(err) => {
                    tracing::debug!(
                        target: "horizon_autocomplete::widget",
                        query,
                        error = %err,
                        "query is not a valid pattern, highlighting literally"
                    );
                    None
                }
            },
        };

        Self {
            query: query.to_string(),
            pattern,
        }
    }

    /// The query being highlighted.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Split `text` into segments.
    ///
    /// A candidate without occurrences yields a single [`Segment::Text`].
    pub fn segments(&self, text: &str) -> Vec<Segment> {
        let ranges: Vec<(usize, usize)> = match &self.pattern {
            Some(regex) => regex
                .find_iter(text)
                .filter(|m| m.start() < m.end())
                .map(|m| (m.start(), m.end()))
                .collect(),
            None if self.query.is_empty() => Vec::new(),
            None => text
                .match_indices(self.query.as_str())
                .map(|(start, m)| (start, start + m.len()))
                .collect(),
        };

        split(text, &ranges)
    }
}

fn split(text: &str, ranges: &[(usize, usize)]) -> Vec<Segment> {
    if ranges.is_empty() {
        return vec![Segment::Text(text.to_string())];
    }

    let mut segments = Vec::with_capacity(ranges.len() * 2 + 1);
    let mut cursor = 0;
    for &(start, end) in ranges {
        if start > cursor {
            segments.push(Segment::Text(text[cursor..start].to_string()));
        }
        segments.push(Segment::Match(text[start..end].to_string()));
        cursor = end;
    }
    if cursor < text.len() {
        segments.push(Segment::Text(text[cursor..].to_string()));
    }
    segments
}
