//! A suggestion source backed by an in-memory list.

use horizon_autocomplete_core::{ReplySender, SuggestionRequest, SuggestionSource};

/// Controls how matching handles letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseSensitivity {
    /// Case-sensitive matching (e.g., "App" won't match "apple").
    #[default]
    CaseSensitive,
    /// Case-insensitive matching (e.g., "App" will match "apple").
    CaseInsensitive,
}

/// A suggestion source that filters a fixed list of strings.
///
/// An item matches when it contains the query. Replies are delivered
/// synchronously, before [`fetch`](SuggestionSource::fetch) returns, which
/// makes this source convenient for offline use and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSuggestionSource {
    items: Vec<String>,
    case_sensitivity: CaseSensitivity,
    max_results: Option<usize>,
}

impl StaticSuggestionSource {
    /// Create a source over the given items.
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Set case sensitivity using builder pattern.
    pub fn with_case_sensitivity(mut self, sensitivity: CaseSensitivity) -> Self {
        self.case_sensitivity = sensitivity;
        self
    }

    /// Cap the number of suggestions per reply using builder pattern.
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max);
        self
    }

    /// Get a reference to the items.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Set the items.
    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
    }

    /// Add an item to the list.
    pub fn add_item(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    /// Remove an item from the list by value.
    pub fn remove_item(&mut self, item: &str) {
        self.items.retain(|i| i != item);
    }

    /// Get the case sensitivity setting.
    pub fn case_sensitivity(&self) -> CaseSensitivity {
        self.case_sensitivity
    }

    /// Items matching `query`, in list order.
    pub fn completions(&self, query: &str) -> Vec<String> {
        let limit = self.max_results.unwrap_or(usize::MAX);
        match self.case_sensitivity {
            CaseSensitivity::CaseSensitive => self
                .items
                .iter()
                .filter(|item| item.contains(query))
                .take(limit)
                .cloned()
                .collect(),
            CaseSensitivity::CaseInsensitive => {
                let query_lower = query.to_lowercase();
                self.items
                    .iter()
                    .filter(|item| item.to_lowercase().contains(&query_lower))
                    .take(limit)
                    .cloned()
                    .collect()
            }
        }
    }
}

impl SuggestionSource for StaticSuggestionSource {
    fn fetch(&self, request: SuggestionRequest, reply: ReplySender) {
        let completions = self.completions(&request.query);
        tracing::trace!(
            target: "horizon_autocomplete_core::source",
            query = %request.query,
            count = completions.len(),
            "static completions"
        );
        if let Err(err) = reply.send(Ok(completions)) {
            tracing::debug!(target: "horizon_autocomplete_core::source", "dropping reply: {}", err);
        }
    }
}

impl From<Vec<String>> for StaticSuggestionSource {
    fn from(items: Vec<String>) -> Self {
        Self::new(items)
    }
}

impl From<Vec<&str>> for StaticSuggestionSource {
    fn from(items: Vec<&str>) -> Self {
        Self::new(items.into_iter().map(String::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use horizon_autocomplete_core::ReplyChannel;

    use super::*;

    fn fruit() -> StaticSuggestionSource {
        StaticSuggestionSource::from(vec!["apple", "Application", "banana", "pineapple"])
    }

    #[test]
    fn test_case_sensitive_contains() {
        let source = fruit();
        assert_eq!(source.completions("app"), vec!["apple", "pineapple"]);
        assert!(source.completions("APP").is_empty());
    }

    #[test]
    fn test_case_insensitive_contains() {
        let source = fruit().with_case_sensitivity(CaseSensitivity::CaseInsensitive);
        assert_eq!(
            source.completions("APP"),
            vec!["apple", "Application", "pineapple"]
        );
    }

    #[test]
    fn test_max_results() {
        let source = fruit().with_max_results(1);
        assert_eq!(source.completions("a"), vec!["apple"]);
    }

    #[test]
    fn test_item_management() {
        let mut source = StaticSuggestionSource::default();
        source.add_item("red");
        source.add_item("green");
        source.remove_item("red");
        assert_eq!(source.items(), &["green".to_string()]);

        source.set_items(vec!["blue".to_string()]);
        assert_eq!(source.completions("bl"), vec!["blue"]);
    }

    #[test]
    fn test_fetch_replies_synchronously() {
        let source = fruit();
        let channel = ReplyChannel::new();

        source.fetch(
            SuggestionRequest::new(4, "nan", "/autocomplete.json?query=nan"),
            channel.sender(4),
        );

        let response = channel.try_recv().unwrap();
        assert_eq!(response.sequence, 4);
        assert_eq!(response.outcome, Ok(vec!["banana".to_string()]));
    }
}
