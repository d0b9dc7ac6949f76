//! Project Relevance Classification.
//!
//! Routes an email to the projects whose name appears in it. Matching is
//! case-insensitive raw substring containment over `subject + " " + body`:
//! no tokenisation, so the filter `"ai"` also matches `"maintain"`.

use crate::models::EmailRecord;

/// Substring-based project classifier
#[derive(Debug, Clone)]
pub struct RelevanceClassifier {
    /// (filter as supplied, lowercased filter)
    filters: Vec<(String, String)>,
}

impl RelevanceClassifier {
    /// Create a classifier for the given project filters, kept in caller order
    pub fn new<S: AsRef<str>>(filters: &[S]) -> Self {
        let filters = filters
            .iter()
            .map(|f| (f.as_ref().to_string(), f.as_ref().to_lowercase()))
            .collect();
        Self { filters }
    }

    /// Filters matched by the record, in filter order. Empty when none match.
    pub fn classify(&self, record: &EmailRecord) -> Vec<&str> {
        let text = record.search_text_lower();
        self.filters
            .iter()
            .filter(|(_, needle)| text.contains(needle.as_str()))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Project names in caller order
    pub fn filters(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(|(name, _)| name.as_str())
    }
}
