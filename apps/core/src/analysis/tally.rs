//! Keyword Tally.
//!
//! Counts project-vocabulary occurrences per bucket. Counting is plain
//! non-overlapping substring occurrence in the lowercased text, not a
//! word-boundary count.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::lexicon::KeywordLexicon;
use crate::models::{EmailRecord, ProjectBucket};

/// A keyword and its running count in a bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// Accumulates project-term counts into buckets
#[derive(Debug, Clone)]
pub struct KeywordTally {
    lexicon: Arc<KeywordLexicon>,
}

impl KeywordTally {
    pub fn new(lexicon: Arc<KeywordLexicon>) -> Self {
        Self { lexicon }
    }

    /// Add every nonzero project-term count found in `record` to the bucket
    pub fn record_keywords(&self, bucket: &mut ProjectBucket, record: &EmailRecord) {
        let text = record.search_text_lower();
        for term in &self.lexicon.project_terms {
            let count = text.matches(term.as_str()).count();
            if count > 0 {
                *bucket.keywords.entry(term.clone()).or_insert(0) += count;
            }
        }
    }

    /// The `k` most frequent keywords of the bucket.
    ///
    /// Sorted by count descending; equal counts keep lexicon order.
    pub fn top_k(&self, bucket: &ProjectBucket, k: usize) -> Vec<KeywordCount> {
        let mut counts: Vec<KeywordCount> = self
            .lexicon
            .project_terms
            .iter()
            .filter_map(|term| {
                bucket.keywords().get(term).map(|&count| KeywordCount {
                    keyword: term.clone(),
                    count,
                })
            })
            .collect();

        // Stable: ties keep lexicon order
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(k);
        counts
    }
}
