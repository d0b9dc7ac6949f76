//! Critical Email Ranking.
//!
//! Scores each email on its own: risk-term weights plus a flat bonus per
//! urgency marker. Emails under the threshold are dropped, the rest are
//! ranked by score.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::lexicon::KeywordLexicon;
use crate::models::EmailRecord;

/// Minimum criticality for an email to be reported
pub const CRITICALITY_THRESHOLD: u32 = 4;

const URGENCY_BONUS: u32 = 5;
const PREVIEW_CHARS: usize = 150;

/// One ranked email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalEmailEntry {
    pub subject: String,
    pub from: String,
    pub date: Option<String>,
    pub criticality_score: u32,
    /// Matched risk terms, then `urgent_<marker>` for each urgency marker
    pub flags: Vec<String>,
    /// Body cut to 150 characters, with `...` when cut
    pub preview: String,
}

/// Truncates to `max` characters, appending `...` when anything was removed
pub(crate) fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let mut cut: String = text.chars().take(max).collect();
        cut.push_str("...");
        cut
    } else {
        text.to_string()
    }
}

/// Finds the most critical emails of a project
#[derive(Debug, Clone)]
pub struct CriticalEmailRanker {
    lexicon: Arc<KeywordLexicon>,
}

impl CriticalEmailRanker {
    pub fn new(lexicon: Arc<KeywordLexicon>) -> Self {
        Self { lexicon }
    }

    /// Criticality score and flags of one email
    pub fn score(&self, record: &EmailRecord) -> (u32, Vec<String>) {
        let text = record.search_text_lower();
        let mut score = 0u32;
        let mut flags = Vec::new();

        for entry in &self.lexicon.risk_terms {
            if text.contains(entry.term.as_str()) {
                score = score.saturating_add(entry.weight);
                flags.push(entry.term.clone());
            }
        }

        for marker in &self.lexicon.urgency_terms {
            if text.contains(marker.as_str()) {
                score = score.saturating_add(URGENCY_BONUS);
                flags.push(format!("urgent_{}", marker));
            }
        }

        (score, flags)
    }

    /// Emails scoring at least [`CRITICALITY_THRESHOLD`], best first, at most `top_k`.
    /// Equal scores keep input order.
    pub fn rank(&self, records: &[EmailRecord], top_k: usize) -> Vec<CriticalEmailEntry> {
        let mut entries: Vec<CriticalEmailEntry> = records
            .iter()
            .filter_map(|record| {
                let (criticality_score, flags) = self.score(record);
                (criticality_score >= CRITICALITY_THRESHOLD).then(|| CriticalEmailEntry {
                    subject: record.subject.clone(),
                    from: record.from.clone(),
                    date: record.date.clone(),
                    criticality_score,
                    flags,
                    preview: truncate_with_ellipsis(&record.body, PREVIEW_CHARS),
                })
            })
            .collect();

        entries.sort_by(|a, b| b.criticality_score.cmp(&a.criticality_score));
        entries.truncate(top_k);
        entries
    }
}
