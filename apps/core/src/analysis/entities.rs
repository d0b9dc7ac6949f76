//! Entity Extraction.
//!
//! Regex and lexicon based: email addresses, money amounts, URLs and
//! technology names found in a project's emails.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::{Arc, LazyLock};

use super::lexicon::KeywordLexicon;
use super::participants::EMAIL_PATTERN;
use crate::models::EmailRecord;

/// Entries kept per category
const MAX_PER_CATEGORY: usize = 10;

static AMOUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d{3})*(?:,\d{2})?)\s*(?:€|euros?|USD|\$|FCFA)")
        .expect("Invalid regex: amount pattern")
});

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https?://[^\s<>"{}|\\^`\[\]]+"#).expect("Invalid regex: URL pattern")
});

/// Entities of a project, each list sorted and capped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    pub emails: Vec<String>,
    /// Numeric part of amounts followed by a currency
    pub amounts: Vec<String>,
    pub urls: Vec<String>,
    /// Upper-cased technology names
    pub technologies: Vec<String>,
}

#[derive(Default)]
struct EntitySets {
    emails: BTreeSet<String>,
    amounts: BTreeSet<String>,
    urls: BTreeSet<String>,
    technologies: BTreeSet<String>,
}

fn capped(set: BTreeSet<String>) -> Vec<String> {
    set.into_iter().take(MAX_PER_CATEGORY).collect()
}

/// Extracts entities from email text
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    lexicon: Arc<KeywordLexicon>,
}

impl EntityExtractor {
    pub fn new(lexicon: Arc<KeywordLexicon>) -> Self {
        Self { lexicon }
    }

    fn collect_into(&self, text: &str, sets: &mut EntitySets) {
        sets.emails
            .extend(EMAIL_PATTERN.find_iter(text).map(|m| m.as_str().to_string()));
        sets.amounts.extend(
            AMOUNT_PATTERN
                .captures_iter(text)
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str().to_string()),
        );
        sets.urls
            .extend(URL_PATTERN.find_iter(text).map(|m| m.as_str().to_string()));

        let lower = text.to_lowercase();
        sets.technologies.extend(
            self.lexicon
                .technology_terms
                .iter()
                .filter(|tech| lower.contains(tech.as_str()))
                .map(|tech| tech.to_uppercase()),
        );
    }

    /// Entities across all records
    pub fn extract(&self, records: &[EmailRecord]) -> ExtractedEntities {
        let mut sets = EntitySets::default();
        for record in records {
            self.collect_into(&record.search_text(), &mut sets);
        }

        ExtractedEntities {
            emails: capped(sets.emails),
            amounts: capped(sets.amounts),
            urls: capped(sets.urls),
            technologies: capped(sets.technologies),
        }
    }
}
