//! Project Digest.
//!
//! Short summary of a project's latest emails. The language model is asked
//! first; the extractive fallback keeps subjects and the first meaningful
//! sentences.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::critical::truncate_with_ellipsis;
use super::model::{AnalysisMethod, LanguageModel};
use super::sentiment::round2;
use crate::error::ModelError;
use crate::models::EmailRecord;

const RECENT_EMAILS: usize = 3;
const MAX_MODEL_INPUT_CHARS: usize = 800;
const MIN_MODEL_INPUT_CHARS: usize = 50;
const MIN_SENTENCE_CHARS: usize = 20;
const SENTENCES_PER_BODY: usize = 2;
const MAX_ITEMS: usize = 5;
const MAX_SUMMARY_CHARS: usize = 300;

/// Summary of a project's recent emails
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoSummary {
    pub text: String,
    pub emails_analyzed: usize,
    pub method: AnalysisMethod,
    /// `len(summary) / len(input)`, model summaries only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression_ratio: Option<f64>,
}

/// Builds project digests
#[derive(Debug, Clone, Copy, Default)]
pub struct DigestBuilder;

impl DigestBuilder {
    pub fn new() -> Self {
        Self
    }

    fn recent(records: &[EmailRecord]) -> &[EmailRecord] {
        &records[records.len().saturating_sub(RECENT_EMAILS)..]
    }

    /// Model summary of the last emails, extractive summary otherwise
    pub fn summarize(&self, records: &[EmailRecord], model: &dyn LanguageModel) -> AutoSummary {
        let recent = Self::recent(records);

        let combined: String = recent
            .iter()
            .map(|r| format!("{}. {} ", r.subject, r.body))
            .collect::<String>()
            .chars()
            .take(MAX_MODEL_INPUT_CHARS)
            .collect();

        if combined.trim().chars().count() < MIN_MODEL_INPUT_CHARS {
            debug!("Not enough content for a model summary");
            return self.extractive(records);
        }

        match model.summarize(&combined) {
            Ok(summary) => {
                let ratio = summary.chars().count() as f64 / combined.chars().count() as f64;
                AutoSummary {
                    text: summary,
                    emails_analyzed: recent.len(),
                    method: AnalysisMethod::Ml,
                    compression_ratio: Some(round2(ratio)),
                }
            }
            Err(ModelError::Unavailable) => self.extractive(records),
            Err(e) => {
                warn!("Model summary failed, using extractive fallback: {}", e);
                self.extractive(records)
            }
        }
    }

    /// Subjects plus the first sentences of each of the last emails
    pub fn extractive(&self, records: &[EmailRecord]) -> AutoSummary {
        let recent = Self::recent(records);
        let mut items: Vec<String> = Vec::new();

        for record in recent {
            if !record.subject.is_empty() {
                items.push(format!("Subject: {}", record.subject));
            }
            if !record.body.is_empty() {
                items.extend(
                    record
                        .body
                        .split('.')
                        .take(SENTENCES_PER_BODY)
                        .map(str::trim)
                        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
                        .map(str::to_string),
                );
            }
        }

        items.truncate(MAX_ITEMS);
        let joined = items.join(". ");

        AutoSummary {
            text: truncate_with_ellipsis(&joined, MAX_SUMMARY_CHARS),
            emails_analyzed: recent.len(),
            method: AnalysisMethod::Basic,
            compression_ratio: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::model::{ModelVerdict, NullModel};

    struct EchoModel;

    impl LanguageModel for EchoModel {
        fn classify(&self, _text: &str) -> Result<ModelVerdict, ModelError> {
            Err(ModelError::Unavailable)
        }

        fn summarize(&self, text: &str) -> Result<String, ModelError> {
            Ok(text.chars().take(text.chars().count() / 4).collect())
        }
    }

    fn long_email(subject: &str) -> EmailRecord {
        EmailRecord::new(
            subject,
            "",
            "",
            None,
            "The integration environment is ready for review. Short. Third sentence is ignored entirely.",
        )
    }

    #[test]
    fn test_extractive_summary() {
        let records = vec![long_email("Atlas status")];
        let summary = DigestBuilder::new().summarize(&records, &NullModel);

        assert_eq!(summary.method, AnalysisMethod::Basic);
        assert_eq!(summary.emails_analyzed, 1);
        assert_eq!(
            summary.text,
            "Subject: Atlas status. The integration environment is ready for review"
        );
        assert!(summary.compression_ratio.is_none());
    }

    #[test]
    fn test_extractive_keeps_five_items_from_last_three() {
        let records: Vec<EmailRecord> = (0..4).map(|i| long_email(&format!("S{}", i))).collect();
        let summary = DigestBuilder::new().extractive(&records);

        assert_eq!(summary.emails_analyzed, 3);
        assert!(summary.text.starts_with("Subject: S1."));
        assert!(!summary.text.contains("S0"));
        assert_eq!(summary.text.matches("Subject:").count(), 3);
    }

    #[test]
    fn test_extractive_truncates_long_output() {
        let body = format!("{}.", "word ".repeat(100));
        let records = vec![EmailRecord::new("", "", "", None, body)];
        let summary = DigestBuilder::new().extractive(&records);

        assert_eq!(summary.text.chars().count(), 303);
        assert!(summary.text.ends_with("..."));
    }

    #[test]
    fn test_model_summary() {
        let records = vec![long_email("Atlas status")];
        let summary = DigestBuilder::new().summarize(&records, &EchoModel);

        assert_eq!(summary.method, AnalysisMethod::Ml);
        assert_eq!(summary.compression_ratio, Some(0.25));
    }

    #[test]
    fn test_short_content_skips_model() {
        let records = vec![EmailRecord::new("Hi", "", "", None, "ok")];
        let summary = DigestBuilder::new().summarize(&records, &EchoModel);

        assert_eq!(summary.method, AnalysisMethod::Basic);
        assert_eq!(summary.text, "Subject: Hi");
    }

    #[test]
    fn test_no_records() {
        let summary = DigestBuilder::new().summarize(&[], &NullModel);
        assert_eq!(summary.text, "");
        assert_eq!(summary.emails_analyzed, 0);
    }
}
