//! Sentiment Scoring.
//!
//! Rule-based sentiment from positive/negative term counts, used whenever the
//! language model is unavailable or fails.
//!
//! The basic confidence is `0.6 + 0.1 * hits` and is NOT capped: a text with
//! five or more winning hits reports a confidence above 1.0.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use super::lexicon::KeywordLexicon;
use super::model::{AnalysisMethod, LanguageModel};
use crate::error::ModelError;
use crate::models::EmailRecord;

/// Maximum number of characters of `subject + body` scored per email
pub const MAX_SENTIMENT_CHARS: usize = 512;

/// Number of per-email results kept in a summary
const RECENT_DETAILS: usize = 3;

/// Sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Maps a free-form model label (`"positive"`, `"NEGATIVE"`, ...) to a label
    pub fn from_model_label(label: &str) -> Self {
        let upper = label.to_uppercase();
        if upper.contains("POSITIVE") {
            SentimentLabel::Positive
        } else if upper.contains("NEGATIVE") {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

/// Result of scoring one text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub label: SentimentLabel,
    pub confidence: f64,
}

/// Sentiment of one email inside a summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailSentiment {
    pub subject: String,
    pub sentiment: SentimentLabel,
    pub confidence: f64,
    pub date: Option<String>,
    pub method: AnalysisMethod,
}

/// Aggregated sentiment of a set of emails
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    /// Emails actually scored (blank texts are skipped)
    pub emails_analyzed: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    /// Mean confidence, rounded to 2 decimals
    pub mean_confidence: f64,
    /// The last scored emails, oldest first
    pub details: Vec<EmailSentiment>,
    /// Majority of positive vs negative, neutral on a tie
    pub trend: SentimentLabel,
    /// `ML` as soon as one email was scored by the model
    pub method: AnalysisMethod,
}

impl SentimentSummary {
    /// Summary of zero analysed emails
    pub fn empty() -> Self {
        Self {
            emails_analyzed: 0,
            positive: 0,
            negative: 0,
            neutral: 0,
            mean_confidence: 0.0,
            details: Vec::new(),
            trend: SentimentLabel::Neutral,
            method: AnalysisMethod::Basic,
        }
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Keyword-based sentiment scorer
#[derive(Debug, Clone)]
pub struct BasicSentimentScorer {
    lexicon: Arc<KeywordLexicon>,
}

impl BasicSentimentScorer {
    pub fn new(lexicon: Arc<KeywordLexicon>) -> Self {
        Self { lexicon }
    }

    /// Scores `text` by counting distinct positive and negative terms it contains
    pub fn score(&self, text: &str) -> SentimentScore {
        let lower = text.to_lowercase();
        let positive = self
            .lexicon
            .positive_terms
            .iter()
            .filter(|term| lower.contains(term.as_str()))
            .count();
        let negative = self
            .lexicon
            .negative_terms
            .iter()
            .filter(|term| lower.contains(term.as_str()))
            .count();

        if positive > negative {
            SentimentScore {
                label: SentimentLabel::Positive,
                confidence: 0.6 + positive as f64 * 0.1,
            }
        } else if negative > positive {
            SentimentScore {
                label: SentimentLabel::Negative,
                confidence: 0.6 + negative as f64 * 0.1,
            }
        } else {
            SentimentScore {
                label: SentimentLabel::Neutral,
                confidence: 0.5,
            }
        }
    }

    /// Scores one text with the model, falling back to [`score`](Self::score)
    fn score_with(&self, text: &str, model: &dyn LanguageModel) -> (SentimentScore, AnalysisMethod) {
        match model.classify(text) {
            Ok(verdict) => (
                SentimentScore {
                    label: SentimentLabel::from_model_label(&verdict.label),
                    confidence: f64::from(verdict.score),
                },
                AnalysisMethod::Ml,
            ),
            Err(ModelError::Unavailable) => (self.score(text), AnalysisMethod::Basic),
            Err(e) => {
                warn!("Model sentiment failed, using keyword fallback: {}", e);
                (self.score(text), AnalysisMethod::Basic)
            }
        }
    }

    /// Scores every record and aggregates the results
    pub fn summarize_sentiment(
        &self,
        records: &[EmailRecord],
        model: &dyn LanguageModel,
    ) -> SentimentSummary {
        let mut results: Vec<EmailSentiment> = Vec::with_capacity(records.len());

        for record in records {
            let text: String = record.search_text().chars().take(MAX_SENTIMENT_CHARS).collect();
            if text.trim().is_empty() {
                debug!("Skipping blank email for sentiment");
                continue;
            }

            let (score, method) = self.score_with(&text, model);
            results.push(EmailSentiment {
                subject: record.subject.clone(),
                sentiment: score.label,
                confidence: score.confidence,
                date: record.date.clone(),
                method,
            });
        }

        if results.is_empty() {
            return SentimentSummary::empty();
        }

        let count_of = |label: SentimentLabel| results.iter().filter(|r| r.sentiment == label).count();
        let positive = count_of(SentimentLabel::Positive);
        let negative = count_of(SentimentLabel::Negative);
        let neutral = results.len() - positive - negative;
        let mean = results.iter().map(|r| r.confidence).sum::<f64>() / results.len() as f64;

        let trend = if positive > negative {
            SentimentLabel::Positive
        } else if negative > positive {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };

        let method = if results.iter().any(|r| r.method == AnalysisMethod::Ml) {
            AnalysisMethod::Ml
        } else {
            AnalysisMethod::Basic
        };

        let skip = results.len().saturating_sub(RECENT_DETAILS);
        SentimentSummary {
            emails_analyzed: results.len(),
            positive,
            negative,
            neutral,
            mean_confidence: round2(mean),
            details: results.split_off(skip),
            trend,
            method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::model::{ModelVerdict, NullModel};

    fn scorer() -> BasicSentimentScorer {
        BasicSentimentScorer::new(Arc::new(KeywordLexicon::builtin()))
    }

    struct FixedModel(&'static str, f32);

    impl LanguageModel for FixedModel {
        fn classify(&self, _text: &str) -> Result<ModelVerdict, ModelError> {
            Ok(ModelVerdict {
                label: self.0.to_string(),
                score: self.1,
            })
        }

        fn summarize(&self, _text: &str) -> Result<String, ModelError> {
            Err(ModelError::Unavailable)
        }
    }

    struct BrokenModel;

    impl LanguageModel for BrokenModel {
        fn classify(&self, _text: &str) -> Result<ModelVerdict, ModelError> {
            Err(ModelError::Inference("tensor shape mismatch".to_string()))
        }

        fn summarize(&self, _text: &str) -> Result<String, ModelError> {
            Err(ModelError::Inference("tensor shape mismatch".to_string()))
        }
    }

    #[test]
    fn test_positive_text() {
        let score = scorer().score("Livraison réussi, client satisfait");
        assert_eq!(score.label, SentimentLabel::Positive);
        assert!((score.confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_negative_text() {
        let score = scorer().score("Gros problème, tout est bloqué");
        assert_eq!(score.label, SentimentLabel::Negative);
        assert!((score.confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_tie_is_neutral() {
        let score = scorer().score("succès mais retard");
        assert_eq!(score.label, SentimentLabel::Neutral);
        assert_eq!(score.confidence, 0.5);

        let score = scorer().score("nothing to see");
        assert_eq!(score.label, SentimentLabel::Neutral);
        assert_eq!(score.confidence, 0.5);
    }

    #[test]
    fn test_confidence_is_not_normalized() {
        // Six distinct positive terms: 0.6 + 0.6 = 1.2, above 1.0 on purpose.
        let score = scorer().score("réussi succès parfait excellent validé approuvé");
        assert_eq!(score.label, SentimentLabel::Positive);
        assert!((score.confidence - 1.2).abs() < 1e-9);
        assert!(score.confidence > 1.0);
    }

    #[test]
    fn test_summary_trend_and_details() {
        let records: Vec<EmailRecord> = (0..5)
            .map(|i| EmailRecord::new(format!("mail {}", i), "", "", None, "travail excellent"))
            .collect();

        let summary = scorer().summarize_sentiment(&records, &NullModel);

        assert_eq!(summary.emails_analyzed, 5);
        assert_eq!(summary.positive, 5);
        assert_eq!(summary.trend, SentimentLabel::Positive);
        assert_eq!(summary.method, AnalysisMethod::Basic);
        assert_eq!(summary.details.len(), 3);
        assert_eq!(summary.details[0].subject, "mail 2");
        assert_eq!(summary.details[2].subject, "mail 4");
        assert_eq!(summary.mean_confidence, 0.7);
    }

    #[test]
    fn test_blank_emails_are_skipped() {
        let records = vec![
            EmailRecord::default(),
            EmailRecord::new("   ", "", "", None, "\n"),
            EmailRecord::new("ok", "", "", None, ""),
        ];

        let summary = scorer().summarize_sentiment(&records, &NullModel);
        assert_eq!(summary.emails_analyzed, 1);
        assert_eq!(summary.neutral, 1);
    }

    #[test]
    fn test_no_emails() {
        let summary = scorer().summarize_sentiment(&[], &NullModel);
        assert_eq!(summary, SentimentSummary::empty());
    }

    #[test]
    fn test_only_first_512_chars_are_scored() {
        let body = format!("{}problème", "x".repeat(600));
        let records = vec![EmailRecord::new("", "", "", None, body)];

        let summary = scorer().summarize_sentiment(&records, &NullModel);
        assert_eq!(summary.neutral, 1);
    }

    #[test]
    fn test_model_results_are_used() {
        let records = vec![EmailRecord::new("Great", "", "", None, "really")];
        let summary = scorer().summarize_sentiment(&records, &FixedModel("negative", 0.93));

        assert_eq!(summary.negative, 1);
        assert_eq!(summary.trend, SentimentLabel::Negative);
        assert_eq!(summary.method, AnalysisMethod::Ml);
        assert_eq!(summary.mean_confidence, 0.93);
    }

    #[test]
    fn test_model_failure_falls_back() {
        let records = vec![EmailRecord::new("", "", "", None, "projet terminé et livré")];
        let summary = scorer().summarize_sentiment(&records, &BrokenModel);

        assert_eq!(summary.positive, 1);
        assert_eq!(summary.method, AnalysisMethod::Basic);
        assert_eq!(summary.details[0].method, AnalysisMethod::Basic);
    }

    #[test]
    fn test_model_label_mapping() {
        assert_eq!(SentimentLabel::from_model_label("positive"), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_model_label("NEGATIVE"), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_model_label("LABEL_1"), SentimentLabel::Neutral);
    }
}
