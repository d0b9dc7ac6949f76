//! Project Risk Scoring.
//!
//! Additive score over a project's emails:
//! - +30 when the sentiment trend is negative
//! - +3 x weight for every risk term present in every email (not deduplicated across emails)
//! - +10 above 50 emails, +15 below 3 emails
//!
//! The score is capped at 100 and mapped to LOW (< 30), MODERATE (30-59) or CRITICAL (>= 60).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::lexicon::KeywordLexicon;
use super::sentiment::{SentimentLabel, SentimentSummary};
use crate::error::AppError;
use crate::models::EmailRecord;

const NEGATIVE_TREND_POINTS: u32 = 30;
const RISK_WEIGHT_MULTIPLIER: u32 = 3;
const HIGH_VOLUME_THRESHOLD: usize = 50;
const HIGH_VOLUME_POINTS: u32 = 10;
const LOW_ACTIVITY_THRESHOLD: usize = 3;
const LOW_ACTIVITY_POINTS: u32 = 15;
const MAX_SCORE: u32 = 100;
const CRITICAL_THRESHOLD: u32 = 60;
const MODERATE_THRESHOLD: u32 = 30;

const FALLBACK_RECOMMENDATION: &str = "Standard follow-up recommended";

/// Risk level of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    Critical,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        if score >= CRITICAL_THRESHOLD {
            RiskLevel::Critical
        } else if score >= MODERATE_THRESHOLD {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::Critical => "CRITICAL",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            RiskLevel::Critical => "IMMEDIATE ATTENTION - Review the project and contact the team",
            RiskLevel::Moderate => "Monitoring recommended - Schedule a team check-in",
            RiskLevel::Low => "Project on track - Normal follow-up",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for RiskLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LOW" => Ok(RiskLevel::Low),
            "MODERATE" => Ok(RiskLevel::Moderate),
            "CRITICAL" => Ok(RiskLevel::Critical),
            other => Err(AppError::Validation(format!("unknown risk level '{}'", other))),
        }
    }
}

/// Recommendation for a level given as text, e.g. read back from a saved report.
/// Unknown levels get a generic recommendation.
pub fn recommendation_for_label(level: &str) -> &'static str {
    level
        .parse::<RiskLevel>()
        .map(|level| level.recommendation())
        .unwrap_or(FALLBACK_RECOMMENDATION)
}

/// Risk evaluation of one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Score in `0..=100`
    pub score: u32,
    pub level: RiskLevel,
    /// Human-readable reasons: sentiment, risk terms, volume
    pub factors: Vec<String>,
    pub recommendation: String,
    /// Risk-term hits summed over all emails
    pub risk_keyword_hits: usize,
}

/// Computes project risk from emails and their sentiment summary
#[derive(Debug, Clone)]
pub struct RiskScorer {
    lexicon: Arc<KeywordLexicon>,
}

impl RiskScorer {
    pub fn new(lexicon: Arc<KeywordLexicon>) -> Self {
        Self { lexicon }
    }

    pub fn assess(&self, records: &[EmailRecord], sentiment: &SentimentSummary) -> RiskAssessment {
        let mut raw_score: u32 = 0;
        let mut factors = Vec::new();

        if sentiment.trend == SentimentLabel::Negative {
            raw_score += NEGATIVE_TREND_POINTS;
            factors.push("Dominant negative sentiment".to_string());
        }

        let mut hits = 0usize;
        for record in records {
            let text = record.search_text_lower();
            for entry in &self.lexicon.risk_terms {
                if text.contains(entry.term.as_str()) {
                    raw_score = raw_score.saturating_add(entry.weight.saturating_mul(RISK_WEIGHT_MULTIPLIER));
                    hits += 1;
                }
            }
        }
        if hits > 0 {
            factors.push(format!("{} risk keywords detected", hits));
        }

        let volume = records.len();
        if volume > HIGH_VOLUME_THRESHOLD {
            raw_score += HIGH_VOLUME_POINTS;
            factors.push("High email volume".to_string());
        } else if volume < LOW_ACTIVITY_THRESHOLD {
            raw_score += LOW_ACTIVITY_POINTS;
            factors.push("Very low activity".to_string());
        }

        let score = raw_score.min(MAX_SCORE);
        let level = RiskLevel::from_score(score);

        RiskAssessment {
            score,
            level,
            factors,
            recommendation: level.recommendation().to_string(),
            risk_keyword_hits: hits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> RiskScorer {
        RiskScorer::new(Arc::new(KeywordLexicon::builtin()))
    }

    fn neutral() -> SentimentSummary {
        SentimentSummary::empty()
    }

    fn negative() -> SentimentSummary {
        SentimentSummary {
            trend: SentimentLabel::Negative,
            ..SentimentSummary::empty()
        }
    }

    fn plain(n: usize) -> Vec<EmailRecord> {
        (0..n)
            .map(|i| EmailRecord::new(format!("status {}", i), "", "", None, "all fine"))
            .collect()
    }

    #[test]
    fn test_single_quiet_email_is_low() {
        let risk = scorer().assess(&plain(1), &neutral());

        assert_eq!(risk.score, 15);
        assert_eq!(risk.level, RiskLevel::Low);
        assert_eq!(risk.factors, vec!["Very low activity"]);
        assert_eq!(risk.recommendation, "Project on track - Normal follow-up");
    }

    #[test]
    fn test_normal_volume_adds_nothing() {
        let risk = scorer().assess(&plain(10), &neutral());
        assert_eq!(risk.score, 0);
        assert!(risk.factors.is_empty());
    }

    #[test]
    fn test_high_volume() {
        let risk = scorer().assess(&plain(51), &neutral());
        assert_eq!(risk.score, 10);
        assert_eq!(risk.factors, vec!["High email volume"]);

        // Exactly 50 is not high volume
        assert_eq!(scorer().assess(&plain(50), &neutral()).score, 0);
    }

    #[test]
    fn test_negative_trend_and_keywords() {
        // urgent (3) + bug (2) present -> (3 + 2) * 3 = 15, +30 trend, +15 low activity
        let records = vec![EmailRecord::new("urgent", "", "", None, "a bug")];
        let risk = scorer().assess(&records, &negative());

        assert_eq!(risk.score, 60);
        assert_eq!(risk.level, RiskLevel::Critical);
        assert_eq!(risk.risk_keyword_hits, 2);
        assert_eq!(
            risk.factors,
            vec!["Dominant negative sentiment", "2 risk keywords detected", "Very low activity"]
        );
    }

    #[test]
    fn test_term_counted_once_per_email() {
        // "bug bug bug" still only hits "bug" once for that email
        let mut records = plain(3);
        records[0].body = "bug bug bug".to_string();
        let risk = scorer().assess(&records, &neutral());

        assert_eq!(risk.risk_keyword_hits, 1);
        assert_eq!(risk.score, 6);
    }

    #[test]
    fn test_score_is_capped() {
        let records: Vec<EmailRecord> = (0..10)
            .map(|_| EmailRecord::new("urgent critique", "", "", None, "danger bloqué annulé"))
            .collect();
        let risk = scorer().assess(&records, &negative());

        assert_eq!(risk.score, 100);
        assert_eq!(risk.level, RiskLevel::Critical);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(29), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(59), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(60), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::Critical);
    }

    #[test]
    fn test_recommendation_lookup_by_label() {
        assert_eq!(
            recommendation_for_label("critical"),
            RiskLevel::Critical.recommendation()
        );
        assert_eq!(recommendation_for_label("UNDETERMINED"), FALLBACK_RECOMMENDATION);
    }
}
