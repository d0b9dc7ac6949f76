//! Project Analyzer - Main orchestrator for the analysis module.
//!
//! Routes emails to projects, fills one bucket per project, then runs every
//! scorer over each bucket and merges the fragments into a report.
//!
//! Buckets share nothing: once [`ProjectAnalyzer::bucket`] has split the
//! records, each bucket can be reported on independently.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::critical::CriticalEmailRanker;
use super::dates::format_period;
use super::digest::DigestBuilder;
use super::entities::EntityExtractor;
use super::lexicon::KeywordLexicon;
use super::model::{LanguageModel, NullModel};
use super::participants::ParticipantSet;
use super::relevance::RelevanceClassifier;
use super::report::{AnalysisReport, AttentionPriority, ProjectReport};
use super::risk::RiskScorer;
use super::sentiment::BasicSentimentScorer;
use super::tally::KeywordTally;
use crate::config::{ActivityBasis, AnalyzerConfig};
use crate::error::AppError;
use crate::models::{EmailRecord, ProjectBucket};

/// Subjects listed per project
const RECENT_SUBJECTS: usize = 3;

/// Progress is logged every this many emails
const PROGRESS_EVERY: usize = 20;

/// Main analyzer that orchestrates all scoring components
pub struct ProjectAnalyzer {
    config: AnalyzerConfig,
    model: Arc<dyn LanguageModel>,
    classifier: RelevanceClassifier,
    tally: KeywordTally,
    participants: ParticipantSet,
    sentiment: BasicSentimentScorer,
    risk: RiskScorer,
    critical: CriticalEmailRanker,
    entities: EntityExtractor,
    digest: DigestBuilder,
}

impl ProjectAnalyzer {
    /// Create an analyzer without language model.
    ///
    /// Fails when the configuration or the lexicon does not validate; the
    /// lexicon is lowercased here whatever way it was built.
    pub fn new(config: AnalyzerConfig, lexicon: KeywordLexicon) -> Result<Self, AppError> {
        let config = config.validated()?;
        let lexicon = Arc::new(lexicon.normalized()?);

        Ok(Self {
            classifier: RelevanceClassifier::new(config.filters.as_slice()),
            config,
            model: Arc::new(NullModel),
            tally: KeywordTally::new(lexicon.clone()),
            participants: ParticipantSet::new(),
            sentiment: BasicSentimentScorer::new(lexicon.clone()),
            risk: RiskScorer::new(lexicon.clone()),
            critical: CriticalEmailRanker::new(lexicon.clone()),
            entities: EntityExtractor::new(lexicon),
            digest: DigestBuilder::new(),
        })
    }

    /// Use `model` for sentiment and summaries, with keyword fallback
    pub fn with_model(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.model = model;
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Routes every record to the projects it mentions.
    ///
    /// Buckets are created on first match; records matching nothing are dropped.
    pub fn bucket(&self, records: &[EmailRecord]) -> BTreeMap<String, ProjectBucket> {
        let mut buckets: BTreeMap<String, ProjectBucket> = BTreeMap::new();

        for (i, record) in records.iter().enumerate() {
            if (i + 1) % PROGRESS_EVERY == 0 {
                debug!("Processing: {}/{} emails", i + 1, records.len());
            }

            let matched = self.classifier.classify(record);
            if matched.is_empty() {
                continue;
            }

            for project in matched {
                let bucket = buckets
                    .entry(project.to_string())
                    .or_insert_with(|| ProjectBucket::new(project));
                bucket.push(record.clone());
                self.participants.record_participants(bucket, record);
                self.tally.record_keywords(bucket, record);
            }
        }

        buckets
    }

    /// Runs every scorer over one bucket
    pub fn report_project(&self, bucket: &ProjectBucket) -> ProjectReport {
        let emails = bucket.emails();
        let model = self.model.as_ref();

        let sentiment = self.sentiment.summarize_sentiment(emails, model);
        let entities = self.entities.extract(emails);
        let summary = self.digest.summarize(emails, model);
        let risk = self.risk.assess(emails, &sentiment);
        let critical_emails = self.critical.rank(emails, self.config.critical_top_k);
        let top_keywords = self.tally.top_k(bucket, self.config.keyword_top_k);

        let recent_subjects = emails[emails.len().saturating_sub(RECENT_SUBJECTS)..]
            .iter()
            .filter(|e| !e.subject.is_empty())
            .map(|e| e.subject.clone())
            .collect();

        let activity_score = emails.len()
            + match self.config.activity_basis {
                ActivityBasis::Keywords => top_keywords.len(),
                ActivityBasis::Technologies => entities.technologies.len(),
            };

        ProjectReport {
            email_count: emails.len(),
            participant_count: bucket.participants().len(),
            participants: bucket.participants().iter().cloned().collect(),
            period: format_period(bucket.dates()),
            top_keywords,
            recent_subjects,
            recent_activity: !emails.is_empty(),
            sentiment,
            entities,
            summary,
            attention_priority: AttentionPriority::from_risk(risk.level),
            risk,
            critical_emails,
            activity_score,
        }
    }

    /// Analyze a batch of emails and produce one report per matched project
    pub fn analyze(&self, records: &[EmailRecord]) -> AnalysisReport {
        let start = Instant::now();
        let buckets = self.bucket(records);

        let projects = buckets
            .iter()
            .map(|(name, bucket)| {
                info!("Analyzing project: {} ({} emails)", name, bucket.len());
                (name.clone(), self.report_project(bucket))
            })
            .collect();

        let report = AnalysisReport { projects };
        info!(
            "Analysis of {} emails done in {}ms - {}",
            records.len(),
            start.elapsed().as_millis(),
            report.summary()
        );
        report
    }
}
