//! # Analysis Module
//!
//! Keyword-driven project analysis of decoded emails. Pure CPU work, no I/O.
//!
//! ## Components
//! - `lexicon`: Weighted vocabularies shared by every scorer
//! - `relevance`: Substring routing of emails to projects
//! - `tally`: Per-project keyword counts and top-K selection
//! - `participants`: Address extraction from `From`/`To`
//! - `sentiment`: Keyword sentiment scorer and per-project summary
//! - `risk`: Project risk score, level and recommendation
//! - `critical`: Per-email criticality ranking
//! - `entities`: Amounts, URLs, addresses and technologies
//! - `digest`: Short summary of the latest emails
//! - `dates`: `Date` header parsing and activity period
//! - `model`: Optional language model collaborator
//! - `report`: Output data structures
//! - `analyzer`: Main orchestrator

pub mod analyzer;
pub mod critical;
pub mod dates;
pub mod digest;
pub mod entities;
pub mod lexicon;
pub mod model;
pub mod participants;
pub mod relevance;
pub mod report;
pub mod risk;
pub mod sentiment;
pub mod tally;

pub use analyzer::ProjectAnalyzer;
pub use critical::{CriticalEmailEntry, CriticalEmailRanker, CRITICALITY_THRESHOLD};
pub use dates::{format_period, parse_email_date};
pub use digest::{AutoSummary, DigestBuilder};
pub use entities::{EntityExtractor, ExtractedEntities};
pub use lexicon::{KeywordLexicon, WeightedTerm};
pub use model::{AnalysisMethod, LanguageModel, ModelVerdict, NullModel};
pub use participants::{extract_addresses, ParticipantSet};
pub use relevance::RelevanceClassifier;
pub use report::{AnalysisReport, AttentionPriority, GlobalStats, ProjectReport};
pub use risk::{recommendation_for_label, RiskAssessment, RiskLevel, RiskScorer};
pub use sentiment::{
    BasicSentimentScorer, EmailSentiment, SentimentLabel, SentimentScore, SentimentSummary,
};
pub use tally::{KeywordCount, KeywordTally};
