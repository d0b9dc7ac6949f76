// ProjectLens Core
// Keyword-driven project relevance, sentiment and risk analysis of email batches.

pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod models;

#[cfg(test)]
mod tests;

pub use analysis::{AnalysisReport, KeywordLexicon, LanguageModel, NullModel, ProjectAnalyzer};
pub use config::{ActivityBasis, AnalyzerConfig, Settings};
pub use error::AppError;
pub use models::{EmailRecord, ProjectBucket};
