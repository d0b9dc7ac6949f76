//! Optional language model collaborator.
//!
//! Sentiment and summaries can be delegated to an external model. The analysis
//! never checks whether one is present: it calls the trait, and any
//! [`ModelError`] sends it down the keyword-based path.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Which scorer produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisMethod {
    #[serde(rename = "ML")]
    Ml,
    #[serde(rename = "Basic")]
    Basic,
}

impl AnalysisMethod {
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisMethod::Ml => "ML",
            AnalysisMethod::Basic => "Basic",
        }
    }
}

/// Raw classification as returned by a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelVerdict {
    /// Model-specific label, e.g. `"positive"` or `"NEGATIVE"`
    pub label: String,
    /// Model confidence
    pub score: f32,
}

/// Defines the interface of a sentiment/summarisation model.
///
/// Implementations wrap whatever inference backend is available; the
/// analysis only needs these two calls.
pub trait LanguageModel: Send + Sync {
    /// Classifies the sentiment of `text`.
    fn classify(&self, text: &str) -> Result<ModelVerdict, ModelError>;

    /// Produces an abstractive summary of `text`.
    fn summarize(&self, text: &str) -> Result<String, ModelError>;
}

/// A model that is never available
#[derive(Debug, Clone, Copy, Default)]
pub struct NullModel;

impl LanguageModel for NullModel {
    fn classify(&self, _text: &str) -> Result<ModelVerdict, ModelError> {
        Err(ModelError::Unavailable)
    }

    fn summarize(&self, _text: &str) -> Result<String, ModelError> {
        Err(ModelError::Unavailable)
    }
}
