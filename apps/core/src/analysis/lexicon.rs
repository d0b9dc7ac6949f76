//! Keyword Lexicons.
//!
//! Static vocabularies consulted by every scorer: project-relevance terms,
//! weighted risk terms, positive/negative sentiment terms, technology names and
//! urgency markers. Vocabularies mix French and English, as the mailboxes do.
//!
//! A lexicon is built once (built-in tables or a JSON override) and then only
//! ever borrowed; nothing in the analysis mutates it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::AppError;

/// Terms counted into a project's keyword tally
const PROJECT_TERMS: &[&str] = &[
    // Planning
    "deadline",
    "échéance",
    "livraison",
    "milestone",
    "étape",
    // Money
    "budget",
    "coût",
    "prix",
    "devis",
    "facture",
    // Meetings
    "réunion",
    "meeting",
    "call",
    "appel",
    "rdv",
    // Priority
    "urgent",
    "priorité",
    "important",
    "critique",
    // Completion
    "terminé",
    "fini",
    "complété",
    "livré",
    "deployed",
    // Work
    "projet",
    "project",
    "développement",
    "development",
    // Issues
    "test",
    "bug",
    "issue",
    "problème",
    "solution",
];

/// Risk terms with their weight (1 = mild, 3 = severe)
const RISK_TERMS: &[(&str, u32)] = &[
    ("urgent", 3),
    ("critique", 3),
    ("problème", 2),
    ("retard", 2),
    ("échéance", 2),
    ("budget", 1),
    ("dépassement", 3),
    ("erreur", 2),
    ("bug", 2),
    ("bloqué", 3),
    ("annulé", 3),
    ("report", 2),
    ("danger", 3),
    ("alerte", 2),
    ("attention", 1),
];

const POSITIVE_TERMS: &[&str] = &[
    "réussi",
    "succès",
    "bien",
    "parfait",
    "excellent",
    "terminé",
    "livré",
    "validé",
    "approuvé",
    "satisfait",
    "content",
];

const NEGATIVE_TERMS: &[&str] = &[
    "problème",
    "erreur",
    "échec",
    "retard",
    "bloqué",
    "difficile",
    "impossible",
    "mauvais",
    "inquiet",
    "préoccupé",
    "urgent",
];

const TECHNOLOGY_TERMS: &[&str] = &[
    "react",
    "angular",
    "vue",
    "python",
    "java",
    "javascript",
    "nodejs",
    "api",
    "rest",
    "graphql",
    "mongodb",
    "mysql",
    "postgresql",
    "aws",
    "azure",
    "docker",
    "kubernetes",
    "jenkins",
    "git",
];

/// Markers that add a flat bonus to an email's criticality
const URGENCY_TERMS: &[&str] = &["urgent", "asap", "immédiat", "critique", "emergency"];

/// A vocabulary entry with its scoring weight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedTerm {
    pub term: String,
    pub weight: u32,
}

impl WeightedTerm {
    pub fn new(term: impl Into<String>, weight: u32) -> Self {
        Self {
            term: term.into(),
            weight,
        }
    }
}

/// The full set of vocabularies.
///
/// Deserialisation fills any vocabulary missing from the document with the
/// built-in table, so an override file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordLexicon {
    /// Terms tallied per project, in tie-break order
    pub project_terms: Vec<String>,
    /// Weighted risk terms
    pub risk_terms: Vec<WeightedTerm>,
    pub positive_terms: Vec<String>,
    pub negative_terms: Vec<String>,
    /// Technology names reported as entities
    pub technology_terms: Vec<String>,
    /// Urgency markers for critical-email ranking
    pub urgency_terms: Vec<String>,
}

impl Default for KeywordLexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Lowercased `term`, or an error when it is blank or already in `seen`
fn normalize_term(list: &str, term: &str, seen: &mut HashSet<String>) -> Result<String, AppError> {
    if term.trim().is_empty() {
        return Err(AppError::Validation(format!("blank term in {}", list)));
    }
    let lower = term.to_lowercase();
    if !seen.insert(lower.clone()) {
        return Err(AppError::Validation(format!("duplicate term '{}' in {}", lower, list)));
    }
    Ok(lower)
}

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

impl KeywordLexicon {
    /// The built-in vocabularies
    pub fn builtin() -> Self {
        Self {
            project_terms: owned(PROJECT_TERMS),
            risk_terms: RISK_TERMS
                .iter()
                .map(|(term, weight)| WeightedTerm::new(*term, *weight))
                .collect(),
            positive_terms: owned(POSITIVE_TERMS),
            negative_terms: owned(NEGATIVE_TERMS),
            technology_terms: owned(TECHNOLOGY_TERMS),
            urgency_terms: owned(URGENCY_TERMS),
        }
    }

    /// Lowercases every term and rejects blank terms, duplicates or zero weights.
    ///
    /// Matching is done against lowercased text, so an upper-case term from an
    /// override file would otherwise never match. Duplicates are checked after
    /// lowercasing: `"Sprint"` and `"sprint"` would be counted twice.
    pub fn normalized(mut self) -> Result<Self, AppError> {
        let lists = [
            ("project_terms", &mut self.project_terms),
            ("positive_terms", &mut self.positive_terms),
            ("negative_terms", &mut self.negative_terms),
            ("technology_terms", &mut self.technology_terms),
            ("urgency_terms", &mut self.urgency_terms),
        ];
        for (name, terms) in lists {
            let mut seen = HashSet::new();
            for term in terms.iter_mut() {
                *term = normalize_term(name, term, &mut seen)?;
            }
        }

        let mut seen = HashSet::new();
        for entry in self.risk_terms.iter_mut() {
            entry.term = normalize_term("risk_terms", &entry.term, &mut seen)?;
            if entry.weight == 0 {
                return Err(AppError::Validation(format!(
                    "risk term '{}' must have a positive weight",
                    entry.term
                )));
            }
        }

        Ok(self)
    }

    /// Weight of a risk term, if the term is in the risk vocabulary
    pub fn risk_weight(&self, term: &str) -> Option<u32> {
        self.risk_terms
            .iter()
            .find(|entry| entry.term == term)
            .map(|entry| entry.weight)
    }
}
