//! Analysis configuration.
//!
//! [`AnalyzerConfig`] is what the analyzer runs with; it is validated once and
//! never coerced. [`Settings`] is the optional environment layer
//! (`.env` + `PROJECTLENS_*` variables) that callers merge into it.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;
use validator::{Validate, ValidationError};

use crate::analysis::KeywordLexicon;
use crate::error::AppError;

pub const DEFAULT_KEYWORD_TOP_K: usize = 10;
pub const DEFAULT_CRITICAL_TOP_K: usize = 5;

const ENV_KEYWORD_TOP_K: &str = "PROJECTLENS_KEYWORD_TOP_K";
const ENV_CRITICAL_TOP_K: &str = "PROJECTLENS_CRITICAL_TOP_K";
const ENV_ACTIVITY_BASIS: &str = "PROJECTLENS_ACTIVITY_BASIS";
const ENV_LEXICON: &str = "PROJECTLENS_LEXICON";

/// What is added to the email count to form the activity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityBasis {
    /// Number of top keywords
    #[default]
    Keywords,
    /// Number of distinct technologies mentioned
    Technologies,
}

impl fmt::Display for ActivityBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityBasis::Keywords => write!(f, "keywords"),
            ActivityBasis::Technologies => write!(f, "technologies"),
        }
    }
}

impl FromStr for ActivityBasis {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keywords" => Ok(ActivityBasis::Keywords),
            "technologies" => Ok(ActivityBasis::Technologies),
            other => Err(AppError::Config(format!(
                "unknown activity basis '{}' (expected 'keywords' or 'technologies')",
                other
            ))),
        }
    }
}

fn validate_filters(filters: &Vec<String>) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for filter in filters {
        if filter.trim().is_empty() {
            let mut err = ValidationError::new("blank_filter");
            err.message = Some(Cow::from("project filters must not be blank"));
            return Err(err);
        }
        if !seen.insert(filter.to_lowercase()) {
            let mut err = ValidationError::new("duplicate_filter");
            err.message = Some(Cow::from(format!("duplicate project filter '{}'", filter)));
            return Err(err);
        }
    }
    Ok(())
}

/// Validated analysis parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AnalyzerConfig {
    /// Project names, matched case-insensitively as substrings
    #[validate(
        length(min = 1, message = "at least one project filter is required"),
        custom(function = "validate_filters")
    )]
    pub filters: Vec<String>,
    /// Keywords kept per project.
    ///
    /// The upper bound of 1000 is our own sanity limit, not an inherent one.
    #[validate(range(min = 1, max = 1000))]
    pub keyword_top_k: usize,
    /// Critical emails kept per project, same deliberate `1..=1000` bound
    #[validate(range(min = 1, max = 1000))]
    pub critical_top_k: usize,
    pub activity_basis: ActivityBasis,
}

impl AnalyzerConfig {
    /// Configuration with default limits for the given filters
    pub fn new<S: Into<String>>(filters: impl IntoIterator<Item = S>) -> Result<Self, AppError> {
        Self {
            filters: filters.into_iter().map(Into::into).collect(),
            keyword_top_k: DEFAULT_KEYWORD_TOP_K,
            critical_top_k: DEFAULT_CRITICAL_TOP_K,
            activity_basis: ActivityBasis::default(),
        }
        .validated()
    }

    /// Applies settings, then re-validates.
    ///
    /// Validation runs once on the final values, so layered settings should be
    /// combined with [`Settings::merged_with`] before calling this.
    pub fn with_settings(mut self, settings: &Settings) -> Result<Self, AppError> {
        if let Some(k) = settings.keyword_top_k {
            self.keyword_top_k = k;
        }
        if let Some(k) = settings.critical_top_k {
            self.critical_top_k = k;
        }
        if let Some(basis) = settings.activity_basis {
            self.activity_basis = basis;
        }
        self.validated()
    }

    pub fn validated(self) -> Result<Self, AppError> {
        self.validate()?;
        Ok(self)
    }
}

/// Settings read from the environment; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub keyword_top_k: Option<usize>,
    pub critical_top_k: Option<usize>,
    pub activity_basis: Option<ActivityBasis>,
    pub lexicon_path: Option<PathBuf>,
}

fn read_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_count(name: &str) -> Result<Option<usize>, AppError> {
    read_var(name)
        .map(|v| {
            v.trim()
                .parse::<usize>()
                .map_err(|e| AppError::Config(format!("{}: {}", name, e)))
        })
        .transpose()
}

impl Settings {
    /// Loads `.env` if present, then reads the `PROJECTLENS_*` variables
    pub fn from_env() -> Result<Self, AppError> {
        if let Ok(path) = dotenv::dotenv() {
            info!("Loaded environment from {:?}", path);
        }
        Self::from_vars()
    }

    /// Layers `overrides` on top of `self`; every field set in `overrides` wins
    pub fn merged_with(self, overrides: Settings) -> Settings {
        Settings {
            keyword_top_k: overrides.keyword_top_k.or(self.keyword_top_k),
            critical_top_k: overrides.critical_top_k.or(self.critical_top_k),
            activity_basis: overrides.activity_basis.or(self.activity_basis),
            lexicon_path: overrides.lexicon_path.or(self.lexicon_path),
        }
    }

    pub(crate) fn from_vars() -> Result<Self, AppError> {
        Ok(Self {
            keyword_top_k: parse_count(ENV_KEYWORD_TOP_K)?,
            critical_top_k: parse_count(ENV_CRITICAL_TOP_K)?,
            activity_basis: read_var(ENV_ACTIVITY_BASIS)
                .map(|v| v.parse::<ActivityBasis>())
                .transpose()?,
            lexicon_path: read_var(ENV_LEXICON).map(PathBuf::from),
        })
    }
}

/// Built-in lexicon, or the JSON override at `path`
pub fn load_lexicon(path: Option<&Path>) -> Result<KeywordLexicon, AppError> {
    let Some(path) = path else {
        return Ok(KeywordLexicon::builtin());
    };

    let raw = fs::read_to_string(path)?;
    let lexicon: KeywordLexicon = serde_json::from_str(&raw)?;
    info!("Loaded lexicon override from {:?}", path);
    lexicon.normalized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::new(["Atlas"]).unwrap();

        assert_eq!(config.keyword_top_k, DEFAULT_KEYWORD_TOP_K);
        assert_eq!(config.critical_top_k, DEFAULT_CRITICAL_TOP_K);
        assert_eq!(config.activity_basis, ActivityBasis::Keywords);
    }

    #[test]
    fn test_empty_filters_rejected() {
        let err = AnalyzerConfig::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_blank_and_duplicate_filters_rejected() {
        assert!(AnalyzerConfig::new(["Atlas", "  "]).is_err());
        assert!(AnalyzerConfig::new(["Atlas", "atlas"]).is_err());
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let mut config = AnalyzerConfig::new(["Atlas"]).unwrap();
        config.critical_top_k = 0;
        assert!(config.validated().is_err());
    }

    #[test]
    fn test_activity_basis_parsing() {
        assert_eq!("Technologies".parse::<ActivityBasis>().unwrap(), ActivityBasis::Technologies);
        assert!(matches!("words".parse::<ActivityBasis>(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_merged_settings_prefer_overrides() {
        let env = Settings {
            keyword_top_k: Some(3),
            critical_top_k: Some(2),
            activity_basis: Some(ActivityBasis::Technologies),
            lexicon_path: Some(PathBuf::from("env.json")),
        };
        let flags = Settings {
            keyword_top_k: Some(7),
            lexicon_path: Some(PathBuf::from("flag.json")),
            ..Settings::default()
        };

        let merged = env.merged_with(flags);
        assert_eq!(merged.keyword_top_k, Some(7));
        assert_eq!(merged.critical_top_k, Some(2));
        assert_eq!(merged.activity_basis, Some(ActivityBasis::Technologies));
        assert_eq!(merged.lexicon_path, Some(PathBuf::from("flag.json")));
    }

    #[test]
    fn test_builtin_lexicon_without_path() {
        assert_eq!(load_lexicon(None).unwrap(), KeywordLexicon::builtin());
    }

    #[test]
    fn test_lexicon_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"technology_terms": ["Rust", "Tokio"]}}"#).unwrap();

        let lexicon = load_lexicon(Some(file.path())).unwrap();
        assert_eq!(lexicon.technology_terms, vec!["rust", "tokio"]);
    }

    #[test]
    fn test_lexicon_missing_file() {
        let err = load_lexicon(Some(Path::new("/nonexistent/lexicon.json"))).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
