//! Project Report - Output structure of an analysis run.
//!
//! One [`ProjectReport`] per project that matched at least one email.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::critical::CriticalEmailEntry;
use super::digest::AutoSummary;
use super::entities::ExtractedEntities;
use super::risk::{RiskAssessment, RiskLevel};
use super::sentiment::SentimentSummary;
use super::tally::KeywordCount;

/// How much attention a project needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttentionPriority {
    High,
    Normal,
}

impl AttentionPriority {
    pub fn from_risk(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Critical => AttentionPriority::High,
            RiskLevel::Moderate | RiskLevel::Low => AttentionPriority::Normal,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttentionPriority::High => "HIGH",
            AttentionPriority::Normal => "NORMAL",
        }
    }
}

/// Complete analysis of one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectReport {
    pub email_count: usize,
    pub participant_count: usize,
    /// Every distinct participant address, sorted
    pub participants: Vec<String>,
    /// `DD/MM/YYYY` or `DD/MM/YYYY - DD/MM/YYYY`, empty without parsable dates
    pub period: String,
    pub top_keywords: Vec<KeywordCount>,
    /// Subjects of the last emails, oldest first
    pub recent_subjects: Vec<String>,
    pub recent_activity: bool,
    pub sentiment: SentimentSummary,
    pub entities: ExtractedEntities,
    pub summary: AutoSummary,
    pub risk: RiskAssessment,
    pub critical_emails: Vec<CriticalEmailEntry>,
    pub activity_score: usize,
    pub attention_priority: AttentionPriority,
}

/// Totals across all projects of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub project_count: usize,
    /// Sum of per-project counts; an email in two projects counts twice
    pub total_emails: usize,
    pub unique_participants: usize,
}

/// Reports of every matched project, keyed by project name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisReport {
    pub projects: BTreeMap<String, ProjectReport>,
}

impl AnalysisReport {
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn get(&self, project: &str) -> Option<&ProjectReport> {
        self.projects.get(project)
    }

    /// Projects by activity score, most active first; ties by name
    pub fn ranked_by_activity(&self) -> Vec<(&str, &ProjectReport)> {
        let mut ranked: Vec<(&str, &ProjectReport)> = self
            .projects
            .iter()
            .map(|(name, report)| (name.as_str(), report))
            .collect();
        ranked.sort_by(|a, b| b.1.activity_score.cmp(&a.1.activity_score));
        ranked
    }

    pub fn global_stats(&self) -> GlobalStats {
        let unique: BTreeSet<&str> = self
            .projects
            .values()
            .flat_map(|report| report.participants.iter().map(String::as_str))
            .collect();

        GlobalStats {
            project_count: self.projects.len(),
            total_emails: self.projects.values().map(|r| r.email_count).sum(),
            unique_participants: unique.len(),
        }
    }

    /// One-line overview for logging
    pub fn summary(&self) -> String {
        let stats = self.global_stats();
        let critical = self
            .projects
            .values()
            .filter(|r| r.attention_priority == AttentionPriority::High)
            .count();
        format!(
            "Projects: {}, Emails: {}, Participants: {}, High priority: {}",
            stats.project_count, stats.total_emails, stats.unique_participants, critical
        )
    }
}
