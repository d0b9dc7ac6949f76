// ProjectLens CLI Entry Point
// Reads decoded emails as JSON, prints the per-project report.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use projectlens_core::analysis::ProjectReport;
use projectlens_core::config::{load_lexicon, ActivityBasis, AnalyzerConfig, Settings};
use projectlens_core::export::write_report;
use projectlens_core::{AnalysisReport, EmailRecord, ProjectAnalyzer};

/// Project relevance, sentiment and risk report over a batch of emails
///
/// The input is a JSON array of decoded emails:
///   [{"subject": "...", "from": "...", "to": "...", "date": "...", "body": "..."}]
///
/// Examples:
///   projectlens --input inbox.json --projects Atlas Orion
///   cat inbox.json | projectlens -p Atlas --output report.json
#[derive(Parser, Debug)]
#[command(name = "projectlens")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// JSON file with the emails to analyze (stdin when omitted or "-")
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Project names to look for (case-insensitive substring match)
    #[arg(short, long, required = true, num_args = 1.., value_name = "NAME")]
    projects: Vec<String>,

    /// Keywords kept per project
    #[arg(long)]
    keyword_top_k: Option<usize>,

    /// Critical emails kept per project
    #[arg(long)]
    critical_top_k: Option<usize>,

    /// Added to the email count for the activity score: keywords or technologies
    #[arg(long)]
    activity_basis: Option<ActivityBasis>,

    /// JSON lexicon overriding the built-in vocabularies
    #[arg(long, value_name = "FILE")]
    lexicon: Option<PathBuf>,

    /// Write the full report as JSON
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_tracing(format: LogFormat, verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(fmt::layer().with_writer(io::stderr)).init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .init(),
    }
}

fn load_records(input: Option<&Path>) -> Result<Vec<EmailRecord>> {
    let raw = match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read emails from stdin")?;
            buf
        }
    };

    serde_json::from_str(&raw).context("Input is not a JSON array of emails")
}

/// Environment settings with the command-line flags layered on top
fn merged_settings(cli: &Cli) -> Result<Settings> {
    let flags = Settings {
        keyword_top_k: cli.keyword_top_k,
        critical_top_k: cli.critical_top_k,
        activity_basis: cli.activity_basis,
        lexicon_path: cli.lexicon.clone(),
    };
    Ok(Settings::from_env()?.merged_with(flags))
}

fn shorten(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

fn print_project(name: &str, report: &ProjectReport) {
    println!("\nPROJECT: {}", name);
    println!("   Priority: {}", report.attention_priority.label());
    println!("   Emails: {}", report.email_count);
    println!("   Participants: {}", report.participant_count);
    if !report.period.is_empty() {
        println!("   Period: {}", report.period);
    }
    println!("   Activity score: {}", report.activity_score);

    if !report.participants.is_empty() {
        let shown: Vec<&str> = report.participants.iter().take(5).map(String::as_str).collect();
        println!("   Team: {}", shown.join(", "));
        if report.participants.len() > 5 {
            println!("      ... and {} others", report.participants.len() - 5);
        }
    }

    if report.sentiment.emails_analyzed > 0 {
        println!(
            "   Sentiment: {} (method: {})",
            report.sentiment.trend.label(),
            report.sentiment.method.label()
        );
    }

    println!("   Risk: {} (score: {})", report.risk.level, report.risk.score);
    println!("   {}", report.risk.recommendation);

    if !report.entities.technologies.is_empty() {
        let techs: Vec<&str> = report.entities.technologies.iter().take(5).map(String::as_str).collect();
        println!("   Technologies: {}", techs.join(", "));
    }
    if !report.entities.amounts.is_empty() {
        let amounts: Vec<&str> = report.entities.amounts.iter().take(3).map(String::as_str).collect();
        println!("   Amounts: {}", amounts.join(", "));
    }

    if !report.top_keywords.is_empty() {
        println!("   Main keywords:");
        for keyword in report.top_keywords.iter().take(5) {
            println!("      - {}: {} mentions", keyword.keyword, keyword.count);
        }
    }

    if !report.recent_subjects.is_empty() {
        println!("   Recent subjects:");
        for subject in &report.recent_subjects {
            println!("      - {}", shorten(subject, 60));
        }
    }

    if !report.summary.text.is_empty() {
        println!(
            "   Summary ({}): {}",
            report.summary.method.label(),
            shorten(&report.summary.text, 200)
        );
    }

    if !report.critical_emails.is_empty() {
        println!("   Critical emails: {} detected", report.critical_emails.len());
        for email in report.critical_emails.iter().take(2) {
            println!(
                "      - {} (score: {})",
                shorten(&email.subject, 50),
                email.criticality_score
            );
        }
    }
}

fn print_report(report: &AnalysisReport) {
    println!("\nPROJECT REPORT\n{}", "=".repeat(70));

    for (name, project) in report.ranked_by_activity() {
        print_project(name, project);
    }

    let stats = report.global_stats();
    println!("\nGLOBAL STATISTICS\n{}", "=".repeat(70));
    println!("   Projects analyzed: {}", stats.project_count);
    println!("   Emails processed: {}", stats.total_emails);
    println!("   Unique participants: {}", stats.unique_participants);
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format, cli.verbose);

    let settings = merged_settings(&cli)?;
    let config = AnalyzerConfig::new(cli.projects.iter().cloned())?.with_settings(&settings)?;
    let lexicon = load_lexicon(settings.lexicon_path.as_deref())?;

    let records = load_records(cli.input.as_deref())?;
    info!("Loaded {} emails", records.len());

    let analyzer = ProjectAnalyzer::new(config, lexicon)?;
    let report = analyzer.analyze(&records);

    if report.is_empty() {
        println!("No email matched the requested projects");
        return Ok(());
    }

    print_report(&report);

    if let Some(path) = &cli.output {
        write_report(path, &report)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        println!("\nReport saved: {}", path.display());
    }

    Ok(())
}
