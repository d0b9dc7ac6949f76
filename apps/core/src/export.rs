//! Report Export
//!
//! Writes the per-project report mapping as pretty-printed JSON and reads it
//! back. Non-ASCII text (accented subjects, `€`) is written as-is.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::analysis::AnalysisReport;
use crate::error::AppError;

/// Writes `report` to `path`, replacing any existing file
pub fn write_report(path: &Path, report: &AnalysisReport) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(fs::File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush()?;

    info!("Report saved to {:?} ({} projects)", path, report.len());
    Ok(())
}

/// Loads a report previously written by [`write_report`]
pub fn read_report(path: &Path) -> Result<AnalysisReport, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
