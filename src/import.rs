//! Session import from exported logging-form data
//!
//! The calculators never read files; this module turns CSV or JSON exports
//! into [`DailySession`] values for the command-line tool.

use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{ImportError, Result};
use crate::models::{DailySession, SessionRecord};

/// A file format sessions can be read from
pub trait SessionImporter {
    /// Check if this importer handles the file
    fn can_import(&self, file_path: &Path) -> bool;

    /// Parse the file into raw session rows
    fn import_file(&self, file_path: &Path) -> Result<Vec<SessionRecord>>;

    fn format_name(&self) -> &'static str;
}

/// CSV importer accepting common header spellings
///
/// Headers are trimmed and lowercased, so `Date, Duration, sRPE` parses the
/// same as `date,duration_minutes,rpe`.
pub struct CsvImporter;

impl SessionImporter for CsvImporter {
    fn can_import(&self, file_path: &Path) -> bool {
        has_extension(file_path, "csv")
    }

    fn import_file(&self, file_path: &Path) -> Result<Vec<SessionRecord>> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_path(file_path)
            .map_err(|e| parse_error("csv", e))?;

        let headers: StringRecord = reader
            .headers()
            .map_err(|e| parse_error("csv", e))?
            .iter()
            .map(|h| h.to_lowercase())
            .collect();
        reader.set_headers(headers);

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<SessionRecord>().enumerate() {
            // Header is line 1
            let record = row.map_err(|e| ImportError::ParseError {
                format: "csv".to_string(),
                reason: format!("line {}: {}", index + 2, e),
            })?;
            records.push(record);
        }

        Ok(records)
    }

    fn format_name(&self) -> &'static str {
        "CSV"
    }
}

/// JSON importer for an array of session objects
pub struct JsonImporter;

impl SessionImporter for JsonImporter {
    fn can_import(&self, file_path: &Path) -> bool {
        has_extension(file_path, "json")
    }

    fn import_file(&self, file_path: &Path) -> Result<Vec<SessionRecord>> {
        let content = fs::read_to_string(file_path)?;
        let records: Vec<SessionRecord> =
            serde_json::from_str(&content).map_err(|e| parse_error("json", e))?;
        Ok(records)
    }

    fn format_name(&self) -> &'static str {
        "JSON"
    }
}

/// Dispatches a file to the importer for its extension
pub struct ImportManager {
    importers: Vec<Box<dyn SessionImporter>>,
}

impl ImportManager {
    pub fn new() -> Self {
        Self {
            importers: vec![Box::new(CsvImporter), Box::new(JsonImporter)],
        }
    }

    /// Import and convert every row, sorted by date
    pub fn import_file(&self, file_path: &Path) -> Result<Vec<DailySession>> {
        let importer = self
            .importers
            .iter()
            .find(|i| i.can_import(file_path))
            .ok_or_else(|| ImportError::UnsupportedFormat {
                format: file_path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("unknown")
                    .to_string(),
            })?;

        debug!(
            file = %file_path.display(),
            format = importer.format_name(),
            "Importing sessions"
        );

        let mut sessions = importer
            .import_file(file_path)?
            .into_iter()
            .map(DailySession::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        sessions.sort_by_key(|s| s.date);

        info!(
            file = %file_path.display(),
            sessions = sessions.len(),
            "Imported sessions"
        );

        Ok(sessions)
    }

    pub fn can_import_file(&self, file_path: &Path) -> bool {
        self.importers.iter().any(|i| i.can_import(file_path))
    }
}

impl Default for ImportManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Import sessions from a `.csv` or `.json` file
pub fn import_sessions<P: AsRef<Path>>(path: P) -> Result<Vec<DailySession>> {
    ImportManager::new().import_file(path.as_ref())
}

fn has_extension(file_path: &Path, extension: &str) -> bool {
    file_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

fn parse_error(format: &str, err: impl std::fmt::Display) -> ImportError {
    ImportError::ParseError {
        format: format.to_string(),
        reason: err.to_string(),
    }
}
