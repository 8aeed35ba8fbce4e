//! The append-only feedback log.
//!
//! Feedback is the only mutable store in the system. It is a row-oriented
//! CSV with header `name,comment`:
//!
//! ```text
//! name,comment
//! Bob,Great service
//! ```
//!
//! Reads degrade, writes do not: an absent or unreadable/corrupt log yields
//! an empty table (logged at warn level, no error to the caller), while a
//! failed append surfaces as an error. Appends are not coordinated across
//! concurrent users; two simultaneous submissions may interleave at the
//! storage layer without a defined ordering.

use crate::config::CoreConfig;
use crate::error::{RosterError, RosterResult};
use docmatch_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::sync::Arc;

/// One row of the user-submitted feedback log.
///
/// Rows read back from disk are returned as-is; presence checks only apply
/// on the way in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub comment: String,
}

/// Service for reading and appending the feedback log.
#[derive(Clone, Debug)]
pub struct FeedbackService {
    cfg: Arc<CoreConfig>,
}

impl FeedbackService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Reads the full feedback log.
    ///
    /// Any failure — the file is absent, unreadable, or a row cannot be
    /// parsed — falls back to an empty table. The failure is logged at warn
    /// level but never surfaces to the caller.
    pub fn load(&self) -> Vec<FeedbackRecord> {
        let path = self.cfg.feedback_path();

        let mut reader = match csv::Reader::from_path(path) {
            Ok(reader) => reader,
            Err(e) => {
                tracing::warn!(
                    "feedback log unavailable, using empty table: {} - {}",
                    path.display(),
                    e
                );
                return Vec::new();
            }
        };

        let mut entries = Vec::new();
        for row in reader.deserialize::<FeedbackRecord>() {
            match row {
                Ok(record) => entries.push(record),
                Err(e) => {
                    tracing::warn!(
                        "feedback log corrupt, using empty table: {} - {}",
                        path.display(),
                        e
                    );
                    return Vec::new();
                }
            }
        }

        entries
    }

    /// Appends exactly one row to the feedback log.
    ///
    /// The log is opened for append on each submission. The header row is
    /// written only when the file is being created (or is empty); existing
    /// rows are never touched.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::FeedbackOpen` if the file cannot be opened,
    /// `RosterError::FeedbackAppend` if the row cannot be written, or
    /// `RosterError::FeedbackFlush` if the write cannot be flushed.
    pub fn append(&self, name: &NonEmptyText, comment: &NonEmptyText) -> RosterResult<()> {
        let path = self.cfg.feedback_path();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(RosterError::FeedbackOpen)?;
            }
        }

        let needs_header = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(RosterError::FeedbackOpen)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);

        writer
            .serialize(FeedbackRecord {
                name: name.as_str().to_string(),
                comment: comment.as_str().to_string(),
            })
            .map_err(RosterError::FeedbackAppend)?;
        writer.flush().map_err(RosterError::FeedbackFlush)?;

        tracing::info!("feedback appended to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn service(dir: &Path) -> FeedbackService {
        let cfg = CoreConfig::new(dir.join("doctors.csv"), dir.join("feedback.csv"))
            .expect("CoreConfig::new should succeed");
        FeedbackService::new(Arc::new(cfg))
    }

    fn text(value: &str) -> NonEmptyText {
        NonEmptyText::new(value).expect("test value should be non-empty")
    }

    #[test]
    fn load_returns_empty_table_when_log_absent() {
        let dir = TempDir::new().expect("should create temp dir");
        let service = service(dir.path());

        assert!(service.load().is_empty(), "absent log should read as empty");
    }

    #[test]
    fn load_returns_empty_table_when_log_corrupt() {
        let dir = TempDir::new().expect("should create temp dir");
        fs::write(
            dir.path().join("feedback.csv"),
            "name,comment\nBob,Great,unexpected,extra,fields\n",
        )
        .expect("should write corrupt log");
        let service = service(dir.path());

        assert!(
            service.load().is_empty(),
            "corrupt log should read as empty"
        );
    }

    #[test]
    fn append_creates_log_with_header_once() {
        let dir = TempDir::new().expect("should create temp dir");
        let service = service(dir.path());

        service
            .append(&text("Bob"), &text("Great"))
            .expect("first append should succeed");
        service
            .append(&text("Ann"), &text("Helpful"))
            .expect("second append should succeed");

        let raw = fs::read_to_string(dir.path().join("feedback.csv"))
            .expect("should read log back");
        let header_count = raw.lines().filter(|l| *l == "name,comment").count();
        assert_eq!(header_count, 1, "header must be written exactly once");

        let entries = service.load();
        assert_eq!(
            entries,
            vec![
                FeedbackRecord {
                    name: "Bob".to_string(),
                    comment: "Great".to_string()
                },
                FeedbackRecord {
                    name: "Ann".to_string(),
                    comment: "Helpful".to_string()
                },
            ]
        );
    }

    #[test]
    fn append_adds_one_row_without_altering_prior_rows() {
        let dir = TempDir::new().expect("should create temp dir");
        let service = service(dir.path());

        service
            .append(&text("First"), &text("Entry one"))
            .expect("append should succeed");
        let before = fs::read_to_string(dir.path().join("feedback.csv"))
            .expect("should read log");

        service
            .append(&text("Second"), &text("Entry two"))
            .expect("append should succeed");
        let after = fs::read_to_string(dir.path().join("feedback.csv"))
            .expect("should read log");

        assert!(
            after.starts_with(&before),
            "prior rows must be byte-identical after an append"
        );
        assert_eq!(after.lines().count(), before.lines().count() + 1);
    }

    #[test]
    fn append_quotes_values_containing_delimiters() {
        let dir = TempDir::new().expect("should create temp dir");
        let service = service(dir.path());

        service
            .append(&text("Bob"), &text("Fast, friendly\nand thorough"))
            .expect("append should succeed");

        let entries = service.load();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].comment, "Fast, friendly\nand thorough");
    }
}
