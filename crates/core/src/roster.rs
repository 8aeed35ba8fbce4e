//! Doctor roster loading and filtering.
//!
//! This module provides the central operation of the system: loading the
//! roster CSV fully into memory once, and answering symptom/location filter
//! queries against it. It handles:
//!
//! - One-shot load at startup (a load failure is fatal — the system cannot
//!   operate without the roster)
//! - Assignment of stable positional [`DoctorId`]s at load time
//! - The case-insensitive literal substring filter
//! - Profile lookup by stable id
//!
//! ## Source Layout
//!
//! The roster is a row-oriented CSV with a header row:
//!
//! ```text
//! name,specialty,location,symptoms
//! Dr. A. Rahman,Cardiology,New York,"chest pain, palpitations"
//! ```
//!
//! Columns may appear in any order; missing values are read as empty
//! strings. The loaded roster is immutable for the process lifetime and is
//! never persisted back.
//!
//! ## Pure Data Operations
//!
//! This module contains **only** data operations — no API concerns such as
//! sessions, HTTP servers, or service interfaces. API-level logic belongs in
//! `api-rest` or `api-shared`.

use crate::config::CoreConfig;
use crate::doctor::{DoctorId, DoctorRecord};
use crate::error::{RosterError, RosterResult};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

/// A roster row as it appears in the source file, before an id is assigned.
///
/// Every column defaults to an empty string so that ragged or sparse rows
/// load rather than fail.
#[derive(Debug, Default, Deserialize)]
struct SourceRow {
    #[serde(default)]
    name: String,
    #[serde(default)]
    specialty: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    symptoms: String,
}

/// Service answering filter queries over the in-memory roster.
///
/// The roster is loaded exactly once, at construction. All queries are pure
/// reads re-evaluated against the full dataset; there is no caching of
/// filter results and no incremental evaluation.
#[derive(Clone, Debug)]
pub struct RosterService {
    doctors: Vec<DoctorRecord>,
}

impl RosterService {
    /// Loads the roster from the configured path.
    ///
    /// # Errors
    ///
    /// Any failure here is fatal to the caller: a missing or unreadable
    /// file returns [`RosterError::RosterOpen`], and a malformed row returns
    /// [`RosterError::RosterParse`]. There is no fallback roster.
    pub fn load(cfg: &CoreConfig) -> RosterResult<Self> {
        Self::from_path(cfg.roster_path())
    }

    /// Loads the roster from an explicit path.
    ///
    /// Each record is assigned a [`DoctorId`] equal to its zero-based
    /// position in the file, which is the record's identity for the rest of
    /// the process lifetime.
    pub fn from_path(path: &Path) -> RosterResult<Self> {
        let file = File::open(path).map_err(RosterError::RosterOpen)?;
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

        let mut doctors = Vec::new();
        for (position, row) in reader.deserialize::<SourceRow>().enumerate() {
            let row = row.map_err(RosterError::RosterParse)?;
            doctors.push(DoctorRecord {
                id: DoctorId::new(position as u32),
                name: row.name,
                specialty: row.specialty,
                location: row.location,
                symptoms: row.symptoms,
            });
        }

        tracing::info!("loaded {} doctors from {}", doctors.len(), path.display());
        Ok(Self { doctors })
    }

    /// Builds a roster directly from records, preserving their order.
    ///
    /// Intended for hosts that obtain the dataset elsewhere; ids are
    /// reassigned from the given order.
    pub fn from_records(records: Vec<DoctorRecord>) -> Self {
        let doctors = records
            .into_iter()
            .enumerate()
            .map(|(position, record)| DoctorRecord {
                id: DoctorId::new(position as u32),
                ..record
            })
            .collect();
        Self { doctors }
    }

    /// Returns every record whose `symptoms` field contains `symptom` and
    /// whose `location` field contains `location`, both as case-insensitive
    /// literal substrings.
    ///
    /// Empty inputs match everything (the empty string is a substring of any
    /// field), so `find("", "")` returns the full roster. Inputs are treated
    /// literally — regex metacharacters have no special meaning. The result
    /// preserves load order and is empty, never an error, when nothing
    /// matches.
    pub fn find(&self, symptom: &str, location: &str) -> Vec<DoctorRecord> {
        let symptom = symptom.to_lowercase();
        let location = location.to_lowercase();

        self.doctors
            .iter()
            .filter(|doctor| {
                doctor.symptoms.to_lowercase().contains(&symptom)
                    && doctor.location.to_lowercase().contains(&location)
            })
            .cloned()
            .collect()
    }

    /// Looks up a record by its stable id.
    ///
    /// Ids are load positions, so this is a direct index. Returns `None` for
    /// ids that were never assigned.
    pub fn get(&self, id: DoctorId) -> Option<&DoctorRecord> {
        self.doctors.get(id.index())
    }

    /// The full roster in load order.
    pub fn all(&self) -> &[DoctorRecord] {
        &self.doctors
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_roster(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("doctors.csv");
        let mut file = File::create(&path).expect("should create roster file");
        file.write_all(contents.as_bytes())
            .expect("should write roster file");
        path
    }

    fn sample_roster(dir: &TempDir) -> RosterService {
        let path = write_roster(
            dir,
            "name,specialty,location,symptoms\n\
             Dr. A,Cardio,NYC,chest pain\n\
             Dr. B,Derm,Boston,\"rash, itching\"\n\
             Dr. C,Cardio,New York City,\"chest pain, fatigue\"\n",
        );
        RosterService::from_path(&path).expect("sample roster should load")
    }

    #[test]
    fn load_assigns_positional_ids_in_source_order() {
        let dir = TempDir::new().expect("should create temp dir");
        let roster = sample_roster(&dir);

        assert_eq!(roster.len(), 3);
        let names: Vec<&str> = roster.all().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Dr. A", "Dr. B", "Dr. C"]);
        assert_eq!(roster.all()[0].id, DoctorId::new(0));
        assert_eq!(roster.all()[2].id, DoctorId::new(2));
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = TempDir::new().expect("should create temp dir");
        let err = RosterService::from_path(&dir.path().join("absent.csv"))
            .expect_err("missing roster should be fatal");
        assert!(matches!(err, RosterError::RosterOpen(_)));
    }

    #[test]
    fn load_tolerates_missing_values_as_empty_strings() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = write_roster(
            &dir,
            "name,specialty,location,symptoms\nDr. Sparse,,,\nDr. Short,Cardio\n",
        );
        let roster = RosterService::from_path(&path).expect("sparse rows should load");

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.all()[0].symptoms, "");
        assert_eq!(roster.all()[1].location, "");
    }

    #[test]
    fn find_matches_both_fields_case_insensitively() {
        let dir = TempDir::new().expect("should create temp dir");
        let roster = sample_roster(&dir);

        let results = roster.find("chest", "ny");
        let names: Vec<&str> = results.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Dr. A", "Dr. C"]);

        let upper = roster.find("CHEST", "NY");
        assert_eq!(results, upper, "case must not affect the result set");
    }

    #[test]
    fn find_returns_empty_for_no_match() {
        let dir = TempDir::new().expect("should create temp dir");
        let roster = sample_roster(&dir);

        assert!(roster.find("cough", "ny").is_empty());
    }

    #[test]
    fn find_with_empty_inputs_returns_full_roster() {
        let dir = TempDir::new().expect("should create temp dir");
        let roster = sample_roster(&dir);

        let all = roster.find("", "");
        assert_eq!(all.len(), roster.len());
        assert_eq!(all, roster.all().to_vec());
    }

    #[test]
    fn find_is_idempotent() {
        let dir = TempDir::new().expect("should create temp dir");
        let roster = sample_roster(&dir);

        let first = roster.find("rash", "bos");
        let second = roster.find("rash", "bos");
        assert_eq!(first, second);
    }

    #[test]
    fn find_preserves_load_order() {
        let dir = TempDir::new().expect("should create temp dir");
        let roster = sample_roster(&dir);

        let results = roster.find("", "n");
        let ids: Vec<DoctorId> = results.iter().map(|d| d.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_by_key(|id| id.index());
        assert_eq!(ids, sorted, "results must keep load order");
    }

    #[test]
    fn empty_symptoms_field_never_matches_non_empty_query() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = write_roster(&dir, "name,specialty,location,symptoms\nDr. Quiet,GP,Leeds,\n");
        let roster = RosterService::from_path(&path).expect("roster should load");

        assert!(roster.find("fever", "").is_empty());
        assert_eq!(roster.find("", "").len(), 1, "empty query still matches");
    }

    #[test]
    fn regex_metacharacters_are_treated_literally() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = write_roster(
            &dir,
            "name,specialty,location,symptoms\nDr. Dot,GP,York,aches (mild)\n",
        );
        let roster = RosterService::from_path(&path).expect("roster should load");

        assert_eq!(roster.find("(mild)", "").len(), 1);
        assert!(roster.find(".*", "").is_empty(), "no regex wildcards");
    }

    #[test]
    fn get_returns_record_by_stable_id() {
        let dir = TempDir::new().expect("should create temp dir");
        let roster = sample_roster(&dir);

        let filtered = roster.find("rash", "");
        let id = filtered[0].id;
        let record = roster.get(id).expect("id from a result should resolve");
        assert_eq!(record.name, "Dr. B");

        assert!(roster.get(DoctorId::new(99)).is_none());
    }

    #[test]
    fn columns_may_appear_in_any_order() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = write_roster(
            &dir,
            "symptoms,name,location,specialty\nheadache,Dr. Swap,Hull,Neuro\n",
        );
        let roster = RosterService::from_path(&path).expect("roster should load");

        assert_eq!(roster.all()[0].name, "Dr. Swap");
        assert_eq!(roster.all()[0].symptoms, "headache");
    }
}
