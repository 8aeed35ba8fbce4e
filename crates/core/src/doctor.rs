//! Doctor roster records and their stable identifiers.
//!
//! The roster source has no id column, so identity is synthesised at load
//! time: each record is assigned the zero-based position it held in the
//! source file. That id is stable for the process lifetime (the roster is
//! immutable once loaded) and is what UI expansion state and profile lookups
//! key off — never the transient position inside a filtered result.

use crate::{RosterError, RosterResult};
use serde::{Deserialize, Serialize};

/// Stable synthetic identifier for a roster record.
///
/// The value is the record's load position in the roster source. Ids are
/// never reused within a process lifetime; a reload of the process reassigns
/// them from the (immutable) source order, so equal sources yield equal ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoctorId(u32);

impl DoctorId {
    /// Wraps a raw load position.
    pub fn new(position: u32) -> Self {
        Self(position)
    }

    /// Returns the load position as an index into the roster.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for DoctorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DoctorId {
    type Err = RosterError;

    fn from_str(s: &str) -> RosterResult<Self> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| RosterError::InvalidInput(format!("invalid doctor id: '{}'", s)))
    }
}

/// One row of the doctor roster.
///
/// Field values are whatever the source file held; empty or missing values
/// are tolerated as empty strings and are never structurally validated.
/// `symptoms` is a comma/free-text list matched by substring, not parsed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorRecord {
    pub id: DoctorId,
    pub name: String,
    pub specialty: String,
    pub location: String,
    pub symptoms: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doctor_id_parses_from_string() {
        let id: DoctorId = "7".parse().expect("should parse");
        assert_eq!(id, DoctorId::new(7));
        assert_eq!(id.index(), 7);
    }

    #[test]
    fn doctor_id_rejects_non_numeric_input() {
        let err = "seven".parse::<DoctorId>().expect_err("should fail");
        assert!(matches!(err, RosterError::InvalidInput(_)));
    }

    #[test]
    fn doctor_id_serialises_transparently() {
        let id = DoctorId::new(3);
        assert_eq!(format!("{}", id), "3");
    }
}
