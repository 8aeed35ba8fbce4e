//! Aggregate statistics over the roster.
//!
//! These are the home-dashboard numbers and the two chart specifications.
//! The core only *describes* the charts; rendering belongs to the
//! presentation host.

use crate::doctor::DoctorRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Key dashboard metrics.
///
/// Distinct counts are exact string distincts — no case folding or
/// normalisation is applied to specialty or location values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub total_doctors: usize,
    pub distinct_specialties: usize,
    pub distinct_locations: usize,
}

/// How the host should render a chart spec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Histogram,
    Pie,
}

/// One labelled count within a chart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub label: String,
    pub count: usize,
}

/// A renderable chart description.
///
/// Slices appear in first-seen roster order, which keeps the output
/// deterministic for an unchanged source file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub kind: ChartKind,
    pub slices: Vec<ChartSlice>,
}

/// Computes the key metrics shown on the home dashboard.
pub fn key_metrics(doctors: &[DoctorRecord]) -> KeyMetrics {
    let specialties: HashSet<&str> = doctors.iter().map(|d| d.specialty.as_str()).collect();
    let locations: HashSet<&str> = doctors.iter().map(|d| d.location.as_str()).collect();

    KeyMetrics {
        total_doctors: doctors.len(),
        distinct_specialties: specialties.len(),
        distinct_locations: locations.len(),
    }
}

/// Doctor distribution by location.
pub fn location_histogram(doctors: &[DoctorRecord]) -> ChartSpec {
    ChartSpec {
        title: "Doctor Distribution by Location".to_string(),
        kind: ChartKind::Histogram,
        slices: count_by(doctors, |d| d.location.as_str()),
    }
}

/// Specialty distribution across the roster.
pub fn specialty_breakdown(doctors: &[DoctorRecord]) -> ChartSpec {
    ChartSpec {
        title: "Specialty Distribution".to_string(),
        kind: ChartKind::Pie,
        slices: count_by(doctors, |d| d.specialty.as_str()),
    }
}

// Rosters are small; a linear scan keeps first-seen ordering without an
// ordered-map dependency.
fn count_by<'a>(
    doctors: &'a [DoctorRecord],
    key: impl Fn(&'a DoctorRecord) -> &'a str,
) -> Vec<ChartSlice> {
    let mut slices: Vec<ChartSlice> = Vec::new();
    for doctor in doctors {
        let label = key(doctor);
        match slices.iter_mut().find(|slice| slice.label == label) {
            Some(slice) => slice.count += 1,
            None => slices.push(ChartSlice {
                label: label.to_string(),
                count: 1,
            }),
        }
    }
    slices
}
