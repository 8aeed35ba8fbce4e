//! Request and response types for the REST surface.
//!
//! These are plain serde structs (there is no RPC protocol in this system);
//! `utoipa` schemas are derived so the OpenAPI document stays in sync with
//! the wire format. Handlers map between these DTOs and the core domain
//! types — core never depends on this crate.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginReq {
    /// Address presented to the identity provider.
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRes {
    /// Canonical session token; send it back in `x-session-token`.
    pub token: String,
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LogoutRes {
    /// Whether a session was actually destroyed.
    pub success: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct DoctorRes {
    /// Stable id assigned at roster load; key expansion state off this.
    pub id: u32,
    pub name: String,
    pub specialty: String,
    pub location: String,
    pub symptoms: String,
}

/// Query parameters for the doctor filter. Absent parameters degrade to
/// match-everything substring queries.
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
pub struct FindDoctorsParams {
    pub symptom: Option<String>,
    pub location: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct FindDoctorsRes {
    pub doctors: Vec<DoctorRes>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct MetricsRes {
    pub total_doctors: usize,
    pub distinct_specialties: usize,
    pub distinct_locations: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ChartSliceRes {
    pub label: String,
    pub count: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ChartRes {
    pub title: String,
    /// `histogram` or `pie`.
    pub kind: String,
    pub slices: Vec<ChartSliceRes>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ChartsRes {
    pub location_histogram: ChartRes,
    pub specialty_breakdown: ChartRes,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct FeedbackEntryRes {
    pub name: String,
    pub comment: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ListFeedbackRes {
    pub entries: Vec<FeedbackEntryRes>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitFeedbackReq {
    pub name: String,
    pub comment: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitFeedbackRes {
    pub success: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct EmailDoctorReq {
    /// Where to send the profile.
    pub recipient: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct EmailDoctorRes {
    /// Human-readable confirmation of the simulated delivery.
    pub summary: String,
}
