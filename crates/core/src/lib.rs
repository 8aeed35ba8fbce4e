//! # DocMatch Core
//!
//! Core business logic for the docmatch doctor-roster dashboard.
//!
//! This crate contains pure data operations over the roster and its
//! companion stores:
//! - Roster loading and the symptom/location substring filter
//! - Aggregate statistics and chart specifications
//! - The append-only feedback log
//! - Session lifecycle behind a pluggable identity provider
//! - Simulated mail delivery behind a transport trait
//!
//! **No API concerns**: HTTP servers, DTOs, or service interfaces belong in
//! `api-rest` or `api-shared`.

pub mod config;
pub mod constants;
pub mod doctor;
pub mod error;
pub mod feedback;
pub mod mailer;
pub mod roster;
pub mod session;
pub mod stats;

pub use config::CoreConfig;
pub use doctor::{DoctorId, DoctorRecord};
pub use error::{RosterError, RosterResult};
pub use feedback::{FeedbackRecord, FeedbackService};
pub use mailer::{profile_message, send_profile, MailReceipt, MailTransport, SimulatedTransport};
pub use roster::RosterService;
pub use session::{DomainAllowlist, IdentityProvider, Session, SessionService, SessionToken};
pub use stats::{key_metrics, location_histogram, specialty_breakdown};
pub use stats::{ChartKind, ChartSlice, ChartSpec, KeyMetrics};
