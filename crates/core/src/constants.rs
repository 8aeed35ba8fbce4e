//! Constants used throughout the docmatch core crate.
//!
//! This module contains default path and identity constants to ensure
//! consistency across the binaries and make maintenance easier.

/// Default location of the doctor roster CSV when no explicit path is configured.
pub const DEFAULT_ROSTER_PATH: &str = "data/doctors.csv";

/// Default location of the feedback log CSV when no explicit path is configured.
pub const DEFAULT_FEEDBACK_PATH: &str = "data/feedback.csv";

/// Default mail domain accepted by the stand-in identity provider.
pub const DEFAULT_LOGIN_DOMAIN: &str = "gmail.com";
