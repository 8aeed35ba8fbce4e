//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process
//! startup and then passed into core services. The intent is to avoid reading
//! process-wide environment variables during request handling, which can lead
//! to inconsistent behaviour in multi-threaded runtimes and test harnesses.

use crate::constants::DEFAULT_LOGIN_DOMAIN;
use crate::{RosterError, RosterResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    roster_path: PathBuf,
    feedback_path: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::InvalidInput` if either path is empty.
    pub fn new(roster_path: PathBuf, feedback_path: PathBuf) -> RosterResult<Self> {
        if roster_path.as_os_str().is_empty() {
            return Err(RosterError::InvalidInput(
                "roster_path cannot be empty".into(),
            ));
        }
        if feedback_path.as_os_str().is_empty() {
            return Err(RosterError::InvalidInput(
                "feedback_path cannot be empty".into(),
            ));
        }

        Ok(Self {
            roster_path,
            feedback_path,
        })
    }

    pub fn roster_path(&self) -> &Path {
        &self.roster_path
    }

    pub fn feedback_path(&self) -> &Path {
        &self.feedback_path
    }
}

/// Parse the login domain allowlist from an optional string value.
///
/// The value is a comma-separated list of mail domains (for example
/// `gmail.com,nhs.uk`). If `value` is `None`, empty, or contains only
/// whitespace entries, the default domain is returned.
pub fn login_domains_from_env_value(value: Option<String>) -> Vec<String> {
    let domains: Vec<String> = value
        .unwrap_or_default()
        .split(',')
        .map(|d| d.trim().to_ascii_lowercase())
        .filter(|d| !d.is_empty())
        .collect();

    if domains.is_empty() {
        vec![DEFAULT_LOGIN_DOMAIN.to_string()]
    } else {
        domains
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty_roster_path() {
        let err = CoreConfig::new(PathBuf::new(), PathBuf::from("feedback.csv"))
            .expect_err("empty roster path should fail");
        assert!(matches!(err, RosterError::InvalidInput(_)));
    }

    #[test]
    fn new_accepts_valid_paths() {
        let cfg = CoreConfig::new(PathBuf::from("doctors.csv"), PathBuf::from("feedback.csv"))
            .expect("valid paths should succeed");
        assert_eq!(cfg.roster_path(), Path::new("doctors.csv"));
        assert_eq!(cfg.feedback_path(), Path::new("feedback.csv"));
    }

    #[test]
    fn login_domains_default_when_unset() {
        assert_eq!(login_domains_from_env_value(None), vec!["gmail.com"]);
    }

    #[test]
    fn login_domains_parse_and_normalise() {
        let domains = login_domains_from_env_value(Some(" Gmail.com , nhs.uk ,".into()));
        assert_eq!(domains, vec!["gmail.com", "nhs.uk"]);
    }
}
