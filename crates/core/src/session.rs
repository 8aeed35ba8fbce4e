//! Session lifecycle and the pluggable identity provider.
//!
//! A session is created on successful login and destroyed on logout — an
//! explicit lifecycle held in a session service, never ambient global state.
//! Identity verification sits behind the narrow [`IdentityProvider`] trait so
//! the simulated sign-in can be swapped for a real provider without touching
//! the session machinery.
//!
//! ## Canonical token form
//!
//! Session tokens are v4 UUIDs in canonical simple form: **32 lowercase
//! hexadecimal characters, no hyphens** (e.g.
//! `550e8400e29b41d4a716446655440000`). Externally supplied tokens must
//! already be canonical; [`SessionToken::parse`] rejects anything else.

use crate::error::{RosterError, RosterResult};
use chrono::{DateTime, Utc};
use docmatch_types::EmailAddress;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// A session token in canonical simple-UUID form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Mints a fresh token.
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Validates an externally supplied token string.
    ///
    /// This does **not** normalise other UUID forms (hyphenated, uppercase);
    /// callers must provide the canonical representation.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::InvalidSessionToken`] if `input` is not 32
    /// lowercase hex characters.
    pub fn parse(input: &str) -> RosterResult<Self> {
        let canonical = input.len() == 32
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if !canonical {
            return Err(RosterError::InvalidSessionToken);
        }
        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An authenticated interaction session.
#[derive(Clone, Debug)]
pub struct Session {
    pub token: SessionToken,
    pub email: EmailAddress,
    pub created_at: DateTime<Utc>,
}

/// Narrow seam for identity verification.
///
/// The system never performs real authentication; implementations decide
/// whether an address is acceptable and nothing more.
pub trait IdentityProvider: Send + Sync {
    /// Returns `Ok(())` when `email` may open a session.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::IdentityRejected`] when the address is not
    /// acceptable to this provider.
    fn authenticate(&self, email: &EmailAddress) -> RosterResult<()>;
}

/// Stand-in provider that accepts addresses from an allowlist of mail
/// domains, mimicking a hosted sign-in without any network round trip.
#[derive(Clone, Debug)]
pub struct DomainAllowlist {
    domains: Vec<String>,
}

impl DomainAllowlist {
    /// Builds an allowlist; domains are compared case-insensitively.
    pub fn new(domains: Vec<String>) -> Self {
        Self {
            domains: domains.into_iter().map(|d| d.to_ascii_lowercase()).collect(),
        }
    }
}

impl IdentityProvider for DomainAllowlist {
    fn authenticate(&self, email: &EmailAddress) -> RosterResult<()> {
        let domain = email.domain().to_ascii_lowercase();
        if self.domains.iter().any(|allowed| *allowed == domain) {
            Ok(())
        } else {
            Err(RosterError::IdentityRejected(format!(
                "address domain '{}' is not on the sign-in allowlist",
                email.domain()
            )))
        }
    }
}

/// Service owning the create/destroy lifecycle of sessions.
pub struct SessionService {
    provider: Box<dyn IdentityProvider>,
    sessions: RwLock<HashMap<SessionToken, Session>>,
}

impl SessionService {
    pub fn new(provider: Box<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Opens a session for `email`.
    ///
    /// Parses the address, consults the identity provider, then mints and
    /// stores a fresh token.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::Text` when the address fails the shape check
    /// and `RosterError::IdentityRejected` when the provider refuses it.
    pub fn login(&self, email: &str) -> RosterResult<Session> {
        let email = EmailAddress::parse(email)?;
        self.provider.authenticate(&email)?;

        let session = Session {
            token: SessionToken::new(),
            email,
            created_at: Utc::now(),
        };

        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sessions.insert(session.token.clone(), session.clone());

        tracing::info!("session opened for {}", session.email);
        Ok(session)
    }

    /// Resolves a raw token string to its session, if one is active.
    ///
    /// Malformed tokens resolve to `None` rather than erroring; the caller
    /// only cares whether the interaction is authenticated.
    pub fn authenticate(&self, token: &str) -> Option<Session> {
        let token = SessionToken::parse(token).ok()?;
        let sessions = self
            .sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sessions.get(&token).cloned()
    }

    /// Destroys the session for `token`.
    ///
    /// Returns whether a session was actually removed; logging out twice is
    /// not an error.
    pub fn logout(&self, token: &str) -> bool {
        let Ok(token) = SessionToken::parse(token) else {
            return false;
        };
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let removed = sessions.remove(&token).is_some();
        if removed {
            tracing::info!("session closed");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gmail_only() -> SessionService {
        SessionService::new(Box::new(DomainAllowlist::new(vec!["gmail.com".into()])))
    }

    #[test]
    fn login_opens_session_for_allowlisted_domain() {
        let service = gmail_only();

        let session = service
            .login("alice@gmail.com")
            .expect("allowlisted address should log in");
        assert_eq!(session.email.to_string(), "alice@gmail.com");

        let resolved = service
            .authenticate(session.token.as_str())
            .expect("fresh token should authenticate");
        assert_eq!(resolved.email, session.email);
    }

    #[test]
    fn login_rejects_domain_off_the_allowlist() {
        let service = gmail_only();

        let err = service
            .login("mallory@example.com")
            .expect_err("off-list domain should be rejected");
        assert!(matches!(err, RosterError::IdentityRejected(_)));
    }

    #[test]
    fn login_rejects_malformed_address() {
        let service = gmail_only();

        let err = service
            .login("not-an-address")
            .expect_err("malformed address should be rejected");
        assert!(matches!(err, RosterError::Text(_)));
    }

    #[test]
    fn allowlist_comparison_is_case_insensitive() {
        let service = SessionService::new(Box::new(DomainAllowlist::new(vec!["Gmail.COM".into()])));

        service
            .login("alice@GMAIL.com")
            .expect("domain case should not matter");
    }

    #[test]
    fn logout_destroys_the_session() {
        let service = gmail_only();
        let session = service.login("bob@gmail.com").expect("login should succeed");

        assert!(service.logout(session.token.as_str()));
        assert!(
            service.authenticate(session.token.as_str()).is_none(),
            "destroyed session must not authenticate"
        );
        assert!(
            !service.logout(session.token.as_str()),
            "second logout removes nothing"
        );
    }

    #[test]
    fn authenticate_rejects_unknown_and_malformed_tokens() {
        let service = gmail_only();

        assert!(service.authenticate(&SessionToken::new().to_string()).is_none());
        assert!(service.authenticate("not-a-token").is_none());
    }

    #[test]
    fn session_token_parse_requires_canonical_form() {
        let token = SessionToken::new();
        SessionToken::parse(token.as_str()).expect("minted tokens are canonical");

        let hyphenated = Uuid::new_v4().to_string();
        let err = SessionToken::parse(&hyphenated).expect_err("hyphenated form should fail");
        assert!(matches!(err, RosterError::InvalidSessionToken));
    }
}
