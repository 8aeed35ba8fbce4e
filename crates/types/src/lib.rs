//! Validated text types shared across the docmatch workspace.
//!
//! The dashboard performs no structural validation beyond presence checks, so
//! these newtypes are deliberately small: [`NonEmptyText`] guarantees a value
//! was actually entered, and [`EmailAddress`] guarantees a string has the
//! shape of an address before it is used as a login identity or a mail
//! recipient.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// The input did not look like an email address
    #[error("Not a valid email address: '{0}'")]
    NotAnEmail(String),
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one
/// non-whitespace character. The input is automatically trimmed of leading
/// and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the
    /// trimmed result is empty, an error is returned.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// An email address with the minimal shape `local@domain`.
///
/// This is a presence-level check, not RFC 5321 validation: the input is
/// trimmed and must contain exactly one `@` with non-empty text on both
/// sides and at least one `.` in the domain. Whether a given address is
/// *acceptable* for login is decided by the identity provider, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress {
    local: String,
    domain: String,
}

impl EmailAddress {
    /// Parses and validates an email address.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` for blank input and
    /// `TextError::NotAnEmail` when the shape check fails.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }

        let mut parts = trimmed.splitn(2, '@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();

        if local.is_empty()
            || domain.is_empty()
            || domain.contains('@')
            || !domain.contains('.')
            || trimmed.chars().any(char::is_whitespace)
        {
            return Err(TextError::NotAnEmail(trimmed.to_owned()));
        }

        Ok(Self {
            local: local.to_owned(),
            domain: domain.to_owned(),
        })
    }

    /// Returns the part after the `@`, used by domain-allowlist providers.
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.local, self.domain)
    }
}

impl serde::Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EmailAddress::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_whitespace() {
        let text = NonEmptyText::new("  hello  ").expect("should accept padded input");
        assert_eq!(text.as_str(), "hello");
    }

    #[test]
    fn non_empty_text_rejects_blank_input() {
        let err = NonEmptyText::new("   ").expect_err("whitespace-only input should fail");
        assert!(matches!(err, TextError::Empty));
    }

    #[test]
    fn email_address_parses_and_splits_domain() {
        let email = EmailAddress::parse("alice@gmail.com").expect("should parse");
        assert_eq!(email.domain(), "gmail.com");
        assert_eq!(email.to_string(), "alice@gmail.com");
    }

    #[test]
    fn email_address_rejects_missing_at() {
        let err = EmailAddress::parse("alice.gmail.com").expect_err("no @ should fail");
        assert!(matches!(err, TextError::NotAnEmail(_)));
    }

    #[test]
    fn email_address_rejects_missing_domain_dot() {
        let err = EmailAddress::parse("alice@localhost").expect_err("bare host should fail");
        assert!(matches!(err, TextError::NotAnEmail(_)));
    }

    #[test]
    fn email_address_rejects_blank_input() {
        let err = EmailAddress::parse("  ").expect_err("blank input should fail");
        assert!(matches!(err, TextError::Empty));
    }

    #[test]
    fn email_address_round_trips_through_serde() {
        let email = EmailAddress::parse("bob@example.org").expect("should parse");
        let json = serde_json::to_string(&email).expect("should serialize");
        assert_eq!(json, "\"bob@example.org\"");
    }
}
