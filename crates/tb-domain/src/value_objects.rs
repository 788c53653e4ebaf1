//! Validated value objects. Each constructor is the single point of entry
//! for untrusted input; once constructed, a value object is known-valid for
//! the lifetime of the process.

use crate::error::DomainError;
use std::fmt;

pub const MAX_TITLE_LEN: usize = 255;
pub const MAX_DESCRIPTION_LEN: usize = 1024;
pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 32;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidArgument("title must not be empty".into()));
        }
        if trimmed.chars().count() > MAX_TITLE_LEN {
            return Err(DomainError::InvalidArgument(format!(
                "title must be at most {MAX_TITLE_LEN} code units"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(DomainError::InvalidArgument(format!(
                "description must be at most {MAX_DESCRIPTION_LEN} code units"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Non-negative ordinal position within a parent's child list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position(i64);

impl Position {
    pub fn new(raw: i64) -> Result<Self, DomainError> {
        if raw < 0 {
            return Err(DomainError::InvalidArgument("position must not be negative".into()));
        }
        Ok(Self(raw))
    }

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<Position> for i64 {
    fn from(p: Position) -> i64 {
        p.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = raw.as_ref().trim();
        let len = trimmed.chars().count();
        if len < MIN_USERNAME_LEN {
            return Err(DomainError::InvalidArgument(format!(
                "username must be at least {MIN_USERNAME_LEN} code units"
            )));
        }
        if len > MAX_USERNAME_LEN {
            return Err(DomainError::InvalidArgument(format!(
                "username must be at most {MAX_USERNAME_LEN} code units"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = raw.as_ref().trim();
        if !is_valid_email(trimmed) {
            return Err(DomainError::InvalidArgument("invalid email".into()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Deliberately simple `local@domain.tld` check; full RFC 5322 validation is
/// the gateway's concern, not this core's.
fn is_valid_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && !tld.is_empty()
        && !s.contains(char::is_whitespace)
        && local.chars().all(|c| c.is_ascii_graphic() && c != '@')
}

/// Plaintext password, transient — never persisted, never logged.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = raw.as_ref().trim();
        let len = trimmed.chars().count();
        if len < MIN_PASSWORD_LEN {
            return Err(DomainError::InvalidArgument(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if len > MAX_PASSWORD_LEN {
            return Err(DomainError::InvalidArgument(format!(
                "password must be at most {MAX_PASSWORD_LEN} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Password(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_rejects_empty_after_trim() {
        assert!(Title::new("   ").is_err());
    }

    #[test]
    fn title_rejects_256_code_units() {
        let s = "a".repeat(256);
        assert!(Title::new(s).is_err());
    }

    #[test]
    fn title_accepts_255_code_units() {
        let s = "a".repeat(255);
        assert!(Title::new(s).is_ok());
    }

    #[test]
    fn position_rejects_negative() {
        assert!(Position::new(-1).is_err());
    }

    #[test]
    fn position_accepts_zero() {
        assert!(Position::new(0).is_ok());
    }

    #[test]
    fn email_requires_local_and_domain_with_tld() {
        assert!(Email::new("a@b.com").is_ok());
        assert!(Email::new("not-an-email").is_err());
        assert!(Email::new("a@b").is_err());
    }

    #[test]
    fn password_length_bounds() {
        assert!(Password::new("short").is_err());
        assert!(Password::new("a".repeat(33)).is_err());
        assert!(Password::new("goodpass").is_ok());
    }
}
