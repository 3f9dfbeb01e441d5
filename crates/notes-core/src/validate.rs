//! Input validation shared by the identity and notes components.

use std::sync::LazyLock;

use regex::Regex;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

/// A rejected piece of user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid email format provided")]
    InvalidEmail,

    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    WeakPassword,

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Check an email address against the standard address pattern.
pub fn email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Check password strength.
pub fn password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::WeakPassword);
    }
    Ok(())
}

/// Check that a required text field is present.
pub fn non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        for e in ["someone@example.com", "first.last+tag@sub.domain.org", "a_b%c@x-y.io"] {
            assert!(email(e).is_ok(), "{e} should be accepted");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for e in ["", "plainaddress", "@example.com", "a@b", "a@b.c", "a b@example.com"] {
            assert_eq!(email(e), Err(ValidationError::InvalidEmail), "{e} should be rejected");
        }
    }

    #[test]
    fn test_password_boundary() {
        assert_eq!(password("1234567"), Err(ValidationError::WeakPassword));
        assert!(password("12345678").is_ok());
        assert!(password("a much longer passphrase").is_ok());
    }

    #[test]
    fn test_non_empty() {
        assert!(non_empty("title", "x").is_ok());
        let err = non_empty("content", "").unwrap_err();
        assert_eq!(err, ValidationError::Empty("content"));
        assert_eq!(err.to_string(), "content must not be empty");
    }
}
