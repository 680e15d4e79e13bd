//! Client-side validation of the login form.
//!
//! Runs before the login API is called so obviously bad input never
//! costs a simulated round trip. Stricter than the API's own checks:
//! the email must look like `local@domain.tld`.

use std::sync::LazyLock;

use regex::Regex;

use crate::simulator::MIN_PASSWORD_LEN;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// Per-field messages to show under the form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl FormErrors {
    /// `true` when the form can be submitted.
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// Validates the email and password fields independently.
pub fn validate_credentials(email: &str, password: &str) -> FormErrors {
    let email = if email.is_empty() {
        Some("Email is required")
    } else if !EMAIL_PATTERN.is_match(email) {
        Some("Invalid email address")
    } else {
        None
    };

    let password = if password.is_empty() {
        Some("Password is required")
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Some("Password must be at least 4 characters")
    } else {
        None
    };

    FormErrors { email, password }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_credentials_accepts_good_input() {
        let errors = validate_credentials("Jane.Doe@Example.com", "secret123");
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn test_validate_credentials_required_fields() {
        let errors = validate_credentials("", "");
        assert_eq!(errors.email, Some("Email is required"));
        assert_eq!(errors.password, Some("Password is required"));
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_validate_credentials_rejects_malformed_email() {
        for email in ["jane", "jane@", "jane@example", "jane@example.c", "a b@x.io"] {
            let errors = validate_credentials(email, "secret");
            assert_eq!(errors.email, Some("Invalid email address"), "email {email:?}");
            assert_eq!(errors.password, None);
        }
    }

    #[test]
    fn test_validate_credentials_short_password() {
        let errors = validate_credentials("a@b.io", "abc");
        assert_eq!(errors.email, None);
        assert_eq!(errors.password, Some("Password must be at least 4 characters"));
    }
}
