//! Form validation run before any submit reaches the network.
//!
//! Two checks only: every field must be non-empty, and the email must match
//! a basic `local@domain.tld` pattern with a 2–4 letter TLD.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::models::UserForm;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,4}$").unwrap()
});

/// Reasons a form is rejected locally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please Enter all the details")]
    MissingFields,

    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// Returns `true` when `email` matches the accepted address pattern.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check a form before submission.
///
/// Missing fields are reported ahead of a malformed email.
pub fn validate_form(form: &UserForm) -> Result<(), ValidationError> {
    let fields = [&form.name, &form.username, &form.email, &form.company_name];
    if fields.iter().any(|f| f.is_empty()) {
        return Err(ValidationError::MissingFields);
    }
    if !is_valid_email(&form.email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> UserForm {
        UserForm {
            name: "Grace Hopper".into(),
            username: "grace".into(),
            email: "grace@navy.mil".into(),
            company_name: "US Navy".into(),
        }
    }

    #[test]
    fn accepts_complete_form() {
        assert_eq!(validate_form(&filled()), Ok(()));
    }

    #[test]
    fn rejects_each_missing_field() {
        let clears: [fn(&mut UserForm); 4] = [
            |f| f.name.clear(),
            |f| f.username.clear(),
            |f| f.email.clear(),
            |f| f.company_name.clear(),
        ];
        for clear in clears {
            let mut form = filled();
            clear(&mut form);
            assert_eq!(validate_form(&form), Err(ValidationError::MissingFields));
        }
    }

    #[test]
    fn missing_fields_reported_before_bad_email() {
        let mut form = filled();
        form.email = "not-an-email".into();
        form.name.clear();
        assert_eq!(validate_form(&form), Err(ValidationError::MissingFields));
    }

    #[test]
    fn rejects_malformed_email() {
        let mut form = filled();
        form.email = "grace@navy".into();
        assert_eq!(validate_form(&form), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn email_pattern_edges() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@sub.example.info"));
        assert!(is_valid_email("x_y%z-1@host-name.IO"));
        assert!(!is_valid_email("a@b.c"));
        assert!(!is_valid_email("a@b.museum"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a b@c.co"));
        assert!(!is_valid_email("a@b.co "));
        assert!(!is_valid_email("a@b.c0"));
    }

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(ValidationError::MissingFields.to_string(), "Please Enter all the details");
        assert_eq!(
            ValidationError::InvalidEmail.to_string(),
            "Please enter a valid email address."
        );
    }
}
