//! Account validator
//!
//! Presence checks, normalization, and field rules for account records.
//! Runs before any store access; the store schema repeats the length rules.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::FieldError;
use crate::storage::NewAccount;

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Email shape accepted at registration (ASCII word characters only).
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*@[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*(\.[A-Za-z0-9_]{2,3})+$",
    )
    .expect("email pattern is valid")
});

/// Returns the value when it is present and non-empty.
pub fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Trim surrounding whitespace and lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Check a normalized account against the field rules.
///
/// Returns every failing field rather than stopping at the first.
pub fn validate_new_account(account: &NewAccount) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if account.username.chars().count() < MIN_USERNAME_LENGTH {
        errors.push(FieldError::new(
            "username",
            "Username must be at least 3 characters long",
        ));
    }

    if !is_valid_email(&account.email) {
        errors.push(FieldError::new("email", "Please enter a valid email"));
    }

    if account.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters long",
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
