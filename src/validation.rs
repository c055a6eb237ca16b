// ✅ Credential Validation
// Character-level name rules, email pattern + uniqueness, and the composite
// check that gates student creation.

use crate::error::{Field, Result, TrackerError};
use crate::parser::StudentRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Characters allowed inside a name besides ASCII letters
const JOINERS: [char; 2] = ['\'', '-'];

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+$")
        .expect("email pattern is a valid regex")
});

fn is_joiner(c: char) -> bool {
    JOINERS.contains(&c)
}

// ============================================================================
// REGISTERED EMAILS
// ============================================================================

/// Anything that can answer "is this email already taken?"
///
/// Matching is exact and case-sensitive.
pub trait RegisteredEmails {
    fn contains_email(&self, email: &str) -> bool;
}

impl RegisteredEmails for HashSet<String> {
    fn contains_email(&self, email: &str) -> bool {
        self.contains(email)
    }
}

impl<V> RegisteredEmails for HashMap<String, V> {
    fn contains_email(&self, email: &str) -> bool {
        self.contains_key(email)
    }
}

impl RegisteredEmails for [String] {
    fn contains_email(&self, email: &str) -> bool {
        self.iter().any(|e| e == email)
    }
}

impl RegisteredEmails for Vec<String> {
    fn contains_email(&self, email: &str) -> bool {
        self.as_slice().contains_email(email)
    }
}

// ============================================================================
// NAME VALIDATOR
// ============================================================================

pub struct NameValidator;

impl NameValidator {
    /// Single name token: at least 2 chars, ASCII letters and joiners only,
    /// no joiner at either end, no two joiners in a row.
    pub fn is_valid_name(name: &str) -> bool {
        let chars: Vec<char> = name.chars().collect();

        if chars.len() < 2 {
            return false;
        }

        if is_joiner(chars[0]) || is_joiner(chars[chars.len() - 1]) {
            return false;
        }

        if !chars.iter().all(|&c| c.is_ascii_alphabetic() || is_joiner(c)) {
            return false;
        }

        !chars.windows(2).any(|pair| is_joiner(pair[0]) && is_joiner(pair[1]))
    }

    /// Every space-separated component must pass on its own
    pub fn is_valid_last_name(last_name: &str) -> bool {
        if last_name.contains(' ') {
            last_name.split_whitespace().all(Self::is_valid_name)
        } else {
            Self::is_valid_name(last_name)
        }
    }
}

// ============================================================================
// EMAIL VALIDATOR
// ============================================================================

pub struct EmailValidator;

impl EmailValidator {
    /// Anchored pattern match only, ignores uniqueness
    pub fn is_well_formed(email: &str) -> bool {
        EMAIL_PATTERN.is_match(email)
    }

    /// Duplicate check runs first, so a taken address is reported as
    /// `Duplicate` even when it is also malformed.
    pub fn validate<R: RegisteredEmails + ?Sized>(email: &str, registered: &R) -> Result<()> {
        if registered.contains_email(email) {
            return Err(TrackerError::Duplicate(email.to_string()));
        }

        if !Self::is_well_formed(email) {
            return Err(TrackerError::Validation(Field::Email));
        }

        Ok(())
    }
}

// ============================================================================
// COMPOSITE
// ============================================================================

/// First name, then last name, then email. Stops at the first failure.
pub fn validate_record<R: RegisteredEmails + ?Sized>(
    record: &StudentRecord,
    registered: &R,
) -> Result<()> {
    if !NameValidator::is_valid_name(&record.first_name) {
        return Err(TrackerError::Validation(Field::FirstName));
    }

    if !NameValidator::is_valid_last_name(&record.last_name) {
        return Err(TrackerError::Validation(Field::LastName));
    }

    EmailValidator::validate(&record.email, registered)
}

// ============================================================================
// TESTS
// ============================================================================
