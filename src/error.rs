// ⚠️ Error taxonomy for the tracker engine
// Every failure is recoverable: the command loop reports it and keeps reading.

use thiserror::Error;

/// Which part of a credentials line failed its content rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Email,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FirstName => "first name",
            Field::LastName => "last name",
            Field::Email => "email",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    /// Malformed input: too few fields, non-integer points, wrong point count
    #[error("format error: {0}")]
    Format(String),

    /// A name or email breaks the content rules
    #[error("incorrect {0}")]
    Validation(Field),

    /// Email already belongs to a registered student
    #[error("email already taken: {0}")]
    Duplicate(String),

    /// Unknown student id or course name
    #[error("not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field() {
        let err = TrackerError::Validation(Field::LastName);
        assert_eq!(err.to_string(), "incorrect last name");
    }

    #[test]
    fn test_duplicate_is_distinct_from_validation() {
        let dup = TrackerError::Duplicate("a@b.c".to_string());
        assert_ne!(dup, TrackerError::Validation(Field::Email));
    }
}
