// 🏗️ Record Parser
// Splits free-text input into structured credentials and point vectors

use crate::courses::COURSE_COUNT;
use crate::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};

// ============================================================================
// CORE TYPES
// ============================================================================

/// StudentRecord - output of `parse_record`, not yet validated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub first_name: String,
    /// May hold several space-separated words ("Jemison Van de Graaff")
    pub last_name: String,
    pub email: String,
}

impl StudentRecord {
    pub fn new(first_name: String, last_name: String, email: String) -> Self {
        StudentRecord {
            first_name,
            last_name,
            email,
        }
    }

    /// Rebuild the credentials line this record came from
    pub fn to_line(&self) -> String {
        format!("{} {} {}", self.first_name, self.last_name, self.email)
    }
}

/// One point delta per course, in catalog order
pub type PointVector = [i64; COURSE_COUNT];

// ============================================================================
// PARSING
// ============================================================================

/// Parse a credentials line: first token is the first name, last token the
/// email, everything in between (joined by single spaces) the last name.
pub fn parse_record(line: &str) -> Result<StudentRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    if fields.len() < 3 {
        return Err(TrackerError::Format(format!(
            "expected at least 3 fields, got {}",
            fields.len()
        )));
    }

    let first_name = fields[0].to_string();
    let email = fields[fields.len() - 1].to_string();
    let last_name = fields[1..fields.len() - 1].join(" ");

    Ok(StudentRecord::new(first_name, last_name, email))
}

/// Parse exactly one integer per course. Nothing is returned unless every
/// token parses and the count matches the catalog.
pub fn parse_points(text: &str) -> Result<PointVector> {
    let values = text
        .split_whitespace()
        .map(|token| token.parse::<i64>())
        .collect::<std::result::Result<Vec<i64>, _>>()
        .map_err(|e| TrackerError::Format(format!("points must be integers: {}", e)))?;

    let count = values.len();
    values.try_into().map_err(|_| {
        TrackerError::Format(format!(
            "expected {} point values, got {}",
            COURSE_COUNT,
            count
        ))
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_record() {
        let record = parse_record("John Smith jsmith@hotmail.com").unwrap();
        assert_eq!(record.first_name, "John");
        assert_eq!(record.last_name, "Smith");
        assert_eq!(record.email, "jsmith@hotmail.com");
    }

    #[test]
    fn test_parse_multi_word_last_name() {
        let record = parse_record("Robert Jemison Van de Graaff robertvdgraaff@mit.edu").unwrap();
        assert_eq!(record.first_name, "Robert");
        assert_eq!(record.last_name, "Jemison Van de Graaff");
        assert_eq!(record.email, "robertvdgraaff@mit.edu");
    }

    #[test]
    fn test_parse_collapses_extra_whitespace() {
        let record = parse_record("  Jean   Du   Pont  jp@x.fr ").unwrap();
        assert_eq!(record.last_name, "Du Pont");
        assert_eq!(record.to_line(), "Jean Du Pont jp@x.fr");
    }

    #[test]
    fn test_parse_too_few_fields() {
        assert!(matches!(parse_record("John jsmith@hotmail.com"), Err(TrackerError::Format(_))));
        assert!(matches!(parse_record(""), Err(TrackerError::Format(_))));
    }

    #[test]
    fn test_parse_points() {
        assert_eq!(parse_points("10 20 30 40").unwrap(), [10, 20, 30, 40]);
        assert_eq!(parse_points("-5 0 0 7").unwrap(), [-5, 0, 0, 7]);
    }

    #[test]
    fn test_parse_points_rejects_bad_input() {
        assert!(matches!(parse_points("10 20 30"), Err(TrackerError::Format(_))));
        assert!(matches!(parse_points("10 20 30 40 50"), Err(TrackerError::Format(_))));
        assert!(matches!(parse_points("10 twenty 30 40"), Err(TrackerError::Format(_))));
        assert!(matches!(parse_points("1.5 2 3 4"), Err(TrackerError::Format(_))));
    }
}
