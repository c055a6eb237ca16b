// 📥 CSV Import - bulk registration before the command loop starts
//
// Each row goes through the same parse -> validate -> create path as a
// typed credentials line. Bad rows are reported, not fatal.

use crate::parser::StudentRecord;
use crate::roster::Roster;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// One CSV row: `first_name,last_name,email`
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRow {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RejectedRow {
    /// 1-based data row number (header excluded)
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    pub added: Vec<u64>,
    pub rejected: Vec<RejectedRow>,
}

impl ImportSummary {
    pub fn summary(&self) -> String {
        format!(
            "Imported {} students ({} rows rejected)",
            self.added.len(),
            self.rejected.len()
        )
    }
}

pub fn load_students(csv_path: &Path, roster: &mut Roster) -> Result<ImportSummary> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file: {:?}", csv_path))?;
    import_from_reader(file, roster)
}

pub fn import_from_reader<R: Read>(reader: R, roster: &mut Roster) -> Result<ImportSummary> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut summary = ImportSummary::default();

    for (i, result) in rdr.deserialize::<ImportRow>().enumerate() {
        let row_number = i + 1;
        let row = result.context("Failed to deserialize student row")?;

        // Joined and re-split exactly like a typed credentials line
        let line = StudentRecord::new(row.first_name, row.last_name, row.email).to_line();

        match roster.add_student(&line) {
            Ok(id) => summary.added.push(id),
            Err(e) => {
                warn!(row = row_number, error = %e, "import row rejected");
                summary.rejected.push(RejectedRow {
                    row: row_number,
                    reason: e.to_string(),
                });
            }
        }
    }

    info!("{}", summary.summary());
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_valid_and_invalid_rows() {
        let data = "\
first_name,last_name,email
John,Smith,jsmith@hotmail.com
Robert,Jemison Van de Graaff,robertvdgraaff@mit.edu
J,Doe,jdoe@mail.com
Jane,Doe,jsmith@hotmail.com
";
        let mut roster = Roster::new();
        let summary = import_from_reader(data.as_bytes(), &mut roster).unwrap();

        assert_eq!(summary.added, vec![1, 2]);
        assert_eq!(summary.rejected.len(), 2);
        assert_eq!(summary.rejected[0].row, 3);
        assert_eq!(summary.rejected[0].reason, "incorrect first name");
        assert!(summary.rejected[1].reason.contains("already taken"));
        assert_eq!(roster.find(2).unwrap().last_name, "Jemison Van de Graaff");
        assert_eq!(summary.summary(), "Imported 2 students (2 rows rejected)");
    }

    #[test]
    fn test_import_splits_rows_like_typed_lines() {
        let data = "\
first_name,last_name,email
Mary Ann,Smith,ma@x.com
Jo,,jo@x.com
";
        let mut roster = Roster::new();
        let summary = import_from_reader(data.as_bytes(), &mut roster).unwrap();

        assert_eq!(summary.added, vec![1]);
        let mary = roster.find(1).unwrap();
        assert_eq!(mary.first_name, "Mary");
        assert_eq!(mary.last_name, "Ann Smith");

        // Empty last name leaves too few fields
        assert_eq!(summary.rejected[0].row, 2);
        assert!(summary.rejected[0].reason.starts_with("format error"));
    }

    #[test]
    fn test_import_missing_column_is_error() {
        let data = "first_name,email\nJohn,jsmith@hotmail.com\n";
        let mut roster = Roster::new();
        assert!(import_from_reader(data.as_bytes(), &mut roster).is_err());
        assert!(roster.is_empty());
    }

    #[test]
    fn test_load_students_missing_file() {
        let mut roster = Roster::new();
        let result = load_students(Path::new("/nonexistent/students.csv"), &mut roster);
        assert!(result.is_err());
    }
}
