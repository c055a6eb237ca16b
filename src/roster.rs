// 🗂️ Roster - the in-memory student registry
//
// Owns every Student in insertion order, an email index for duplicate
// checks, and the id sequence. Students are appended, never removed.

use crate::entities::{GraduationNotice, Student};
use crate::courses::Course;
use crate::error::{Result, TrackerError};
use crate::parser::{parse_record, StudentRecord};
use crate::statistics::StatisticsEngine;
use crate::validation::{validate_record, RegisteredEmails};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

// ============================================================================
// ID SEQUENCE
// ============================================================================

/// Monotonic id generator. Ids start at 1 and are never handed out twice.
#[derive(Debug, Clone, Serialize)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        IdSequence { next: first }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// NOTIFY REPORT
// ============================================================================

#[derive(Debug, Clone, Default, Serialize)]
pub struct NotifyReport {
    /// Every message sent during the pass, in roster then catalog order
    pub notices: Vec<GraduationNotice>,

    /// Students with at least one message in this pass
    pub students_notified: usize,
}

// ============================================================================
// ROSTER
// ============================================================================

#[derive(Debug, Clone, Default, Serialize)]
pub struct Roster {
    students: Vec<Student>,

    /// email -> position in `students`
    #[serde(skip)]
    email_index: HashMap<String, usize>,

    #[serde(skip)]
    ids: IdSequence,
}

impl RegisteredEmails for Roster {
    fn contains_email(&self, email: &str) -> bool {
        self.email_index.contains_key(email)
    }
}

impl Roster {
    pub fn new() -> Self {
        Self::with_sequence(IdSequence::new())
    }

    /// Use a caller-supplied sequence, e.g. to continue numbering
    pub fn with_sequence(ids: IdSequence) -> Self {
        Roster {
            students: Vec::new(),
            email_index: HashMap::new(),
            ids,
        }
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// All students in registration order
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn ids(&self) -> Vec<u64> {
        self.students.iter().map(|s| s.id).collect()
    }

    /// Validate a parsed record against the current roster and store it.
    /// Returns the new student's id.
    pub fn create_student(&mut self, record: StudentRecord) -> Result<u64> {
        validate_record(&record, &*self)?;

        let id = self.ids.next_id();
        let student = Student::new(id, record);
        info!(student_id = id, email = %student.email, "student registered");

        self.email_index.insert(student.email.clone(), self.students.len());
        self.students.push(student);
        Ok(id)
    }

    /// Parse, validate and store a raw credentials line
    pub fn add_student(&mut self, line: &str) -> Result<u64> {
        let record = parse_record(line)?;
        self.create_student(record)
    }

    pub fn find(&self, id: u64) -> Result<&Student> {
        self.students
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| TrackerError::NotFound(format!("student id={}", id)))
    }

    fn find_mut(&mut self, id: u64) -> Result<&mut Student> {
        self.students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| TrackerError::NotFound(format!("student id={}", id)))
    }

    pub fn find_by_email(&self, email: &str) -> Option<&Student> {
        self.email_index.get(email).and_then(|&i| self.students.get(i))
    }

    /// Apply a four-integer points line to one student. Unknown ids and
    /// malformed points leave the roster unchanged.
    pub fn apply_points(&mut self, id: u64, points: &str) -> Result<()> {
        self.find_mut(id)?.add_points(points)
    }

    /// Scan students not yet notified and send one notice per completed
    /// course. A student already flagged is skipped on later passes even if
    /// they complete another course.
    pub fn notify_all(&mut self) -> NotifyReport {
        let mut report = NotifyReport::default();

        for student in self.students.iter_mut().filter(|s| !s.notified) {
            let mut triggered = false;
            for course in Course::ALL {
                if let Some(notice) = student.notify(course) {
                    debug!(student_id = student.id, course = %course, "graduation notice sent");
                    report.notices.push(notice);
                    triggered = true;
                }
            }
            if triggered {
                report.students_notified += 1;
            }
        }

        info!(students = report.students_notified, "notify pass complete");
        report
    }

    pub fn statistics(&self) -> StatisticsEngine<'_> {
        StatisticsEngine::new(&self.students)
    }

    /// Pretty JSON snapshot of every student
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// ============================================================================
// TESTS
// ============================================================================
