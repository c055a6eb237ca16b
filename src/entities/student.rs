// 🎓 Student Entity - identity + per-course progress
//
// Identity: sequential `id`, assigned by the roster, never changes.
// Values: progress and submission counters, mutated only through
// `apply_points` and `notify`.

use crate::courses::{Course, COURSE_COUNT};
use crate::error::{Result, TrackerError};
use crate::parser::{parse_points, PointVector, StudentRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

// ============================================================================
// GRADUATION NOTICE
// ============================================================================

pub const NOTICE_SUBJECT: &str = "Your Learning Progress";

/// The email a student receives on completing a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraduationNotice {
    pub student_id: u64,
    pub to: String,
    pub full_name: String,
    pub course: Course,
    pub sent_at: DateTime<Utc>,
}

impl std::fmt::Display for GraduationNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "To: {}", self.to)?;
        writeln!(f, "Re: {}", NOTICE_SUBJECT)?;
        write!(
            f,
            "Hello, {}! You have accomplished our {} course!",
            self.full_name,
            self.course.title()
        )
    }
}

// ============================================================================
// STUDENT ENTITY
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    /// Stable identity, unique across the roster
    pub id: u64,

    pub first_name: String,
    pub last_name: String,
    pub email: String,

    /// Point total per course. Negative deltas are accepted, so this can drop below zero.
    pub progress: BTreeMap<Course, i64>,

    /// Number of point updates per course, zero deltas included
    pub submissions: BTreeMap<Course, u64>,

    /// Set once any graduation email went out. Never reset.
    pub notified: bool,

    pub registered_at: DateTime<Utc>,
}

impl Student {
    /// Build a student from an already-validated record
    pub fn new(id: u64, record: StudentRecord) -> Self {
        Student {
            id,
            first_name: record.first_name,
            last_name: record.last_name,
            email: record.email,
            progress: Course::ALL.iter().map(|&c| (c, 0)).collect(),
            submissions: Course::ALL.iter().map(|&c| (c, 0)).collect(),
            notified: false,
            registered_at: Utc::now(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn points(&self, course: Course) -> i64 {
        self.progress.get(&course).copied().unwrap_or(0)
    }

    pub fn submission_count(&self, course: Course) -> u64 {
        self.submissions.get(&course).copied().unwrap_or(0)
    }

    /// Apply one delta per course in catalog order. Every course's
    /// submission counter moves, even for a zero delta. New totals are all
    /// computed first, so an overflowing delta leaves the student unchanged.
    pub fn apply_points(&mut self, points: PointVector) -> Result<()> {
        let mut totals = [0i64; COURSE_COUNT];
        for (i, (course, value)) in Course::ALL.iter().zip(points).enumerate() {
            totals[i] = self.points(*course).checked_add(value).ok_or_else(|| {
                TrackerError::Format(format!("{} points out of range", course))
            })?;
        }

        for (course, total) in Course::ALL.iter().zip(totals) {
            self.progress.insert(*course, total);
            *self.submissions.entry(*course).or_insert(0) += 1;
        }
        debug!(student_id = self.id, ?points, "points applied");
        Ok(())
    }

    /// Parse then apply. On a format error nothing changes.
    pub fn add_points(&mut self, text: &str) -> Result<()> {
        let points = parse_points(text)?;
        self.apply_points(points)
    }

    pub fn is_enrolled(&self, course: Course) -> bool {
        self.points(course) > 0
    }

    pub fn is_graduation_candidate(&self, course: Course) -> bool {
        self.points(course) >= course.graduation_threshold()
    }

    /// Share of the graduation threshold reached, in percent
    pub fn completion_percent(&self, course: Course) -> f64 {
        self.points(course) as f64 / course.graduation_threshold() as f64 * 100.0
    }

    /// Produce a notice if the course is completed and raise the
    /// student-wide `notified` flag. Fires every time it is called on a
    /// candidate course.
    pub fn notify(&mut self, course: Course) -> Option<GraduationNotice> {
        if !self.is_graduation_candidate(course) {
            return None;
        }

        self.notified = true;
        Some(GraduationNotice {
            student_id: self.id,
            to: self.email.clone(),
            full_name: self.full_name(),
            course,
            sent_at: Utc::now(),
        })
    }

    /// `<id> points: python=..; dsa=..; databases=..; flask=..`
    pub fn progress_line(&self) -> String {
        let parts: Vec<String> = Course::ALL
            .iter()
            .map(|c| format!("{}={}", c.key(), self.points(*c)))
            .collect();
        format!("{} points: {}", self.id, parts.join("; "))
    }
}

// ============================================================================
// TESTS
// ============================================================================
