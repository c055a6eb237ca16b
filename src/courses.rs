// 📚 Course Catalog - fixed, process-wide
// Four courses in display order, each with its graduation threshold.

use serde::{Deserialize, Serialize};

pub const COURSE_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Course {
    Python,
    Dsa,
    Databases,
    Flask,
}

impl Course {
    /// Catalog order. Every per-course loop in the crate walks this slice.
    pub const ALL: [Course; COURSE_COUNT] = [Course::Python, Course::Dsa, Course::Databases, Course::Flask];

    /// Lowercase key, as typed by users and shown in `find`
    pub fn key(&self) -> &'static str {
        match self {
            Course::Python => "python",
            Course::Dsa => "dsa",
            Course::Databases => "databases",
            Course::Flask => "flask",
        }
    }

    /// Title-cased name used in statistics and notifications
    pub fn title(&self) -> &'static str {
        match self {
            Course::Python => "Python",
            Course::Dsa => "Dsa",
            Course::Databases => "Databases",
            Course::Flask => "Flask",
        }
    }

    /// Points needed to complete the course
    pub fn graduation_threshold(&self) -> i64 {
        match self {
            Course::Python => 600,
            Course::Dsa => 400,
            Course::Databases => 480,
            Course::Flask => 550,
        }
    }

    /// Case-insensitive lookup by key
    pub fn from_name(name: &str) -> Option<Course> {
        let lower = name.trim().to_lowercase();
        Course::ALL.iter().copied().find(|c| c.key() == lower)
    }

    /// Position in the catalog, used to index per-course arrays
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
