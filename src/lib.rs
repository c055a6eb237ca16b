// Learning Progress Tracker - Core Library
// Exposes the validation + aggregation engine for the CLI and tests

pub mod error;
pub mod courses;
pub mod parser;
pub mod validation;
pub mod entities;
pub mod roster;
pub mod statistics;
pub mod import;
pub mod config;
pub mod ui;

// Re-export commonly used types
pub use error::{Field, Result, TrackerError};
pub use courses::{Course, COURSE_COUNT};
pub use parser::{parse_points, parse_record, PointVector, StudentRecord};
pub use validation::{validate_record, EmailValidator, NameValidator, RegisteredEmails};
pub use entities::{GraduationNotice, Student};
pub use roster::{IdSequence, NotifyReport, Roster};
pub use statistics::{
    CourseRanking, CourseSummary, LeaderboardEntry, StatisticsEngine, NOT_APPLICABLE,
};
pub use import::{load_students, ImportSummary};
pub use config::Config;
pub use ui::{run_ui, App, Command, Terminal};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
