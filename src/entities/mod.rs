// Entity Models
//
// A student keeps a stable identity (sequential id) while its
// progress values change through point updates.

pub mod student;

pub use student::{GraduationNotice, Student, NOTICE_SUBJECT};
