// 📊 Statistics Engine - aggregates over the live roster
//
// Per-course counters, three extreme-course rankings (popularity,
// activity, difficulty) and the per-course leaderboard.

use crate::courses::Course;
use crate::entities::Student;
use crate::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};

/// Rendered in place of a course list when a ranking does not apply
pub const NOT_APPLICABLE: &str = "n/a";

// ============================================================================
// COURSE RANKING
// ============================================================================

/// Courses tied at the top and at the bottom of one metric.
/// `None` means "not applicable".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRanking {
    pub top: Option<Vec<Course>>,
    pub bottom: Option<Vec<Course>>,
}

impl CourseRanking {
    pub fn not_applicable() -> Self {
        CourseRanking {
            top: None,
            bottom: None,
        }
    }

    /// Rank courses by a metric. Courses whose value is `None` take no part.
    /// A top value of zero (or no values at all) makes both ends
    /// not applicable. The bottom is chosen only among courses outside the
    /// top set, so when every course ties for the top it is not applicable.
    pub fn from_values(values: &[(Course, Option<f64>)]) -> Self {
        let present: Vec<(Course, f64)> = values
            .iter()
            .filter_map(|&(course, value)| value.map(|v| (course, v)))
            .collect();

        let max = match present.iter().map(|&(_, v)| v).reduce(f64::max) {
            Some(max) if max != 0.0 => max,
            _ => return Self::not_applicable(),
        };

        let top: Vec<Course> = present
            .iter()
            .filter(|&&(_, v)| v == max)
            .map(|&(c, _)| c)
            .collect();

        let rest: Vec<(Course, f64)> = present
            .iter()
            .copied()
            .filter(|(c, _)| !top.contains(c))
            .collect();

        let bottom = rest.iter().map(|&(_, v)| v).reduce(f64::min).map(|min| {
            rest.iter()
                .filter(|&&(_, v)| v == min)
                .map(|&(c, _)| c)
                .collect()
        });

        CourseRanking {
            top: Some(top),
            bottom,
        }
    }

    pub fn top_label(&self) -> String {
        format_courses(self.top.as_deref())
    }

    pub fn bottom_label(&self) -> String {
        format_courses(self.bottom.as_deref())
    }
}

/// "Python, Dsa" or "n/a"
pub fn format_courses(courses: Option<&[Course]>) -> String {
    match courses {
        Some(list) if !list.is_empty() => list
            .iter()
            .map(|c| c.title())
            .collect::<Vec<_>>()
            .join(", "),
        _ => NOT_APPLICABLE.to_string(),
    }
}

/// The three rankings shown on the statistics screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub popularity: CourseRanking,
    pub activity: CourseRanking,
    pub difficulty: CourseRanking,
}

impl CourseSummary {
    /// Six `Label: value` lines
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Most popular: {}", self.popularity.top_label()),
            format!("Least popular: {}", self.popularity.bottom_label()),
            format!("Highest activity: {}", self.activity.top_label()),
            format!("Lowest activity: {}", self.activity.bottom_label()),
            format!("Easiest course: {}", self.difficulty.top_label()),
            format!("Hardest course: {}", self.difficulty.bottom_label()),
        ]
    }
}

// ============================================================================
// LEADERBOARD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: u64,
    pub points: i64,
    /// Percent of the graduation threshold
    pub completed: f64,
}

impl LeaderboardEntry {
    /// `id    points    completed%`, percent with one decimal
    pub fn row(&self) -> String {
        format!("{:<6}{:<10}{:.1}%", self.id, self.points, self.completed)
    }
}

pub const LEADERBOARD_HEADER: &str = "id    points    completed";

// ============================================================================
// STATISTICS ENGINE
// ============================================================================

pub struct StatisticsEngine<'a> {
    students: &'a [Student],
}

impl<'a> StatisticsEngine<'a> {
    pub fn new(students: &'a [Student]) -> Self {
        StatisticsEngine { students }
    }

    /// Students with a positive point total in the course
    pub fn count_enrolled(&self, course: Course) -> usize {
        self.students.iter().filter(|s| s.is_enrolled(course)).count()
    }

    pub fn count_submissions(&self, course: Course) -> u64 {
        self.students.iter().map(|s| s.submission_count(course)).sum()
    }

    /// Widened so a roster of near-limit totals cannot overflow
    pub fn total_points(&self, course: Course) -> i128 {
        self.students.iter().map(|s| s.points(course) as i128).sum()
    }

    /// Points per submission. `None` when either total is zero.
    pub fn average_points(&self, course: Course) -> Option<f64> {
        let submissions = self.count_submissions(course);
        let total = self.total_points(course);
        if submissions == 0 || total == 0 {
            return None;
        }
        Some(total as f64 / submissions as f64)
    }

    pub fn popularity(&self) -> CourseRanking {
        self.rank_by(|c| Some(self.count_enrolled(c) as f64))
    }

    pub fn activity(&self) -> CourseRanking {
        self.rank_by(|c| Some(self.count_submissions(c) as f64))
    }

    /// Top is the easiest course (highest average), bottom the hardest
    pub fn difficulty(&self) -> CourseRanking {
        self.rank_by(|c| self.average_points(c))
    }

    fn rank_by<F>(&self, metric: F) -> CourseRanking
    where
        F: Fn(Course) -> Option<f64>,
    {
        let values: Vec<(Course, Option<f64>)> =
            Course::ALL.iter().map(|&c| (c, metric(c))).collect();
        CourseRanking::from_values(&values)
    }

    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            popularity: self.popularity(),
            activity: self.activity(),
            difficulty: self.difficulty(),
        }
    }

    /// Enrolled students by points descending. On a tie the higher
    /// (more recently registered) id ranks first.
    pub fn leaderboard(&self, course: Course) -> Vec<LeaderboardEntry> {
        let mut enrolled: Vec<&Student> = self
            .students
            .iter()
            .filter(|s| s.is_enrolled(course))
            .collect();

        enrolled.sort_by(|a, b| {
            b.points(course)
                .cmp(&a.points(course))
                .then(b.id.cmp(&a.id))
        });

        enrolled
            .into_iter()
            .map(|s| LeaderboardEntry {
                id: s.id,
                points: s.points(course),
                completed: s.completion_percent(course),
            })
            .collect()
    }

    /// Leaderboard looked up by user-typed course name
    pub fn leaderboard_for(&self, name: &str) -> Result<(Course, Vec<LeaderboardEntry>)> {
        let course = Course::from_name(name)
            .ok_or_else(|| TrackerError::NotFound(format!("course {}", name.trim())))?;
        Ok((course, self.leaderboard(course)))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Roster;

    fn roster_with(lines: &[&str]) -> Roster {
        let mut roster = Roster::new();
        for (i, line) in lines.iter().enumerate() {
            roster
                .add_student(&format!("Student Number{} s{}@mail.com", letters(i), i))
                .unwrap();
            if !line.is_empty() {
                roster.apply_points(i as u64 + 1, line).unwrap();
            }
        }
        roster
    }

    // Names may not contain digits
    fn letters(i: usize) -> String {
        ((b'a' + i as u8) as char).to_string().repeat(2)
    }

    #[test]
    fn test_empty_roster_is_not_applicable() {
        let roster = Roster::new();
        let stats = roster.statistics();
        let summary = stats.summary();
        assert_eq!(summary.popularity, CourseRanking::not_applicable());
        assert_eq!(summary.activity, CourseRanking::not_applicable());
        assert_eq!(summary.difficulty, CourseRanking::not_applicable());
        assert!(summary.lines().iter().all(|l| l.ends_with(": n/a")));
    }

    #[test]
    fn test_students_without_points_are_not_applicable() {
        let roster = roster_with(&["", ""]);
        let summary = roster.statistics().summary();
        assert_eq!(summary.popularity.top_label(), "n/a");
        assert_eq!(summary.activity.bottom_label(), "n/a");
        assert_eq!(summary.difficulty.top_label(), "n/a");
    }

    #[test]
    fn test_counters() {
        let roster = roster_with(&["10 0 0 0", "20 0 0 5", "0 0 0 0"]);
        let stats = roster.statistics();
        assert_eq!(stats.count_enrolled(Course::Python), 2);
        assert_eq!(stats.count_enrolled(Course::Dsa), 0);
        assert_eq!(stats.count_submissions(Course::Dsa), 3);
        assert_eq!(stats.total_points(Course::Python), 30);
        assert_eq!(stats.average_points(Course::Python), Some(10.0));
        assert_eq!(stats.average_points(Course::Dsa), None);
    }

    #[test]
    fn test_totals_near_i64_limit() {
        let max = i64::MAX.to_string();
        let line = format!("{} 0 0 0", max);
        let roster = roster_with(&[line.as_str(), line.as_str()]);
        let stats = roster.statistics();
        assert_eq!(stats.total_points(Course::Python), 2 * i64::MAX as i128);
        assert_eq!(stats.summary().difficulty.top_label(), "Python");
    }

    #[test]
    fn test_average_without_submissions_is_none() {
        let roster = roster_with(&[""]);
        assert_eq!(roster.statistics().average_points(Course::Flask), None);
    }

    #[test]
    fn test_popularity_ties_and_remainder() {
        let roster = roster_with(&["10 10 0 0", "5 5 5 0"]);
        let popularity = roster.statistics().popularity();
        assert_eq!(popularity.top_label(), "Python, Dsa");
        assert_eq!(popularity.bottom_label(), "Flask");
    }

    #[test]
    fn test_all_tied_leaves_bottom_not_applicable() {
        let roster = roster_with(&["1 1 1 1"]);
        let stats = roster.statistics();
        assert_eq!(stats.popularity().top_label(), "Python, Dsa, Databases, Flask");
        assert_eq!(stats.popularity().bottom_label(), "n/a");
        // Every course got one submission
        assert_eq!(stats.activity().bottom_label(), "n/a");
    }

    #[test]
    fn test_difficulty_ignores_untouched_courses() {
        // python avg 15, dsa avg 3, databases and flask have no points
        let roster = roster_with(&["20 4 0 0", "10 2 0 0"]);
        let difficulty = roster.statistics().difficulty();
        assert_eq!(difficulty.top_label(), "Python");
        assert_eq!(difficulty.bottom_label(), "Dsa");
    }

    #[test]
    fn test_difficulty_single_course() {
        let roster = roster_with(&["0 0 10 0"]);
        let difficulty = roster.statistics().difficulty();
        assert_eq!(difficulty.top_label(), "Databases");
        assert_eq!(difficulty.bottom_label(), "n/a");
    }

    #[test]
    fn test_activity_counts_submissions() {
        let mut roster = roster_with(&["1 0 0 0"]);
        roster.apply_points(1, "0 0 0 0").unwrap();
        let activity = roster.statistics().activity();
        // All courses got two submissions each
        assert_eq!(activity.top_label(), "Python, Dsa, Databases, Flask");
    }

    #[test]
    fn test_leaderboard_tie_breaks_by_higher_id() {
        let mut roster = Roster::new();
        for i in 0..7 {
            roster
                .add_student(&format!("Student Number{} s{}@mail.com", letters(i), i))
                .unwrap();
        }
        roster.apply_points(3, "0 400 0 0").unwrap();
        roster.apply_points(7, "0 400 0 0").unwrap();
        roster.apply_points(1, "0 100 0 0").unwrap();

        let board = roster.statistics().leaderboard(Course::Dsa);
        let ids: Vec<u64> = board.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![7, 3, 1]);
        assert_eq!(board[0].row(), "7     400       100.0%");
        assert_eq!(board[2].row(), "1     100       25.0%");
    }

    #[test]
    fn test_leaderboard_skips_unenrolled() {
        let roster = roster_with(&["0 0 0 0", "60 0 0 0"]);
        let board = roster.statistics().leaderboard(Course::Python);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].id, 2);
        assert_eq!(board[0].row(), "2     60        10.0%");
    }

    #[test]
    fn test_leaderboard_for_unknown_course() {
        let roster = Roster::new();
        let stats = roster.statistics();
        assert!(matches!(stats.leaderboard_for("rust"), Err(TrackerError::NotFound(_))));
        let (course, board) = stats.leaderboard_for("Flask").unwrap();
        assert_eq!(course, Course::Flask);
        assert!(board.is_empty());
    }
}
