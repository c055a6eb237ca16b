// 🖥️ Console UI - line-based command loop
//
// Reads one command per line, dispatches it to the roster and renders the
// result as plain text. Generic over the input and output streams so the
// whole session can be driven from tests.

use crate::error::{Field, TrackerError};
use crate::roster::Roster;
use anyhow::Result;
use std::io::{BufRead, Lines, Write};
use tracing::debug;

pub const TITLE: &str = "Learning progress tracker";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    AddStudents,
    List,
    AddPoints,
    Find,
    Statistics,
    Notify,
    Back,
    Empty,
    Unknown,
}

impl Command {
    /// Keywords are matched after trimming and lowercasing
    pub fn parse(line: &str) -> Command {
        match line.trim().to_lowercase().as_str() {
            "exit" => Command::Exit,
            "add students" => Command::AddStudents,
            "list" => Command::List,
            "add points" => Command::AddPoints,
            "find" => Command::Find,
            "statistics" => Command::Statistics,
            "notify" => Command::Notify,
            "back" => Command::Back,
            "" => Command::Empty,
            _ => Command::Unknown,
        }
    }
}

/// Line source plus sink for one session
pub struct Terminal<R: BufRead, W: Write> {
    lines: Lines<R>,
    out: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Terminal {
            lines: input.lines(),
            out,
        }
    }

    /// Next line, `None` at end of input
    pub fn read_line(&mut self) -> Result<Option<String>> {
        match self.lines.next() {
            Some(line) => Ok(Some(line?)),
            None => Ok(None),
        }
    }

    /// Next line unless input ended or the user typed `back`
    fn read_until_back(&mut self) -> Result<Option<String>> {
        Ok(self.read_line()?.filter(|line| line.trim() != "back"))
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

pub struct App {
    pub roster: Roster,
    running: bool,
}

impl App {
    pub fn new(roster: Roster) -> Self {
        App {
            roster,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Route one command to its handler
    pub fn dispatch<R: BufRead, W: Write>(
        &mut self,
        command: Command,
        term: &mut Terminal<R, W>,
    ) -> Result<()> {
        debug!(?command, "dispatch");
        match command {
            Command::Exit => self.exit(term),
            Command::AddStudents => self.add_students(term),
            Command::List => self.list(term),
            Command::AddPoints => self.add_points(term),
            Command::Find => self.find(term),
            Command::Statistics => self.statistics(term),
            Command::Notify => self.notify(term),
            Command::Back => term.say("Enter 'exit' to exit the program."),
            Command::Empty => term.say("No input"),
            Command::Unknown => term.say("Unknown command!"),
        }
    }

    fn exit<R: BufRead, W: Write>(&mut self, term: &mut Terminal<R, W>) -> Result<()> {
        self.running = false;
        term.say("Bye!")
    }

    fn add_students<R: BufRead, W: Write>(&mut self, term: &mut Terminal<R, W>) -> Result<()> {
        term.say("Enter student credentials or 'back' to return:")?;
        let mut added = 0;

        loop {
            let line = match term.read_line()? {
                Some(line) => line,
                None => return Ok(()),
            };
            if line.trim() == "back" {
                break;
            }

            let message = match self.roster.add_student(&line) {
                Ok(_) => {
                    added += 1;
                    "The student has been added."
                }
                Err(TrackerError::Format(_)) | Err(TrackerError::NotFound(_)) => {
                    "Incorrect credentials."
                }
                Err(TrackerError::Validation(Field::FirstName)) => "Incorrect first name.",
                Err(TrackerError::Validation(Field::LastName)) => "Incorrect last name.",
                Err(TrackerError::Validation(Field::Email)) => "Incorrect email.",
                Err(TrackerError::Duplicate(_)) => "This email is already taken.",
            };
            term.say(message)?;
        }

        term.say(&format!("Total {} students have been added.", added))
    }

    fn list<R: BufRead, W: Write>(&mut self, term: &mut Terminal<R, W>) -> Result<()> {
        term.say("Students:")?;
        if self.roster.is_empty() {
            return term.say("No students found");
        }
        for id in self.roster.ids() {
            term.say(&id.to_string())?;
        }
        Ok(())
    }

    fn add_points<R: BufRead, W: Write>(&mut self, term: &mut Terminal<R, W>) -> Result<()> {
        term.say("Enter an id and points or 'back' to return:")?;

        while let Some(line) = term.read_until_back()? {
            let mut fields = line.split_whitespace();
            if line.split_whitespace().count() != 5 {
                term.say("Incorrect points format")?;
                continue;
            }

            let raw_id = fields.next().unwrap_or_default();
            let points = fields.collect::<Vec<_>>().join(" ");
            let result = match raw_id.parse::<u64>() {
                Ok(id) => self.roster.apply_points(id, &points),
                Err(_) => Err(TrackerError::NotFound(raw_id.to_string())),
            };

            match result {
                Ok(()) => term.say("Points updated.")?,
                Err(TrackerError::NotFound(_)) => {
                    term.say(&format!("No student is found for id={}.", raw_id))?
                }
                Err(_) => term.say("Incorrect points format")?,
            }
        }
        Ok(())
    }

    fn find<R: BufRead, W: Write>(&mut self, term: &mut Terminal<R, W>) -> Result<()> {
        term.say("Enter an id or 'back' to return:")?;

        while let Some(line) = term.read_until_back()? {
            let raw_id = line.trim();
            let found = raw_id
                .parse::<u64>()
                .ok()
                .and_then(|id| self.roster.find(id).ok());
            match found {
                Some(student) => term.say(&student.progress_line())?,
                None => term.say(&format!("No student is found for id={}.", raw_id))?,
            }
        }
        Ok(())
    }

    fn statistics<R: BufRead, W: Write>(&mut self, term: &mut Terminal<R, W>) -> Result<()> {
        term.say("Type the name of a course to see details or 'back' to quit:")?;
        let stats = self.roster.statistics();
        for line in stats.summary().lines() {
            term.say(&line)?;
        }

        while let Some(line) = term.read_until_back()? {
            match stats.leaderboard_for(&line) {
                Ok((course, board)) => {
                    term.say(course.title())?;
                    term.say(crate::statistics::LEADERBOARD_HEADER)?;
                    for entry in board {
                        term.say(&entry.row())?;
                    }
                }
                Err(_) => term.say("Unknown course.")?,
            }
        }
        Ok(())
    }

    fn notify<R: BufRead, W: Write>(&mut self, term: &mut Terminal<R, W>) -> Result<()> {
        let report = self.roster.notify_all();
        for notice in &report.notices {
            term.say(&notice.to_string())?;
        }
        term.say(&format!(
            "Total {} students have been notified.",
            report.students_notified
        ))
    }
}

/// Run the command loop until `exit` or end of input
pub fn run_ui<R: BufRead, W: Write>(app: &mut App, term: &mut Terminal<R, W>) -> Result<()> {
    term.say(TITLE)?;

    while app.is_running() {
        let line = match term.read_line()? {
            Some(line) => line,
            None => break,
        };
        app.dispatch(Command::parse(&line), term)?;
    }

    Ok(())
}
