// ⚙️ Configuration - command-line flags
//
// Works with zero arguments; every flag is optional.

use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: progress-tracker [OPTIONS]

Options:
  --import <path>   Register students from a CSV file (first_name,last_name,email)
  --debug           Verbose logging on stderr
  --help            Print this help";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// CSV file to pre-load students from
    pub import_file: Option<PathBuf>,

    pub debug: bool,

    pub show_help: bool,
}

impl Config {
    /// Parse flags, program name excluded
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut config = Config::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--import" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--import requires a path".to_string());
                    }
                    config.import_file = Some(PathBuf::from(&args[i]));
                }
                "--debug" => config.debug = true,
                "--help" | "-h" => config.show_help = true,
                other => return Err(format!("unknown argument: {}", other)),
            }
            i += 1;
        }

        Ok(config)
    }

    /// Filter directive for the tracing subscriber
    pub fn log_directive(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "warn"
        }
    }
}
