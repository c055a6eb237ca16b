use anyhow::{anyhow, Result};
use std::env;
use std::io;
use tracing::info;
use tracing_subscriber::EnvFilter;

use progress_tracker::config::USAGE;
use progress_tracker::{load_students, run_ui, App, Config, Roster, Terminal};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let config = Config::from_args(&args).map_err(|e| anyhow!("{}\n\n{}", e, USAGE))?;

    if config.show_help {
        println!("{}", USAGE);
        return Ok(());
    }

    // Logs go to stderr so stdout stays a clean transcript
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    info!(version = progress_tracker::VERSION, "starting");

    let mut roster = Roster::new();
    if let Some(path) = &config.import_file {
        let summary = load_students(path, &mut roster)?;
        eprintln!("{}", summary.summary());
    }

    let mut app = App::new(roster);
    let stdin = io::stdin();
    let mut term = Terminal::new(stdin.lock(), io::stdout());
    run_ui(&mut app, &mut term)?;

    info!(students = app.roster.len(), "session ended");
    Ok(())
}
