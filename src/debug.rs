// Logging setup for neat-pong
// Training logs go to stderr; interactive play logs to a file so the raw
// terminal stays readable. --debug raises the level from INFO to DEBUG.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;

use tracing::Level;

/// Where log lines are written
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
}

pub fn level(debug: bool) -> Level {
    if debug {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Install the global tracing subscriber
///
/// # Behavior
/// - `Stderr`: plain formatted lines on stderr
/// - `File`: creates/truncates the file, writes a header, then appends log lines
///   without ANSI colours
pub fn init(debug: bool, target: LogTarget<'_>) -> io::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(level(debug))
        .with_target(false);

    let installed = match target {
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::File(path) => {
            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)?;

            writeln!(file, "=== neat-pong log ===")?;
            writeln!(file, "Session started: {:?}", SystemTime::now())?;
            writeln!(file, "To monitor: tail -f {}", path.display())?;
            writeln!(file, "========================================\n")?;

            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    // A subscriber may already be set (tests, repeated init); keep the first one
    let _ = installed;
    Ok(())
}
