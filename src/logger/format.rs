//! Console and file formatting
//!
//! Colored, aligned console lines plus a plain timestamped line for the
//! log file. Broken pipes (e.g. `finsight | head`) exit cleanly.

use std::io::{stdout, ErrorKind, Write};

use chrono::Local;
use colored::*;

use super::file::write_to_file;
use super::levels::LogLevel;
use super::tags::LogTag;

const TAG_WIDTH: usize = 9;
const LEVEL_WIDTH: usize = 7;

pub fn format_and_log(tag: LogTag, level: LogLevel, message: &str) {
    let now = Local::now();
    let time = now.format("%H:%M:%S").to_string();

    let console_line = format!(
        "{} [{}] [{}] {}",
        time.dimmed(),
        colorize_tag(&tag),
        colorize_level(level),
        message
    );
    print_stdout_safe(&console_line);

    let file_line = format!(
        "{} [{}] [{}] {}",
        now.format("%Y-%m-%d %H:%M:%S"),
        tag.as_plain_str(),
        level.as_str(),
        message
    );
    write_to_file(&file_line);
}

fn colorize_tag(tag: &LogTag) -> ColoredString {
    let padded = format!("{:<width$}", tag.as_plain_str(), width = TAG_WIDTH);
    match tag {
        LogTag::System => padded.bright_yellow().bold(),
        LogTag::Config => padded.bright_white().bold(),
        LogTag::Webserver => padded.bright_green().bold(),
        LogTag::Api => padded.bright_purple().bold(),
        LogTag::Ai => padded.bright_cyan().bold(),
        LogTag::Store => padded.bright_blue().bold(),
        LogTag::Other(_) => padded.white().bold(),
    }
}

fn colorize_level(level: LogLevel) -> ColoredString {
    let padded = format!("{:<width$}", level.as_str(), width = LEVEL_WIDTH);
    match level {
        LogLevel::Error => padded.bright_red().bold(),
        LogLevel::Warning => padded.bright_yellow().bold(),
        _ => padded.white().bold(),
    }
}

/// Print to stdout but exit quietly on a broken pipe
fn print_stdout_safe(message: &str) {
    if let Err(e) = writeln!(stdout(), "{}", message) {
        if e.kind() == ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
    }
    let _ = stdout().flush();
}
