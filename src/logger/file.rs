//! Log file persistence
//!
//! One file per process start under the logs directory, buffered writes.
//! File logging is best-effort: failures never interrupt the application.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

use chrono::Local;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use crate::paths;

static LOG_FILE: OnceCell<Mutex<BufWriter<File>>> = OnceCell::new();

/// Open the log file for this run (`logs/finsight-YYYYMMDD-HHMMSS.log`)
pub fn init_file_logging() {
    let dir = paths::logs_dir();
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }

    let name = format!("finsight-{}.log", Local::now().format("%Y%m%d-%H%M%S"));
    let path = dir.join(name);

    if let Ok(file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = LOG_FILE.set(Mutex::new(BufWriter::new(file)));
    }
}

pub fn write_to_file(line: &str) {
    if let Some(writer) = LOG_FILE.get() {
        let mut writer = writer.lock();
        let _ = writeln!(writer, "{}", line);
    }
}

pub fn flush_file_logging() {
    if let Some(writer) = LOG_FILE.get() {
        let _ = writer.lock().flush();
    }
}
