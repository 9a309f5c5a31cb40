//! Session logger — writes log output to a single file in the OS data directory.
//!
//! The file is truncated at each launch, so it only holds the most recent
//! session (window or headless run).
//!
//! Log location:
//!   Windows:  `%APPDATA%\PixelShift\pixelshift.log`
//!   Linux:    `~/.local/share/PixelShift/pixelshift.log`
//!   macOS:    `~/Library/Application Support/PixelShift/pixelshift.log`
//!
//! Use the `log_info!` / `log_warn!` / `log_err!` macros anywhere in the
//! crate. Before [`init`] runs they do nothing, which keeps unit tests quiet.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

const APP_DIR: &str = "PixelShift";
const LOG_FILE_NAME: &str = "pixelshift.log";

static LOG_FILE: OnceLock<Mutex<File>> = OnceLock::new();
static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Returns the path to the current session log file.
pub fn log_path() -> Option<&'static PathBuf> {
    LOG_PATH.get()
}

/// Write a line to the session log. I/O errors are ignored.
pub fn write_line(line: &str) {
    if let Some(mutex) = LOG_FILE.get()
        && let Ok(mut file) = mutex.lock()
    {
        let _ = writeln!(file, "{}", line);
    }
}

/// Write a timestamped, level-tagged line to the session log.
pub fn write(level: &str, msg: &str) {
    let ts = timestamp();
    write_line(&format!("[{}] [{}] {}", ts, level, msg));
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logger::write("INFO", &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logger::write("WARN", &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_err {
    ($($arg:tt)*) => {
        $crate::logger::write("ERROR", &format!($($arg)*))
    };
}

/// Initialise the session logger in the platform data directory.
pub fn init() {
    init_at(&log_file_path());
}

/// Initialise the session logger at `path`. Only the first call in a
/// process takes effect.
///
/// * Creates (or truncates) the log file.
/// * Installs a panic hook that writes the panic message to the log before
///   running the previous handler.
pub fn init_at(path: &Path) {
    if LOG_FILE.get().is_some() {
        return;
    }

    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path);

    match file {
        Ok(f) => {
            let _ = LOG_PATH.set(path.to_path_buf());
            let _ = LOG_FILE.set(Mutex::new(f));
        }
        Err(e) => {
            // Not fatal: the app runs without a log.
            eprintln!("[logger] Failed to open log file {:?}: {}", path, e);
            return;
        }
    }

    write_line(&format!(
        "=== PixelShift {} session started (unix {}) ===",
        env!("CARGO_PKG_VERSION"),
        unix_seconds().unwrap_or(0)
    ));
    write_line(&format!("Log file: {}", path.display()));
    write_line("");

    let prev = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        write_line(&format!("[{}] [PANIC] {}", timestamp(), info));
        prev(info);
    }));
}

fn log_file_path() -> PathBuf {
    data_dir().join(APP_DIR).join(LOG_FILE_NAME)
}

/// Platform data directory (without the app sub-folder).
fn data_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata);
        }
    }
    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support");
        }
    }
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    PathBuf::from(".")
}

fn unix_seconds() -> Option<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
}

/// HH:MM:SS (UTC) within the current day.
fn timestamp() -> String {
    match unix_seconds() {
        Some(secs) => format_hms(secs),
        None => "??:??:??".to_string(),
    }
}

fn format_hms(secs: u64) -> String {
    let h = (secs % 86400) / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hms_wraps_at_midnight() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(86_399), "23:59:59");
        assert_eq!(format_hms(86_400 + 3_661), "01:01:01");
    }

    #[test]
    fn writes_header_and_tagged_lines() {
        let dir = std::env::temp_dir().join(format!("pixelshift_logger_{}", std::process::id()));
        let path = dir.join(LOG_FILE_NAME);
        init_at(&path);
        // Another test may have initialised first; only check our own file.
        if log_path() != Some(&path) {
            let _ = fs::remove_dir_all(&dir);
            return;
        }
        log_info!("hello {}", 42);
        let text = std::fs::read_to_string(&path);
        let _ = fs::remove_dir_all(&dir);

        let text = text.unwrap();
        assert!(text.starts_with("=== PixelShift"));
        assert!(text.contains("[INFO] hello 42"));
    }
}
