//! Structured terminal logging with box-drawing decoration.
//!
//! Every line goes through [`Log::emit`], which adds the simulated-time prefix
//! (while an animation is running) and routes the text either to stdout or,
//! with `--log`, to a file written by a background thread.
//!
//! ## Conventions
//!
//! - `log_version!` opens the output with `┏ earthview vX.Y.Z ━━╸`.
//! - `log_block_start!` starts a new block: an empty `┃` line, then `┣ message`.
//! - `log_decorated!` continues a block with `┣ message`.
//! - `log_indented!` lists details under a block with `┃   message`.
//! - `log_pipe!` inserts a bare `┃` spacer, typically before a levelled message.
//! - `log_info!`, `log_warning!`, `log_error!`, `log_debug!` and `log_critical!`
//!   carry a coloured `[LEVEL]` tag.
//! - `log_error_exit!` ends the output on an error with `┗[ERROR]`.
//! - `log_end!` prints the closing `╹`.

use once_cell::sync::Lazy;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Sender, channel};
use std::sync::{Mutex, OnceLock};

use crate::Instant;

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);

/// Instant shown in front of each line while animating.
static SIMULATED_INSTANT: Lazy<Mutex<Option<Instant>>> = Lazy::new(|| Mutex::new(None));

static LOG_CHANNEL: OnceLock<Sender<LogMessage>> = OnceLock::new();

enum LogMessage {
    Line(String),
    Shutdown,
}

/// Line decoration for each logging macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Version,
    BlockStart,
    Decorated,
    Indented,
    Pipe,
    End,
    Info,
    Debug,
    Warning,
    Error,
    ErrorExit,
    Critical,
}

impl Style {
    fn tag(self) -> Option<(&'static str, &'static str)> {
        match self {
            Style::Info => Some(("32", "INFO")),
            Style::Debug => Some(("32", "DEBUG")),
            Style::Warning => Some(("33", "WARNING")),
            Style::Error | Style::ErrorExit => Some(("31", "ERROR")),
            Style::Critical => Some(("31", "CRITICAL")),
            _ => None,
        }
    }
}

pub struct Log;

impl Log {
    /// Silence or restore all output, e.g. for `--json` or in tests.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Show `instant` in front of every line, or stop doing so with `None`.
    pub fn set_simulated_instant(instant: Option<Instant>) {
        if let Ok(mut slot) = SIMULATED_INSTANT.lock() {
            *slot = instant;
        }
    }

    /// `[YYYY-MM-DD HH:MM] ` while a simulated instant is set, otherwise empty.
    pub fn timestamp_prefix() -> String {
        match SIMULATED_INSTANT.lock().ok().and_then(|slot| *slot) {
            Some(instant) => format!("[{instant}] "),
            None => String::new(),
        }
    }

    /// Route all further output to `file_path` until the guard is dropped.
    pub fn start_file_logging(file_path: String) -> anyhow::Result<LoggerGuard> {
        let file = std::fs::File::create(&file_path)
            .map_err(|e| anyhow::anyhow!("Failed to create log file '{file_path}': {e}"))?;
        let (tx, rx) = channel();

        LOG_CHANNEL
            .set(tx.clone())
            .map_err(|_| anyhow::anyhow!("File logging already started"))?;

        let handle = std::thread::spawn(move || {
            let mut file = file;
            while let Ok(LogMessage::Line(text)) = rx.recv() {
                file.write_all(text.as_bytes())?;
            }
            file.flush()?;
            Ok::<(), anyhow::Error>(())
        });

        Ok(LoggerGuard {
            tx,
            handle: Some(handle),
        })
    }

    /// Format and write one message. Used by the logging macros.
    pub fn emit(style: Style, message: &str) {
        if !Self::is_enabled() {
            return;
        }
        write_output(&render(style, &Self::timestamp_prefix(), message));
    }
}

/// Flushes and closes the log file on drop.
pub struct LoggerGuard {
    tx: Sender<LogMessage>,
    handle: Option<std::thread::JoinHandle<anyhow::Result<()>>>,
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        let _ = self.tx.send(LogMessage::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Full text for one message, including newline(s).
pub fn render(style: Style, prefix: &str, message: &str) -> String {
    if let Some((colour, label)) = style.tag() {
        let tagged = format!("[\x1b[{colour}m{label}\x1b[0m] {message}");
        return match style {
            Style::ErrorExit => format!("{prefix}┃\n{prefix}┗{tagged}\n"),
            _ => format!("{prefix}┣{tagged}\n"),
        };
    }

    match style {
        Style::Version => {
            format!("{prefix}┏ earthview v{} ━━╸\n", env!("CARGO_PKG_VERSION"))
        }
        Style::BlockStart => format!("{prefix}┃\n{prefix}┣ {message}\n"),
        Style::Decorated => format!("{prefix}┣ {message}\n"),
        Style::Indented => format!("{prefix}┃   {message}\n"),
        Style::Pipe => format!("{prefix}┃\n"),
        _ => format!("{prefix}╹\n"),
    }
}

/// Remove `ESC [ ... m` colour sequences.
fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.by_ref().find(|&c| c == 'm');
        } else {
            result.push(ch);
        }
    }

    result
}

fn write_output(text: &str) {
    if let Some(tx) = LOG_CHANNEL.get() {
        let _ = tx.send(LogMessage::Line(strip_ansi_codes(text)));
    } else {
        print!("{text}");
        let _ = std::io::stdout().flush();
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_with_style {
    ($style:ident, $fmt:literal $($arg:tt)*) => {
        $crate::logger::Log::emit($crate::logger::Style::$style, &format!($fmt $($arg)*))
    };
    ($style:ident, $expr:expr) => {
        $crate::logger::Log::emit($crate::logger::Style::$style, &format!("{}", $expr))
    };
}

#[macro_export]
macro_rules! log_decorated {
    ($($t:tt)+) => { $crate::__log_with_style!(Decorated, $($t)+) };
}

#[macro_export]
macro_rules! log_indented {
    ($($t:tt)+) => { $crate::__log_with_style!(Indented, $($t)+) };
}

#[macro_export]
macro_rules! log_block_start {
    ($($t:tt)+) => { $crate::__log_with_style!(BlockStart, $($t)+) };
}

#[macro_export]
macro_rules! log_pipe {
    () => {
        $crate::logger::Log::emit($crate::logger::Style::Pipe, "")
    };
}

#[macro_export]
macro_rules! log_version {
    () => {
        $crate::logger::Log::emit($crate::logger::Style::Version, "")
    };
}

#[macro_export]
macro_rules! log_end {
    () => {
        $crate::logger::Log::emit($crate::logger::Style::End, "")
    };
}

#[macro_export]
macro_rules! log_info {
    ($($t:tt)+) => { $crate::__log_with_style!(Info, $($t)+) };
}

#[macro_export]
macro_rules! log_debug {
    ($($t:tt)+) => { $crate::__log_with_style!(Debug, $($t)+) };
}

#[macro_export]
macro_rules! log_warning {
    ($($t:tt)+) => { $crate::__log_with_style!(Warning, $($t)+) };
}

#[macro_export]
macro_rules! log_error {
    ($($t:tt)+) => { $crate::__log_with_style!(Error, $($t)+) };
}

/// Final error line: closes the output with `┗`.
#[macro_export]
macro_rules! log_error_exit {
    ($($t:tt)+) => { $crate::__log_with_style!(ErrorExit, $($t)+) };
}

#[macro_export]
macro_rules! log_critical {
    ($($t:tt)+) => { $crate::__log_with_style!(Critical, $($t)+) };
}
