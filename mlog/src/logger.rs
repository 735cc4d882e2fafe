//! Leveled console logging.
//!
//! Every record is written as one line:
//!
//! ```text
//! [time] [date] [<symbol>] <Label>: <message>
//! ```
//!
//! where the timestamp parts depend on [Config] and the symbol is tinted with a 24-bit
//! foreground escape sequence for its [Level]. Records are formatted in full before being written
//! under a lock, so concurrent calls never interleave.

use crate::{
    color::{hex_to_rgba, Rgba},
    config::Config,
    Error, Result,
};
use chrono::{DateTime, Local, TimeZone};
use std::{
    fmt,
    io::{self, Stdout, Write},
    process,
    sync::{Mutex, OnceLock, PoisonError},
};

/// Resets all terminal attributes.
pub const RESET: &str = "\x1b[0m";

static LOGGER: OnceLock<Logger<Stdout>> = OnceLock::new();

/// Install the process-wide stdout logger used by [`crate::err!`], [`crate::wrn!`],
/// [`crate::inf!`] and [`crate::suc!`].
///
/// # Errors
///
/// Returns [`Error::AlreadyInitialized`] if a global logger already exists, either from a previous
/// call or from a macro having logged before this call.
pub fn initialize(config: Config) -> Result<()> {
    LOGGER
        .set(Logger::stdout(config))
        .map_err(|_| Error::AlreadyInitialized)
}

/// The process-wide stdout logger, configured from the environment unless [initialize] was
/// called first.
pub fn global() -> &'static Logger<Stdout> {
    LOGGER.get_or_init(|| Logger::stdout(Config::from_env()))
}

/// Severity of a log record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[must_use]
pub enum Level {
    Error,
    Warning,
    Info,
    Success,
}

impl Level {
    /// Symbol printed inside the tag.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Level::Error => '!',
            Level::Warning => '?',
            Level::Info => '*',
            Level::Success => '+',
        }
    }

    /// Tag color as `#RRGGBB`.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Level::Error => "#E31D39",
            Level::Warning => "#F5CB3A",
            Level::Info => "#3AE6F5",
            Level::Success => "#3AF547",
        }
    }

    /// Label printed before the message.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Level::Error => "Error: ",
            Level::Warning => "Warning: ",
            Level::Info => "Note: ",
            Level::Success => "Success: ",
        }
    }
}

/// Displays as the truecolor escape sequence selecting this foreground color.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[must_use]
pub struct Foreground(pub Rgba);

impl fmt::Display for Foreground {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgba { r, g, b, .. } = self.0;
        write!(f, "\x1b[38;2;{r};{g};{b}m")
    }
}

/// A console logger writing colored records to `W`.
#[derive(Debug)]
#[must_use]
pub struct Logger<W> {
    config: Config,
    writer: Mutex<W>,
}

impl Logger<Stdout> {
    /// A logger writing to standard output.
    pub fn stdout(config: Config) -> Self {
        Self::new(config, io::stdout())
    }
}

impl<W: Write> Logger<W> {
    pub fn new(config: Config, writer: W) -> Self {
        Self {
            config,
            writer: Mutex::new(writer),
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consumes the logger, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Write a single record stamped with the current local time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing to or flushing the underlying writer fails.
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) -> Result<()> {
        let record = format_record(&self.config, level, &Local::now(), args);
        // A panic mid-write leaves nothing to repair in the writer.
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(record.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Log an error, exiting the process with status `1` afterwards if `quit` is set.
    pub fn error(&self, quit: bool, args: fmt::Arguments<'_>) {
        self.emit(Level::Error, args);
        if quit {
            process::exit(1);
        }
    }

    pub fn warning(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warning, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    pub fn success(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Success, args);
    }

    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        if let Err(err) = self.log(level, args) {
            tracing::warn!("dropped {level:?} record: {err}");
        }
    }
}

/// Format a full record, including the trailing reset and newline.
#[must_use]
pub fn format_record<Tz>(
    config: &Config,
    level: Level,
    now: &DateTime<Tz>,
    args: fmt::Arguments<'_>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let prefix = format_prefix(config, now);
    let color = Foreground(hex_to_rgba(level.color()));
    let symbol = level.symbol();
    let label = level.label();
    format!("{prefix}[{color}{symbol}{RESET}] {label}{args}{RESET}\n")
}

fn format_prefix<Tz>(config: &Config, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let time = now.format("%H:%M:%S");
    let date = now.format("%d/%m/%Y");
    match (config.show_time, config.show_date) {
        (true, true) if config.time_first => format!("[{time}] [{date}] "),
        (true, true) => format!("[{date}] [{time}] "),
        (true, false) => format!("[{time}] "),
        (false, true) => format!("[{date}] "),
        (false, false) => String::new(),
    }
}

/// Log an error through the global logger, or `logger: <expr>`. The first argument is whether
/// to exit the process with status `1` afterwards.
#[macro_export]
macro_rules! err {
    (logger: $logger:expr, $quit:expr, $($arg:tt)+) => {
        $logger.error($quit, ::std::format_args!($($arg)+))
    };
    ($quit:expr, $($arg:tt)+) => {
        $crate::logger::global().error($quit, ::std::format_args!($($arg)+))
    };
}

/// Log a warning through the global logger, or `logger: <expr>`.
#[macro_export]
macro_rules! wrn {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.warning(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::logger::global().warning(::std::format_args!($($arg)+))
    };
}

/// Log a note through the global logger, or `logger: <expr>`.
#[macro_export]
macro_rules! inf {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.info(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::logger::global().info(::std::format_args!($($arg)+))
    };
}

/// Log a success through the global logger, or `logger: <expr>`.
#[macro_export]
macro_rules! suc {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.success(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::logger::global().success(::std::format_args!($($arg)+))
    };
}
