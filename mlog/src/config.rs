//! Logger configuration.

use std::env;

/// Which timestamp parts prefix every log line and in what order.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[must_use]
pub struct Config {
    pub(crate) show_time: bool,
    pub(crate) show_date: bool,
    pub(crate) time_first: bool,
}

impl Config {
    /// A configuration with no timestamp prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `MLOG_SHOW_TIME`, `MLOG_SHOW_DATE` and `MLOG_TIME_FIRST` from the environment.
    pub fn from_env() -> Self {
        Self {
            show_time: env_flag("MLOG_SHOW_TIME"),
            show_date: env_flag("MLOG_SHOW_DATE"),
            time_first: env_flag("MLOG_TIME_FIRST"),
        }
    }

    /// Prefix log lines with `[HH:MM:SS]`.
    pub fn show_time(mut self, show_time: bool) -> Self {
        self.show_time = show_time;
        self
    }

    /// Prefix log lines with `[DD/MM/YYYY]`.
    pub fn show_date(mut self, show_date: bool) -> Self {
        self.show_date = show_date;
        self
    }

    /// Print the time before the date when both are shown.
    pub fn time_first(mut self, time_first: bool) -> Self {
        self.time_first = time_first;
        self
    }

    #[must_use]
    pub fn shows_time(&self) -> bool {
        self.show_time
    }

    #[must_use]
    pub fn shows_date(&self) -> bool {
        self.show_date
    }

    #[must_use]
    pub fn is_time_first(&self) -> bool {
        self.time_first
    }
}

/// A flag is enabled when set to anything other than an explicit "off" value.
fn env_flag(key: &str) -> bool {
    env::var(key).map_or(false, |value| parse_flag(&value))
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "off" | "no"
    )
}
