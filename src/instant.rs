//! The simulated UTC clock read by the terminator classifier.
//!
//! An [`Instant`] is a plain value: the animation driver owns one, advances it
//! between frames and hands a copy to the renderer. Nothing in the core keeps
//! a clock of its own.

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::Serialize;
use std::fmt;

/// Civil UTC date and time, minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Instant {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl Instant {
    /// Build an instant, rejecting impossible calendar values.
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .map(Self::from_naive)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Invalid date/time {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}"
                )
            })
    }

    /// Current wall-clock time, truncated to the minute.
    pub fn now_utc() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self::from_naive(dt.naive_utc())
    }

    fn from_naive(naive: NaiveDateTime) -> Self {
        Self {
            year: naive.year(),
            month: naive.month(),
            day: naive.day(),
            hour: naive.hour(),
            minute: naive.minute(),
        }
    }

    fn to_naive(self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)?.and_hms_opt(self.hour, self.minute, 0)
    }

    /// Parse `YYYY-MM-DD HH:MM` (UTC). A bare `YYYY-MM-DD` means midnight.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M") {
            return Ok(Self::from_naive(naive));
        }
        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").with_context(|| {
            format!("Invalid date/time '{trimmed}'. Use YYYY-MM-DD HH:MM (UTC)")
        })?;
        date.and_hms_opt(0, 0, 0)
            .map(Self::from_naive)
            .ok_or_else(|| anyhow::anyhow!("Invalid date '{trimmed}'"))
    }

    /// Time of day as decimal hours, `hour + minute / 60`.
    pub fn decimal_hours(&self) -> f64 {
        self.hour as f64 + self.minute as f64 / 60.0
    }

    /// Advance by a number of simulated minutes, rolling the calendar over.
    pub fn advance_minutes(&mut self, minutes: i64) {
        self.shift(Duration::minutes(minutes));
    }

    /// Advance by whole days, keeping the time of day.
    pub fn advance_days(&mut self, days: i64) {
        self.shift(Duration::days(days));
    }

    fn shift(&mut self, delta: Duration) {
        // Out-of-range instants can only come from struct literals; leave them alone.
        if let Some(shifted) = self.to_naive().and_then(|n| n.checked_add_signed(delta)) {
            *self = Self::from_naive(shifted);
        }
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}
