//! Date parsing and expiration proximity.
//!
//! Dates are stored as text. `dd/MM/yyyy` is the canonical display and storage
//! format; `yyyy-MM-dd` is also accepted when parsing so records coming from
//! other systems still resolve.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Canonical display/storage format (`dd/MM/yyyy`)
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Interchange format (`yyyy-MM-dd`)
pub const ISO_FORMAT: &str = "%Y-%m-%d";

const ACCEPTED_FORMATS: [&str; 2] = [DISPLAY_FORMAT, ISO_FORMAT];

/// Days-until value for text that is not a date. Compares as "never expires".
pub const NEVER: i64 = i64::MAX;

/// Source of the current local time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Wall clock in the local timezone
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Frozen at midnight of the given day
    pub fn at_date(date: NaiveDate) -> Self {
        Self::new(date.and_time(chrono::NaiveTime::MIN))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}

/// Parse a date in any accepted format. Parsing is strict: impossible dates
/// such as `31/02/2026` are rejected.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// Whole calendar days from `now` to the given date.
///
/// Negative once the date has passed, `0` on the day itself. Text that does not
/// parse yields [`NEVER`] instead of an error.
pub fn days_until(text: &str, now: NaiveDateTime) -> i64 {
    match parse_date(text) {
        Some(target) => target.signed_duration_since(now.date()).num_days(),
        None => NEVER,
    }
}

/// Format a date in the canonical `dd/MM/yyyy` form
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}
