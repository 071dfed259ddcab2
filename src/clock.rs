//! Date/time capability injected into the content renderer.
//!
//! Templates get two helpers, `current_datetime()` and
//! `format_datetime(moment, pattern)`. Rather than reading the system clock
//! from inside the template engine, the renderer is handed a [`Clock`], so a
//! test or a reproducible build can pin "now" with a [`FixedClock`].
//!
//! Timestamps travel through templates as [`Moment`] objects. They render
//! like `2024-03-05 14:30:00.250000` and expose `year`, `month`, `day`,
//! `hour`, `minute`, `second` and `weekday` attributes.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, Timelike, Utc};
use chrono::{Offset, TimeZone};
use minijinja::value::{Object, ObjectRepr, Value};
use std::fmt::{self, Write as _};
use std::sync::Arc;

/// Source of the current time for `current_datetime()`.
pub trait Clock: Send + Sync {
    fn now(&self) -> Moment;
}

/// Wall-clock local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Moment {
        Moment(DateTime::<FixedOffset>::from(Local::now()))
    }
}

/// A clock frozen at one moment.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Moment);

impl FixedClock {
    pub fn new(moment: DateTime<FixedOffset>) -> Self {
        FixedClock(Moment(moment))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Moment {
        self.0
    }
}

/// A timestamp with a UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment(pub DateTime<FixedOffset>);

impl Moment {
    pub fn datetime(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// Parse a moment from text as it typically appears in YAML data.
    ///
    /// Accepts RFC 3339 and the YAML 1.1 timestamp forms: `YYYY-MM-DD`, or a
    /// date and time separated by `T`, `t` or spaces, with an optional
    /// fraction and an optional offset (`Z`, `+02:00`, `+0200`, `-5`), which
    /// may follow the time after spaces. Values without an offset are taken
    /// as UTC.
    pub fn parse(text: &str) -> Option<Moment> {
        let text = text.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(Moment(dt));
        }

        let Some(split) = text.find(['T', 't', ' ', '\t']) else {
            let midnight = NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()?
                .and_hms_opt(0, 0, 0)?;
            return Some(Moment(Utc.fix().from_utc_datetime(&midnight)));
        };
        let (date, rest) = text.split_at(split);
        let rest = rest[1..].trim_start();
        let time_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == ':' || c == '.'))
            .unwrap_or(rest.len());
        let (time, zone) = rest.split_at(time_end);

        let naive = NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S%.f")
            .ok()?;
        let offset = parse_offset(zone.trim())?;
        offset.from_local_datetime(&naive).single().map(Moment)
    }

    /// Format with a strftime-style pattern.
    ///
    /// Unknown or malformed specifiers are rejected instead of producing
    /// partial output.
    pub fn format(&self, pattern: &str) -> Result<String, InvalidPattern> {
        let items = StrftimeItems::new(pattern);
        if items.clone().any(|item| matches!(item, Item::Error)) {
            return Err(InvalidPattern(pattern.to_string()));
        }
        let mut out = String::new();
        write!(out, "{}", self.0.format_with_items(items))
            .map_err(|_| InvalidPattern(pattern.to_string()))?;
        Ok(out)
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))?;
        let micros = self.0.nanosecond() / 1_000;
        if micros != 0 {
            write!(f, ".{micros:06}")?;
        }
        Ok(())
    }
}

impl Object for Moment {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Plain
    }

    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        let dt = self.0;
        let v = match key.as_str()? {
            "year" => dt.year() as i64,
            "month" => dt.month() as i64,
            "day" => dt.day() as i64,
            "hour" => dt.hour() as i64,
            "minute" => dt.minute() as i64,
            "second" => dt.second() as i64,
            "weekday" => dt.weekday().num_days_from_monday() as i64,
            _ => return None,
        };
        Some(Value::from(v))
    }

    fn render(self: &Arc<Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

/// A YAML timestamp offset: empty or `Z` for UTC, otherwise a sign and a one
/// or two digit hour with optional minutes (`+02:00`, `+0200`, `-5`).
fn parse_offset(zone: &str) -> Option<FixedOffset> {
    if zone.is_empty() || zone.eq_ignore_ascii_case("z") {
        return Some(Utc.fix());
    }
    let sign = match zone.as_bytes()[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let body = &zone[1..];
    let (hours, minutes) = match body.split_once(':') {
        Some((h, m)) => (h, m),
        None if body.len() == 4 => body.split_at(2),
        None => (body, "0"),
    };
    if hours.is_empty() || hours.len() > 2 || minutes.len() > 2 {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// A strftime pattern chrono cannot format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPattern(pub String);

impl fmt::Display for InvalidPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid date format pattern '{}'", self.0)
    }
}

impl std::error::Error for InvalidPattern {}
