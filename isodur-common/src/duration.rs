use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DurationError, IsodurError, Result};

/// Machine duration produced by the unit conversions.
pub type ElapsedTime = Duration;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;
const DAYS_PER_WEEK: u64 = 7;
// No leap years: a duration is not anchored to a calendar.
const DAYS_PER_YEAR: u64 = 365;

/// A structured ISO 8601 duration such as `P1Y2DT3H4M5S` or `P1W`.
///
/// Every field is an independent count. The week form and the calendar form
/// are mutually exclusive in the text grammar, but both may be populated
/// here; [`IsoDuration::to_elapsed`] sums every field while formatting gives
/// weeks priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IsoDuration {
    pub weeks: u64,
    pub years: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Designator {
    Week,
    Year,
    Day,
    Hour,
    Minute,
    Second,
}

impl Designator {
    fn classify(c: char, in_time: bool) -> Option<Self> {
        match (c, in_time) {
            ('W', false) => Some(Designator::Week),
            ('Y', false) => Some(Designator::Year),
            ('D', false) => Some(Designator::Day),
            ('H', true) => Some(Designator::Hour),
            ('M', true) => Some(Designator::Minute),
            ('S', true) => Some(Designator::Second),
            _ => None,
        }
    }

    fn may_follow(self, previous: Option<Designator>) -> bool {
        match previous {
            None => true,
            Some(Designator::Week) => false,
            Some(prev) => self != Designator::Week && prev < self,
        }
    }

    fn is_time(self) -> bool {
        matches!(self, Designator::Hour | Designator::Minute | Designator::Second)
    }
}

impl IsoDuration {
    pub fn parse(input: &str) -> std::result::Result<Self, DurationError> {
        parse(input)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Converts to elapsed time with 1 year = 365 days and 1 week = 7 days.
    ///
    /// The second count uses wrapping `u64` arithmetic, so absurdly large
    /// fields wrap instead of panicking.
    pub fn to_elapsed(&self) -> ElapsedTime {
        let days = self
            .years
            .wrapping_mul(DAYS_PER_YEAR)
            .wrapping_add(self.weeks.wrapping_mul(DAYS_PER_WEEK))
            .wrapping_add(self.days);

        let secs = days
            .wrapping_mul(SECS_PER_DAY)
            .wrapping_add(self.hours.wrapping_mul(SECS_PER_HOUR))
            .wrapping_add(self.minutes.wrapping_mul(SECS_PER_MINUTE))
            .wrapping_add(self.seconds);

        Duration::from_secs(secs)
    }

    /// Splits elapsed time into days, hours, minutes and seconds.
    ///
    /// Years and weeks are never produced and sub-second precision is
    /// dropped.
    pub fn from_elapsed(elapsed: ElapsedTime) -> Self {
        let total = elapsed.as_secs();

        Self {
            days: total / SECS_PER_DAY,
            hours: total % SECS_PER_DAY / SECS_PER_HOUR,
            minutes: total % SECS_PER_HOUR / SECS_PER_MINUTE,
            seconds: total % SECS_PER_MINUTE,
            ..Self::default()
        }
    }

    fn set(&mut self, designator: Designator, value: u64) {
        match designator {
            Designator::Week => self.weeks = value,
            Designator::Year => self.years = value,
            Designator::Day => self.days = value,
            Designator::Hour => self.hours = value,
            Designator::Minute => self.minutes = value,
            Designator::Second => self.seconds = value,
        }
    }
}

/// Parses an ISO 8601 duration of the form `PnW` or `P[nY][nD][T[nH][nM][nS]]`.
///
/// Surrounding whitespace is ignored. A month designator (`M` before `T`)
/// fails with [`DurationError::NoMonth`]; anything else outside the grammar
/// fails with [`DurationError::BadFormat`].
pub fn parse(input: &str) -> std::result::Result<IsoDuration, DurationError> {
    let body = input
        .trim()
        .strip_prefix('P')
        .ok_or(DurationError::BadFormat)?;

    let mut duration = IsoDuration::default();
    let mut last: Option<Designator> = None;
    let mut in_time = false;
    let mut run_start = 0;

    for (i, c) in body.char_indices() {
        if c.is_ascii_digit() {
            continue;
        }

        let digits = &body[run_start..i];
        run_start = i + c.len_utf8();

        match c {
            'T' => {
                if in_time || !digits.is_empty() || last == Some(Designator::Week) {
                    return Err(DurationError::BadFormat);
                }
                in_time = true;
            }
            'M' if !in_time => {
                log::debug!("rejecting month designator in {:?}", input);
                return Err(DurationError::NoMonth);
            }
            _ => {
                let designator =
                    Designator::classify(c, in_time).ok_or(DurationError::BadFormat)?;
                if !designator.may_follow(last) {
                    return Err(DurationError::BadFormat);
                }
                duration.set(designator, parse_count(digits)?);
                last = Some(designator);
            }
        }
    }

    // Digits left over without a designator.
    if run_start != body.len() {
        return Err(DurationError::BadFormat);
    }

    if in_time && !last.is_some_and(Designator::is_time) {
        return Err(DurationError::BadFormat);
    }

    log::trace!("parsed {:?} as {:?}", input, duration);
    Ok(duration)
}

fn parse_count(digits: &str) -> std::result::Result<u64, DurationError> {
    if digits.is_empty() {
        return Err(DurationError::BadFormat);
    }
    digits.parse().map_err(|_| DurationError::BadFormat)
}

/// Renders the canonical ISO 8601 form. A non-zero week count suppresses
/// every other field.
pub fn format(duration: &IsoDuration) -> String {
    duration.to_string()
}

pub fn to_elapsed(duration: &IsoDuration) -> ElapsedTime {
    duration.to_elapsed()
}

pub fn from_elapsed(elapsed: ElapsedTime) -> IsoDuration {
    IsoDuration::from_elapsed(elapsed)
}

pub fn parse_to_elapsed(input: &str) -> std::result::Result<ElapsedTime, DurationError> {
    parse(input).map(|d| d.to_elapsed())
}

/// Parses either an ISO 8601 duration or a humantime expression like `1h 30m`.
pub fn parse_duration(duration_str: &str) -> Result<ElapsedTime> {
    let trimmed = duration_str.trim();
    if trimmed.starts_with('P') {
        return Ok(parse_to_elapsed(trimmed)?);
    }

    humantime::parse_duration(trimmed).map_err(IsodurError::from)
}

impl fmt::Display for IsoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("P")?;

        if self.weeks != 0 {
            return write!(f, "{}W", self.weeks);
        }

        if self.years != 0 {
            write!(f, "{}Y", self.years)?;
        }
        if self.days != 0 {
            write!(f, "{}D", self.days)?;
        }

        if self.hours != 0 || self.minutes != 0 || self.seconds != 0 {
            f.write_str("T")?;
            if self.hours != 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes != 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.seconds != 0 {
                write!(f, "{}S", self.seconds)?;
            }
        }

        Ok(())
    }
}

impl FromStr for IsoDuration {
    type Err = DurationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse(s)
    }
}

impl From<IsoDuration> for Duration {
    fn from(duration: IsoDuration) -> Self {
        duration.to_elapsed()
    }
}

impl Serialize for IsoDuration {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IsoDuration {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let duration_str = String::deserialize(deserializer)?;
        parse(&duration_str).map_err(serde::de::Error::custom)
    }
}
