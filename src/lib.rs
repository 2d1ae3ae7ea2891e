//! A Solar Hijri (Persian) calendar date-time.
//!
//! [`PersianDateTime`] is an immutable instant counted in 100 ns ticks from
//! 0001/01/01 00:00, with its calendar fields derived once at construction.
//! It formats through custom or standard patterns, parses several text
//! shapes, and converts to and from UTC.
//!
//! ```
//! use persian_datetime::PersianDateTime;
//!
//! let date = PersianDateTime::from_components(1399, 12, 3, 7, 45, 0, 0)?;
//! assert_eq!(date.format("yyyy/MM/dd HH:mm:ss")?, "1399/12/03 07:45:00");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#[macro_use]
mod logging;

mod consts;
mod format;
mod locale;
mod parse;
mod prelude;
mod reference;
mod types;

pub use consts::*;
pub use format::{FormatError, format};
pub use locale::{Locale, to_latin_digits, to_persian_digits};
pub use parse::{ParseError, parse, parse_relative, try_parse};
pub use types::{
    Day, Month, Weekday, Year, days_in_month, days_in_year, is_leap_day, is_leap_month,
    is_leap_year,
};

use crate::prelude::*;
use jiff::SignedDuration;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Sub;
use std::str::FromStr;
use types::{civil_from_days, days_before_month, days_before_year};

/// A point in time on the Solar Hijri calendar.
///
/// Equality, ordering and hashing consider the tick count only; every other
/// field is derived from it.
#[derive(Debug, Clone, Copy)]
pub struct PersianDateTime {
    ticks: i64,
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    millisecond: u16,
    weekday: Weekday,
    day_of_year: u16,
    time_of_day: i64,
    is_dst: bool,
}

/// An out-of-range calendar value.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum CalendarError {
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(i32),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(i32),
    #[display(fmt = "Invalid day {day} for month {year}/{month:02}")]
    InvalidDay { year: u16, month: u8, day: i32 },
    #[display(fmt = "Invalid time {hour}:{minute}:{second}.{millisecond}")]
    InvalidTime {
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
    },
    #[display(fmt = "Ticks out of range: {} (must be 0-{})", "_0", MAX_TICKS)]
    TicksOutOfRange(i64),
    #[display(fmt = "UTC ticks not representable as a reference time: {_0}")]
    ReferenceOutOfRange(i64),
}

impl std::error::Error for CalendarError {}

impl PersianDateTime {
    /// 0001/01/01 00:00:00.000
    pub const MIN: Self = Self::from_valid_ticks(0);
    /// 9999/12/29 23:59:59.999
    pub const MAX: Self = Self::from_valid_ticks(MAX_TICKS);

    /// Creates an instant from a raw tick count.
    ///
    /// # Errors
    /// Returns `CalendarError::TicksOutOfRange` unless `0 <= ticks <= MAX_TICKS`.
    pub fn from_ticks(ticks: i64) -> Result<Self, CalendarError> {
        if !(0..=MAX_TICKS).contains(&ticks) {
            return Err(CalendarError::TicksOutOfRange(ticks));
        }
        Ok(Self::from_valid_ticks(ticks))
    }

    /// Creates midnight of the given date.
    ///
    /// # Errors
    /// Returns a `CalendarError` if the date does not exist.
    pub fn new(year: i32, month: i32, day: i32) -> Result<Self, CalendarError> {
        Self::from_components(year, month, day, 0, 0, 0, 0)
    }

    /// Creates an instant with whole-second precision.
    ///
    /// # Errors
    /// Returns a `CalendarError` if any component is out of range.
    pub fn with_time(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
    ) -> Result<Self, CalendarError> {
        Self::from_components(year, month, day, hour, minute, second, 0)
    }

    /// Creates an instant from every calendar component.
    ///
    /// # Errors
    /// Returns a `CalendarError` naming the first component out of range.
    pub fn from_components(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
    ) -> Result<Self, CalendarError> {
        let (year, month, day) = validate(year, month, day, hour, minute, second, millisecond)?;

        let days = days_before_year(year.get())
            + days_before_month(year.get(), month.get())
            + i64::from(day.get())
            - 1;
        let ticks = days * TICKS_PER_DAY
            + i64::from(hour) * TICKS_PER_HOUR
            + i64::from(minute) * TICKS_PER_MINUTE
            + i64::from(second) * TICKS_PER_SECOND
            + i64::from(millisecond) * TICKS_PER_MILLISECOND;

        Self::from_ticks(ticks)
    }

    /// Checks components against the same rules as [`Self::from_components`].
    pub fn is_valid(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
    ) -> bool {
        validate(year, month, day, hour, minute, second, millisecond).is_ok()
    }

    const fn from_valid_ticks(ticks: i64) -> Self {
        let days = ticks / TICKS_PER_DAY;
        let time_of_day = ticks % TICKS_PER_DAY;
        let (year, month, day) = civil_from_days(days);

        let day_of_year = (days - days_before_year(year) + 1) as u16;
        let time_of_year = (day_of_year as i64 - 1) * TICKS_PER_DAY + time_of_day;

        Self {
            ticks,
            year,
            month,
            day,
            hour: (time_of_day / TICKS_PER_HOUR) as u8,
            minute: (time_of_day % TICKS_PER_HOUR / TICKS_PER_MINUTE) as u8,
            second: (time_of_day % TICKS_PER_MINUTE / TICKS_PER_SECOND) as u8,
            millisecond: (time_of_day % TICKS_PER_SECOND / TICKS_PER_MILLISECOND) as u16,
            weekday: Weekday::from_elapsed_days(days),
            day_of_year,
            time_of_day,
            is_dst: time_of_year >= DST_START_TICKS && time_of_year <= DST_END_TICKS,
        }
    }

    pub const fn ticks(&self) -> i64 {
        self.ticks
    }

    pub const fn year(&self) -> u16 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Hour on a 12-hour clock, `1..=12`
    pub const fn hour12(&self) -> u8 {
        match self.hour {
            0 => 12,
            h if h <= 12 => h,
            h => h - 12,
        }
    }

    /// True from 12:00 onwards
    pub const fn is_afternoon(&self) -> bool {
        self.hour >= 12
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }

    pub const fn millisecond(&self) -> u16 {
        self.millisecond
    }

    pub const fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// 1-based ordinal of the day within its year
    pub const fn day_of_year(&self) -> u16 {
        self.day_of_year
    }

    /// Time elapsed since midnight
    pub fn time_of_day(&self) -> SignedDuration {
        ticks_to_duration(self.time_of_day)
    }

    /// Time elapsed since 01/01 00:00 of the same year
    pub fn time_of_year(&self) -> SignedDuration {
        ticks_to_duration(self.time_of_year_ticks())
    }

    const fn time_of_year_ticks(&self) -> i64 {
        (self.day_of_year as i64 - 1) * TICKS_PER_DAY + self.time_of_day
    }

    /// Whether the instant falls in the fixed daylight saving window,
    /// 01/02 01:00 through 06/30 22:59:59.999 inclusive.
    pub const fn is_daylight_saving_time(&self) -> bool {
        self.is_dst
    }

    pub const fn is_leap_year(&self) -> bool {
        is_leap_year(self.year)
    }

    pub fn day_name(&self) -> &'static str {
        Locale::persian().day_name(self.weekday)
    }

    pub fn month_name(&self) -> &'static str {
        Locale::persian().month_name(self.month)
    }

    /// Returns `(year, month, day, hour, minute, second, millisecond)`
    pub const fn to_components(&self) -> (u16, u8, u8, u8, u8, u8, u16) {
        (
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.millisecond,
        )
    }

    /// Midnight of the same day
    pub const fn date(&self) -> Self {
        Self::from_valid_ticks(self.ticks - self.time_of_day)
    }

    /// Midnight of 01/01 in the same year
    pub const fn first_day_of_year(&self) -> Self {
        Self::from_valid_ticks(self.ticks - self.time_of_year_ticks())
    }

    /// 23:59:59.999 on the last day of the same year
    pub const fn last_day_of_year(&self) -> Self {
        let start = self.ticks - self.time_of_year_ticks();
        Self::from_valid_ticks(
            start + days_in_year(self.year) * TICKS_PER_DAY - TICKS_PER_MILLISECOND,
        )
    }

    /// Week number within the year, weeks starting on Saturday.
    ///
    /// With `full_weeks_only` a partial first week and the current partial
    /// week are not counted.
    pub fn week_of_year(&self, full_weeks_only: bool) -> i32 {
        let first = Weekday::from_elapsed_days(days_before_year(self.year)).index() as i32;
        let mut day = i32::from(self.day_of_year);
        if first > 0 {
            day -= 7 - first;
        }

        let mut weeks = day / 7;
        if !full_weeks_only {
            if first > 0 {
                weeks += 1;
            }
            if day % 7 > 0 {
                weeks += 1;
            }
        }
        weeks
    }

    // --- arithmetic ---

    /// # Errors
    /// Returns `CalendarError::TicksOutOfRange` if the result leaves the valid range.
    pub fn add_ticks(&self, ticks: i64) -> Result<Self, CalendarError> {
        Self::from_ticks(self.ticks.saturating_add(ticks))
    }

    /// # Errors
    /// Returns `CalendarError::TicksOutOfRange` if the result leaves the valid range.
    pub fn add_milliseconds(&self, milliseconds: i64) -> Result<Self, CalendarError> {
        self.add_ticks(milliseconds.saturating_mul(TICKS_PER_MILLISECOND))
    }

    /// # Errors
    /// Returns `CalendarError::TicksOutOfRange` if the result leaves the valid range.
    pub fn add_seconds(&self, seconds: i64) -> Result<Self, CalendarError> {
        self.add_ticks(seconds.saturating_mul(TICKS_PER_SECOND))
    }

    /// # Errors
    /// Returns `CalendarError::TicksOutOfRange` if the result leaves the valid range.
    pub fn add_minutes(&self, minutes: i64) -> Result<Self, CalendarError> {
        self.add_ticks(minutes.saturating_mul(TICKS_PER_MINUTE))
    }

    /// # Errors
    /// Returns `CalendarError::TicksOutOfRange` if the result leaves the valid range.
    pub fn add_hours(&self, hours: i64) -> Result<Self, CalendarError> {
        self.add_ticks(hours.saturating_mul(TICKS_PER_HOUR))
    }

    /// # Errors
    /// Returns `CalendarError::TicksOutOfRange` if the result leaves the valid range.
    pub fn add_days(&self, days: i64) -> Result<Self, CalendarError> {
        self.add_ticks(days.saturating_mul(TICKS_PER_DAY))
    }

    /// # Errors
    /// Returns `CalendarError::TicksOutOfRange` if the result leaves the valid range.
    pub fn add_weeks(&self, weeks: i64) -> Result<Self, CalendarError> {
        self.add_ticks(weeks.saturating_mul(TICKS_PER_WEEK))
    }

    /// Moves by whole calendar months, keeping the time of day.
    ///
    /// A day past the end of the target month is clamped to its last day,
    /// so 1399/01/31 plus one month is 1399/02/31 but 1399/06/31 plus one
    /// month is 1399/07/30.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` if the target year is out of range.
    pub fn add_months(&self, months: i32) -> Result<Self, CalendarError> {
        let total = i64::from(self.year) * i64::from(MONTHS_PER_YEAR)
            + i64::from(self.month)
            - 1
            + i64::from(months);
        let target_year = total.div_euclid(i64::from(MONTHS_PER_YEAR));
        let target_month = total.rem_euclid(i64::from(MONTHS_PER_YEAR)) + 1;

        let year = Year::new(i32::try_from(target_year).unwrap_or(i32::MAX))?;
        let month = Month::new(i32::try_from(target_month).unwrap_or(i32::MAX))?;
        let day = self.day.min(days_in_month(year.get(), month.get()));

        Self::from_components(
            i32::from(year.get()),
            i32::from(month.get()),
            i32::from(day),
            i32::from(self.hour),
            i32::from(self.minute),
            i32::from(self.second),
            i32::from(self.millisecond),
        )
        .and_then(|moved| moved.add_ticks(self.sub_millisecond_ticks()))
    }

    /// Same as `add_months(years * 12)`.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` if the target year is out of range.
    pub fn add_years(&self, years: i32) -> Result<Self, CalendarError> {
        self.add_months(years.saturating_mul(MONTHS_PER_YEAR))
    }

    /// # Errors
    /// Returns `CalendarError::TicksOutOfRange` if the result leaves the valid range.
    pub fn checked_add(&self, duration: SignedDuration) -> Result<Self, CalendarError> {
        self.add_ticks(duration_to_ticks(duration))
    }

    /// # Errors
    /// Returns `CalendarError::TicksOutOfRange` if the result leaves the valid range.
    pub fn checked_sub(&self, duration: SignedDuration) -> Result<Self, CalendarError> {
        self.add_ticks(duration_to_ticks(duration).saturating_neg())
    }

    /// Signed time elapsed from `other` to `self`.
    pub fn since(&self, other: &Self) -> SignedDuration {
        ticks_to_duration(self.ticks - other.ticks)
    }

    const fn sub_millisecond_ticks(&self) -> i64 {
        self.ticks % TICKS_PER_MILLISECOND
    }

    // --- text ---

    /// Renders with a custom or standard pattern.
    ///
    /// # Errors
    /// Returns a `FormatError` for malformed patterns or time-zone tokens.
    pub fn format(&self, pattern: &str) -> Result<String, FormatError> {
        format::format(self, Some(pattern))
    }

    fn format_infallible(&self, pattern: &str) -> String {
        // Only called with patterns free of quotes and zone tokens
        self.format(pattern).unwrap_or_default()
    }

    pub fn to_short_date_string(&self) -> String {
        self.format_infallible("d")
    }

    pub fn to_long_date_string(&self) -> String {
        self.format_infallible("D")
    }

    pub fn to_short_time_string(&self) -> String {
        self.format_infallible("t")
    }

    pub fn to_long_time_string(&self) -> String {
        self.format_infallible("T")
    }

    pub fn to_date_time_string(&self) -> String {
        self.format_infallible("yyyy/MM/dd HH:mm:ss")
    }

    pub fn to_date_string(&self) -> String {
        self.format_infallible("yyyy/MM/dd")
    }

    pub fn to_time_string(&self) -> String {
        self.format_infallible("HH:mm:ss")
    }
}

// --- validation and duration helpers ---
fn validate(
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
    minute: i32,
    second: i32,
    millisecond: i32,
) -> Result<(Year, Month, Day), CalendarError> {
    let year = Year::new(year)?;
    let month = Month::new(month)?;
    let day = Day::new(day, year, month)?;

    if !(0..24).contains(&hour)
        || !(0..60).contains(&minute)
        || !(0..60).contains(&second)
        || !(0..1000).contains(&millisecond)
    {
        return Err(CalendarError::InvalidTime {
            hour,
            minute,
            second,
            millisecond,
        });
    }

    Ok((year, month, day))
}

pub(crate) fn ticks_to_duration(ticks: i64) -> SignedDuration {
    let nanos = (ticks % TICKS_PER_SECOND) * 100;
    SignedDuration::new(ticks / TICKS_PER_SECOND, nanos as i32)
}

pub(crate) fn duration_to_ticks(duration: SignedDuration) -> i64 {
    duration
        .as_secs()
        .saturating_mul(TICKS_PER_SECOND)
        .saturating_add(i64::from(duration.subsec_nanos() / 100))
}

impl PartialEq for PersianDateTime {
    fn eq(&self, other: &Self) -> bool {
        self.ticks == other.ticks
    }
}

impl Eq for PersianDateTime {}

impl Hash for PersianDateTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ticks.hash(state);
    }
}

impl PartialOrd for PersianDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PersianDateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ticks.cmp(&other.ticks)
    }
}

impl Sub for PersianDateTime {
    type Output = SignedDuration;

    fn sub(self, rhs: Self) -> SignedDuration {
        self.since(&rhs)
    }
}

impl fmt::Display for PersianDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format::format(self, None).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl FromStr for PersianDateTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse::parse(s)
    }
}

impl TryFrom<i64> for PersianDateTime {
    type Error = CalendarError;

    fn try_from(ticks: i64) -> Result<Self, Self::Error> {
        Self::from_ticks(ticks)
    }
}

impl serde::Serialize for PersianDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let text = format::format(self, Some("o")).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }
}

impl<'de> serde::Deserialize<'de> for PersianDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
