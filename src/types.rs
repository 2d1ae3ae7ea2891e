use crate::CalendarError;
use crate::consts::{
    DAYS_IN_MONTH, DAYS_PER_LEAP_CYCLE, DAYS_PER_LEAP_YEAR, DAYS_PER_YEAR, EPOCH_WEEKDAY, ESFAND,
    ESFAND_DAYS_LEAP, FARVARDIN, LEAP_CYCLE_YEARS, LEAP_YEARS_PER_CYCLE, MAX_MONTH, MAX_YEAR,
    MIN_DAY, MIN_YEAR,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// A Solar Hijri year in `1..=MAX_YEAR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's in `MIN_YEAR..=MAX_YEAR`
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` if the value is out of range.
    pub fn new(value: i32) -> Result<Self, CalendarError> {
        u16::try_from(value)
            .ok()
            .filter(|v| (MIN_YEAR..=MAX_YEAR).contains(v))
            .and_then(NonZeroU16::new)
            .map(Self)
            .ok_or(CalendarError::InvalidYear(value))
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    /// Whether this year has a 30th of Esfand
    #[inline]
    pub const fn is_leap(self) -> bool {
        is_leap_year(self.get())
    }
}

impl TryFrom<i32> for Year {
    type Error = CalendarError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month number, Farvardin = 1 through Esfand = 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's in `1..=MAX_MONTH`
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidMonth` if the value is out of range.
    pub fn new(value: i32) -> Result<Self, CalendarError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= MAX_MONTH)
            .and_then(NonZeroU8::new)
            .map(Self)
            .ok_or(CalendarError::InvalidMonth(value))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<i32> for Month {
    type Error = CalendarError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day of month, checked against its month's length when constructed
/// with [`Day::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating that it's non-zero and fits the given year and month
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDay` if the day does not exist in that month.
    pub fn new(value: i32, year: Year, month: Month) -> Result<Self, CalendarError> {
        let max_day = days_in_month(year.get(), month.get());
        u8::try_from(value)
            .ok()
            .filter(|v| (MIN_DAY..=max_day).contains(v))
            .and_then(NonZeroU8::new)
            .map(Self)
            .ok_or(CalendarError::InvalidDay {
                year: year.get(),
                month: month.get(),
                day: value,
            })
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl<'de> Deserialize<'de> for Day {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Without year/month context only the widest bound can be checked
        let value = u8::deserialize(deserializer)?;
        NonZeroU8::new(value)
            .filter(|v| v.get() <= DAYS_IN_MONTH[1])
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid day: {value}")))
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Day of the week. The week starts on Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum Weekday {
    Saturday,
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    const ALL: [Self; 7] = [
        Self::Saturday,
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
    ];

    /// Position in the week, Saturday being 0 and Friday 6
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Weekday of the given count of whole days elapsed since 0001/01/01
    pub(crate) const fn from_elapsed_days(days: i64) -> Self {
        Self::ALL[(days + EPOCH_WEEKDAY).rem_euclid(7) as usize]
    }
}

// Calendar rules

/// Leap years follow the 33-year arithmetic cycle: `(25 * year + 11) mod 33 < 8`.
pub const fn is_leap_year(year: u16) -> bool {
    (25 * year as i64 + 11) % LEAP_CYCLE_YEARS < LEAP_YEARS_PER_CYCLE
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == ESFAND && is_leap_year(year) {
        ESFAND_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

pub const fn days_in_year(year: u16) -> i64 {
    if is_leap_year(year) {
        DAYS_PER_LEAP_YEAR
    } else {
        DAYS_PER_YEAR
    }
}

pub const fn is_leap_month(year: u16, month: u8) -> bool {
    month == ESFAND && is_leap_year(year)
}

pub const fn is_leap_day(year: u16, month: u8, day: u8) -> bool {
    day == ESFAND_DAYS_LEAP && is_leap_month(year, month)
}

/// Whole days from 0001/01/01 to the first day of `year`.
///
/// Any 33 consecutive years hold exactly 8 leap years, so full cycles are
/// counted in bulk and only the remainder is walked.
pub(crate) const fn days_before_year(year: u16) -> i64 {
    let elapsed = year as i64 - 1;
    let cycles = elapsed / LEAP_CYCLE_YEARS;
    let mut days = cycles * DAYS_PER_LEAP_CYCLE;
    let mut y = cycles * LEAP_CYCLE_YEARS + 1;
    while y <= elapsed {
        days += days_in_year(y as u16);
        y += 1;
    }
    days
}

/// Whole days from the first of Farvardin to the first day of `month`.
pub(crate) const fn days_before_month(year: u16, month: u8) -> i64 {
    let mut days = 0;
    let mut m = FARVARDIN;
    while m < month {
        days += days_in_month(year, m) as i64;
        m += 1;
    }
    days
}

/// Splits whole days since 0001/01/01 into (year, month, day).
pub(crate) const fn civil_from_days(days: i64) -> (u16, u8, u8) {
    let cycles = days / DAYS_PER_LEAP_CYCLE;
    let mut remaining = days - cycles * DAYS_PER_LEAP_CYCLE;
    let mut year = (cycles * LEAP_CYCLE_YEARS + 1) as u16;
    while remaining >= days_in_year(year) {
        remaining -= days_in_year(year);
        year += 1;
    }

    let mut month = FARVARDIN;
    while remaining >= days_in_month(year, month) as i64 {
        remaining -= days_in_month(year, month) as i64;
        month += 1;
    }

    (year, month, remaining as u8 + MIN_DAY)
}
