//! Conversion between Solar Hijri local time and the Gregorian/UTC reference
//! calendar.
//!
//! Local time is UTC+03:30, plus one hour while [`is_daylight_saving_time`]
//! holds. The daylight test is always applied to the local wall clock.
//!
//! [`is_daylight_saving_time`]: PersianDateTime::is_daylight_saving_time

use crate::consts::{DAYLIGHT_DELTA_TICKS, TICKS_PER_SECOND, UNIX_EPOCH_TICKS, UTC_OFFSET_TICKS};
use crate::{CalendarError, PersianDateTime};
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};

/// Nanoseconds in one tick
const NANOS_PER_TICK: i128 = 100;

impl PersianDateTime {
    /// Ticks since 0001-01-01T00:00:00Z on the reference calendar.
    pub const fn universal_ticks(&self) -> i64 {
        let utc = self.ticks() + UTC_OFFSET_TICKS;
        if self.is_daylight_saving_time() {
            utc - DAYLIGHT_DELTA_TICKS
        } else {
            utc
        }
    }

    /// Builds the local instant for a UTC tick count on the reference calendar.
    ///
    /// # Errors
    /// Returns `CalendarError::TicksOutOfRange` when the local instant falls
    /// outside `MIN..=MAX`.
    pub fn from_universal_ticks(ticks: i64) -> Result<Self, CalendarError> {
        let local = ticks
            .checked_sub(UTC_OFFSET_TICKS)
            .ok_or(CalendarError::TicksOutOfRange(ticks))?;
        let provisional = Self::from_ticks(local)?;
        if !provisional.is_daylight_saving_time() {
            return Ok(provisional);
        }

        debug!("daylight saving shift applied to local ticks {local}");
        Self::from_ticks(local + DAYLIGHT_DELTA_TICKS)
    }

    /// The same instant as a UTC timestamp.
    ///
    /// # Errors
    /// Returns `CalendarError::ReferenceOutOfRange` for instants past the
    /// last timestamp `jiff` represents (late in the year 9378).
    pub fn to_universal(&self) -> Result<Timestamp, CalendarError> {
        let utc = self.universal_ticks();
        let since_epoch = utc - UNIX_EPOCH_TICKS;
        // Truncating division keeps both parts on the same side of zero
        let seconds = since_epoch / TICKS_PER_SECOND;
        let nanos = i128::from(since_epoch % TICKS_PER_SECOND) * NANOS_PER_TICK;
        let nanos = i32::try_from(nanos).map_err(|_| CalendarError::ReferenceOutOfRange(utc))?;
        Timestamp::new(seconds, nanos).map_err(|_| {
            debug!("{utc} UTC ticks are past the reference calendar's range");
            CalendarError::ReferenceOutOfRange(utc)
        })
    }

    /// The same instant in the host's time zone.
    ///
    /// # Errors
    /// Fails like [`to_universal`](Self::to_universal).
    pub fn to_local(&self) -> Result<Zoned, CalendarError> {
        Ok(self.to_universal()?.to_zoned(TimeZone::system()))
    }

    /// Converts a UTC timestamp. Sub-tick precision is truncated toward
    /// the past.
    ///
    /// # Errors
    /// Returns `CalendarError::TicksOutOfRange` for timestamps before
    /// 0001/01/01 local time.
    pub fn from_reference(timestamp: Timestamp) -> Result<Self, CalendarError> {
        let ticks = timestamp.as_nanosecond().div_euclid(NANOS_PER_TICK)
            + i128::from(UNIX_EPOCH_TICKS);
        let ticks = i64::try_from(ticks).map_err(|_| CalendarError::TicksOutOfRange(i64::MIN))?;
        Self::from_universal_ticks(ticks)
    }

    /// Converts a zoned reference time, going through its UTC instant.
    ///
    /// # Errors
    /// Fails like [`from_reference`](Self::from_reference).
    pub fn from_zoned(zoned: &Zoned) -> Result<Self, CalendarError> {
        Self::from_reference(zoned.timestamp())
    }

    /// The current instant from the system clock.
    ///
    /// # Errors
    /// Fails only if the system clock reads outside the supported range.
    pub fn now() -> Result<Self, CalendarError> {
        Self::from_reference(Timestamp::now())
    }

    /// Midnight of the current day.
    ///
    /// # Errors
    /// Fails like [`now`](Self::now).
    pub fn today() -> Result<Self, CalendarError> {
        Ok(Self::now()?.date())
    }
}

impl TryFrom<Timestamp> for PersianDateTime {
    type Error = CalendarError;

    fn try_from(timestamp: Timestamp) -> Result<Self, Self::Error> {
        Self::from_reference(timestamp)
    }
}

impl TryFrom<PersianDateTime> for Timestamp {
    type Error = CalendarError;

    fn try_from(date: PersianDateTime) -> Result<Self, Self::Error> {
        date.to_universal()
    }
}
