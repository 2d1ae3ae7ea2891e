/// Ticks (100 ns units) in one millisecond
pub const TICKS_PER_MILLISECOND: i64 = 10_000;
/// Ticks in one second
pub const TICKS_PER_SECOND: i64 = 1_000 * TICKS_PER_MILLISECOND;
/// Ticks in one minute
pub const TICKS_PER_MINUTE: i64 = 60 * TICKS_PER_SECOND;
/// Ticks in one hour
pub const TICKS_PER_HOUR: i64 = 60 * TICKS_PER_MINUTE;
/// Ticks in one day
pub const TICKS_PER_DAY: i64 = 24 * TICKS_PER_HOUR;
/// Ticks in one week
pub const TICKS_PER_WEEK: i64 = 7 * TICKS_PER_DAY;

/// Minimum valid year (inclusive)
pub const MIN_YEAR: u16 = 1;
/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (Esfand)
pub const MAX_MONTH: u8 = 12;
/// Number of months in a year
pub const MONTHS_PER_YEAR: i32 = 12;

/// First day of every month
pub const MIN_DAY: u8 = 1;

/// Month number for Farvardin
pub const FARVARDIN: u8 = 1;
/// Month number for Esfand, the only month whose length depends on the year
pub const ESFAND: u8 = 12;

/// Days in Esfand for leap years
pub const ESFAND_DAYS_LEAP: u8 = 30;

/// Days in a common year
pub const DAYS_PER_YEAR: i64 = 365;
/// Days in a leap year
pub const DAYS_PER_LEAP_YEAR: i64 = 366;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// Esfand shows 29 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // Farvardin
    31, // Ordibehesht
    31, // Khordad
    31, // Tir
    31, // Mordad
    31, // Shahrivar
    30, // Mehr
    30, // Aban
    30, // Azar
    30, // Dey
    30, // Bahman
    29, // Esfand (non-leap, adjusted by is_leap_year check)
];

/// Length of the arithmetic leap cycle in years
pub(crate) const LEAP_CYCLE_YEARS: i64 = 33;
/// Leap years contained in every run of `LEAP_CYCLE_YEARS` consecutive years
pub(crate) const LEAP_YEARS_PER_CYCLE: i64 = 8;
/// Days in one full leap cycle
pub(crate) const DAYS_PER_LEAP_CYCLE: i64 =
    LEAP_CYCLE_YEARS * DAYS_PER_YEAR + LEAP_YEARS_PER_CYCLE;

/// Weekday index (Saturday = 0) of 0001/01/01
pub(crate) const EPOCH_WEEKDAY: i64 = 5;

/// Tick count of 9999/12/29 23:59:59.999
pub const MAX_TICKS: i64 = 3_155_378_975_999_990_000;

/// Distance in ticks from the reference epoch (0001-01-01T00:00:00Z) to
/// 0001/01/01 00:00 local time
pub const UTC_OFFSET_TICKS: i64 = 196_036_290_000_000_000;

/// Reference-calendar ticks at the Unix epoch (1970-01-01T00:00:00Z)
pub const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;

/// Clock shift applied while daylight saving time is in effect
pub const DAYLIGHT_DELTA_TICKS: i64 = TICKS_PER_HOUR;

/// Earliest time-of-year (inclusive) observing daylight saving: 01/02 01:00
pub const DST_START_TICKS: i64 = TICKS_PER_DAY + TICKS_PER_HOUR;
/// Latest time-of-year (inclusive) observing daylight saving: 06/30 22:59:59.999
pub const DST_END_TICKS: i64 = 184 * TICKS_PER_DAY
    + 22 * TICKS_PER_HOUR
    + 59 * TICKS_PER_MINUTE
    + 59 * TICKS_PER_SECOND
    + 999 * TICKS_PER_MILLISECOND;

/// Date component separator used by the short date pattern
pub const DATE_SEPARATOR: char = '/';
/// Time component separator
pub const TIME_SEPARATOR: char = ':';
