//! Text to [`PersianDateTime`].
//!
//! Parsing happens in two steps. [`recognize`] matches the input against one
//! composed pattern and extracts whichever fields are present; [`resolve`]
//! fills in defaults and validates the result. Accepted shapes:
//!
//! - `Y/M/D`, with `/ - . ,` or whitespace between parts, optionally
//!   followed by whitespace or `T` and a time
//! - a bare time: `H[:m[:s[.fff]]]` followed by an optional AM/PM designator
//! - the compact `yyyyMMdd[THHmmssfff]` form

use crate::locale::to_latin_digits;
use crate::{CalendarError, Locale, PersianDateTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Capture-name prefixes of the three alternatives, in match-priority order
const DATE_TIME: &str = "";
const BARE_TIME: &str = "t_";
const COMPACT: &str = "c_";
const PREFIXES: [&str; 3] = [DATE_TIME, BARE_TIME, COMPACT];

static RECOGNIZER: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(&composed_pattern(Locale::persian())));

/// Text that could not be turned into a date-time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The text matches none of the accepted shapes.
    #[error("Unrecognized date-time text: {0:?}")]
    NoMatch(String),

    /// The text has a valid shape but names a date or time that does not exist.
    #[error(transparent)]
    InvalidValue(#[from] CalendarError),

    /// The composed pattern failed to compile.
    #[error("Date-time pattern failed to build: {0}")]
    Recognizer(String),
}

/// Fields found in the input. Absent parts are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Fields {
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub day: Option<i32>,
    pub hour: Option<i32>,
    pub minute: Option<i32>,
    pub second: Option<i32>,
    pub millisecond: Option<i32>,
    pub designator: Option<String>,
}

fn composed_pattern(locale: &Locale) -> String {
    let date_sep = format!(
        r"\s*(?:/|-|\.|,|\s|{})\s*",
        regex::escape(&locale.date_separator.to_string())
    );
    let time_sep = format!(
        r"\s*(?::|\.|,|\s|{})\s*",
        regex::escape(&locale.time_separator.to_string())
    );
    let designators = locale
        .designators()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|");

    let time = |p: &str| {
        format!(
            r"(?P<{p}hour>[0-9]{{1,2}})(?:{time_sep}(?P<{p}minute>[0-9]{{1,2}})(?:{time_sep}(?P<{p}second>[0-9]{{1,2}})(?:{time_sep}(?P<{p}millisecond>[0-9]{{1,3}}))?)?)?(?:\s+(?P<{p}designator>{designators}))?"
        )
    };
    let p = DATE_TIME;
    let date = format!(
        r"(?P<{p}year>[0-9]{{1,4}}){date_sep}(?P<{p}month>[0-9]{{1,2}}){date_sep}(?P<{p}day>[0-9]{{1,2}})"
    );
    let p = COMPACT;
    let compact = format!(
        r"(?P<{p}year>[0-9]{{4}})(?P<{p}month>[0-9]{{2}})(?P<{p}day>[0-9]{{2}})T?(?:(?P<{p}hour>[0-9]{{2}})(?P<{p}minute>[0-9]{{2}})(?P<{p}second>[0-9]{{2}})(?P<{p}millisecond>[0-9]{{3}}))?"
    );

    format!(
        r"(?i)^\s*(?:{date}(?:(?:\s+|T){})?|{}|{compact})\s*$",
        time(DATE_TIME),
        time(BARE_TIME)
    )
}

/// Matches `text` and extracts the fields it contains.
pub(crate) fn recognize(text: &str) -> Result<Fields, ParseError> {
    let recognizer = RECOGNIZER.as_ref().map_err(|e| {
        error!("date-time recognizer failed to build: {e}");
        ParseError::Recognizer(e.to_string())
    })?;

    let normalized = to_latin_digits(text);
    let Some(caps) = recognizer.captures(&normalized) else {
        debug!("no date-time shape matches {text:?}");
        return Err(ParseError::NoMatch(text.to_owned()));
    };

    let number = |name: &str| -> Result<Option<i32>, ParseError> {
        group(&caps, name)
            .map(|digits| {
                digits
                    .parse::<i32>()
                    .map_err(|_| ParseError::NoMatch(text.to_owned()))
            })
            .transpose()
    };

    let fields = Fields {
        year: number("year")?,
        month: number("month")?,
        day: number("day")?,
        hour: number("hour")?,
        minute: number("minute")?,
        second: number("second")?,
        millisecond: number("millisecond")?,
        designator: group(&caps, "designator").map(str::to_owned),
    };
    trace!("recognized {fields:?} in {text:?}");
    Ok(fields)
}

/// First participating capture named `name` across the alternatives
fn group<'t>(caps: &Captures<'t>, name: &str) -> Option<&'t str> {
    PREFIXES
        .iter()
        .find_map(|prefix| caps.name(&format!("{prefix}{name}")))
        .map(|m| m.as_str())
}

/// Fills missing date parts from `today` and missing time parts with zero,
/// applies the designator, then validates.
pub(crate) fn resolve(
    fields: Fields,
    today: impl FnOnce() -> Result<PersianDateTime, CalendarError>,
) -> Result<PersianDateTime, ParseError> {
    let (year, month, day) = match (fields.year, fields.month, fields.day) {
        (Some(year), Some(month), Some(day)) => (year, month, day),
        (year, month, day) => {
            let today = today()?;
            (
                year.unwrap_or_else(|| i32::from(today.year())),
                month.unwrap_or_else(|| i32::from(today.month())),
                day.unwrap_or_else(|| i32::from(today.day())),
            )
        }
    };

    let mut hour = fields.hour.unwrap_or(0);
    let is_pm = fields
        .designator
        .as_deref()
        .is_some_and(|d| Locale::persian().is_pm_designator(d));
    if is_pm && (1..12).contains(&hour) {
        hour += 12;
    }

    PersianDateTime::from_components(
        year,
        month,
        day,
        hour,
        fields.minute.unwrap_or(0),
        fields.second.unwrap_or(0),
        fields.millisecond.unwrap_or(0),
    )
    .map_err(|e| {
        debug!("recognized fields rejected: {e}");
        ParseError::InvalidValue(e)
    })
}

/// Parses `text`, taking missing date parts from `today`.
///
/// # Errors
/// Returns `ParseError::NoMatch` for unrecognized text and
/// `ParseError::InvalidValue` when the fields form no valid date-time.
pub fn parse_relative(text: &str, today: PersianDateTime) -> Result<PersianDateTime, ParseError> {
    resolve(recognize(text)?, || Ok(today))
}

/// Parses `text`, taking missing date parts from the current date.
///
/// # Errors
/// Returns `ParseError::NoMatch` for unrecognized text and
/// `ParseError::InvalidValue` when the fields form no valid date-time.
pub fn parse(text: &str) -> Result<PersianDateTime, ParseError> {
    resolve(recognize(text)?, PersianDateTime::today)
}

/// Like [`parse`], reporting failure as `None`.
pub fn try_parse(text: &str) -> Option<PersianDateTime> {
    parse(text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> PersianDateTime {
        PersianDateTime::from_components(1402, 5, 17, 18, 20, 0, 0).unwrap()
    }

    fn at(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
    ) -> PersianDateTime {
        PersianDateTime::from_components(year, month, day, hour, minute, second, millisecond)
            .unwrap()
    }

    fn parsed(text: &str) -> PersianDateTime {
        parse_relative(text, today()).unwrap()
    }

    #[test]
    fn test_pattern_compiles() {
        assert!(RECOGNIZER.is_ok());
    }

    #[test]
    fn test_date_and_time() {
        assert_eq!(parsed("1399/12/03 07:45"), at(1399, 12, 3, 7, 45, 0, 0));
        assert_eq!(parsed("1399/12/3 7:45:09"), at(1399, 12, 3, 7, 45, 9, 0));
        assert_eq!(
            parsed("1399-12-03T07:45:09.120"),
            at(1399, 12, 3, 7, 45, 9, 120)
        );
        assert_eq!(parsed("1399/12/03"), at(1399, 12, 3, 0, 0, 0, 0));
    }

    #[test]
    fn test_date_separators() {
        let expected = at(1399, 12, 3, 0, 0, 0, 0);
        for text in [
            "1399/12/03",
            "1399-12-03",
            "1399.12.03",
            "1399,12,03",
            "1399 12 03",
            "1399 / 12 / 03",
            "  1399/12/03  ",
        ] {
            assert_eq!(parsed(text), expected, "input {text:?}");
        }
    }

    #[test]
    fn test_time_separators() {
        let expected = at(1399, 12, 3, 7, 45, 9, 5);
        for text in [
            "1399/12/03 07:45:09.005",
            "1399/12/03 07.45.09.5",
            "1399/12/03 07,45,09,005",
            "1399/12/03 07 45 09 005",
            "1399/12/03T07:45:09:005",
        ] {
            assert_eq!(parsed(text), expected, "input {text:?}");
        }
    }

    #[test]
    fn test_compact_form() {
        assert_eq!(parsed("13991203074500000"), at(1399, 12, 3, 7, 45, 0, 0));
        assert_eq!(parsed("13991203T074509120"), at(1399, 12, 3, 7, 45, 9, 120));
        assert_eq!(parsed("13991203"), at(1399, 12, 3, 0, 0, 0, 0));
    }

    #[test]
    fn test_bare_time_uses_today() {
        assert_eq!(parsed("07:45"), at(1402, 5, 17, 7, 45, 0, 0));
        assert_eq!(parsed("7:45:30"), at(1402, 5, 17, 7, 45, 30, 0));
        assert_eq!(parsed("23"), at(1402, 5, 17, 23, 0, 0, 0));
    }

    #[test]
    fn test_designators() {
        let cases = [
            ("1:30 ب.ظ", 13u8),
            ("1:30 بعدازظهر", 13),
            ("1:30 PM", 13),
            ("1:30 pm", 13),
            ("11 PM", 23),
            ("12:30 PM", 12),
            ("0:30 PM", 0),
            ("1:30 ق.ظ", 1),
            ("1:30 قبل\u{200c}ازظهر", 1),
            ("12:30 AM", 12),
        ];
        for (text, hour) in cases {
            assert_eq!(parsed(text).hour(), hour, "input {text:?}");
        }
        assert_eq!(
            parsed("1399/12/03 1:30 بعدازظهر"),
            at(1399, 12, 3, 13, 30, 0, 0)
        );
    }

    #[test]
    fn test_native_digits() {
        assert_eq!(parsed("۱۳۹۹/۱۲/۰۳ ۰۷:۴۵"), at(1399, 12, 3, 7, 45, 0, 0));
        assert_eq!(parsed("١٣٩٩/١٢/٠٣"), at(1399, 12, 3, 0, 0, 0, 0));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            parse_relative("1398/12/30", today()),
            Err(ParseError::InvalidValue(CalendarError::InvalidDay { .. }))
        ));
        assert!(matches!(
            parse_relative("1399/13/01", today()),
            Err(ParseError::InvalidValue(CalendarError::InvalidMonth(13)))
        ));
        assert!(matches!(
            parse_relative("25:00", today()),
            Err(ParseError::InvalidValue(CalendarError::InvalidTime { .. }))
        ));
        assert!(matches!(
            parse_relative("0/01/01", today()),
            Err(ParseError::InvalidValue(CalendarError::InvalidYear(0)))
        ));
    }

    #[test]
    fn test_no_match() {
        for text in ["", "   ", "abc", "1399/12", "1399/12/03 07:45 tomorrow", "1399:12:03"] {
            assert_eq!(
                parse_relative(text, today()),
                Err(ParseError::NoMatch(text.to_owned())),
                "input {text:?}"
            );
        }
    }

    #[test]
    fn test_recognize_then_resolve() {
        let fields = recognize("13:05").unwrap();
        assert_eq!(
            fields,
            Fields {
                hour: Some(13),
                minute: Some(5),
                ..Fields::default()
            }
        );

        let fields = recognize("1399/12/03 1 PM").unwrap();
        assert_eq!(fields.designator.as_deref(), Some("PM"));
        assert_eq!(fields.minute, None);

        // A full date never consults today
        let resolved = resolve(fields, || Err(CalendarError::TicksOutOfRange(-1))).unwrap();
        assert_eq!(resolved, at(1399, 12, 3, 13, 0, 0, 0));
    }

    #[test]
    fn test_try_parse() {
        assert_eq!(
            try_parse("1399/12/03 07:45"),
            Some(at(1399, 12, 3, 7, 45, 0, 0))
        );
        assert_eq!(try_parse("1398/12/30"), None);
        assert_eq!(try_parse("not a date"), None);
        assert!(parse("not a date").is_err());
    }

    #[test]
    fn test_round_trips_formatted_output() {
        let date = at(1399, 12, 3, 7, 45, 9, 120);
        for pattern in ["o", "s", "G", "d"] {
            let text = date.format(pattern).unwrap();
            let back = parsed(&text);
            assert_eq!(back.date(), date.date(), "pattern {pattern:?} -> {text:?}");
        }
        assert_eq!(parsed(&date.format("o").unwrap()), date);
    }
}
