//! Pattern-driven rendering of [`PersianDateTime`].
//!
//! A pattern is first run through a small state machine that separates
//! quoted/escaped literals from field tokens, then every run of identical
//! token characters (`yyyy`, `MM`, `:`) is expanded on its own.

use crate::{Locale, PersianDateTime};

/// Pattern used when none is given
const GENERAL_PATTERN: &str = "G";

/// A malformed or unsupported format pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// Pattern ended inside a quoted literal.
    #[error("Unterminated {0} quoted literal in format pattern")]
    UnterminatedQuote(char),

    /// Pattern ended right after a `\`.
    #[error("Format pattern ends with a dangling escape")]
    DanglingEscape,

    /// Pattern ended right after a `%`.
    #[error("Format pattern ends with a dangling '%'")]
    DanglingPercent,

    /// `K`, `z`, `zz` and `zzz` have no meaning without zone support.
    #[error("Time zone token '{0}' is not supported")]
    UnsupportedTimeZone(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Collecting ordinary token characters
    Literal,
    /// Inside `'...'`
    SingleQuote,
    /// Inside `"..."`
    DoubleQuote,
    /// After `\`
    Escape,
    /// After `%`
    Percent,
}

/// What to do with the character that caused a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    /// Append to the pending token batch
    Buffer,
    /// Flush the pending batch; the character itself is consumed
    Flush,
    /// Emit the character as-is
    Verbatim,
    /// Expand the character as a one-character token
    Token,
    /// Drop the character
    Skip,
}

impl ScanState {
    const fn step(self, ch: char) -> (Self, Action) {
        match self {
            Self::Literal => match ch {
                '\'' => (Self::SingleQuote, Action::Flush),
                '"' => (Self::DoubleQuote, Action::Flush),
                '\\' => (Self::Escape, Action::Flush),
                '%' => (Self::Percent, Action::Flush),
                _ => (Self::Literal, Action::Buffer),
            },
            Self::SingleQuote => match ch {
                '\'' => (Self::Literal, Action::Skip),
                _ => (Self::SingleQuote, Action::Verbatim),
            },
            Self::DoubleQuote => match ch {
                '"' => (Self::Literal, Action::Skip),
                _ => (Self::DoubleQuote, Action::Verbatim),
            },
            Self::Escape => (Self::Literal, Action::Verbatim),
            Self::Percent => (Self::Literal, Action::Token),
        }
    }

    const fn finish(self) -> Result<(), FormatError> {
        match self {
            Self::Literal => Ok(()),
            Self::SingleQuote => Err(FormatError::UnterminatedQuote('\'')),
            Self::DoubleQuote => Err(FormatError::UnterminatedQuote('"')),
            Self::Escape => Err(FormatError::DanglingEscape),
            Self::Percent => Err(FormatError::DanglingPercent),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    /// Text copied to the output unchanged
    Literal(String),
    /// A batch of token characters, split into runs when rendered
    Tokens(String),
    /// A single `%`-forced token
    Token(char),
}

fn scan(pattern: &str) -> Result<Vec<Piece>, FormatError> {
    let mut pieces = Vec::new();
    let mut batch = String::new();
    let mut state = ScanState::Literal;

    for ch in pattern.chars() {
        let (next, action) = state.step(ch);
        match action {
            Action::Buffer => batch.push(ch),
            Action::Flush => flush(&mut batch, &mut pieces),
            Action::Verbatim => match pieces.last_mut() {
                Some(Piece::Literal(text)) => text.push(ch),
                _ => pieces.push(Piece::Literal(ch.to_string())),
            },
            Action::Token => pieces.push(Piece::Token(ch)),
            Action::Skip => {}
        }
        state = next;
    }

    state.finish()?;
    flush(&mut batch, &mut pieces);
    Ok(pieces)
}

fn flush(batch: &mut String, pieces: &mut Vec<Piece>) {
    if !batch.is_empty() {
        pieces.push(Piece::Tokens(std::mem::take(batch)));
    }
}

/// Splits `s` into maximal runs of one repeated character.
fn runs(s: &str) -> Vec<(char, usize)> {
    let mut out: Vec<(char, usize)> = Vec::new();
    for ch in s.chars() {
        match out.last_mut() {
            Some((last, len)) if *last == ch => *len += 1,
            _ => out.push((ch, 1)),
        }
    }
    out
}

/// Renders `instant` with `pattern`, or the general pattern when `None`.
///
/// A one-character pattern is first looked up as a standard pattern
/// (`d`, `D`, `t`, `T`, `f`, `F`, `g`, `G`, `M`, `y`, `s`, `o`); letters
/// without a standard meaning are rendered as custom tokens.
///
/// # Errors
/// Returns a `FormatError` for unterminated quotes/escapes or time-zone tokens.
pub fn format(instant: &PersianDateTime, pattern: Option<&str>) -> Result<String, FormatError> {
    let locale = Locale::persian();
    let pattern = pattern.unwrap_or(GENERAL_PATTERN);

    let mut letters = pattern.chars();
    let expanded = match (letters.next(), letters.next()) {
        (Some(letter), None) => locale.standard_pattern(letter),
        _ => None,
    };
    let pattern = expanded.as_deref().unwrap_or(pattern);

    let mut out = String::with_capacity(pattern.len() * 2);
    for piece in scan(pattern)? {
        match piece {
            Piece::Literal(text) => out.push_str(&text),
            Piece::Tokens(batch) => {
                for (ch, len) in runs(&batch) {
                    out.push_str(&expand(instant, locale, ch, len)?);
                }
            }
            Piece::Token(ch) => out.push_str(&expand(instant, locale, ch, 1)?),
        }
    }
    Ok(out)
}

/// Expands one run of `len` copies of `ch`.
fn expand(
    t: &PersianDateTime,
    locale: &Locale,
    ch: char,
    len: usize,
) -> Result<String, FormatError> {
    let text = match (ch, len) {
        ('d', 1) => t.day().to_string(),
        ('d', 2) => format!("{:02}", t.day()),
        ('d', 3) => locale.abbreviated_day_name(t.weekday()).to_owned(),
        ('d', 4) => locale.day_name(t.weekday()).to_owned(),

        ('f', 1..=3) => fraction(t.millisecond(), len),
        ('F', 1..=3) => fraction(t.millisecond(), len)
            .trim_end_matches('0')
            .to_owned(),

        // Era is not rendered
        ('g', 1 | 2) => String::new(),

        ('h', 1) => t.hour12().to_string(),
        ('h', 2) => format!("{:02}", t.hour12()),
        ('H', 1) => t.hour().to_string(),
        ('H', 2) => format!("{:02}", t.hour()),

        ('m', 1) => t.minute().to_string(),
        ('m', 2) => format!("{:02}", t.minute()),

        ('M', 1) => t.month().to_string(),
        ('M', 2) => format!("{:02}", t.month()),
        ('M', 3 | 4) => locale.month_name(t.month()).to_owned(),

        ('s', 1) => t.second().to_string(),
        ('s', 2) => format!("{:02}", t.second()),

        ('t', 1) => locale
            .designator(t.is_afternoon())
            .chars()
            .next()
            .map(String::from)
            .unwrap_or_default(),
        ('t', 2) => locale.designator(t.is_afternoon()).to_owned(),

        ('y', 1) => (t.year() % 100).to_string(),
        ('y', 2) => format!("{:02}", t.year() % 100),
        ('y', 3) => format!("{:03}", t.year()),
        ('y', 4) => format!("{:04}", t.year()),
        ('y', 5) => format!("{:05}", t.year()),

        ('K', 1) | ('z', 1..=3) => {
            return Err(FormatError::UnsupportedTimeZone(ch.to_string().repeat(len)));
        }

        (':', 1) => locale.time_separator.to_string(),
        ('/', 1) => locale.date_separator.to_string(),

        _ => ch.to_string().repeat(len),
    };
    Ok(text)
}

/// Leading `digits` digits of the zero-padded millisecond
fn fraction(millisecond: u16, digits: usize) -> String {
    let mut text = format!("{millisecond:03}");
    text.truncate(digits);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PersianDateTime {
        PersianDateTime::from_components(1399, 12, 3, 7, 45, 0, 0).unwrap()
    }

    fn fmt(t: &PersianDateTime, pattern: &str) -> String {
        format(t, Some(pattern)).unwrap()
    }

    #[test]
    fn test_custom_pattern() {
        assert_eq!(fmt(&sample(), "yyyy/MM/dd HH:mm:ss"), "1399/12/03 07:45:00");
        assert_eq!(fmt(&sample(), "y/M/d H:m:s"), "99/12/3 7:45:0");
    }

    #[test]
    fn test_default_is_general() {
        assert_eq!(format(&sample(), None).unwrap(), "1399/12/03 07:45:00");
    }

    #[test]
    fn test_standard_patterns() {
        let t = sample();
        let cases = [
            ("d", "1399/12/03"),
            ("D", "1399 اسفند یکشنبه, 03"),
            ("t", "07:45:00"),
            ("T", "07:45:00"),
            ("f", "1399 اسفند یکشنبه, 03 07:45:00"),
            ("F", "1399 اسفند یکشنبه, 03 07:45:00"),
            ("g", "1399/12/03 07:45:00"),
            ("G", "1399/12/03 07:45:00"),
            ("M", "اسفند 03"),
            ("m", "اسفند 03"),
            ("Y", "1399 اسفند"),
            ("y", "1399 اسفند"),
            ("s", "1399-12-03T07:45:00"),
            ("o", "1399-12-03T07:45:00.000"),
            ("O", "1399-12-03T07:45:00.000"),
        ];
        for (pattern, expected) in cases {
            assert_eq!(fmt(&t, pattern), expected, "pattern {pattern:?}");
        }
    }

    #[test]
    fn test_unresolved_single_letter_is_a_token() {
        let t = PersianDateTime::from_components(1399, 12, 3, 13, 5, 0, 0).unwrap();
        assert_eq!(fmt(&t, "h"), "1");
        assert_eq!(fmt(&t, "H"), "13");
        assert_eq!(fmt(&t, "Q"), "Q");
    }

    #[test]
    fn test_names() {
        let t = sample();
        assert_eq!(fmt(&t, "dddd"), "یکشنبه");
        assert_eq!(fmt(&t, "ddd"), "ی");
        assert_eq!(fmt(&t, "MMMM"), "اسفند");
        assert_eq!(fmt(&t, "MMM"), "اسفند");
    }

    #[test]
    fn test_twelve_hour_clock_and_designators() {
        let pm = PersianDateTime::from_components(1399, 12, 3, 13, 5, 0, 0).unwrap();
        assert_eq!(fmt(&pm, "hh:mm tt"), "01:05 بعدازظهر");
        assert_eq!(fmt(&pm, "h t"), "1 ب");

        let am = sample();
        assert_eq!(fmt(&am, "hh tt"), "07 قبل\u{200c}ازظهر");
        assert_eq!(fmt(&am, "%t"), "ق");

        let midnight = PersianDateTime::new(1399, 12, 3).unwrap();
        assert_eq!(fmt(&midnight, "hh"), "12");
    }

    #[test]
    fn test_fractions() {
        let cases = [
            (120, "1", "12", "120", "1", "12", "12"),
            (5, "0", "00", "005", "", "", "005"),
            (0, "0", "00", "000", "", "", ""),
            (999, "9", "99", "999", "9", "99", "999"),
        ];
        for (ms, f, ff, fff, upper_f, upper_ff, upper_fff) in cases {
            let t = PersianDateTime::from_components(1399, 1, 1, 0, 0, 0, ms).unwrap();
            assert_eq!(fmt(&t, "%f"), f, "f for {ms}");
            assert_eq!(fmt(&t, "ff"), ff, "ff for {ms}");
            assert_eq!(fmt(&t, "fff"), fff, "fff for {ms}");
            assert_eq!(fmt(&t, "%F"), upper_f, "F for {ms}");
            assert_eq!(fmt(&t, "FF"), upper_ff, "FF for {ms}");
            assert_eq!(fmt(&t, "FFF"), upper_fff, "FFF for {ms}");
        }
    }

    #[test]
    fn test_year_widths() {
        let t = sample();
        assert_eq!(fmt(&t, "%y"), "99");
        assert_eq!(fmt(&t, "yy"), "99");
        assert_eq!(fmt(&t, "yyy"), "1399");
        assert_eq!(fmt(&t, "yyyyy"), "01399");

        let early = PersianDateTime::new(5, 1, 1).unwrap();
        assert_eq!(fmt(&early, "%y"), "5");
        assert_eq!(fmt(&early, "yy"), "05");
        assert_eq!(fmt(&early, "yyy"), "005");
        assert_eq!(fmt(&early, "yyyy"), "0005");
    }

    #[test]
    fn test_literals() {
        let t = sample();
        assert_eq!(fmt(&t, "yyyy 'yyyy' MM"), "1399 yyyy 12");
        assert_eq!(fmt(&t, "\"MM:dd\" MM"), "MM:dd 12");
        assert_eq!(fmt(&t, "\\d d"), "d 3");
        assert_eq!(fmt(&t, "%d"), "3");
        assert_eq!(fmt(&t, "%%"), "%");
        assert_eq!(fmt(&t, "yyyy-MM-ddTHH"), "1399-12-03T07");
        assert_eq!(fmt(&t, "HH::mm"), "07::45");
        assert_eq!(fmt(&t, "gg yyyy"), " 1399");
        assert_eq!(fmt(&t, "dddddd"), "dddddd");
    }

    #[test]
    fn test_malformed_patterns() {
        let t = sample();
        assert_eq!(
            format(&t, Some("yyyy 'open")),
            Err(FormatError::UnterminatedQuote('\''))
        );
        assert_eq!(
            format(&t, Some("yyyy \"open")),
            Err(FormatError::UnterminatedQuote('"'))
        );
        assert_eq!(format(&t, Some("yyyy\\")), Err(FormatError::DanglingEscape));
        assert_eq!(format(&t, Some("%")), Err(FormatError::DanglingPercent));
    }

    #[test]
    fn test_time_zone_tokens_are_unsupported() {
        let t = sample();
        for pattern in ["K", "%z", "zz", "HH:mm zzz"] {
            assert!(
                matches!(
                    format(&t, Some(pattern)),
                    Err(FormatError::UnsupportedTimeZone(_))
                ),
                "pattern {pattern:?}"
            );
        }
        assert_eq!(
            format(&t, Some("zzz")),
            Err(FormatError::UnsupportedTimeZone("zzz".to_owned()))
        );
    }

    #[test]
    fn test_scan_state_transitions() {
        use Action::*;
        use ScanState::*;

        assert_eq!(Literal.step('y'), (Literal, Buffer));
        assert_eq!(Literal.step('\''), (SingleQuote, Flush));
        assert_eq!(Literal.step('"'), (DoubleQuote, Flush));
        assert_eq!(Literal.step('\\'), (Escape, Flush));
        assert_eq!(Literal.step('%'), (Percent, Flush));
        assert_eq!(SingleQuote.step('"'), (SingleQuote, Verbatim));
        assert_eq!(SingleQuote.step('\''), (Literal, Skip));
        assert_eq!(DoubleQuote.step('\''), (DoubleQuote, Verbatim));
        assert_eq!(DoubleQuote.step('"'), (Literal, Skip));
        assert_eq!(Escape.step('\''), (Literal, Verbatim));
        assert_eq!(Percent.step('y'), (Literal, Token));
    }

    #[test]
    fn test_scan_pieces() {
        assert_eq!(
            scan("yyyy'-'MM%d\\x").unwrap(),
            vec![
                Piece::Tokens("yyyy".to_owned()),
                Piece::Literal("-".to_owned()),
                Piece::Tokens("MM".to_owned()),
                Piece::Token('d'),
                Piece::Literal("x".to_owned()),
            ]
        );
        assert_eq!(scan("").unwrap(), vec![]);
    }

    #[test]
    fn test_runs() {
        assert_eq!(
            runs("yyyy/MM"),
            vec![('y', 4), ('/', 1), ('M', 2)]
        );
        assert!(runs("").is_empty());
    }
}
