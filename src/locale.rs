//! Read-only culture data used by the formatter and the parser.

use crate::consts::{DATE_SEPARATOR, TIME_SEPARATOR};
use crate::types::Weekday;

/// Offset from an ASCII digit to its Extended Arabic-Indic (Persian) form
const PERSIAN_DIGIT_OFFSET: u32 = '۰' as u32 - '0' as u32;
/// Offset from an ASCII digit to its Arabic-Indic form
const ARABIC_DIGIT_OFFSET: u32 = '٠' as u32 - '0' as u32;

/// Day names, month names, designators, separators and standard patterns.
///
/// There is a single process-wide instance, [`Locale::persian`]; it is never
/// mutated and can be shared freely across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    /// Day names, the week starting on Saturday
    pub day_names: [&'static str; 7],
    /// Month names, Farvardin first
    pub month_names: [&'static str; 12],
    /// Digit glyphs for 0 through 9
    pub digits: [char; 10],
    pub am_designator: &'static str,
    pub pm_designator: &'static str,
    /// Alternate spellings accepted by the parser, native abbreviation first
    pub alt_am_designators: [&'static str; 2],
    pub alt_pm_designators: [&'static str; 2],
    pub date_separator: char,
    pub time_separator: char,
    pub short_date_pattern: &'static str,
    pub long_date_pattern: &'static str,
    pub short_time_pattern: &'static str,
    pub long_time_pattern: &'static str,
    pub full_date_time_pattern: &'static str,
}

static PERSIAN: Locale = Locale {
    day_names: [
        "شنبه",
        "یکشنبه",
        "دوشنبه",
        "سه\u{200c}شنبه",
        "چهارشنبه",
        "پنجشنبه",
        "جمعه",
    ],
    month_names: [
        "فروردین",
        "اردیبهشت",
        "خرداد",
        "تیر",
        "مرداد",
        "شهریور",
        "مهر",
        "آبان",
        "آذر",
        "دی",
        "بهمن",
        "اسفند",
    ],
    digits: ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'],
    am_designator: "قبل\u{200c}ازظهر",
    pm_designator: "بعدازظهر",
    alt_am_designators: ["ق.ظ", "AM"],
    alt_pm_designators: ["ب.ظ", "PM"],
    date_separator: DATE_SEPARATOR,
    time_separator: TIME_SEPARATOR,
    short_date_pattern: "yyyy/MM/dd",
    long_date_pattern: "yyyy MMMM dddd, dd",
    short_time_pattern: "HH:mm:ss",
    long_time_pattern: "HH:mm:ss",
    full_date_time_pattern: "yyyy MMMM dddd, dd HH:mm:ss",
};

impl Locale {
    /// The Persian (fa-IR) table.
    #[inline]
    pub fn persian() -> &'static Self {
        &PERSIAN
    }

    pub fn day_name(&self, weekday: Weekday) -> &'static str {
        self.day_names[weekday.index()]
    }

    /// Single-letter abbreviation of the day name
    pub fn abbreviated_day_name(&self, weekday: Weekday) -> &'static str {
        first_char(self.day_name(weekday))
    }

    /// Name of a 1-based month
    pub fn month_name(&self, month: u8) -> &'static str {
        self.month_names[usize::from(month.clamp(1, 12)) - 1]
    }

    pub fn designator(&self, afternoon: bool) -> &'static str {
        if afternoon {
            self.pm_designator
        } else {
            self.am_designator
        }
    }

    /// Whether `text` names the afternoon in any accepted spelling.
    pub fn is_pm_designator(&self, text: &str) -> bool {
        std::iter::once(self.pm_designator)
            .chain(self.alt_pm_designators)
            .any(|d| d.eq_ignore_ascii_case(text))
    }

    /// All designators the parser accepts, in match-priority order.
    pub fn designators(&self) -> impl Iterator<Item = &'static str> {
        [self.am_designator, self.pm_designator]
            .into_iter()
            .chain(self.alt_am_designators)
            .chain(self.alt_pm_designators)
    }

    /// Expands a standard single-letter pattern.
    ///
    /// Returns `None` for letters with no standard meaning.
    pub fn standard_pattern(&self, letter: char) -> Option<String> {
        let pattern = match letter {
            'd' => self.short_date_pattern.to_owned(),
            'D' => self.long_date_pattern.to_owned(),
            't' => self.short_time_pattern.to_owned(),
            'T' => self.long_time_pattern.to_owned(),
            'f' => format!("{} {}", self.long_date_pattern, self.short_time_pattern),
            'F' => self.full_date_time_pattern.to_owned(),
            'g' => format!("{} {}", self.short_date_pattern, self.short_time_pattern),
            'G' => format!("{} {}", self.short_date_pattern, self.long_time_pattern),
            'M' | 'm' => "MMMM dd".to_owned(),
            'Y' | 'y' => "yyyy MMMM".to_owned(),
            's' => "yyyy'-'MM'-'dd'T'HH':'mm':'ss".to_owned(),
            'O' | 'o' => "yyyy'-'MM'-'dd'T'HH':'mm':'ss'.'fff".to_owned(),
            _ => return None,
        };
        Some(pattern)
    }
}

fn first_char(s: &str) -> &str {
    s.char_indices().nth(1).map_or(s, |(end, _)| &s[..end])
}

/// Replaces ASCII digits with Persian digit glyphs.
pub fn to_persian_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => Locale::persian().digits[d as usize],
            _ => c,
        })
        .collect()
}

/// Replaces Persian and Arabic-Indic digits with their ASCII forms.
pub fn to_latin_digits(text: &str) -> String {
    text.chars()
        .map(|c| {
            let code = c as u32;
            let ascii = match c {
                '۰'..='۹' => code - PERSIAN_DIGIT_OFFSET,
                '٠'..='٩' => code - ARABIC_DIGIT_OFFSET,
                _ => return c,
            };
            char::from_u32(ascii).unwrap_or(c)
        })
        .collect()
}
