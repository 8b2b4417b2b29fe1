//! Duration Parser — reads one human-written date range into elapsed days.
//!
//! Ranges arrive as `"01/2020 - Present"`, `"Jan 2019 – Mar 2021"`, and
//! worse. Failures are silent by contract: a bad entry contributes nothing
//! to any aggregate, and never fails the file it belongs to.

use chrono::NaiveDate;

const MONTH_NAMES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Elapsed days covered by one duration string, or `None` when the text is
/// not a readable date range.
///
/// `today` resolves a case-insensitive `"present"` end date; it is an
/// explicit parameter so ongoing roles are deterministic under test.
pub fn parse_duration_days(duration: &str, today: NaiveDate) -> Option<i64> {
    let separator = if duration.contains('-') {
        '-'
    } else if duration.contains('\u{2013}') {
        '\u{2013}'
    } else {
        return None;
    };

    let parts: Vec<&str> = duration.split(separator).map(str::trim).collect();
    let &[start_text, end_text] = parts.as_slice() else {
        // More than one separator means the split point is ambiguous.
        return None;
    };

    let end = if end_text.eq_ignore_ascii_case("present") {
        today
    } else {
        parse_fuzzy_date(end_text)?
    };
    let start = parse_fuzzy_date(start_text)?;

    Some((end - start).num_days())
}

/// Fuzzy calendar-date parse: scans tokens for a month (name or number),
/// a 4-digit year, and optionally a day, in any order, ignoring extra words.
/// Missing day defaults to 1, missing month to January; a date with no
/// recognizable year is unreadable.
pub fn parse_fuzzy_date(text: &str) -> Option<NaiveDate> {
    let mut year: Option<i32> = None;
    let mut month: Option<u32> = None;
    let mut day: Option<u32> = None;

    for token in text
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
    {
        if let Ok(number) = token.parse::<u32>() {
            if (1000..=9999).contains(&number) && year.is_none() {
                year = Some(number as i32);
            } else if (1..=12).contains(&number) && month.is_none() {
                month = Some(number);
            } else if (1..=31).contains(&number) && day.is_none() {
                day = Some(number);
            }
        } else if month.is_none() && token.len() >= 3 {
            let lower = token.to_ascii_lowercase();
            if let Some(index) = MONTH_NAMES.iter().position(|name| lower.starts_with(name)) {
                month = Some(index as u32 + 1);
            }
        }
    }

    let year = year?;
    let month = month.unwrap_or(1);
    // A day that does not exist in the month (e.g. "Feb 31") falls back to the 1st.
    NaiveDate::from_ymd_opt(year, month, day.unwrap_or(1))
        .or_else(|| NaiveDate::from_ymd_opt(year, month, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const SIMULATED_TODAY: (i32, u32, u32) = (2023, 1, 1);

    fn today() -> NaiveDate {
        let (y, m, d) = SIMULATED_TODAY;
        date(y, m, d)
    }

    #[test]
    fn test_leap_year_range_is_366_days() {
        // 2020 is a leap year.
        assert_eq!(parse_duration_days("01/2020 - 01/2021", today()), Some(366));
    }

    #[test]
    fn test_present_resolves_to_today() {
        // 2020-01-01 .. 2023-01-01 spans 1096 days.
        assert_eq!(parse_duration_days("01/2020 - Present", today()), Some(1096));
        assert_eq!(parse_duration_days("01/2020 - PRESENT", today()), Some(1096));
    }

    #[test]
    fn test_en_dash_separator() {
        let days = parse_duration_days("Jan 2019 \u{2013} Mar 2021", today()).unwrap();
        assert_eq!(days, (date(2021, 3, 1) - date(2019, 1, 1)).num_days());
    }

    #[test]
    fn test_month_name_variants() {
        assert_eq!(parse_fuzzy_date("Jan 2019"), Some(date(2019, 1, 1)));
        assert_eq!(parse_fuzzy_date("January 2019"), Some(date(2019, 1, 1)));
        assert_eq!(parse_fuzzy_date("Sept 2019"), Some(date(2019, 9, 1)));
        assert_eq!(parse_fuzzy_date("2019 Dec"), Some(date(2019, 12, 1)));
    }

    #[test]
    fn test_numeric_date_orders() {
        assert_eq!(parse_fuzzy_date("01/2020"), Some(date(2020, 1, 1)));
        assert_eq!(parse_fuzzy_date("2020/06"), Some(date(2020, 6, 1)));
        assert_eq!(parse_fuzzy_date("03/15/2020"), Some(date(2020, 3, 15)));
    }

    #[test]
    fn test_bare_year_defaults_to_january_first() {
        assert_eq!(parse_fuzzy_date("2019"), Some(date(2019, 1, 1)));
    }

    #[test]
    fn test_extra_words_are_ignored() {
        assert_eq!(
            parse_fuzzy_date("since about Jan 2019 or so"),
            Some(date(2019, 1, 1))
        );
    }

    #[test]
    fn test_impossible_day_falls_back_to_first() {
        assert_eq!(parse_fuzzy_date("Feb 31 2020"), Some(date(2020, 2, 1)));
    }

    #[test]
    fn test_unreadable_inputs_are_none() {
        assert_eq!(parse_duration_days("not a date", today()), None);
        assert_eq!(parse_duration_days("", today()), None);
        assert_eq!(parse_duration_days("01/2020 to 01/2021", today()), None);
        assert_eq!(parse_fuzzy_date("someday"), None);
    }

    #[test]
    fn test_multiple_separators_are_rejected() {
        // Three-way split has no unambiguous start/end.
        assert_eq!(
            parse_duration_days("01/2020 - 06/2020 - 12/2020", today()),
            None
        );
    }

    #[test]
    fn test_unparseable_half_is_none() {
        assert_eq!(parse_duration_days("garbage - 01/2021", today()), None);
        assert_eq!(parse_duration_days("01/2020 - garbage", today()), None);
    }
}
