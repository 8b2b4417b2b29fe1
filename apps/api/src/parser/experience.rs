//! Experience Aggregator and Formatter.
//!
//! The Aggregator folds every entry's duration through the duration parser
//! and totals the elapsed days; entries that do not parse are invisible to
//! the total. The Formatter renders the entries into one comparable string,
//! falling back to verbatim passthrough rather than dropping data.
//!
//! Note on the fallback regexes: the FreeText `Title:/Duration:` pattern does
//! not match the JSON shape the model is instructed to produce, and the
//! Aggregator's parenthesized fallback matches the Formatter's *output*
//! shape. Both are retained for older upstream formats; see DESIGN.md.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use crate::models::candidate::ExperienceEntry;
use crate::parser::duration::parse_duration_days;

/// Divisor for days → years; accounts for leap years.
const DAYS_PER_YEAR: f64 = 365.25;

fn paren_duration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\((.*?)\)").unwrap())
}

fn free_text_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Title: (.*?)\n.*Duration: (.*?)\n").unwrap())
}

/// Total years of experience across all entries, rounded to 2 decimal
/// places and clamped non-negative. An empty list totals 0.0.
pub fn total_experience_years(entries: &[ExperienceEntry], today: NaiveDate) -> f64 {
    let total_days: i64 = entries
        .iter()
        .filter_map(|entry| parse_duration_days(&duration_text(entry), today))
        .sum();

    let years = total_days as f64 / DAYS_PER_YEAR;
    ((years * 100.0).round() / 100.0).max(0.0)
}

/// The duration string for one entry: the `duration` field when structured,
/// else the first parenthesized group of a pre-formatted string.
fn duration_text(entry: &ExperienceEntry) -> String {
    match entry {
        ExperienceEntry::Structured { duration, .. } => duration.clone().unwrap_or_default(),
        ExperienceEntry::FreeText(text) => paren_duration_re()
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
    }
}

/// Renders all entries as `"<title> (<duration>)"` joined by `", "`, in
/// original order, with no deduplication.
pub fn format_experience(entries: &[ExperienceEntry]) -> String {
    entries
        .iter()
        .map(render_entry)
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_entry(entry: &ExperienceEntry) -> String {
    match entry {
        ExperienceEntry::Structured { title, duration } => format!(
            "{} ({})",
            title.as_deref().unwrap_or("N/A"),
            duration.as_deref().unwrap_or("N/A")
        ),
        ExperienceEntry::FreeText(text) => match free_text_re().captures(text) {
            Some(caps) => format!("{} ({})", caps[1].trim(), caps[2].trim()),
            None => text.clone(),
        },
    }
}
