//! Response Sanitizer — turns a raw model response into a `CandidateRecord`.
//!
//! The model is asked for bare JSON, but responses routinely arrive wrapped
//! in prose and markdown code fences, with minor syntax damage on top.
//! Cleanup is best-effort bracket alignment plus fence stripping, then the
//! tolerant repairer does the rest. No failure escapes as anything other
//! than the typed error.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::candidate::{CandidateRecord, ExperienceEntry};
use crate::parser::repair::repair_json;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SanitizeError {
    #[error("response contains no brace-delimited payload")]
    NoPayload,

    #[error("payload could not be repaired into a JSON object")]
    Unrepairable,
}

/// Repairs a raw model response into a `CandidateRecord`.
///
/// Assumes the payload is the first/last brace-delimited block in the text;
/// this is bracket alignment, not a full parser.
pub fn sanitize_model_response(raw: &str) -> Result<CandidateRecord, SanitizeError> {
    let start = raw.find('{').ok_or(SanitizeError::NoPayload)?;
    let end = raw.rfind('}').ok_or(SanitizeError::NoPayload)?;
    if end < start {
        return Err(SanitizeError::NoPayload);
    }

    let cleaned = raw[start..=end].replace("```json", "").replace("```", "");

    let value = repair_json(&cleaned).ok_or(SanitizeError::Unrepairable)?;
    let map = value.as_object().ok_or(SanitizeError::Unrepairable)?;
    Ok(record_from_map(map))
}

/// Lenient lowering of a repaired object into the record shape: scalars
/// default to empty, non-string skills are dropped, experience elements that
/// are neither objects nor strings are dropped.
fn record_from_map(map: &Map<String, Value>) -> CandidateRecord {
    CandidateRecord {
        name: scalar_field(map, "name"),
        email: scalar_field(map, "email"),
        phone: scalar_field(map, "phone"),
        skills: map
            .get("skills")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default(),
        experience: map
            .get("experience")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(experience_entry).collect())
            .unwrap_or_default(),
    }
}

fn scalar_field(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.clone(),
        // Phone numbers occasionally come back as bare numbers.
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn experience_entry(value: &Value) -> Option<ExperienceEntry> {
    match value {
        Value::Object(entry) => Some(ExperienceEntry::Structured {
            title: entry.get("title").and_then(Value::as_str).map(String::from),
            duration: entry
                .get("duration")
                .and_then(Value::as_str)
                .map(String::from),
        }),
        Value::String(text) => Some(ExperienceEntry::FreeText(text.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BARE_PAYLOAD: &str = r#"{
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "phone": "555-0100",
        "skills": ["Mathematics", "Programming"],
        "experience": [
            {"title": "Analyst", "duration": "01/2020 - 01/2021"}
        ]
    }"#;

    #[test]
    fn test_bare_payload_sanitizes() {
        let record = sanitize_model_response(BARE_PAYLOAD).unwrap();
        assert_eq!(record.name, "Ada Lovelace");
        assert_eq!(record.skills.len(), 2);
        assert_eq!(record.experience.len(), 1);
    }

    #[test]
    fn test_fenced_and_prose_wrapped_equals_bare() {
        let wrapped = format!(
            "Here is the extracted information:\n```json\n{BARE_PAYLOAD}\n```\nLet me know if you need anything else!"
        );
        let bare = sanitize_model_response(BARE_PAYLOAD).unwrap();
        let sanitized = sanitize_model_response(&wrapped).unwrap();
        assert_eq!(sanitized, bare);
    }

    #[test]
    fn test_no_braces_is_failure_not_panic() {
        assert_eq!(
            sanitize_model_response("I could not find any resume data."),
            Err(SanitizeError::NoPayload)
        );
    }

    #[test]
    fn test_closing_brace_before_opening_is_failure() {
        assert_eq!(
            sanitize_model_response("} nothing here {"),
            Err(SanitizeError::NoPayload)
        );
    }

    #[test]
    fn test_trailing_comma_payload_is_repaired() {
        let raw = r#"{"name": "Ada", "skills": ["Rust",],}"#;
        let record = sanitize_model_response(raw).unwrap();
        assert_eq!(record.name, "Ada");
        assert_eq!(record.skills, vec!["Rust".to_string()]);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let record = sanitize_model_response(r#"{"name": "Ada"}"#).unwrap();
        assert_eq!(record.email, "");
        assert_eq!(record.phone, "");
        assert!(record.skills.is_empty());
        assert!(record.experience.is_empty());
    }

    #[test]
    fn test_numeric_phone_is_stringified() {
        let record = sanitize_model_response(r#"{"phone": 5550100}"#).unwrap();
        assert_eq!(record.phone, "5550100");
    }

    #[test]
    fn test_mixed_experience_shapes() {
        let raw = r#"{
            "experience": [
                {"title": "Engineer", "duration": "01/2020 - Present"},
                "Title: Analyst\nDuration: 01/2018 - 01/2019\n",
                42
            ]
        }"#;
        let record = sanitize_model_response(raw).unwrap();
        assert_eq!(record.experience.len(), 2);
        assert!(matches!(
            record.experience[0],
            ExperienceEntry::Structured { .. }
        ));
        assert!(matches!(
            record.experience[1],
            ExperienceEntry::FreeText(_)
        ));
    }

    #[test]
    fn test_non_string_skills_are_dropped() {
        let record = sanitize_model_response(r#"{"skills": ["Rust", 7, null, "C"]}"#).unwrap();
        assert_eq!(record.skills, vec!["Rust".to_string(), "C".to_string()]);
    }

    #[test]
    fn test_trailing_garbage_after_payload_is_ignored() {
        let raw = r#"[{"name": "Ada"}] trailing }"#;
        let record = sanitize_model_response(raw).unwrap();
        assert_eq!(record.name, "Ada");
    }
}
