use serde::{Deserialize, Serialize};

/// One job/role record inside a candidate's experience list.
///
/// The model is instructed to emit the `Structured` shape, but earlier
/// upstream formats delivered pre-formatted text blocks, so both variants
/// must survive the pipeline. Untagged: JSON objects deserialize to
/// `Structured`, bare strings to `FreeText`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExperienceEntry {
    Structured {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        duration: Option<String>,
    },
    FreeText(String),
}

/// Structured fields extracted from one resume, as produced by the sanitizer.
/// Immutable afterwards; derived fields live on `ParsedRow`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
}

/// One row of the output table. `experience` here is the formatted string,
/// not the raw entries; `experience_in_years` is rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRow {
    pub sno: usize,
    pub date: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub experience_in_years: f64,
    pub experience: String,
    pub skills: String,
    pub filename: String,
}
