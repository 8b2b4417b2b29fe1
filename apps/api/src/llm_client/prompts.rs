// All LLM prompt constants for resume extraction.

/// System prompt — enforces JSON-only output.
pub const RESUME_PARSE_SYSTEM: &str =
    "You are an expert resume analyst. \
    Extract structured candidate information from resume text. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Resume parsing prompt template. Replace `{resume_text}` before sending.
pub const RESUME_PARSE_PROMPT_TEMPLATE: &str = r#"Analyze the following resume and extract structured candidate information.

Return a JSON object with this EXACT schema (no extra fields):
{
  "name": "full name",
  "email": "email address",
  "phone": "phone number",
  "skills": ["list", "of", "skills"],
  "experience": [
    {
      "title": "job title",
      "duration": "MM/YYYY - MM/YYYY"
    }
  ]
}

RULES:
1. Duration format must be "MM/YYYY - MM/YYYY", using '-' as the separator.
2. Use "Present" as the end date for ongoing roles.
3. Include ALL experience entries.
4. Use "N/A" for any field that cannot be found.

RESUME TEXT:
{resume_text}"#;
