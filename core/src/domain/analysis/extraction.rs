use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

static LEADING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\A```(?:json)?").expect("leading fence pattern is valid"));

/// Opening fence with an optional info string that ends its line.
static TAGGED_LEADING_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A```(?:[\w+-]+[ \t]*(?:\r?\n|\z))?").expect("tagged fence pattern is valid")
});

const TRAILING_FENCE: &str = "```";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Model reply does not contain a JSON object")]
    MissingObject,

    #[error("Model reply contains an unterminated JSON object")]
    Unterminated,

    #[error("Model reply has unexpected content after the JSON object")]
    TrailingContent,

    #[error("{0}")]
    InvalidJson(String),
}

/// Removes the markdown code fence models like to wrap JSON in.
pub fn strip_code_fences(raw: &str) -> &str {
    strip_fences(raw, &LEADING_FENCE)
}

/// Removes a code fence around a plain-text transcription, whatever
/// language tag the opening fence carries.
pub fn strip_transcription_fences(raw: &str) -> &str {
    strip_fences(raw, &TAGGED_LEADING_FENCE)
}

fn strip_fences<'a>(raw: &'a str, leading: &Regex) -> &'a str {
    let mut text = raw.trim();

    if let Some(found) = leading.find(text) {
        text = text[found.end()..].trim_start();
    }

    if let Some(stripped) = text.strip_suffix(TRAILING_FENCE) {
        text = stripped.trim_end();
    }

    text
}

/// Finds the first balanced top-level object in `text`.
///
/// Braces inside JSON string literals are ignored. Anything other than
/// whitespace after the closing brace is rejected, so a reply that carries
/// commentary or a second object is reported instead of being mis-sliced.
pub fn locate_json_object(text: &str) -> Result<&str, ExtractionError> {
    let start = text.find('{').ok_or(ExtractionError::MissingObject)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    if !text[end..].trim().is_empty() {
                        return Err(ExtractionError::TrailingContent);
                    }
                    return Ok(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    Err(ExtractionError::Unterminated)
}

/// Strips fences, locates the object and parses it.
pub fn extract_json_object(raw: &str) -> Result<Map<String, Value>, ExtractionError> {
    let text = strip_code_fences(raw);
    let object = locate_json_object(text)?;

    serde_json::from_str::<Map<String, Value>>(object)
        .map_err(|e| ExtractionError::InvalidJson(e.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::common::entities::app_errors::CoreError;

    fn sample() -> Value {
        json!({
            "is_healthy": "Unhealthy",
            "unhealthy_ingredients": { "Sugar": "" },
            "health_impacts": { "Sugar": "Raises blood sugar (3 months)" }
        })
    }

    fn fenced(body: &str) -> String {
        format!("```json\n{body}\n```")
    }

    #[test]
    fn test_fenced_object_is_recovered() {
        let body = sample().to_string();
        let parsed = extract_json_object(&fenced(&body)).unwrap();
        assert_eq!(Value::Object(parsed), sample());
    }

    #[test]
    fn test_fenced_and_unfenced_parse_to_same_object() {
        let body = serde_json::to_string_pretty(&sample()).unwrap();
        let plain = extract_json_object(&body).unwrap();
        let wrapped = extract_json_object(&fenced(&body)).unwrap();
        let bare_fence = extract_json_object(&format!("```\n{body}\n```")).unwrap();
        assert_eq!(plain, wrapped);
        assert_eq!(plain, bare_fence);
    }

    #[test]
    fn test_fence_variants() {
        assert_eq!(strip_code_fences("```JSON{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  ```json\n{}\n```  "), "{}");
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_transcription_fence_tags_are_dropped() {
        assert_eq!(strip_transcription_fences("```text\nSugar, Salt\n```"), "Sugar, Salt");
        assert_eq!(strip_transcription_fences("```plaintext \r\nSugar\n```"), "Sugar");
        assert_eq!(strip_transcription_fences("```\nSugar\n```"), "Sugar");
        assert_eq!(
            strip_transcription_fences("```INGREDIENTS: Sugar```"),
            "INGREDIENTS: Sugar"
        );
        assert_eq!(strip_transcription_fences("Sugar, Salt"), "Sugar, Salt");
    }

    #[test]
    fn test_leading_prose_is_tolerated() {
        let reply = format!("Here is the analysis:\n{}", sample());
        let parsed = extract_json_object(&reply).unwrap();
        assert_eq!(Value::Object(parsed), sample());
    }

    #[test]
    fn test_prose_without_braces_is_missing_object() {
        let err = extract_json_object("I could not read the label, sorry.").unwrap_err();
        assert_eq!(err, ExtractionError::MissingObject);
        assert!(matches!(
            CoreError::from(err),
            CoreError::MalformedModelReply(ExtractionError::MissingObject)
        ));
    }

    #[test]
    fn test_empty_reply_is_missing_object() {
        assert_eq!(
            extract_json_object("   ").unwrap_err(),
            ExtractionError::MissingObject
        );
    }

    #[test]
    fn test_invalid_inner_json_is_distinct() {
        let err = extract_json_object("```json\n{\"is_healthy\": }\n```").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidJson(_)));
        assert!(matches!(
            CoreError::from(err),
            CoreError::InvalidModelJson(_)
        ));
    }

    #[test]
    fn test_trailing_prose_is_rejected() {
        let reply = format!("{}\nLet me know if you need more detail.", sample());
        assert_eq!(
            extract_json_object(&reply).unwrap_err(),
            ExtractionError::TrailingContent
        );
    }

    #[test]
    fn test_second_object_is_rejected() {
        assert_eq!(
            locate_json_object("{\"a\":1} {\"b\":2}").unwrap_err(),
            ExtractionError::TrailingContent
        );
    }

    #[test]
    fn test_unterminated_object() {
        assert_eq!(
            extract_json_object("{\"is_healthy\": \"Healthy\"").unwrap_err(),
            ExtractionError::Unterminated
        );
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let reply = r#"{"note": "contains } and { and \" quote", "nested": {"x": "}"}}"#;
        assert_eq!(locate_json_object(reply).unwrap(), reply);
        let parsed = extract_json_object(reply).unwrap();
        assert_eq!(parsed["nested"]["x"], "}");
    }
}
