use serde_json::Value;
use crate::errors::InfraFlowError;

/// Parse a model response that is expected to hold a single JSON object.
///
/// Accepts bare JSON, JSON wrapped in markdown code fences, and JSON embedded
/// in surrounding prose.
pub fn parse_json_response(text: &str) -> Result<Value, InfraFlowError> {
    if let Ok(v) = serde_json::from_str::<Value>(text) {
        return Ok(v);
    }

    let trimmed = text.trim();
    let stripped = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .unwrap_or(trimmed);
    if let Ok(v) = serde_json::from_str::<Value>(stripped.trim()) {
        return Ok(v);
    }

    if let (Some(start), Some(end)) = (stripped.find('{'), stripped.rfind('}')) {
        if start < end {
            return serde_json::from_str::<Value>(&stripped[start..=end]).map_err(InfraFlowError::from);
        }
    }

    Err(InfraFlowError::LLMApi("No valid JSON in model response".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_json() {
        let v = parse_json_response(r#"{"a": 1}"#).unwrap();
        assert_eq!(v["a"], 1);
    }

    #[test]
    fn test_parse_fenced_json() {
        let v = parse_json_response("```json\n{\"title\": \"x\"}\n```").unwrap();
        assert_eq!(v["title"], "x");
    }

    #[test]
    fn test_parse_json_in_prose() {
        let v = parse_json_response("Here you go: {\"ok\": true} hope it helps").unwrap();
        assert_eq!(v["ok"], true);
    }

    #[test]
    fn test_parse_no_json() {
        let err = parse_json_response("I cannot help with that").unwrap_err();
        assert_eq!(err.error_type(), "LLMApiError");
    }

    #[test]
    fn test_parse_malformed_object() {
        let err = parse_json_response("{\"title\": }").unwrap_err();
        assert_eq!(err.error_type(), "JsonError");
    }
}
