use serde::Deserialize;

/// JSON object carried by non-2xx responses and by `event: error` frames.
///
/// The server writes `{"error": "<message>"}`. The field is optional so a
/// body without it still parses and the caller can choose a fallback.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_with_message() {
        let body: ErrorBody = serde_json::from_str(r#"{"error": "boom"}"#).unwrap();
        assert_eq!(body.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_error_body_ignores_unknown_fields() {
        let body: ErrorBody = serde_json::from_str(r#"{"code": 7}"#).unwrap();
        assert_eq!(body, ErrorBody::default());
    }

    #[test]
    fn test_error_body_rejects_non_string_error() {
        assert!(serde_json::from_str::<ErrorBody>(r#"{"error": 42}"#).is_err());
    }
}
