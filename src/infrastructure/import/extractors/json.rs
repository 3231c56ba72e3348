//! JSON normalizer

use async_trait::async_trait;

use crate::domain::import::{FormatKind, ImportError, SourceFile, TextExtractor};

/// Pretty-print `text` inside a fenced `json` block.
///
/// Text that does not parse as JSON is returned unchanged.
pub fn normalize_json(text: &str) -> String {
    let value: serde_json::Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(_) => return text.to_string(),
    };

    match serde_json::to_string_pretty(&value) {
        Ok(pretty) => format!("```json\n{}\n```", pretty),
        Err(_) => text.to_string(),
    }
}

/// Extractor for JSON files
#[derive(Debug, Clone, Default)]
pub struct JsonExtractor;

impl JsonExtractor {
    /// Create a new JSON extractor
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for JsonExtractor {
    fn kind(&self) -> FormatKind {
        FormatKind::Json
    }

    async fn extract(&self, file: &SourceFile) -> Result<String, ImportError> {
        Ok(normalize_json(&file.read_as_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inner_payload(fenced: &str) -> &str {
        fenced
            .strip_prefix("```json\n")
            .and_then(|s| s.strip_suffix("\n```"))
            .unwrap()
    }

    #[test]
    fn test_pretty_prints_with_two_spaces() {
        let result = normalize_json(r#"{"a":1,"b":[true,null]}"#);

        assert_eq!(
            result,
            "```json\n{\n  \"a\": 1,\n  \"b\": [\n    true,\n    null\n  ]\n}\n```"
        );
    }

    #[test]
    fn test_invalid_json_is_unchanged() {
        assert_eq!(normalize_json(r#"{"a":"#), r#"{"a":"#);
        assert_eq!(normalize_json("not json at all"), "not json at all");
    }

    #[test]
    fn test_normalizing_twice_is_stable() {
        let first = normalize_json(r#"{"a":1}"#);
        let second = normalize_json(r#"{"a":1}"#);
        let again = normalize_json(inner_payload(&first));

        assert_eq!(first, second);
        assert_eq!(first, again);
    }

    #[test]
    fn test_scalar_json() {
        assert_eq!(normalize_json("42"), "```json\n42\n```");
    }

    #[test]
    fn test_key_order_is_preserved() {
        let result = normalize_json(r#"{"b":1,"a":2}"#);
        assert!(result.find("\"b\"").unwrap() < result.find("\"a\"").unwrap());
    }

    #[tokio::test]
    async fn test_extract_reads_file() {
        let extractor = JsonExtractor::new();
        let file = SourceFile::new("data.json", "application/json", br#"[1,2]"#.to_vec());

        let result = extractor.extract(&file).await.unwrap();

        assert_eq!(result, "```json\n[\n  1,\n  2\n]\n```");
        assert_eq!(extractor.kind(), FormatKind::Json);
    }

    #[tokio::test]
    async fn test_extract_malformed_falls_back() {
        let extractor = JsonExtractor::new();
        let file = SourceFile::new("bad.json", "application/json", b"{oops".to_vec());

        assert_eq!(extractor.extract(&file).await.unwrap(), "{oops");
    }
}
