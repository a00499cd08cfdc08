//! Character counting tool.

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::Value;

use super::Tool;

/// Counts the characters of a text string.
///
/// Counts Unicode scalar values (`str::chars`), not bytes: a multi-byte
/// character contributes 1 to the count. Stateless; every call counts the
/// literal input it is given.
pub struct CharacterCountTool;

#[async_trait]
impl Tool for CharacterCountTool {
    fn name(&self) -> &'static str {
        "count_characters"
    }

    fn description(&self) -> &'static str {
        "Count the number of characters in a text string."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": "The text to count."
                }
            },
            "required": ["text"]
        })
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let Some(text) = input.get("text").and_then(Value::as_str) else {
            bail!("count_characters expects a string field 'text'");
        };
        Ok(Value::from(text.chars().count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn count(text: &str) -> u64 {
        CharacterCountTool
            .execute(serde_json::json!({ "text": text }))
            .await
            .unwrap()
            .as_u64()
            .unwrap()
    }

    #[tokio::test]
    async fn test_counts_ascii() {
        assert_eq!(count("hello world").await, 11);
    }

    #[tokio::test]
    async fn test_empty_string_counts_zero() {
        assert_eq!(count("").await, 0);
    }

    #[tokio::test]
    async fn test_counts_scalar_values_not_bytes() {
        // 5 characters, 6 bytes
        assert_eq!(count("héllo").await, 5);
        // 1 character, 4 bytes
        assert_eq!(count("🦀").await, 1);
    }

    #[tokio::test]
    async fn test_missing_text_field_is_an_error() {
        let err = CharacterCountTool
            .execute(serde_json::json!({ "message": "hi" }))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("'text'"));
    }

    #[tokio::test]
    async fn test_non_string_text_is_an_error() {
        let result = CharacterCountTool
            .execute(serde_json::json!({ "text": 42 }))
            .await;
        assert!(result.is_err());
    }
}
