//! JSON formatting tool.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

use super::Tool;

/// Formats an arbitrary JSON object into a human-readable string.
///
/// Keys are emitted in the order the caller provided them and the output uses
/// 4-space indentation. Repeated calls with the same input produce
/// byte-identical output.
pub struct JsonFormatTool;

/// Serialize a value with 4-space indentation, preserving key order.
pub fn pretty_json(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .context("failed to serialize value")?;
    String::from_utf8(buf).context("serialized JSON was not valid UTF-8")
}

#[async_trait]
impl Tool for JsonFormatTool {
    fn name(&self) -> &'static str {
        "format_as_json"
    }

    fn description(&self) -> &'static str {
        "Format the given named values as an indented JSON string."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "description": "Arbitrary named values to include in the JSON output.",
            "additionalProperties": true
        })
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        if !input.is_object() {
            bail!("format_as_json expects an object of named values");
        }
        Ok(Value::String(pretty_json(&input)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_output_is_deterministic() {
        let input = serde_json::json!({ "b": 1, "a": 2, "c": [1, 2] });
        let first = JsonFormatTool.execute(input.clone()).await.unwrap();
        let second = JsonFormatTool.execute(input).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_preserves_caller_key_order() {
        let input = serde_json::json!({
            "original_character_count": 68,
            "new_character_count": 29,
            "new_message": "short"
        });
        let out = JsonFormatTool.execute(input).await.unwrap();
        let text = out.as_str().unwrap();

        let original = text.find("original_character_count").unwrap();
        let new_count = text.find("new_character_count").unwrap();
        let new_message = text.find("new_message").unwrap();
        assert!(original < new_count && new_count < new_message);
    }

    #[tokio::test]
    async fn test_four_space_indentation() {
        let out = JsonFormatTool
            .execute(serde_json::json!({ "key": "value", "count": 2 }))
            .await
            .unwrap();
        assert_eq!(
            out.as_str().unwrap(),
            "{\n    \"key\": \"value\",\n    \"count\": 2\n}"
        );
    }

    #[tokio::test]
    async fn test_no_key_is_dropped() {
        let input = serde_json::json!({
            "a": 1, "b": 2, "c": 3, "d": 4, "e": 5
        });
        let out = JsonFormatTool.execute(input.clone()).await.unwrap();
        let parsed: Value = serde_json::from_str(out.as_str().unwrap()).unwrap();
        assert_eq!(parsed, input);
    }

    #[tokio::test]
    async fn test_non_object_input_is_an_error() {
        let result = JsonFormatTool.execute(serde_json::json!("plain")).await;
        assert!(result.is_err());
    }
}
