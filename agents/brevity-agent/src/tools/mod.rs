//! Tool registry
//!
//! Tools are small callables the hosted model may invoke while following the
//! agent instruction. The registry maps a tool name to its declaration
//! (description + input schema) and its implementation, dispatched
//! dynamically by name.

pub mod count;
pub mod format;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// A capability exposed to the hosted model.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// JSON schema of the expected input object.
    fn input_schema(&self) -> Value;

    /// Execute the tool with the given input object.
    async fn execute(&self, input: Value) -> Result<Value>;
}

/// Ordered collection of tools. Registration order is preserved so the
/// serialized declarations are deterministic.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn register<T>(&mut self, tool: T) -> Result<()>
    where
        T: Tool + 'static,
    {
        if self.get(tool.name()).is_some() {
            bail!("tool '{}' is already registered", tool.name());
        }
        self.tools.push(Box::new(tool));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    /// Dispatch a tool call by name.
    pub async fn execute(&self, name: &str, input: Value) -> Result<Value> {
        match self.get(name) {
            Some(tool) => {
                debug!(tool = name, "dispatching tool call");
                tool.execute(input).await
            }
            None => bail!("unknown tool: '{}'", name),
        }
    }

    /// Tool declarations shipped to the remote platform at deployment time.
    pub fn definitions(&self) -> Vec<Value> {
        self.tools
            .iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name(),
                    "description": t.description(),
                    "input_schema": t.input_schema(),
                })
            })
            .collect()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::count::CharacterCountTool;
    use super::format::JsonFormatTool;
    use super::*;

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::default();
        registry.register(CharacterCountTool).unwrap();
        registry.register(JsonFormatTool).unwrap();
        registry
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = registry();
        let err = registry.register(CharacterCountTool).unwrap_err();
        assert!(err.to_string().contains("already registered"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_definitions_preserve_registration_order() {
        let registry = registry();
        let defs = registry.definitions();
        assert_eq!(defs[0]["name"], "count_characters");
        assert_eq!(defs[1]["name"], "format_as_json");
        assert!(defs.iter().all(|d| d["input_schema"]["type"] == "object"));
    }

    #[tokio::test]
    async fn test_dispatch_by_name() {
        let registry = registry();
        let result = registry
            .execute("count_characters", serde_json::json!({ "text": "abc" }))
            .await
            .unwrap();
        assert_eq!(result, serde_json::json!(3));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_an_error() {
        let registry = registry();
        let err = registry
            .execute("does_not_exist", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unknown tool"));
    }
}
