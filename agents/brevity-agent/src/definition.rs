//! Agent definition
//!
//! The deployable description of the Brevity agent: which model runs it,
//! the instruction policy it follows, and the tools it may call. The agent
//! itself executes on the remote agent engine; locally this is data.

use anyhow::Result;
use serde_json::Value;

use crate::prompt::SHORTENING_INSTRUCTION;
use crate::tools::count::CharacterCountTool;
use crate::tools::format::JsonFormatTool;
use crate::tools::ToolRegistry;

pub const AGENT_NAME: &str = "brevity";
pub const AGENT_MODEL: &str = "gemini-2.0-flash";
pub const AGENT_DESCRIPTION: &str =
    "A bot that shortens messages and reports the result as JSON.";

/// A configured agent: instruction policy plus the tools it may invoke.
pub struct AgentDefinition {
    pub name: &'static str,
    pub model: &'static str,
    pub description: &'static str,
    pub instruction: &'static str,
    pub tools: ToolRegistry,
}

impl AgentDefinition {
    /// Serialize the definition into the payload submitted when creating a
    /// deployment on the agent engine.
    pub fn manifest(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "model": self.model,
            "description": self.description,
            "instruction": self.instruction,
            "tools": self.tools.definitions(),
        })
    }
}

/// Build the canonical Brevity shortening agent.
pub fn shortening_agent() -> Result<AgentDefinition> {
    let mut tools = ToolRegistry::default();
    tools.register(CharacterCountTool)?;
    tools.register(JsonFormatTool)?;

    Ok(AgentDefinition {
        name: AGENT_NAME,
        model: AGENT_MODEL,
        description: AGENT_DESCRIPTION,
        instruction: SHORTENING_INSTRUCTION,
        tools,
    })
}
