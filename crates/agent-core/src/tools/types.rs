use serde::{Deserialize, Serialize};

/// A tool invocation requested by the model, in OpenAI wire shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    /// Raw JSON text, exactly as streamed by the model.
    pub arguments: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResult {
    pub success: bool,
    pub result: String,
    pub display_preference: Option<String>,
}

impl ToolResult {
    pub fn success(result: impl Into<String>) -> Self {
        Self {
            success: true,
            result: result.into(),
            display_preference: None,
        }
    }

    /// A result the model should read as a failure; still fed back as text.
    pub fn failure(result: impl Into<String>) -> Self {
        Self {
            success: false,
            result: result.into(),
            display_preference: Some("error".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub function: FunctionSchema,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionSchema {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}
