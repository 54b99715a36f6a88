use uuid::Uuid;

use crate::tools::{FunctionCall, ToolCall};

/// Reassembles tool calls that arrive split across stream chunks.
///
/// A fragment with a new non-empty id opens a call; fragments without an id
/// continue the most recent one.
#[derive(Debug, Default, Clone)]
pub struct ToolCallAccumulator {
    calls: Vec<ToolCall>,
}

impl ToolCallAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, fragment: ToolCall) {
        let existing = if fragment.id.is_empty() {
            self.calls.last_mut()
        } else {
            self.calls.iter_mut().find(|call| call.id == fragment.id)
        };

        match existing {
            Some(call) => {
                call.function.arguments.push_str(&fragment.function.arguments);
                if !fragment.function.name.is_empty() {
                    call.function.name = fragment.function.name;
                }
                if !fragment.tool_type.is_empty() {
                    call.tool_type = fragment.tool_type;
                }
            }
            None => self.calls.push(fragment),
        }
    }

    pub fn extend<I>(&mut self, fragments: I)
    where
        I: IntoIterator<Item = ToolCall>,
    {
        for fragment in fragments {
            self.update(fragment);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Complete calls: nameless entries dropped, missing ids and types filled.
    pub fn finalize(self) -> Vec<ToolCall> {
        self.calls
            .into_iter()
            .filter(|call| !call.function.name.trim().is_empty())
            .map(|call| ToolCall {
                id: if call.id.is_empty() {
                    format!("call_{}", Uuid::new_v4())
                } else {
                    call.id
                },
                tool_type: if call.tool_type.is_empty() {
                    "function".to_string()
                } else {
                    call.tool_type
                },
                function: FunctionCall {
                    name: call.function.name,
                    arguments: call.function.arguments,
                },
            })
            .collect()
    }
}
