use std::sync::Arc;

use agent_core::tools::{Tool, ToolError, ToolResult};
use agent_llm::{ImageError, ImageGenerator};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::call::{GenerateImageArgs, GENERATE_IMAGE};
use crate::image_marker::image_marker;

pub struct GenerateImageTool {
    images: Arc<dyn ImageGenerator>,
}

impl GenerateImageTool {
    pub fn new(images: Arc<dyn ImageGenerator>) -> Self {
        Self { images }
    }

    /// Only cancellation escapes as `Err`; every other failure is text.
    pub async fn run(
        &self,
        args: GenerateImageArgs,
        cancel: &CancellationToken,
    ) -> Result<ToolResult, ToolError> {
        match self.images.generate_image(&args.prompt, cancel).await {
            Ok(url) => Ok(ToolResult::success(format!(
                "Generated image: {}\n{}",
                args.prompt,
                image_marker(&url)
            ))),
            Err(ImageError::Cancelled) => Err(ToolError::Cancelled),
            Err(e) => {
                log::warn!("generate_image failed: {}", e);
                Ok(ToolResult::failure(format!("Error generating image: {e}")))
            }
        }
    }
}

impl Tool for GenerateImageTool {
    fn name(&self) -> &str {
        GENERATE_IMAGE
    }

    fn description(&self) -> &str {
        "Generates an image based on a text description. Use when the user asks for images, visualizations or creative art"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "prompt": {
                    "type": "string",
                    "description": "Detailed description of the image to generate"
                }
            },
            "required": ["prompt"]
        })
    }
}
