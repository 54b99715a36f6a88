pub mod image;
pub mod provider;
pub mod providers;
pub mod types;

pub use image::{validate_image_prompt, ImageError, ImageGenerator, OpenAIImageGenerator};
pub use provider::{LLMError, LLMProvider, LLMStream};
pub use providers::OpenAIProvider;
pub use types::LLMChunk;
