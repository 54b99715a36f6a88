//! Helpers shared by OpenAI-compatible endpoints.

pub mod openai_compat;
pub mod sse;
