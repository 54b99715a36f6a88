pub mod error;
pub mod events;
pub mod transcript;
pub mod types;

pub use error::AgentError;
pub use events::AgentEvent;
pub use transcript::Transcript;
pub use types::{Message, Role};
