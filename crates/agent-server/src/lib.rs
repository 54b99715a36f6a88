pub mod config;
pub mod handlers;
pub mod logging;
pub mod server;
pub mod session;
pub mod state;

pub use config::{Config, ConfigError};
pub use server::{app_config, run_server};
pub use session::{AgentSession, SessionError};
pub use state::AppState;
