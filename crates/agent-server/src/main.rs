use anyhow::Context;
use clap::Parser;

use agent_server::logging::init_logging;
use agent_server::{run_server, AppState, Config};

#[derive(Parser, Debug, Clone)]
#[command(name = "todo-agent")]
#[command(about = "Todo-driven agent HTTP server")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, env = "DEBUG", default_value = "false")]
    debug: bool,

    /// Server port
    #[arg(long, env = "PORT", default_value = "8081")]
    port: u16,

    /// Chat model name (overrides CHAT_MODEL and the config file)
    #[arg(long)]
    model: Option<String>,

    /// Chat and image API base URL (overrides OPENAI_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Pause after each tool call, in milliseconds (overrides TOOL_PACING_MS)
    #[arg(long)]
    tool_pacing_ms: Option<u64>,

    /// Send earlier conversation turns with each prompt
    #[arg(long)]
    carry_history: bool,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let mut config = Config::load();
    if let Some(model) = cli.model {
        config.chat_model = Some(model);
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = Some(base_url);
    }
    if let Some(ms) = cli.tool_pacing_ms {
        config.tool_pacing_ms = Some(ms);
    }
    if cli.carry_history {
        config.carry_history = true;
    }
    log::debug!("Configuration:");
    log::debug!("  Chat model: {:?}", config.chat_model);
    log::debug!("  Base URL: {:?}", config.base_url);
    log::debug!("  Tool pacing: {:?} ms", config.tool_pacing_ms);
    log::debug!("  Carry history: {}", config.carry_history);

    let state = AppState::from_config(&config).context("failed to configure providers")?;

    log::info!("Starting todo agent server on port {}", cli.port);
    run_server(state, cli.port)
        .await
        .context("server exited with an error")
}
