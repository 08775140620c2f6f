use std::path::PathBuf;
use std::sync::Arc;

use finsight::ai::AnalysisEngine;
use finsight::arguments::{self, is_help_requested, print_help};
use finsight::config::Config;
use finsight::logger::{self, LogTag};
use finsight::store::InMemoryStore;
use finsight::webserver::{self, state::AppState};

/// Main entry point for finsight
///
/// Starts the webserver and blocks until Ctrl-C (or a failed startup).
#[tokio::main]
async fn main() {
    // Directories must exist before the logger opens its file
    if let Err(e) = finsight::paths::ensure_all_directories() {
        eprintln!("Failed to create required directories: {}", e);
        std::process::exit(1);
    }

    logger::init();

    if is_help_requested() {
        print_help();
        std::process::exit(0);
    }

    logger::info(LogTag::System, "finsight starting up...");

    // Config: --config overrides the default location
    let config_path = arguments::get_arg_value("--config")
        .map(PathBuf::from)
        .unwrap_or_else(finsight::paths::config_path);

    let mut config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            logger::error(LogTag::Config, &format!("Failed to load config: {:#}", e));
            std::process::exit(1);
        }
    };

    if let Some(port) = arguments::get_arg_value("--port") {
        match port.parse::<u16>() {
            Ok(port) => config.webserver.port = port,
            Err(_) => {
                logger::error(LogTag::Config, &format!("Invalid --port value: {}", port));
                std::process::exit(1);
            }
        }
    }

    if config.ai.openai.resolved_api_key().is_none() {
        logger::warning(
            LogTag::Config,
            &format!(
                "No provider credential configured ({} unset); AI endpoints will report unavailable",
                config.ai.openai.api_key_env
            ),
        );
    }

    // Wire the collaborators: completion client behind the engine, seeded
    // in-memory store behind the dashboard routes
    let engine = Arc::new(AnalysisEngine::from_config(&config.ai));
    let store = Arc::new(InMemoryStore::seeded());
    let state = Arc::new(AppState::new(config, engine, store));

    // Ctrl-C triggers graceful shutdown
    if let Err(e) = ctrlc::set_handler(|| {
        logger::info(LogTag::System, "Ctrl-C received, shutting down...");
        webserver::shutdown();
    }) {
        logger::warning(
            LogTag::System,
            &format!("Failed to install Ctrl-C handler: {}", e),
        );
    }

    match webserver::start_server(state).await {
        Ok(()) => {
            logger::info(LogTag::System, "finsight stopped");
            logger::flush();
        }
        Err(e) => {
            logger::error(LogTag::System, &format!("Webserver failed: {}", e));
            logger::flush();
            std::process::exit(1);
        }
    }
}
