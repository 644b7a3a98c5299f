//! MotoDesk server entrypoint.
//!
//! The heavy lifting (initialization, middleware wiring, graceful shutdown)
//! lives in dedicated modules so this file remains a thin orchestrator.

use anyhow::Result;
use log::info;

use motodesk_configs::ServerConfig;
use motodesk_server::{lifecycle, logging};

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration; fall back to defaults when the file is missing so
    // a bare `motodesk` starts on localhost out of the box.
    let config_path = "config.toml";
    let config = if std::path::Path::new(config_path).exists() {
        match ServerConfig::from_file(config_path) {
            Ok(cfg) => {
                eprintln!("Loaded config from: {}", config_path);
                cfg
            }
            Err(e) => {
                eprintln!("FATAL: Failed to load {}: {}", config_path, e);
                std::process::exit(1);
            }
        }
    } else {
        let mut cfg = ServerConfig::default();
        cfg.apply_env_overrides()?;
        cfg.validate()?;
        eprintln!("No {} found, using defaults", config_path);
        cfg
    };

    // Logging before any other side effects
    logging::init_logging(
        &config.logging.level,
        &config.logging.file_path,
        config.logging.log_to_console,
        &config.logging.format,
    )?;

    let version = env!("CARGO_PKG_VERSION");
    let commit = env!("GIT_COMMIT_HASH");
    let build_date = env!("BUILD_DATE");
    let branch = env!("GIT_BRANCH");

    info!("MotoDesk Server v{}", version);
    info!("Commit: {} ({})  Built: {}", commit, branch, build_date);
    info!("Host: {}  Port: {}", config.server.host, config.server.port);

    // Build application state, then run the HTTP server until a
    // termination signal is received
    let components = lifecycle::bootstrap(&config).await?;
    lifecycle::run(&config, components).await
}
