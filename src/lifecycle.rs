//! Server lifecycle management helpers.
//!
//! This module encapsulates the heavy lifting that would otherwise live in
//! `main.rs`: bootstrapping the store and services, wiring the HTTP server,
//! and coordinating graceful shutdown.

use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use anyhow::Result;
use log::{debug, info};

use crate::middleware;
use motodesk_auth::{AuthService, SessionManager, UserStore};
use motodesk_configs::ServerConfig;
use motodesk_core::app_context::{AppContext, ALL_PARTITIONS};
use motodesk_store::{InMemoryBackend, StorageBackend};

/// Services shared between the HTTP server and shutdown handling.
pub struct ApplicationComponents {
    pub app_context: Arc<AppContext>,
    pub auth: Arc<AuthService>,
}

const SESSION_PURGE_INTERVAL_SECS: u64 = 300;

/// Initialize the in-memory store, domain services and authentication, and
/// seed the first admin account when the user store is empty.
pub async fn bootstrap(config: &ServerConfig) -> Result<ApplicationComponents> {
    let phase_start = std::time::Instant::now();

    let backend: Arc<dyn StorageBackend> =
        Arc::new(InMemoryBackend::with_partitions(ALL_PARTITIONS));
    let app_context = Arc::new(AppContext::new(backend.clone(), config.loyalty.clone())?);
    debug!(
        "AppContext initialized with all stores and services ({:.2}ms)",
        phase_start.elapsed().as_secs_f64() * 1000.0
    );

    let users = Arc::new(UserStore::new(backend)?);
    let sessions = Arc::new(SessionManager::new(config.auth.session_ttl_hours));
    let auth = Arc::new(AuthService::new(users, sessions.clone(), config.auth.clone()));

    if auth.seed_admin_if_empty().await?.is_some() {
        info!("First start: admin account seeded");
    }

    // Expired sessions are rejected on resolve; this just reclaims memory.
    tokio::spawn(async move {
        let mut tick =
            tokio::time::interval(Duration::from_secs(SESSION_PURGE_INTERVAL_SECS));
        loop {
            tick.tick().await;
            sessions.purge_expired();
        }
    });

    Ok(ApplicationComponents { app_context, auth })
}

/// Start the HTTP server and manage graceful shutdown.
pub async fn run(config: &ServerConfig, components: ApplicationComponents) -> Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting HTTP server on {}", bind_addr);
    info!(
        "Server config: workers={}, page sizes: default={} max={}",
        config.server.effective_workers(),
        config.limits.default_page_size,
        config.limits.max_page_size
    );

    let app_context = components.app_context.clone();
    let auth = components.auth.clone();
    let cors_config = config.cors.clone();
    let limits = config.limits.clone();

    let server = HttpServer::new(move || {
        let auth_for_routes = auth.clone();
        App::new()
            .wrap(middleware::request_logger())
            .wrap(middleware::build_cors_from_config(&cors_config))
            .app_data(web::Data::new(app_context.clone()))
            .app_data(web::Data::new(auth.clone()))
            .app_data(web::Data::new(limits.clone()))
            .configure(move |cfg| {
                motodesk_api::routes::configure(cfg, auth_for_routes.clone())
            })
    })
    .workers(config.server.effective_workers())
    .shutdown_timeout(config.shutdown.timeout_seconds)
    .bind(&bind_addr)?
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    tokio::select! {
        result = server_task => {
            if let Err(e) = result {
                log::error!("Server task failed: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
            server_handle.stop(true).await;
            debug!("Graceful shutdown complete");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

/// A running HTTP server instance intended for integration tests.
///
/// This starts the same Actix app wiring as the production server
/// (middleware stack, route registration, app_data wiring) but binds to an
/// ephemeral port and provides an explicit shutdown handle.
pub struct RunningTestHttpServer {
    pub base_url: String,
    pub bind_addr: SocketAddr,
    pub app_context: Arc<AppContext>,
    pub auth: Arc<AuthService>,
    server_handle: actix_web::dev::ServerHandle,
    server_task: tokio::task::JoinHandle<std::io::Result<()>>,
}

impl RunningTestHttpServer {
    pub async fn shutdown(self) {
        self.server_handle.stop(false).await;
        let _ = self.server_task.await;
    }
}

/// Start the HTTP server for integration tests on a random available port.
///
/// Notes:
/// - Does not install Ctrl+C handling.
/// - Caller must invoke `shutdown()` to stop the server.
pub async fn run_for_tests(
    config: &ServerConfig,
    components: ApplicationComponents,
) -> Result<RunningTestHttpServer> {
    let bind_ip = if config.server.host.is_empty() {
        "127.0.0.1"
    } else {
        config.server.host.as_str()
    };

    let listener = TcpListener::bind((bind_ip, 0))?;
    let bind_addr = listener.local_addr()?;

    let app_context = components.app_context.clone();
    let auth = components.auth.clone();
    let app_context_for_app = app_context.clone();
    let auth_for_app = auth.clone();
    let cors_config = config.cors.clone();
    let limits = config.limits.clone();

    let server = HttpServer::new(move || {
        let auth_for_routes = auth_for_app.clone();
        App::new()
            .wrap(middleware::request_logger())
            .wrap(middleware::build_cors_from_config(&cors_config))
            .app_data(web::Data::new(app_context_for_app.clone()))
            .app_data(web::Data::new(auth_for_app.clone()))
            .app_data(web::Data::new(limits.clone()))
            .configure(move |cfg| {
                motodesk_api::routes::configure(cfg, auth_for_routes.clone())
            })
    })
    .workers(config.server.effective_workers())
    .listen(listener)?
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);
    let base_url = format!("http://{}", bind_addr);
    debug!("Test HTTP server listening at {}", base_url);

    Ok(RunningTestHttpServer {
        base_url,
        bind_addr,
        app_context,
        auth,
        server_handle,
        server_task,
    })
}
