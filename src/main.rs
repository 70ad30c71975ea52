mod auth;
mod config;
mod dto;
mod error;
mod handlers;
mod logging;
mod models;
mod repository;
mod routes;
mod server;
mod service;
mod spellcheck;
mod state;
#[cfg(test)]
mod testing;

use tokio::net::TcpListener;

use std::sync::Arc;

use auth::{
    StaticIdentityValidator,
    oauth::{DemoCredentials, TokenIssuer},
};
use repository::Repository;
use service::{NoteService, ids::UuidGenerator};
use spellcheck::HttpSpellChecker;
use state::AppState;

#[tokio::main]
async fn main() {
    // Config and log setup
    let cfg = config::load_config().expect("failed to load configuration from environment");
    logging::init(cfg.env);

    tracing::info!(env = ?cfg.env, "Starting notes service");

    // Repository creation and migration
    let mut repo = Repository::new(&cfg.pg_dsn).await.unwrap_or_else(|e| {
        tracing::error!("Failed to establish database connection: {e}");
        panic!("failed to establish database connection: {e}");
    });

    repo.migrate().await.unwrap_or_else(|e| {
        tracing::error!("Failed to migrate database: {e}");
        panic!("failed to migrate database: {e}");
    });

    let spellchecker = HttpSpellChecker::new(cfg.spellcheck_url.clone(), cfg.spellcheck_timeout)
        .unwrap_or_else(|e| {
            tracing::error!("Failed to build spell checker client: {e}");
            panic!("failed to build spell checker client: {e}");
        });

    // Service creation
    let service = Arc::new(NoteService::new(
        Arc::new(repo),
        Arc::new(spellchecker),
        Arc::new(UuidGenerator),
    ));

    let state = AppState::new(
        service.clone(),
        Arc::new(StaticIdentityValidator::default()),
        TokenIssuer::new(Arc::new(DemoCredentials), cfg.token_ttl),
    );

    let router = routes::build_router(state);

    let listener = TcpListener::bind(("0.0.0.0", cfg.port))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to port {}: {e}", cfg.port);
            panic!("failed to bind to port {}: {e}", cfg.port);
        });

    match listener.local_addr() {
        Ok(addr) => tracing::info!("Started listening on {}", addr),
        Err(e) => tracing::warn!("Listening on unknown address: {e}"),
    }

    if let Err(e) = server::run(listener, router, server::shutdown_signal(), service).await {
        tracing::error!("HTTP server error: {e}");
    }

    tracing::info!("Application stopped");
}
