//! HTTP API for the secquiz scoring engine.
//!
//! Exposes the analyze endpoint, the scenario catalog and a liveness probe
//! over actix-web.

pub mod api;
pub mod config;

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};

use secquiz_core::catalog::ScenarioCatalog;
use secquiz_core::engine::Engine;

use crate::config::SecquizConfig;

/// Shared, read-only state handed to every worker.
#[derive(Debug, Clone)]
pub struct AppState {
    pub engine: Engine,
    pub catalog: Arc<ScenarioCatalog>,
}

impl AppState {
    pub fn new(engine: Engine, catalog: ScenarioCatalog) -> Self {
        Self {
            engine,
            catalog: Arc::new(catalog),
        }
    }

    /// Load the taxonomy and catalog named in `config`.
    pub fn from_config(config: &SecquizConfig) -> Result<Self> {
        let taxonomy = config.load_taxonomy()?;
        let catalog = config.load_catalog()?;
        Ok(Self::new(Engine::new(taxonomy), catalog))
    }
}

/// Run the HTTP server until it is shut down.
pub async fn run(config: SecquizConfig) -> Result<()> {
    let state = web::Data::new(AppState::from_config(&config)?);
    let bind_addr = config.bind_addr();

    tracing::info!(
        scenarios = state.catalog.len(),
        "Starting secquiz server on {}",
        bind_addr
    );

    HttpServer::new(move || App::new().app_data(state.clone()).configure(api::configure))
        .bind(&bind_addr)
        .with_context(|| format!("failed to bind {bind_addr}"))?
        .run()
        .await
        .context("server terminated with an error")
}
