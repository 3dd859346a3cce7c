//! # Dependency Injection
//!
//! Creates the infra implementations and injects them into [`App`] through
//! their port traits. No business logic and no config validation here.

use std::sync::Arc;

use anyhow::Context;
use bc_app::{App, AppDeps, AppSettings};
use bc_core::config::AppConfig;
use bc_infra::{HttpApiClient, StaticDonationCatalog};
use tracing::info;

/// One HTTP client backs every backend port so they share the session
/// cookie.
pub fn wire_dependencies(config: &AppConfig) -> anyhow::Result<AppDeps> {
    let http = Arc::new(HttpApiClient::new(&config.api).context("create backend client")?);
    info!(base_url = %http.base_url(), "backend client ready");

    Ok(AppDeps {
        auth: http.clone(),
        animals: http.clone(),
        profiles: http.clone(),
        lookup: http.clone(),
        favorites: http.clone(),
        adoptions: http,
        donations: Arc::new(StaticDonationCatalog::new()),
    })
}

pub fn build_app(config: &AppConfig) -> anyhow::Result<App> {
    let deps = wire_dependencies(config)?;
    Ok(App::new(deps, AppSettings::from(config)))
}
