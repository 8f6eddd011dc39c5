//! Backend entry-point: loads settings, prepares adapters, seeds, and serves.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use recipes_backend::inbound::http::health::HealthState;
use recipes_backend::outbound::persistence::{DbPool, PoolConfig};
use recipes_backend::seeding::seed_recipes_on_startup;
use recipes_backend::settings::{AppSettings, RunMode};
use server::{ServerConfig, build_recipe_adapters, create_server};

fn init_tracing(run_mode: RunMode) {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env());
    let result = match run_mode {
        RunMode::Debug => builder.pretty().try_init(),
        RunMode::Release => builder.json().try_init(),
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| eyre!("failed to load application settings: {e}"))?;
    let run_mode = settings.run_mode()?;
    init_tracing(run_mode);

    let mut config = ServerConfig::new(settings.bind_addr()?, run_mode);
    if let Some(database_url) = settings.database_url()? {
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }
    if let Some(cache_url) = settings.cache_url() {
        config = config.with_cache_url(cache_url);
    }

    let adapters = build_recipe_adapters(&config).await?;
    seed_recipes_on_startup(
        settings.seed_path().map(|path| path.as_path()),
        adapters.repository.clone(),
        adapters.cache.clone(),
        Arc::new(DefaultClock),
    )
    .await
    .wrap_err("startup seeding failed")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config, &adapters)?;
    server.await?;
    Ok(())
}
