//! Backend entry-point: wires REST endpoints, persistence, and OpenAPI docs.

mod server;

use std::net::SocketAddr;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::config::AppSettings;
use backend::inbound::http::auth::key_fingerprint;
use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig};
use server::ServerConfig;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|error| std::io::Error::other(format!("load configuration: {error}")))?;

    let bind_addr: SocketAddr = settings
        .bind_addr()
        .parse()
        .map_err(|error| std::io::Error::other(format!("parse bind address: {error}")))?;

    let mut config = ServerConfig::new(bind_addr).with_limits(settings.validation_limits());

    if let Some(database_url) = settings.database_url.as_deref() {
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(|error| std::io::Error::other(format!("create database pool: {error}")))?;
        config = config.with_db_pool(pool);
    } else {
        warn!("DATABASE_URL missing; serving fixture data without persistence");
    }

    match settings.api_key.clone() {
        Some(key) => {
            info!(
                key_fingerprint = %key_fingerprint(&key),
                "api key required on booking endpoints"
            );
            config = config.with_api_key(key);
        }
        None => warn!("no api key configured; booking endpoints are open"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, config)?;

    info!(%bind_addr, "server started");
    server.await
}
