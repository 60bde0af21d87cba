mod actor_framework;
mod app_system;
mod auth;
mod category_actor;
mod clients;
mod config;
mod domain;
mod error;
mod order_actor;
mod product_actor;
mod user_actor;
mod validation;
mod web;

#[cfg(test)]
mod mock_framework;

use axum_extra::extract::cookie::Key;
use tracing::{error, info, warn};
use crate::app_system::{setup_tracing, StoreSystem};
use crate::auth::{Passwords, SessionSettings};
use crate::config::{AppConfig, SessionConfig};
use crate::web::AppState;

fn signing_key(config: &SessionConfig) -> Result<Key, String> {
    match &config.secret {
        Some(secret) => Key::try_from(secret.as_bytes()).map_err(|e| format!("Invalid session secret: {e}")),
        None => {
            warn!("No session secret configured, sessions will not survive a restart");
            Ok(Key::generate())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = AppConfig::load().map_err(|e| e.to_string())?;
    setup_tracing();

    info!(bind = %config.server.bind, "Starting grocer");

    let system = StoreSystem::new(config.store.mailbox_size);
    let passwords = Passwords::new(&config.password).map_err(|e| e.to_string())?;

    if let Some(admin) = &config.admin {
        system
            .bootstrap_admin(admin, &passwords)
            .await
            .map_err(|e| e.to_string())?;
    }

    let state = AppState {
        users: system.user_client.clone(),
        categories: system.category_client.clone(),
        products: system.product_client.clone(),
        orders: system.order_client.clone(),
        passwords,
        key: signing_key(&config.session)?,
        session: SessionSettings::from(&config.session),
    };

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .map_err(|e| e.to_string())?;
    info!(addr = %config.server.bind, "Listening");

    axum::serve(listener, web::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| e.to_string())?;

    system.shutdown().await
}
