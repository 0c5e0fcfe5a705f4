//! House points bot entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use house_points_api::config::Config;
use house_points_api::error::AppError;
use house_points_api::routes;
use house_points_api::state::{AppState, WebhookSettings};
use house_points_api::telegram::TelegramClient;
use house_points_scoring::application::authorization::Authorizer;
use house_points_scoring::application::dispatcher::Dispatcher;
use tracing_subscriber::EnvFilter;

const TELEGRAM_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting house points bot");

    let config = Config::from_env()?;
    tracing::debug!(?config, "loaded configuration");

    let store = house_points_api::build_store(&config).await?;
    store.initialize().await?;
    tracing::info!(houses = config.houses.len(), "score store ready");

    let telegram = TelegramClient::new(
        config.telegram_api_url.clone(),
        config.bot_token.clone(),
        TELEGRAM_REQUEST_TIMEOUT,
    )?;

    if let Some(base) = config.webhook_url.as_deref() {
        let url = format!(
            "{}/webhook/{}",
            base.trim_end_matches('/'),
            config.webhook_path_token
        );
        telegram
            .set_webhook(&url, config.webhook_secret.as_deref())
            .await?;
    }

    let authorizer = Authorizer::new(
        config.admin_user_ids.iter().copied(),
        Arc::new(telegram),
        config.admin_lookup_timeout,
    );
    let mut dispatcher = Dispatcher::new(config.houses.clone(), store, Arc::new(authorizer));
    if let Some(username) = config.bot_username.clone() {
        dispatcher = dispatcher.with_bot_username(username);
    }

    let app_state = AppState::new(
        dispatcher,
        WebhookSettings {
            path_token: config.webhook_path_token.clone(),
            secret_token: config.webhook_secret.clone(),
        },
    );
    let app = routes::app(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
