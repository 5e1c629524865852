//! Partner ledger portal server.
//!
//! Main entry point for the ledger report service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portal_ledger_api::{AppState, create_router, views::Views};
use portal_ledger_db::{LedgerRepository, connect_with};
use portal_ledger_shared::{AppConfig, CsrfService, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portal_ledger=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = connect_with(&config.database).await?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    let jwt_service = JwtService::new(JwtConfig {
        secret: config.session.jwt_secret.clone(),
        token_expires_secs: i64::try_from(config.session.token_expiry_secs)
            .context("session.token_expiry_secs is out of range")?,
    });
    let csrf_service = CsrfService::new(&config.csrf.secret);
    let views = Views::new().context("Failed to compile templates")?;

    info!(
        default_lang = %config.portal.default_lang,
        default_date_format = %config.portal.default_date_format,
        "Portal defaults loaded"
    );

    let state = AppState {
        store: Arc::new(LedgerRepository::new(db)),
        jwt_service: Arc::new(jwt_service),
        csrf_service: Arc::new(csrf_service),
        views: Arc::new(views),
        portal: Arc::new(config.portal.clone()),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
