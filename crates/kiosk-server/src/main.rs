use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use kiosk_api::payments::{PaymentClient, PaymentConfig};
use kiosk_api::{AppState, AppStateInner, create_router};
use kiosk_store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kiosk=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret =
        std::env::var("KIOSK_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let host = std::env::var("KIOSK_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("KIOSK_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    let payments = PaymentClient::new(PaymentConfig::from_env());
    if payments.sandbox() {
        info!("Payment provider running in sandbox mode");
    }

    // Shared state: one in-memory store for the process lifetime.
    let state: AppState = Arc::new(AppStateInner {
        store: Store::new(),
        jwt_secret,
        payments,
    });

    let app = create_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Kiosk server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
