//! QR Descuentos HTTP Server
//!
//! Counts QR-scan visits per establishment and serves the 5% discount
//! calculator.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use visit_core::VisitStore;
use visit_server::{build_router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env().context("invalid configuration")?;
    let addr = config.bind_addr.clone();

    tracing::info!("Base URL: {}", config.base_url);
    tracing::info!("QR target: {}", config.qr_target);
    tracing::info!("Visit store: {}", config.data_file.display());
    tracing::info!("Establishments ({}):", config.establishments.len());
    for id in config.establishments.iter() {
        tracing::info!("  • {}", id);
    }

    let state = AppState::from_config(config);

    // Load (or create) the visit store before taking traffic
    let document = state
        .store
        .load()
        .await
        .context("could not initialize visit store")?;
    tracing::info!("✓ Visit store ready ({} records)", document.establishments.len());

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("could not bind {addr}"))?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 QR descuentos running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /                       - Landing page");
    tracing::info!("  GET  /{{restaurant_id}}        - Scan: count visit, show discount");
    tracing::info!("  POST /calcular               - Compute discount");
    tracing::info!("  GET  /qr/{{restaurant_id}}     - Download QR");
    tracing::info!("  GET  /qr/generar-todos       - Regenerate all QRs");
    tracing::info!("  GET  /api/visitas/{{id}}       - Visit count");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
