//! # visit-server
//!
//! Axum server for QR visit counting and the 5% purchase discount.
//!
//! ```text
//! GET  /                        landing page
//! GET  /descuento.html          static calculator
//! GET  /{restaurant_id}         count visit, show discount page
//! POST /calcular                discount JSON for a purchase amount
//! GET  /qr/{restaurant_id}      QR PNG download
//! GET  /qr/generar-todos        regenerate every QR
//! GET  /api/visitas/{id}        visit count JSON
//! GET  /qr_codes/*              generated images
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

pub use config::ServerConfig;
pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

use crate::handlers::{
    calculate, health_check, home, qr_generate_all, qr_image, static_page, visit, visits,
};

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // The exported static page may call /calcular from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let qr_files = ServeDir::new(state.qr.output_dir());

    Router::new()
        // Pages
        .route("/", get(home))
        .route("/descuento.html", get(static_page))
        .route("/health", get(health_check))

        // Discounts & visits
        .route("/calcular", post(calculate))
        .route("/api/visitas/{restaurant_id}", get(visits))

        // QR codes
        .route("/qr/generar-todos", get(qr_generate_all))
        .route("/qr/{restaurant_id}", get(qr_image))
        .nest_service("/qr_codes", qr_files)

        // QR scan landing
        .route("/{restaurant_id}", get(visit))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
