//! HTTP Handlers

use askama::Template;
use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use visit_core::{discount, DiscountResult, VisitStore};

use crate::error::ApiError;
use crate::state::AppState;

/// Client-side calculator page, also used as the static-export bundle
pub const DISCOUNT_PAGE: &str = include_str!("../../../static/descuento.html");

// ============================================================================
// Templates
// ============================================================================

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub establishments: Vec<String>,
    pub percentage: u32,
}

#[derive(Template)]
#[template(path = "visit.html")]
pub struct VisitTemplate {
    pub restaurant_id: String,
    pub visits: u64,
    pub percentage: u32,
}

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct CalculateForm {
    pub restaurant_id: String,
    pub monto_compra: Decimal,
}

#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    #[serde(flatten)]
    pub result: DiscountResult,
    pub restaurant_id: String,
    pub visitas: u64,
}

#[derive(Debug, Serialize)]
pub struct GenerateAllResponse {
    pub status: &'static str,
    pub message: String,
    pub rutas: Vec<String>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct VisitsResponse {
    pub restaurant_id: String,
    pub visitas: u64,
}

// ============================================================================
// Handlers
// ============================================================================

fn require_known(state: &AppState, id: &str) -> Result<(), ApiError> {
    if state.config.establishments.contains(id) {
        Ok(())
    } else {
        tracing::debug!(establishment = id, "Unknown establishment");
        Err(ApiError::NotFound(id.to_string()))
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Landing page with the endpoint and establishment list
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let template = HomeTemplate {
        establishments: state.config.establishments.iter().map(String::from).collect(),
        percentage: discount::percentage(),
    };
    Ok(Html(template.render()?))
}

/// Static discount calculator
pub async fn static_page() -> Html<&'static str> {
    Html(DISCOUNT_PAGE)
}

/// QR scan landing: counts the visit and shows the discount page
pub async fn visit(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
) -> Result<Html<String>, ApiError> {
    require_known(&state, &restaurant_id)?;

    state.store.ensure(&restaurant_id).await?;
    let visits = state.store.increment(&restaurant_id).await?;

    tracing::info!(establishment = %restaurant_id, visits, "Visit");

    let template = VisitTemplate {
        restaurant_id,
        visits,
        percentage: discount::percentage(),
    };
    Ok(Html(template.render()?))
}

/// Apply the discount to a purchase amount
pub async fn calculate(
    State(state): State<AppState>,
    Form(form): Form<CalculateForm>,
) -> Result<Json<CalculateResponse>, ApiError> {
    require_known(&state, &form.restaurant_id)?;

    if form.monto_compra < Decimal::ZERO {
        return Err(ApiError::BadRequest("El monto debe ser positivo".into()));
    }

    let result = discount::compute(form.monto_compra, None);
    let visitas = state.store.get_count(&form.restaurant_id).await?;

    Ok(Json(CalculateResponse {
        result,
        restaurant_id: form.restaurant_id,
        visitas,
    }))
}

/// Generate (or regenerate) the QR for one establishment and send the PNG
pub async fn qr_image(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
) -> Result<Response, ApiError> {
    require_known(&state, &restaurant_id)?;

    let generator = state.qr.clone();
    let config = state.config.clone();
    let id = restaurant_id.clone();

    let path = tokio::task::spawn_blocking(move || {
        generator.generate(&id, &config.base_url, config.qr_target)
    })
    .await
    .map_err(|e| ApiError::Server(format!("Error al generar QR: {e}")))??;

    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        tracing::error!(path = %path.display(), "QR missing after generation: {}", e);
        ApiError::Server("Error al generar QR".into())
    })?;

    let headers = [
        (header::CONTENT_TYPE, "image/png".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{restaurant_id}_qr.png\""),
        ),
    ];

    Ok((headers, bytes).into_response())
}

/// Regenerate QR images for every establishment
pub async fn qr_generate_all(
    State(state): State<AppState>,
) -> Result<Json<GenerateAllResponse>, ApiError> {
    let generator = state.qr.clone();
    let config = state.config.clone();

    let paths = tokio::task::spawn_blocking(move || {
        generator.generate_all(&config.establishments, &config.base_url, config.qr_target)
    })
    .await
    .map_err(|e| ApiError::Server(format!("Error al generar QRs: {e}")))?;

    let rutas: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
    let total = rutas.len();

    Ok(Json(GenerateAllResponse {
        status: "success",
        message: format!("Se generaron {total} códigos QR"),
        rutas,
        total,
    }))
}

/// Current visit count for one establishment
pub async fn visits(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
) -> Result<Json<VisitsResponse>, ApiError> {
    require_known(&state, &restaurant_id)?;

    let visitas = state.store.get_count(&restaurant_id).await?;

    Ok(Json(VisitsResponse {
        restaurant_id,
        visitas,
    }))
}
