//! REST surface for the signup funnel.
//!
//! Thin JSON layer over the controller, preview bridge, and plan selector.
//! Error mapping: validation failures are 422, progression conflicts are
//! 409 with a machine-readable reason, and backend failures are 502 with a
//! retryable flag. Quota exhaustion is reported as a conflict whose body
//! points at the advance action — it is a call to action, not an error page.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use crate::chat::PreviewBridge;
use crate::error::{FunnelError, PreviewError};
use crate::funnel::controller::WizardController;
use crate::funnel::model::{ChatbotConfig, CompanyInfo};
use crate::plans::{self, SubscriptionSelector};

/// Shared state for the funnel routes.
#[derive(Clone)]
pub struct FunnelRouteState {
    pub controller: Arc<WizardController>,
    pub bridge: Arc<PreviewBridge>,
    pub selector: Arc<RwLock<SubscriptionSelector>>,
}

/// Build the funnel router.
pub fn funnel_routes(state: FunnelRouteState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/funnel/status", get(get_status))
        .route("/api/funnel/company-info", post(submit_company_info))
        .route("/api/funnel/recap", get(get_recap))
        .route("/api/funnel/config", put(put_config))
        .route("/api/funnel/preview", post(send_preview))
        .route("/api/funnel/advance", post(advance))
        .route("/api/plans", get(list_plans))
        .route("/api/plans/select", post(select_plan))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "chatfunnel"
    }))
}

/// GET /api/funnel/status
///
/// Current step, hydration, trial progress, and whether advance is enabled.
async fn get_status(State(state): State<FunnelRouteState>) -> impl IntoResponse {
    Json(state.controller.status().await)
}

/// POST /api/funnel/company-info
///
/// The boundary where form input enters the core; validated here.
async fn submit_company_info(
    State(state): State<FunnelRouteState>,
    Json(info): Json<CompanyInfo>,
) -> impl IntoResponse {
    match state.controller.submit_company_info(info).await {
        Ok(()) => Json(state.controller.status().await).into_response(),
        Err(e) => funnel_error_response(e),
    }
}

/// GET /api/funnel/recap
///
/// The recap view, or `{"view": "loading"}` while state is missing. The
/// client stays on its placeholder; no redirect is issued from here.
async fn get_recap(State(state): State<FunnelRouteState>) -> impl IntoResponse {
    Json(state.controller.enter_recap().await)
}

/// PUT /api/funnel/config
///
/// Write-through edit of the chatbot configuration during the recap.
async fn put_config(
    State(state): State<FunnelRouteState>,
    Json(config): Json<ChatbotConfig>,
) -> impl IntoResponse {
    state.controller.save_config(config).await;
    StatusCode::NO_CONTENT
}

#[derive(Debug, Deserialize)]
struct PreviewRequest {
    message: String,
}

/// POST /api/funnel/preview
///
/// One trial message through the bridge. The trial status in the response
/// lets the client repaint its progress bar and hint in one round-trip.
async fn send_preview(
    State(state): State<FunnelRouteState>,
    Json(request): Json<PreviewRequest>,
) -> impl IntoResponse {
    match state.bridge.send(&request.message).await {
        Ok(reply) => Json(serde_json::json!({
            "reply": reply.reply,
            "trial": state.controller.status().await.trial,
        }))
        .into_response(),
        Err(e) => preview_error_response(e, &state).await,
    }
}

/// POST /api/funnel/advance
async fn advance(State(state): State<FunnelRouteState>) -> impl IntoResponse {
    match state.controller.advance().await {
        Ok(step) => Json(serde_json::json!({ "step": step })).into_response(),
        Err(e) => funnel_error_response(e),
    }
}

/// GET /api/plans
async fn list_plans() -> impl IntoResponse {
    Json(plans::catalog())
}

#[derive(Debug, Deserialize)]
struct SelectPlanRequest {
    name: String,
}

/// POST /api/plans/select
async fn select_plan(
    State(state): State<FunnelRouteState>,
    Json(request): Json<SelectPlanRequest>,
) -> impl IntoResponse {
    let mut selector = state.selector.write().await;
    match selector.select(&request.name) {
        Ok(option) => Json(option).into_response(),
        Err(e) => funnel_error_response(e),
    }
}

fn funnel_error_response(error: FunnelError) -> axum::response::Response {
    match error {
        FunnelError::ValidationFailed { field, reason } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({
                "error": "validation_failed",
                "field": field,
                "reason": reason,
            })),
        )
            .into_response(),
        FunnelError::TrialNotExhausted { count, max } => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({
                "error": "trial_not_exhausted",
                "count": count,
                "max": max,
            })),
        )
            .into_response(),
        FunnelError::AtTerminalStep => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({ "error": "at_terminal_step" })),
        )
            .into_response(),
        FunnelError::UnknownPlan { name } => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": "unknown_plan",
                "name": name,
            })),
        )
            .into_response(),
    }
}

async fn preview_error_response(
    error: PreviewError,
    state: &FunnelRouteState,
) -> axum::response::Response {
    match error {
        PreviewError::SendInFlight => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({ "error": "send_in_flight" })),
        )
            .into_response(),
        PreviewError::QuotaExhausted => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({
                "error": "trial_exhausted",
                "advanceAvailable": state.controller.can_advance().await,
            })),
        )
            .into_response(),
        PreviewError::NotReady => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({ "error": "not_ready" })),
        )
            .into_response(),
        PreviewError::Chat(e) => (
            StatusCode::BAD_GATEWAY,
            Json(serde_json::json!({
                "error": "backend_failed",
                "detail": e.to_string(),
                "retryable": true,
            })),
        )
            .into_response(),
    }
}
