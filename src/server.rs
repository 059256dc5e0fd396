use crate::aggregate::aggregate;
use crate::config::AppConfig;
use crate::encode::MergeResponse;
use crate::error::MergeError;
use crate::types::MergeRequest;
use anyhow::Result;
use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub struct AppState {
    pub config: AppConfig,
}

pub async fn start_server(config: AppConfig) -> Result<()> {
    let port = config.server.port;
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let app = router(Arc::new(AppState { config }));

    tracing::info!("Coverage merge service listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/coverage/merge", post(merge_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn merge_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MergeRequest>,
) -> Result<Json<MergeResponse>, ApiError> {
    let defaults = &state.config.merge;
    let steps = request.steps.unwrap_or(defaults.steps);
    let mode = request.mode.unwrap_or(defaults.mode);

    let result = aggregate(&request.coverage_list, steps, mode)?;
    if result.is_degraded() {
        tracing::warn!(
            fallbacks = result.fallbacks.len(),
            "merge result degraded by geometry fallbacks"
        );
    }
    Ok(Json(MergeResponse::from(&result)))
}

/// Validation failures map to 400; geometry failures never reach here.
pub struct ApiError(MergeError);

impl From<MergeError> for ApiError {
    fn from(err: MergeError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}
