use crate::error::ApiError;
use crate::kubernetes::PodSource;
use crate::types::{GatewayConfig, LogRequest, LogsResponse, PodSummary};
use crate::utils::{effective_tail_lines, is_authorized, parse_log_output, render_text};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

pub const HEALTH_PATH: &str = "/healthz";

/// Shared per-process handles, injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub pods: Arc<dyn PodSource>,
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    pub fn new(pods: Arc<dyn PodSource>, config: GatewayConfig) -> Self {
        Self {
            pods,
            config: Arc::new(config),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PodsQuery {
    pub namespace: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
    pub namespace: Option<String>,
    pub pod: Option<String>,
    pub container: Option<String>,
    pub n: Option<String>,
    pub format: Option<String>,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(healthz))
        .route("/pods", get(list_pods))
        .route("/logs", get(pod_logs))
        // alias of /logs
        .route("/tail", get(pod_logs))
        .layer(middleware::from_fn_with_state(state.clone(), require_token))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn require_token(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if req.uri().path() == HEALTH_PATH {
        return next.run(req).await;
    }

    let auth = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    if !is_authorized(&state.config.token, auth) {
        debug!("Rejected unauthorized request to {}", req.uri().path());
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }
    next.run(req).await
}

async fn healthz() -> &'static str {
    "ok"
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

async fn list_pods(
    State(state): State<AppState>,
    query: Result<Query<PodsQuery>, QueryRejection>,
) -> Result<Json<Vec<PodSummary>>, ApiError> {
    let Query(query) = query?;
    let namespace =
        non_empty(query.namespace).unwrap_or_else(|| state.config.default_namespace.clone());

    let pods = state.pods.list_pods(&namespace).await.map_err(|e| {
        warn!("Failed to list pods in namespace {}: {}", namespace, e);
        ApiError::ListPods(e)
    })?;

    Ok(Json(pods))
}

fn parse_line_count(raw: &str) -> Result<Option<i64>, ApiError> {
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<i64>() {
        Ok(n) if n >= 0 => Ok(Some(n)),
        _ => Err(ApiError::BadRequest(format!(
            "n must be a non-negative integer, got '{}'",
            raw
        ))),
    }
}

async fn pod_logs(
    State(state): State<AppState>,
    query: Result<Query<LogsQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let pod = non_empty(query.pod).ok_or_else(|| ApiError::BadRequest("pod required".into()))?;
    let requested = match query.n.as_deref() {
        Some(raw) => parse_line_count(raw)?,
        None => None,
    };

    let req = LogRequest {
        namespace: non_empty(query.namespace)
            .unwrap_or_else(|| state.config.default_namespace.clone()),
        pod,
        container: non_empty(query.container),
        tail_lines: effective_tail_lines(
            requested,
            state.config.default_lines,
            state.config.max_lines,
        ),
    };

    let raw = state.pods.read_logs(&req).await.map_err(|e| {
        warn!(
            "Failed to read logs for pod {}/{}: {}",
            req.namespace, req.pod, e
        );
        ApiError::ReadLogs(e)
    })?;
    let lines = parse_log_output(&raw);
    debug!(
        "Read {} log lines from pod {}/{}",
        lines.len(),
        req.namespace,
        req.pod
    );

    if query.format.as_deref() == Some("text") {
        return Ok(render_text(&lines).into_response());
    }

    Ok(Json(LogsResponse {
        namespace: req.namespace,
        pod: req.pod,
        container: req.container.unwrap_or_default(),
        count: lines.len(),
        lines,
    })
    .into_response())
}
