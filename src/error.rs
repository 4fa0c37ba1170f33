use crate::kubernetes::UpstreamError;
use crate::types::ErrorResponse;
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    ListPods(UpstreamError),

    #[error("{0}")]
    ReadLogs(UpstreamError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ListPods(e) => upstream_status(e),
            // every log retrieval failure is reported as a missing log source
            ApiError::ReadLogs(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Pod listing reports only the upstream reason; everything else
    /// reports the full composed message.
    pub fn message(&self) -> String {
        match self {
            ApiError::ListPods(UpstreamError::Api {
                reason, message, ..
            }) => {
                if reason.is_empty() {
                    message.clone()
                } else {
                    reason.clone()
                }
            }
            other => other.to_string(),
        }
    }
}

/// Status to answer with for an upstream failure: the API's own code when it
/// is an error code, 502 when there was no usable status.
pub fn upstream_status(err: &UpstreamError) -> StatusCode {
    match err {
        UpstreamError::Api { code, .. } => StatusCode::from_u16(*code)
            .ok()
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::BAD_GATEWAY),
        UpstreamError::Transport(_) => StatusCode::BAD_GATEWAY,
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
