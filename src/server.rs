//! HTTP surface: routing, request validation, response mapping.
//!
//! Every request produces a status code and a JSON body; no failure
//! propagates to the host uncaught.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::agent::{InstallAgent, InstallOutcome, InstallRequest};
use crate::error::{ErrorBody, InstallError};

/// Human-readable note that installation completes asynchronously.
const SUCCESS_MESSAGE: &str = "Package update initiated - may take several minutes";

/// Build the router.
pub fn router(agent: Arc<InstallAgent>) -> Router {
    Router::new()
        .route("/install", post(install))
        .route("/healthz", get(healthz))
        .with_state(agent)
}

async fn healthz() -> &'static str {
    "ok"
}

/// Raw request body, all fields optional until validated.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInstallRequest {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    consumer_key: Option<String>,
    #[serde(default)]
    package_id: Option<String>,
}

/// Parse and validate the request body.
///
/// A non-JSON body is treated the same as missing fields; there is
/// exactly one validation failure shape.
fn parse_request(body: &str) -> Result<InstallRequest, InstallError> {
    let raw: RawInstallRequest =
        serde_json::from_str(body).map_err(|_| InstallError::MissingFields)?;

    match (raw.username, raw.consumer_key, raw.package_id) {
        (Some(username), Some(consumer_key), Some(package_id))
            if !username.is_empty() && !consumer_key.is_empty() && !package_id.is_empty() =>
        {
            Ok(InstallRequest {
                username,
                consumer_key,
                package_id,
            })
        }
        _ => Err(InstallError::MissingFields),
    }
}

/// Success response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InstallResponse {
    success: bool,
    request_id: String,
    message: &'static str,
    /// Relative polling path; the status endpoint itself is provided by
    /// a separate collaborator.
    status_check_endpoint: String,
}

impl InstallResponse {
    fn new(outcome: &InstallOutcome) -> Self {
        Self {
            success: true,
            request_id: outcome.request_id.clone(),
            message: SUCCESS_MESSAGE,
            status_check_endpoint: format!("/status?id={}", outcome.request_id),
        }
    }
}

/// Handle an install request.
async fn install(State(agent): State<Arc<InstallAgent>>, body: String) -> Response {
    let correlation_id = Uuid::new_v4();

    let result = match parse_request(&body) {
        Ok(request) => {
            info!(
                correlation_id = %correlation_id,
                username = %request.username,
                package_id = %request.package_id,
                "Processing install request"
            );
            agent.install(&request).await
        }
        Err(err) => Err(err),
    };

    match result {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                request_id = %outcome.request_id,
                "Install request created"
            );
            (StatusCode::OK, Json(InstallResponse::new(&outcome))).into_response()
        }
        Err(InstallError::MissingFields) => {
            info!(correlation_id = %correlation_id, "Rejected request with missing fields");
            (StatusCode::BAD_REQUEST, Json(ErrorBody::validation())).into_response()
        }
        Err(err) => {
            error!(correlation_id = %correlation_id, error = %err, "Install request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::classified(err.detail())),
            )
                .into_response()
        }
    }
}
