//! Tooling API client for PackageInstallRequest records.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Reject installation when component names conflict with existing metadata.
const NAME_CONFLICT_RESOLUTION: &str = "Block";

/// Restrict the installed package to admin users only.
const SECURITY_TYPE: &str = "None";

/// Fields of the created PackageInstallRequest record. The two policy
/// values are fixed, not derived from caller input.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PackageInstallRequest<'a> {
    subscriber_package_version_key: &'a str,
    name_conflict_resolution: &'a str,
    security_type: &'a str,
}

/// Create-record response from the Tooling API.
#[derive(Debug, Deserialize)]
struct CreateResult {
    id: Option<String>,
    #[serde(default)]
    success: bool,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

/// Error entries returned on non-2xx REST responses.
#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    #[serde(rename = "errorCode")]
    error_code: Option<String>,
}

/// Create a PackageInstallRequest record and return its id.
///
/// Installation itself is asynchronous on the Salesforce side; the
/// returned id is what callers poll for completion.
pub async fn create_install_request(
    client: &reqwest::Client,
    instance_url: &str,
    access_token: &str,
    api_version: &str,
    package_version_key: &str,
) -> Result<String> {
    let url = format!(
        "{}/services/data/v{}/tooling/sobjects/PackageInstallRequest/",
        instance_url.trim_end_matches('/'),
        api_version
    );

    let body = PackageInstallRequest {
        subscriber_package_version_key: package_version_key,
        name_conflict_resolution: NAME_CONFLICT_RESOLUTION,
        security_type: SECURITY_TYPE,
    };

    let response = client
        .post(&url)
        .bearer_auth(access_token)
        .json(&body)
        .send()
        .await
        .context("Tooling API request failed")?;

    let status = response.status();
    if !status.is_success() {
        let errors = response.json::<Vec<ApiError>>().await.unwrap_or_default();
        debug!(status = %status, errors = ?errors, "Install request rejected");
        let detail = errors
            .into_iter()
            .next()
            .map(|e| e.message)
            .unwrap_or_else(|| format!("Tooling API returned status {}", status));
        return Err(anyhow!(detail));
    }

    let result: CreateResult = response
        .json()
        .await
        .context("Failed to parse install response")?;

    if !result.success {
        return Err(anyhow!("Install request not accepted: {:?}", result.errors));
    }

    result
        .id
        .ok_or_else(|| anyhow!("Install response missing record id"))
}
