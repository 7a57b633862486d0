//! OAuth2 JWT Bearer token exchange (RFC 7523).

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tracing::debug;

/// JWT Bearer grant type URN.
pub const GRANT_TYPE_JWT_BEARER: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Token endpoint path relative to the login URL.
const TOKEN_PATH: &str = "/services/oauth2/token";

/// Successful token exchange result. Held only for the duration of one
/// request; never cached across invocations.
#[derive(Debug, Deserialize)]
pub struct AuthResult {
    /// Base URL of the authenticated tenant.
    pub instance_url: String,
    /// Bearer token for subsequent API calls.
    pub access_token: String,
}

/// Error body returned by the token endpoint on rejection.
#[derive(Debug, Default, Deserialize)]
struct TokenErrorBody {
    #[allow(dead_code)]
    error: Option<String>,
    error_description: Option<String>,
}

/// Exchange a signed assertion for an access token.
///
/// Single attempt, fail fast. On rejection the provider's
/// `error_description` becomes the failure detail so the caller can
/// classify it.
pub async fn exchange_token(
    client: &reqwest::Client,
    login_url: &str,
    assertion: &str,
) -> Result<AuthResult> {
    let url = format!("{}{}", login_url.trim_end_matches('/'), TOKEN_PATH);
    let params = [("grant_type", GRANT_TYPE_JWT_BEARER), ("assertion", assertion)];

    let response = client
        .post(&url)
        .form(&params)
        .send()
        .await
        .context("Token endpoint request failed")?;

    if !response.status().is_success() {
        let status = response.status();
        let body: TokenErrorBody = response.json().await.unwrap_or_default();
        debug!(status = %status, "Token exchange rejected");
        let description = body
            .error_description
            .unwrap_or_else(|| "JWT authentication failed".to_string());
        return Err(anyhow!(description));
    }

    let auth: AuthResult = response
        .json()
        .await
        .context("Failed to parse token response")?;

    debug!(instance_url = %auth.instance_url, "Token exchange successful");

    Ok(auth)
}
