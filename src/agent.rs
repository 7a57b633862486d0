//! Install pipeline: sign an assertion, exchange it for an access
//! token, create the install record.

use anyhow::{Context, Result};

use crate::assertion::AssertionSigner;
use crate::config::AgentConfig;
use crate::error::InstallError;
use crate::salesforce;

/// A validated install request.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    /// Salesforce username to act as.
    pub username: String,
    /// Connected app consumer key.
    pub consumer_key: String,
    /// Subscriber package version id (04t-prefixed).
    pub package_id: String,
}

/// Outcome of a successfully created install request.
#[derive(Debug)]
pub struct InstallOutcome {
    /// Id of the PackageInstallRequest record, used for status polling.
    pub request_id: String,
}

/// Stateless install agent. The configuration, signer, and HTTP
/// connection pool are the only process-wide state, all read-only
/// after construction.
pub struct InstallAgent {
    config: AgentConfig,
    signer: AssertionSigner,
    http: reqwest::Client,
}

impl InstallAgent {
    /// Build the agent from validated configuration.
    pub fn new(config: AgentConfig) -> Result<Self> {
        let signer = AssertionSigner::new(
            config.signing_key_path.as_deref(),
            config.signing_key_inline.as_deref(),
        )?;

        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            config,
            signer,
            http,
        })
    }

    /// Run the install pipeline for one request.
    ///
    /// The two outbound calls are strictly sequential; the install call
    /// never starts unless the token exchange succeeded.
    pub async fn install(&self, request: &InstallRequest) -> Result<InstallOutcome, InstallError> {
        let assertion = self
            .signer
            .sign(
                &request.consumer_key,
                &request.username,
                &self.config.login_url,
            )
            .map_err(|e| InstallError::Auth {
                description: format!("{:#}", e),
            })?;

        let auth = salesforce::exchange_token(&self.http, &self.config.login_url, &assertion)
            .await
            .map_err(|e| InstallError::Auth {
                description: format!("{:#}", e),
            })?;

        let request_id = salesforce::create_install_request(
            &self.http,
            &auth.instance_url,
            &auth.access_token,
            &self.config.api_version,
            &request.package_id,
        )
        .await
        .map_err(|e| InstallError::Install {
            message: format!("{:#}", e),
        })?;

        Ok(InstallOutcome { request_id })
    }
}
