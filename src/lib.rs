//! Salesforce Package Install Agent
//!
//! Authenticates to Salesforce with the OAuth2 JWT Bearer flow and
//! creates Tooling API PackageInstallRequest records on behalf of
//! callers. One inbound endpoint, two sequential outbound calls, no
//! state beyond startup configuration.

pub mod agent;
pub mod assertion;
pub mod config;
pub mod error;
pub mod salesforce;
pub mod server;
