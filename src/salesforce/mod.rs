//! Salesforce HTTP clients.
//!
//! Two outbound calls, strictly sequential: the OAuth2 token endpoint
//! (JWT Bearer grant), then the Tooling API create for the install
//! record using the returned instance URL and access token.

pub mod oauth;
pub mod tooling;

pub use oauth::{exchange_token, AuthResult};
pub use tooling::create_install_request;
