//! Install pipeline failures and user-facing response mapping.
//!
//! Callers never see internal error text. Failures are classified into
//! a small set of known diagnostics; everything else gets a generic
//! message, with the full detail logged server-side.

use serde::Serialize;

/// Fixed remediation hint returned with every failure response.
pub const SOLUTION_HINT: &str = "Contact your Salesforce administrator";

/// Failure of one install invocation.
#[derive(Debug)]
pub enum InstallError {
    /// Required request fields missing or empty. No network call was made.
    MissingFields,
    /// Assertion signing or token exchange failed.
    Auth {
        /// Provider error description, or the transport error text.
        description: String,
    },
    /// The install record could not be created after successful auth.
    Install {
        /// Tooling API error message.
        message: String,
    },
}

impl InstallError {
    /// Error detail used for classification and logging.
    pub fn detail(&self) -> &str {
        match self {
            InstallError::MissingFields => "Missing required fields",
            InstallError::Auth { description } => description,
            InstallError::Install { message } => message,
        }
    }
}

impl std::fmt::Display for InstallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstallError::MissingFields => write!(f, "missing required fields"),
            InstallError::Auth { description } => write!(f, "authentication failed: {}", description),
            InstallError::Install { message } => write!(f, "install request failed: {}", message),
        }
    }
}

/// Known provider failure categories.
///
/// The token endpoint does not return structured codes for these cases,
/// so classification substring-matches the error description. The two
/// known phrases are matched loosely; this is brittle against provider
/// wording changes, and anything unrecognized falls back to a generic
/// diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailureKind {
    /// The connected app does not have the JWT Bearer grant enabled.
    GrantTypeDisabled,
    /// Consumer key or username rejected by the provider.
    InvalidCredentials,
    /// Anything else, including transport and install failures.
    Unknown,
}

impl AuthFailureKind {
    /// Classify an error detail string.
    pub fn classify(detail: &str) -> Self {
        if detail.contains("unsupported_grant_type") {
            AuthFailureKind::GrantTypeDisabled
        } else if detail.contains("invalid client credentials") {
            AuthFailureKind::InvalidCredentials
        } else {
            AuthFailureKind::Unknown
        }
    }

    /// Diagnostic message shown to the caller.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthFailureKind::GrantTypeDisabled => {
                "JWT Bearer Flow not enabled in Salesforce Connected App"
            }
            AuthFailureKind::InvalidCredentials => "Invalid Salesforce credentials",
            AuthFailureKind::Unknown => "Authentication error",
        }
    }
}

/// Wire shape for failure responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<&'static str>,
}

impl ErrorBody {
    /// Body for a validation failure (400). Carries no remediation hint.
    pub fn validation() -> Self {
        Self {
            error: "Missing required fields".to_string(),
            solution: None,
        }
    }

    /// Body for a pipeline failure (500), classified from the detail.
    pub fn classified(detail: &str) -> Self {
        Self {
            error: AuthFailureKind::classify(detail).user_message().to_string(),
            solution: Some(SOLUTION_HINT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_failures() {
        assert_eq!(
            AuthFailureKind::classify("unsupported_grant_type: grant type not supported"),
            AuthFailureKind::GrantTypeDisabled
        );
        assert_eq!(
            AuthFailureKind::classify("invalid client credentials"),
            AuthFailureKind::InvalidCredentials
        );
        assert_eq!(
            AuthFailureKind::classify("audience is invalid"),
            AuthFailureKind::Unknown
        );
        assert_eq!(AuthFailureKind::classify(""), AuthFailureKind::Unknown);
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AuthFailureKind::GrantTypeDisabled.user_message(),
            "JWT Bearer Flow not enabled in Salesforce Connected App"
        );
        assert_eq!(
            AuthFailureKind::InvalidCredentials.user_message(),
            "Invalid Salesforce credentials"
        );
        assert_eq!(AuthFailureKind::Unknown.user_message(), "Authentication error");
    }

    #[test]
    fn test_validation_body_has_no_solution() {
        let body = serde_json::to_string(&ErrorBody::validation()).unwrap();
        assert_eq!(body, r#"{"error":"Missing required fields"}"#);
    }

    #[test]
    fn test_classified_body_carries_solution() {
        let body = ErrorBody::classified("invalid client credentials");
        assert_eq!(body.error, "Invalid Salesforce credentials");
        assert_eq!(body.solution, Some(SOLUTION_HINT));
    }

    #[test]
    fn test_install_error_detail() {
        let err = InstallError::Auth {
            description: "unsupported_grant_type".to_string(),
        };
        assert_eq!(err.detail(), "unsupported_grant_type");

        let err = InstallError::Install {
            message: "invalid cross reference id".to_string(),
        };
        assert_eq!(err.detail(), "invalid cross reference id");
    }
}
