use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Portal service domain error variants.
///
/// Every provisioning failure is terminal for the current invocation; nothing
/// here is retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum PortalServiceError {
    #[error("a portal user with this email already exists")]
    DuplicateEmail,
    /// Carries the provider's error text verbatim.
    #[error("auth user creation failed: {0}")]
    AuthCreationFailed(String),
    /// Profile/customer sync failed after the auth user was created; the
    /// identity has been rolled back (best effort) by the time this surfaces.
    #[error("profile synchronization failed: {0}")]
    SyncFailed(String),
    #[error("profile not found after successful synchronization")]
    VerificationFailed,
    #[error("invalid email")]
    InvalidEmail,
    #[error("password too short")]
    WeakPassword,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl PortalServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::AuthCreationFailed(_) => "AUTH_CREATION_FAILED",
            Self::SyncFailed(_) => "SYNC_FAILED",
            Self::VerificationFailed => "VERIFICATION_FAILED",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword => "WEAK_PASSWORD",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for PortalServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::DuplicateEmail => StatusCode::CONFLICT,
            Self::AuthCreationFailed(_) | Self::SyncFailed(_) => StatusCode::BAD_GATEWAY,
            Self::VerificationFailed => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidEmail | Self::WeakPassword => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 5xx only — tower-http TraceLayer already records method/uri/status
        // for all requests. 4xx are expected client errors; logging them here
        // would be noise. Internal errors need the anyhow chain logged so the
        // root cause is traceable.
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "internal error");
            }
            Self::AuthCreationFailed(reason) | Self::SyncFailed(reason) => {
                tracing::error!(reason = %reason, kind = self.kind(), "provisioning failed");
            }
            Self::VerificationFailed => {
                tracing::error!(kind = "VERIFICATION_FAILED", "provisioning failed");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
