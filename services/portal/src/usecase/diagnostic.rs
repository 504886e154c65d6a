use uuid::Uuid;

use cartera_domain::email::normalize_email;

use crate::domain::repository::{AuthAdminPort, ProfileRepository};
use crate::error::PortalServiceError;

// ── PortalDiagnostic ─────────────────────────────────────────────────────────

/// Result of comparing a provider identity with its profile row.
#[derive(Debug)]
pub struct DiagnosticReport {
    pub email: String,
    pub auth_id: Option<Uuid>,
    pub profile_id: Option<Uuid>,
    /// True only when both records exist and share the same identifier.
    pub ids_match: bool,
}

/// Fetch the auth identity and the active profile for an email independently
/// and report whether their identifiers agree. Read-only, for manual
/// verification of the sync invariant.
pub struct PortalDiagnosticUseCase<A, P>
where
    A: AuthAdminPort,
    P: ProfileRepository,
{
    pub auth: A,
    pub profiles: P,
}

impl<A, P> PortalDiagnosticUseCase<A, P>
where
    A: AuthAdminPort,
    P: ProfileRepository,
{
    pub async fn execute(&self, email: &str) -> Result<DiagnosticReport, PortalServiceError> {
        let email = normalize_email(email);

        let auth_id = self
            .auth
            .list_users()
            .await?
            .into_iter()
            .find(|u| u.email == email)
            .map(|u| u.id);

        let profile_id = self
            .profiles
            .find_active_by_email(&email)
            .await?
            .map(|p| p.id);

        let ids_match = matches!((auth_id, profile_id), (Some(a), Some(p)) if a == p);

        Ok(DiagnosticReport {
            email,
            auth_id,
            profile_id,
            ids_match,
        })
    }
}
