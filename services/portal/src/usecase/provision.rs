use uuid::Uuid;

use cartera_domain::email::{normalize_email, validate_email};
use cartera_domain::role::PORTAL_USER_ROLE;

use crate::domain::repository::{AuthAdminPort, ProfileRepository};
use crate::domain::types::{MIN_PASSWORD_LEN, NewAuthUser};
use crate::error::PortalServiceError;

// ── ProvisionPortalLogin ─────────────────────────────────────────────────────

pub struct ProvisionPortalLoginInput {
    pub email: String,
    pub password: String,
    pub nombre: String,
    pub cliente_id: Uuid,
}

#[derive(Debug)]
pub struct ProvisionPortalLoginOutput {
    /// Shared identifier: the auth provider's user id, which is also the new
    /// profile's primary key.
    pub user_id: Uuid,
}

/// Provision a customer-portal login: create the provider identity, then sync
/// the profile and customer link, rolling the identity back if sync fails.
///
/// Strictly sequential; no step is retried and there is no cancellation once
/// the provider call has gone out.
pub struct ProvisionPortalLoginUseCase<A, P>
where
    A: AuthAdminPort,
    P: ProfileRepository,
{
    pub auth: A,
    pub profiles: P,
}

impl<A, P> ProvisionPortalLoginUseCase<A, P>
where
    A: AuthAdminPort,
    P: ProfileRepository,
{
    pub async fn execute(
        &self,
        input: ProvisionPortalLoginInput,
    ) -> Result<ProvisionPortalLoginOutput, PortalServiceError> {
        let email = normalize_email(&input.email);
        if !validate_email(&email) {
            return Err(PortalServiceError::InvalidEmail);
        }
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(PortalServiceError::WeakPassword);
        }

        // 1. Best-effort cleanup of stale rows for this email. A failure here
        //    must not block provisioning.
        if let Err(e) = self.profiles.clean_duplicates(&email).await {
            tracing::warn!(email = %email, error = %e, "duplicate cleanup failed, continuing");
        }

        // 2. An active profile already using this email is a hard stop.
        if self.profiles.find_active_by_email(&email).await?.is_some() {
            return Err(PortalServiceError::DuplicateEmail);
        }

        // 3. Create the provider identity. Nothing to compensate if this fails.
        let identity = self
            .auth
            .create_user(&NewAuthUser {
                email: email.clone(),
                password: input.password,
                email_confirmed: true,
                nombre: input.nombre.clone(),
                rol: PORTAL_USER_ROLE.to_owned(),
                cliente_id: input.cliente_id,
            })
            .await?;

        // 4./5. Sync profile + customer link; on any failure, delete the
        //       just-created identity so no orphan credential survives.
        let sync = self
            .profiles
            .sync_after_auth_creation(identity.id, &email, &input.nombre, input.cliente_id)
            .await;
        let reason = match sync {
            Ok(outcome) if outcome.success => None,
            Ok(outcome) => Some(
                outcome
                    .error
                    .unwrap_or_else(|| "sync reported failure without detail".to_owned()),
            ),
            Err(e) => Some(e.to_string()),
        };
        if let Some(reason) = reason {
            self.rollback_identity(identity.id).await;
            return Err(PortalServiceError::SyncFailed(reason));
        }

        // 6. Verification read: sync reported success, so the row must be
        //    visible. A miss here means a silent sync bug or consistency gap.
        if self.profiles.find_by_id(identity.id).await?.is_none() {
            return Err(PortalServiceError::VerificationFailed);
        }

        Ok(ProvisionPortalLoginOutput {
            user_id: identity.id,
        })
    }

    /// Compensating delete of the provider identity. Best effort: its own
    /// failure is logged and swallowed so it never masks the primary error.
    async fn rollback_identity(&self, id: Uuid) {
        if let Err(e) = self.auth.delete_user(id).await {
            tracing::warn!(user_id = %id, error = %e, "compensating auth user delete failed");
        }
    }
}
