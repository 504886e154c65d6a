#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{AuthIdentity, NewAuthUser, Profile, SyncOutcome};
use crate::error::PortalServiceError;

/// Repository for portal user profiles (`usuarios`) and their customer link.
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, PortalServiceError>;

    /// Find the non-deleted profile for an email, if any.
    async fn find_active_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Profile>, PortalServiceError>;

    /// Remove soft-deleted rows for `email`, then collapse any remaining
    /// active duplicates down to the most recently created row. Idempotent.
    async fn clean_duplicates(&self, email: &str) -> Result<(), PortalServiceError>;

    /// In one transaction: insert the profile keyed by `auth_id` and point
    /// `clientes.usuario_portal_id` at it. Failures inside the transaction
    /// come back as a structured `SyncOutcome`; only transport-level failures
    /// are `Err`.
    async fn sync_after_auth_creation(
        &self,
        auth_id: Uuid,
        email: &str,
        nombre: &str,
        cliente_id: Uuid,
    ) -> Result<SyncOutcome, PortalServiceError>;
}

/// Port for the auth provider's admin API.
pub trait AuthAdminPort: Send + Sync {
    /// Create a provider user. Any failure maps to
    /// [`PortalServiceError::AuthCreationFailed`] carrying the provider's
    /// message verbatim.
    async fn create_user(&self, user: &NewAuthUser) -> Result<AuthIdentity, PortalServiceError>;

    /// Delete a provider user. Used as the compensating action when sync
    /// fails after the identity was created.
    async fn delete_user(&self, id: Uuid) -> Result<(), PortalServiceError>;

    /// List all provider users. Read-only; used by the diagnostic lookup.
    async fn list_users(&self) -> Result<Vec<AuthIdentity>, PortalServiceError>;
}
