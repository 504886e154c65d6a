use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Minimum password length accepted for a new portal login. Matches the auth
/// provider's own floor, checked here so we fail before the remote call.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Portal user profile owned by the portal service (`usuarios` table).
#[derive(Debug, Clone)]
pub struct Profile {
    /// Always the auth provider's user id — profile and identity share one
    /// identifier by construction.
    pub id: Uuid,
    pub nombre: String,
    pub email: String,
    pub rol: String,
    pub cliente_id: Option<Uuid>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Auth-provider user record, as much of it as this service cares about.
#[derive(Debug, Clone)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub email: String,
}

/// Request payload for creating an auth-provider user.
#[derive(Debug, Clone)]
pub struct NewAuthUser {
    pub email: String,
    pub password: String,
    pub email_confirmed: bool,
    pub nombre: String,
    pub rol: String,
    pub cliente_id: Uuid,
}

/// Structured outcome of the profile/customer sync step.
///
/// Failures *inside* the sync transaction are reported here rather than as
/// errors; only transport-level failures surface as `Err` from the port.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub success: bool,
    pub error: Option<String>,
    pub user_id: Option<Uuid>,
}

impl SyncOutcome {
    pub fn ok(user_id: Uuid) -> Self {
        Self {
            success: true,
            error: None,
            user_id: Some(user_id),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            user_id: None,
        }
    }
}

/// A profile row as seen by the deduplication pass.
#[derive(Debug, Clone, Copy)]
pub struct DedupCandidate {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Decide which profile rows for a single email must be deleted: every
/// soft-deleted row, plus — when more than one active row remains — every
/// active row except the most recently created. Ties on `created_at` break
/// on id so repeated runs pick the same survivor.
pub fn duplicate_victims(rows: &[DedupCandidate]) -> Vec<Uuid> {
    let mut victims: Vec<Uuid> = rows
        .iter()
        .filter(|r| r.deleted_at.is_some())
        .map(|r| r.id)
        .collect();

    let active: Vec<&DedupCandidate> = rows.iter().filter(|r| r.deleted_at.is_none()).collect();
    if active.len() > 1 {
        let keep = active
            .iter()
            .max_by_key(|r| (r.created_at, r.id))
            .map(|r| r.id)
            .unwrap();
        victims.extend(active.iter().filter(|r| r.id != keep).map(|r| r.id));
    }
    victims
}
