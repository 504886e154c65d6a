use sea_orm::DatabaseConnection;

use crate::infra::auth_admin::HttpAuthAdminClient;
use crate::infra::db::DbProfileRepository;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub auth: HttpAuthAdminClient,
}

impl AppState {
    pub fn profile_repo(&self) -> DbProfileRepository {
        DbProfileRepository {
            db: self.db.clone(),
        }
    }
}
