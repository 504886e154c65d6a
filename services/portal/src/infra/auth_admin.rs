use anyhow::Context as _;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::repository::AuthAdminPort;
use crate::domain::types::{AuthIdentity, NewAuthUser};
use crate::error::PortalServiceError;

/// HTTP client implementing `AuthAdminPort` against the auth provider's
/// GoTrue-style admin API, authenticated with the service-role key.
#[derive(Clone)]
pub struct HttpAuthAdminClient {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl HttpAuthAdminClient {
    pub fn new(base_url: &str, service_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            service_key: service_key.to_owned(),
        }
    }
}

#[derive(Deserialize)]
struct AdminUser {
    id: Uuid,
    email: Option<String>,
}

#[derive(Deserialize)]
struct AdminUserList {
    users: Vec<AdminUser>,
}

/// Pull the human-readable message out of a provider error body. The provider
/// uses `msg`, older versions `message` or `error_description`; fall back to
/// the raw body so nothing gets lost.
fn provider_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("msg")
                .or_else(|| v.get("message"))
                .or_else(|| v.get("error_description"))
                .and_then(|m| m.as_str())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.to_owned())
}

impl AuthAdminPort for HttpAuthAdminClient {
    async fn create_user(&self, user: &NewAuthUser) -> Result<AuthIdentity, PortalServiceError> {
        let resp = self
            .http
            .post(format!("{}/admin/users", self.base_url))
            .bearer_auth(&self.service_key)
            .json(&json!({
                "email": user.email,
                "password": user.password,
                "email_confirm": user.email_confirmed,
                "user_metadata": {
                    "nombre": user.nombre,
                    "rol": user.rol,
                    "cliente_id": user.cliente_id,
                },
            }))
            .send()
            .await
            .map_err(|e| PortalServiceError::AuthCreationFailed(e.to_string()))?;

        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PortalServiceError::AuthCreationFailed(provider_message(
                &body,
            )));
        }

        let created: AdminUser = resp
            .json()
            .await
            .map_err(|e| PortalServiceError::AuthCreationFailed(e.to_string()))?;
        Ok(AuthIdentity {
            id: created.id,
            email: created.email.unwrap_or_else(|| user.email.clone()),
        })
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), PortalServiceError> {
        let resp = self
            .http
            .delete(format!("{}/admin/users/{id}", self.base_url))
            .bearer_auth(&self.service_key)
            .send()
            .await
            .context("delete auth user")?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "auth admin delete returned {status}: {}",
                provider_message(&body)
            )
            .into());
        }
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<AuthIdentity>, PortalServiceError> {
        let resp = self
            .http
            .get(format!("{}/admin/users", self.base_url))
            .bearer_auth(&self.service_key)
            .send()
            .await
            .context("list auth users")?
            .error_for_status()
            .context("list auth users")?;
        let list: AdminUserList = resp.json().await.context("decode auth user list")?;
        Ok(list
            .users
            .into_iter()
            .map(|u| AuthIdentity {
                id: u.id,
                email: u.email.unwrap_or_default(),
            })
            .collect())
    }
}
