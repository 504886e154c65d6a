use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cartera_core::identity::IdentityHeaders;
use cartera_domain::role::StaffRole;

use crate::error::PortalServiceError;
use crate::state::AppState;
use crate::usecase::diagnostic::PortalDiagnosticUseCase;
use crate::usecase::provision::{ProvisionPortalLoginInput, ProvisionPortalLoginUseCase};

// ── POST /portal-users ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ProvisionPortalUserRequest {
    pub email: String,
    pub password: String,
    pub nombre: String,
    pub cliente_id: Uuid,
}

#[derive(Serialize)]
pub struct ProvisionPortalUserResponse {
    pub user_id: String,
    pub message: String,
}

pub async fn provision_portal_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<ProvisionPortalUserRequest>,
) -> Result<(StatusCode, Json<ProvisionPortalUserResponse>), PortalServiceError> {
    if identity.user_role < StaffRole::Admin.as_u8() {
        return Err(PortalServiceError::Forbidden);
    }
    let usecase = ProvisionPortalLoginUseCase {
        auth: state.auth.clone(),
        profiles: state.profile_repo(),
    };
    let output = usecase
        .execute(ProvisionPortalLoginInput {
            email: body.email,
            password: body.password,
            nombre: body.nombre,
            cliente_id: body.cliente_id,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ProvisionPortalUserResponse {
            user_id: output.user_id.to_string(),
            message: "portal login created".to_owned(),
        }),
    ))
}

// ── GET /portal-users/diagnostic ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct DiagnosticQuery {
    pub email: String,
}

#[derive(Serialize)]
pub struct DiagnosticResponse {
    pub email: String,
    pub auth_id: Option<String>,
    pub profile_id: Option<String>,
    pub ids_match: bool,
}

pub async fn diagnose_portal_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<DiagnosticQuery>,
) -> Result<Json<DiagnosticResponse>, PortalServiceError> {
    if identity.user_role < StaffRole::Admin.as_u8() {
        return Err(PortalServiceError::Forbidden);
    }
    let usecase = PortalDiagnosticUseCase {
        auth: state.auth.clone(),
        profiles: state.profile_repo(),
    };
    let report = usecase.execute(&query.email).await?;
    Ok(Json(DiagnosticResponse {
        email: report.email,
        auth_id: report.auth_id.map(|id| id.to_string()),
        profile_id: report.profile_id.map(|id| id.to_string()),
        ids_match: report.ids_match,
    }))
}
