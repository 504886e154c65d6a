use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, TransactionError, TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use cartera_domain::role::PORTAL_USER_ROLE;
use cartera_portal_schema::{clientes, usuarios};

use crate::domain::repository::ProfileRepository;
use crate::domain::types::{DedupCandidate, Profile, SyncOutcome, duplicate_victims};
use crate::error::PortalServiceError;

// ── Profile repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: DatabaseConnection,
}

impl ProfileRepository for DbProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, PortalServiceError> {
        let model = usuarios::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find profile by id")?;
        Ok(model.map(profile_from_model))
    }

    async fn find_active_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Profile>, PortalServiceError> {
        let model = usuarios::Entity::find()
            .filter(usuarios::Column::Email.eq(email))
            .filter(usuarios::Column::DeletedAt.is_null())
            .order_by_desc(usuarios::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find active profile by email")?;
        Ok(model.map(profile_from_model))
    }

    async fn clean_duplicates(&self, email: &str) -> Result<(), PortalServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let email = email.to_owned();
                Box::pin(async move {
                    let rows = usuarios::Entity::find()
                        .filter(usuarios::Column::Email.eq(email))
                        .all(txn)
                        .await?;
                    let candidates: Vec<DedupCandidate> = rows
                        .iter()
                        .map(|r| DedupCandidate {
                            id: r.id,
                            created_at: r.created_at,
                            deleted_at: r.deleted_at,
                        })
                        .collect();
                    let victims = duplicate_victims(&candidates);
                    if !victims.is_empty() {
                        usuarios::Entity::delete_many()
                            .filter(usuarios::Column::Id.is_in(victims))
                            .exec(txn)
                            .await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("clean duplicate profiles")?;
        Ok(())
    }

    async fn sync_after_auth_creation(
        &self,
        auth_id: Uuid,
        email: &str,
        nombre: &str,
        cliente_id: Uuid,
    ) -> Result<SyncOutcome, PortalServiceError> {
        let result = self
            .db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let email = email.to_owned();
                let nombre = nombre.to_owned();
                Box::pin(async move {
                    let now = Utc::now();
                    // The profile's primary key IS the provider-assigned id.
                    usuarios::ActiveModel {
                        id: Set(auth_id),
                        nombre: Set(nombre),
                        email: Set(email),
                        rol: Set(PORTAL_USER_ROLE.to_owned()),
                        cliente_id: Set(Some(cliente_id)),
                        deleted_at: Set(None),
                        created_by: Set(Some(auth_id)),
                        updated_by: Set(Some(auth_id)),
                        created_at: Set(now),
                        updated_at: Set(now),
                    }
                    .insert(txn)
                    .await?;

                    let updated = clientes::Entity::update_many()
                        .filter(clientes::Column::Id.eq(cliente_id))
                        .col_expr(clientes::Column::UsuarioPortalId, Expr::value(auth_id))
                        .col_expr(clientes::Column::UpdatedAt, Expr::value(now))
                        .exec(txn)
                        .await?;
                    // A profile pointing at a nonexistent customer would
                    // outlive every cleanup path; abort instead.
                    if updated.rows_affected == 0 {
                        return Err(sea_orm::DbErr::Custom(format!(
                            "cliente {cliente_id} not found"
                        )));
                    }
                    Ok(())
                })
            })
            .await;

        match result {
            Ok(()) => Ok(SyncOutcome::ok(auth_id)),
            // The transaction body failed and rolled back (uniqueness
            // violation included): report a structured outcome, the caller
            // decides about compensation.
            Err(TransactionError::Transaction(e)) => Ok(SyncOutcome::failed(e.to_string())),
            Err(TransactionError::Connection(e)) => Err(anyhow::Error::from(e)
                .context("sync profile and customer link")
                .into()),
        }
    }
}

fn profile_from_model(model: usuarios::Model) -> Profile {
    Profile {
        id: model.id,
        nombre: model.nombre,
        email: model.email,
        rol: model.rol,
        cliente_id: model.cliente_id,
        deleted_at: model.deleted_at,
        created_by: model.created_by,
        updated_by: model.updated_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
