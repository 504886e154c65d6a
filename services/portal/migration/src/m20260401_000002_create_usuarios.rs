use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Usuarios::Table)
                    .if_not_exists()
                    // No auto-generation: the id is assigned by the auth
                    // provider and copied in by the sync step.
                    .col(
                        ColumnDef::new(Usuarios::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Usuarios::Nombre).string().not_null())
                    .col(ColumnDef::new(Usuarios::Email).string().not_null())
                    .col(
                        ColumnDef::new(Usuarios::Rol)
                            .string()
                            .not_null()
                            .default("cliente"),
                    )
                    .col(ColumnDef::new(Usuarios::ClienteId).uuid())
                    .col(ColumnDef::new(Usuarios::DeletedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Usuarios::CreatedBy).uuid())
                    .col(ColumnDef::new(Usuarios::UpdatedBy).uuid())
                    .col(
                        ColumnDef::new(Usuarios::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Usuarios::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Usuarios::Table, Usuarios::ClienteId)
                            .to(Clientes::Table, Clientes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Usuarios::Table)
                    .col(Usuarios::Email)
                    .name("idx_usuarios_email")
                    .to_owned(),
            )
            .await?;

        // At most one active profile per email. Partial indexes are not
        // expressible through the builder; raw SQL is fine here (Postgres only).
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX uq_usuarios_email_activo \
                 ON usuarios (email) WHERE deleted_at IS NULL",
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Usuarios::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Usuarios {
    Table,
    Id,
    Nombre,
    Email,
    Rol,
    ClienteId,
    DeletedAt,
    CreatedBy,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Clientes {
    Table,
    Id,
}
