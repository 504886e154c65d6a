use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Clientes::Table)
                    .add_column(ColumnDef::new(Clientes::UsuarioPortalId).uuid())
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_clientes_usuario_portal_id")
                    .from(Clientes::Table, Clientes::UsuarioPortalId)
                    .to(Usuarios::Table, Usuarios::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Clientes::Table)
                    .col(Clientes::UsuarioPortalId)
                    .name("idx_clientes_usuario_portal_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_clientes_usuario_portal_id")
                    .table(Clientes::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name("fk_clientes_usuario_portal_id")
                    .table(Clientes::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(Clientes::Table)
                    .drop_column(Clientes::UsuarioPortalId)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Clientes {
    Table,
    UsuarioPortalId,
}

#[derive(Iden)]
enum Usuarios {
    Table,
    Id,
}
