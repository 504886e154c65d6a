use sea_orm_migration::prelude::*;

mod m20260401_000001_create_clientes;
mod m20260401_000002_create_usuarios;
mod m20260401_000003_add_usuario_portal_id;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260401_000001_create_clientes::Migration),
            Box::new(m20260401_000002_create_usuarios::Migration),
            Box::new(m20260401_000003_add_usuario_portal_id::Migration),
        ]
    }
}
