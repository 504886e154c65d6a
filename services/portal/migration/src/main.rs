use sea_orm_migration::prelude::*;

use cartera_portal_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
