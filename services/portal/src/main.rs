use sea_orm::Database;
use tracing::info;

use cartera_portal::config::PortalConfig;
use cartera_portal::infra::auth_admin::HttpAuthAdminClient;
use cartera_portal::router::build_router;
use cartera_portal::state::AppState;

#[tokio::main]
async fn main() {
    cartera_core::tracing::init_tracing();

    let config = PortalConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let auth = HttpAuthAdminClient::new(&config.auth_admin_url, &config.auth_admin_key);

    let state = AppState { db, auth };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.portal_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("portal service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
