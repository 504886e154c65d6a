/// Portal service configuration loaded from environment variables.
#[derive(Debug)]
pub struct PortalConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3117). Env var: `PORTAL_PORT`.
    pub portal_port: u16,
    /// Base URL of the auth provider admin API (e.g. "https://auth.internal/auth/v1").
    pub auth_admin_url: String,
    /// Service-role key for the auth provider admin API.
    pub auth_admin_key: String,
}

impl PortalConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            portal_port: std::env::var("PORTAL_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3117),
            auth_admin_url: std::env::var("AUTH_ADMIN_URL").expect("AUTH_ADMIN_URL"),
            auth_admin_key: std::env::var("AUTH_ADMIN_KEY").expect("AUTH_ADMIN_KEY"),
        }
    }
}
