use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use cartera_core::health::{healthz, readyz};
use cartera_core::middleware::request_id_layer;

use crate::handlers::portal_user::{diagnose_portal_user, provision_portal_user};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Portal users
        .route("/portal-users", post(provision_portal_user))
        .route("/portal-users/diagnostic", get(diagnose_portal_user))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
