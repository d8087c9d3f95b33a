pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::packs::handlers as packs;
use crate::roleplay::handlers as roleplay;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Pack API
        .route(
            "/api/v1/packs",
            post(packs::handle_create_pack).get(packs::handle_list_packs),
        )
        .route(
            "/api/v1/packs/:id",
            get(packs::handle_get_pack).delete(packs::handle_delete_pack),
        )
        // Role-play API
        .route(
            "/api/v1/roleplay/:pack_id",
            post(roleplay::handle_submit_turn).get(roleplay::handle_get_session),
        )
        .route(
            "/api/v1/roleplay/sessions/:id/confidence",
            patch(roleplay::handle_set_confidence),
        )
        .with_state(state)
}
