//! Axum route handlers for the Role-play API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::session::RolePlaySession;
use crate::roleplay::engine::TurnRequest;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub reply: String,
}

#[derive(Debug, Deserialize)]
pub struct ConfidenceUpdate {
    pub confidence_score: i64,
}

/// POST /api/v1/roleplay/:pack_id
///
/// Body: `{ "message": "...", "messages": [ChatMessage] }`. Returns the manager reply.
pub async fn handle_submit_turn(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(pack_id): Path<Uuid>,
    ApiJson(request): ApiJson<TurnRequest>,
) -> Result<Json<TurnResponse>, AppError> {
    let reply = state.engine.submit_turn(user_id, pack_id, request).await?;
    Ok(Json(TurnResponse { reply }))
}

/// GET /api/v1/roleplay/:pack_id
pub async fn handle_get_session(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(pack_id): Path<Uuid>,
) -> Result<Json<RolePlaySession>, AppError> {
    state
        .engine
        .get_session(user_id, pack_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No role-play session for pack {pack_id}")))
}

/// PATCH /api/v1/roleplay/sessions/:id/confidence
pub async fn handle_set_confidence(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(session_id): Path<Uuid>,
    ApiJson(update): ApiJson<ConfidenceUpdate>,
) -> Result<StatusCode, AppError> {
    state
        .engine
        .set_confidence(user_id, session_id, update.confidence_score)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
