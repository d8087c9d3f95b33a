//! Axum route handlers for the Pack API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::pack::Pack;
use crate::packs::service::{create_pack, delete_pack, get_pack, list_packs};
use crate::packs::validation::CreatePackRequest;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PackResponse {
    pub pack: Pack,
}

#[derive(Debug, Serialize)]
pub struct PackListResponse {
    pub packs: Vec<Pack>,
}

/// POST /api/v1/packs
pub async fn handle_create_pack(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(request): ApiJson<CreatePackRequest>,
) -> Result<(StatusCode, Json<PackResponse>), AppError> {
    let pack = create_pack(
        state.packs.as_ref(),
        state.market.as_ref(),
        state.llm.as_ref(),
        user_id,
        request,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(PackResponse { pack })))
}

/// GET /api/v1/packs
pub async fn handle_list_packs(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PackListResponse>, AppError> {
    let packs = list_packs(state.packs.as_ref(), user_id).await?;
    Ok(Json(PackListResponse { packs }))
}

/// GET /api/v1/packs/:id
pub async fn handle_get_pack(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(pack_id): Path<Uuid>,
) -> Result<Json<PackResponse>, AppError> {
    let pack = get_pack(state.packs.as_ref(), user_id, pack_id).await?;
    Ok(Json(PackResponse { pack }))
}

/// DELETE /api/v1/packs/:id
pub async fn handle_delete_pack(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(pack_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    delete_pack(
        state.packs.as_ref(),
        state.sessions.as_ref(),
        user_id,
        pack_id,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}
