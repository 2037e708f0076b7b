use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::Profile;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// GET /api/v1/profile
/// A user without a saved profile gets an empty one rather than a 404.
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Profile>, AppError> {
    let profile = state
        .profiles
        .fetch_profile(params.user_id)
        .await?
        .unwrap_or_else(|| Profile::empty(params.user_id));
    Ok(Json(profile))
}

/// PUT /api/v1/profile
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Json(profile): Json<Profile>,
) -> Result<Json<Profile>, AppError> {
    let saved = state.profiles.upsert_profile(&profile).await?;
    info!("Profile saved for user {}", saved.user_id);
    Ok(Json(saved))
}
