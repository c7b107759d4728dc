use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use service::{NewUser, User};

use crate::errors::ApiError;
use crate::state::AppState;

/// Register a new user.
pub async fn register_user(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<NewUser>, ApiError>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    input.validate_input()?;
    let user = state.repo.create_user(&input.username, &input.email).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List all registered users, ascending by id.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.repo.list_users().await?))
}

/// Get a specific user by id.
pub async fn get_user(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
) -> Result<Json<User>, ApiError> {
    state
        .repo
        .get_user(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}
