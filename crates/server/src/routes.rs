pub mod users;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::AppState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Welcome document naming the active backend and the available endpoints.
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "User Registration API",
        "repository_type": state.repo.backend_name(),
        "endpoints": {
            "POST /users/": "Register new user",
            "GET /users/": "List all users",
            "GET /users/{user_id}": "Get specific user",
        },
    }))
}

/// Build the application router around a shared [`AppState`].
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/users", get(users::list_users).post(users::register_user))
        .route("/users/", get(users::list_users).post(users::register_user))
        .route("/users/:id", get(users::get_user))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
