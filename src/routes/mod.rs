pub mod auth;
pub mod profile;
pub mod roles;
pub mod users;

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        // Profile (authenticated self)
        .route("/api/v1/profile", put(profile::update))
        // User administration
        .route("/api/v1/users", get(users::list).post(users::create))
        .route(
            "/api/v1/users/{id}",
            get(users::get).put(users::update).delete(users::delete),
        )
        .route("/api/v1/users/{id}/status", patch(users::set_status))
        .route("/api/v1/users/{id}/roles", patch(users::replace_roles))
        // Role vocabulary
        .route("/api/v1/roles", get(roles::list))
}
