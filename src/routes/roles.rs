use axum::extract::State;
use axum::Json;

use crate::auth::extractor::AuthPrincipal;
use crate::db;
use crate::error::AppError;
use crate::models::Role;
use crate::state::SharedState;

/// The seeded role vocabulary, for admin tooling that assigns memberships.
pub async fn list(
    auth: AuthPrincipal,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Role>>, AppError> {
    auth.require_admin()?;
    let roles = db::roles::list_all(&state.pool).await?;
    Ok(Json(roles))
}
