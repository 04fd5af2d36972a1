use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::auth::extractor::AuthPrincipal;
use crate::db;
use crate::error::{is_unique_violation, AppError};
use crate::models::Account;
use crate::state::SharedState;
use crate::validate;

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Self-service profile update. Conflicts name the colliding field: the
/// caller is already authenticated as themselves, so the enumeration
/// concern of register/login does not apply.
pub async fn update(
    auth: AuthPrincipal,
    State(state): State<SharedState>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<Account>, AppError> {
    let account = db::accounts::find_by_id(&state.pool, auth.account_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

    if let Some(username) = &req.username {
        validate::username(username)?;

        if db::accounts::username_taken(&state.pool, username, account.id).await? {
            return Err(AppError::Conflict("Username is already taken".to_string()));
        }

        db::accounts::update_username(&state.pool, account.id, username)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict("Username is already taken".to_string())
                } else {
                    AppError::Database(e)
                }
            })?;
    }

    if let Some(email) = &req.email {
        validate::email(email)?;

        if db::accounts::email_taken(&state.pool, email, account.id).await? {
            return Err(AppError::Conflict("Email is already taken".to_string()));
        }

        db::accounts::update_email(&state.pool, account.id, email)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict("Email is already taken".to_string())
                } else {
                    AppError::Database(e)
                }
            })?;
    }

    let updated = db::accounts::find_by_id(&state.pool, account.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

    Ok(Json(updated))
}
