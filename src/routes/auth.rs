use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::jwt::{encode_token, Claims};
use crate::auth::password;
use crate::db;
use crate::error::{is_unique_violation, AppError};
use crate::models::{Account, RoleName};
use crate::state::SharedState;
use crate::validate;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub account_id: Uuid,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
    pub expires_in_seconds: i64,
}

fn issue_auth_response(
    state: &SharedState,
    account: &Account,
    roles: Vec<String>,
) -> Result<AuthResponse, AppError> {
    let claims = Claims::new(account.id, roles.clone(), &state.config.token);
    let token = encode_token(&claims, &state.config.token).map_err(AppError::Internal)?;

    Ok(AuthResponse {
        token,
        account_id: account.id,
        username: account.username.clone(),
        email: account.email.clone(),
        roles,
        expires_in_seconds: state.config.token.lifetime_secs,
    })
}

pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    validate::username(&req.username)?;
    validate::email(&req.email)?;
    validate::password(&req.password)?;
    validate::display_name("First name", &req.first_name)?;
    validate::display_name("Last name", &req.last_name)?;

    let pw_hash = password::hash(&req.password, &state.config.hashing).map_err(AppError::Internal)?;

    // The UNIQUE constraints settle racing registrations; the loser of a
    // race lands here as a conflict. The message stays generic so callers
    // cannot probe which field collided.
    let mut tx = state.pool.begin().await?;

    let account = db::accounts::create(
        &mut *tx,
        &req.username,
        &req.email,
        &pw_hash,
        &req.first_name,
        &req.last_name,
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict(
                "An account with that username or email already exists".to_string(),
            )
        } else {
            AppError::Database(e)
        }
    })?;

    let default_role = db::roles::find_by_name(&mut *tx, RoleName::User.as_str())
        .await?
        .ok_or_else(|| AppError::Internal("Default role not seeded".to_string()))?;

    db::memberships::assign(&mut *tx, account.id, default_role.id).await?;

    tx.commit().await?;

    tracing::info!(account_id = %account.id, "Account registered");

    let response = issue_auth_response(&state, &account, vec![default_role.name])?;
    Ok(Json(response))
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    if state.login_limiter.check(&req.email).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    // Missing account, inactive account, and wrong password all produce the
    // same response; nothing distinguishes which one happened.
    let account = db::accounts::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    if !account.is_active {
        return Err(AppError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let valid =
        password::verify(&req.password, &account.password_hash).map_err(AppError::Internal)?;

    if !valid {
        state.login_limiter.record_failure(&req.email);
        return Err(AppError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    db::accounts::touch_last_login(&state.pool, account.id).await?;

    let roles = db::memberships::names_for_account(&state.pool, account.id).await?;

    let response = issue_auth_response(&state, &account, roles)?;
    Ok(Json(response))
}
