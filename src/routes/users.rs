use std::collections::BTreeSet;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::extractor::AuthPrincipal;
use crate::auth::password;
use crate::db;
use crate::error::{is_unique_violation, AppError};
use crate::models::Account;
use crate::state::SharedState;
use crate::validate;

#[derive(Serialize)]
pub struct AccountWithRoles {
    #[serde(flatten)]
    pub account: Account,
    pub roles: Vec<String>,
}

#[derive(Deserialize)]
pub struct CreateAccountRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Deserialize)]
pub struct UpdateAccountRequest {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub is_active: bool,
}

#[derive(Deserialize)]
pub struct ReplaceRolesRequest {
    pub role_ids: Vec<i32>,
}

async fn with_roles(state: &SharedState, account: Account) -> Result<AccountWithRoles, AppError> {
    let roles = db::memberships::names_for_account(&state.pool, account.id).await?;
    Ok(AccountWithRoles { account, roles })
}

pub async fn list(
    auth: AuthPrincipal,
    State(state): State<SharedState>,
) -> Result<Json<Vec<AccountWithRoles>>, AppError> {
    auth.require_admin()?;

    let accounts = db::accounts::list_all(&state.pool).await?;

    let mut out = Vec::with_capacity(accounts.len());
    for account in accounts {
        out.push(with_roles(&state, account).await?);
    }
    Ok(Json(out))
}

pub async fn get(
    auth: AuthPrincipal,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountWithRoles>, AppError> {
    auth.require_admin()?;

    let account = db::accounts::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

    Ok(Json(with_roles(&state, account).await?))
}

/// Administrative create. Unlike self-service registration, the new account
/// gets no default membership; roles are assigned separately.
pub async fn create(
    auth: AuthPrincipal,
    State(state): State<SharedState>,
    Json(req): Json<CreateAccountRequest>,
) -> Result<Json<AccountWithRoles>, AppError> {
    auth.require_admin()?;

    validate::username(&req.username)?;
    validate::email(&req.email)?;
    validate::password(&req.password)?;
    validate::display_name("First name", &req.first_name)?;
    validate::display_name("Last name", &req.last_name)?;

    let pw_hash = password::hash(&req.password, &state.config.hashing).map_err(AppError::Internal)?;

    let account = db::accounts::create(
        &state.pool,
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

    Ok(Json(AccountWithRoles {
        account,
        roles: vec![],
    }))
}

pub async fn update(
    auth: AuthPrincipal,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAccountRequest>,
) -> Result<Json<AccountWithRoles>, AppError> {
    auth.require_admin()?;

    validate::username(&req.username)?;
    validate::email(&req.email)?;
    validate::display_name("First name", &req.first_name)?;
    validate::display_name("Last name", &req.last_name)?;

    if db::accounts::username_taken(&state.pool, &req.username, id).await? {
        return Err(AppError::Conflict("Username is already taken".to_string()));
    }
    if db::accounts::email_taken(&state.pool, &req.email, id).await? {
        return Err(AppError::Conflict("Email is already taken".to_string()));
    }

    let account = db::accounts::update(
        &state.pool,
        id,
        &req.username,
        &req.email,
        &req.first_name,
        &req.last_name,
        req.is_active,
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
    })?
    .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

    Ok(Json(with_roles(&state, account).await?))
}

pub async fn delete(
    auth: AuthPrincipal,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    // Memberships go with the account via ON DELETE CASCADE.
    let deleted = db::accounts::delete(&state.pool, id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Account not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

pub async fn set_status(
    auth: AuthPrincipal,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    let updated = db::accounts::set_active(&state.pool, id, req.is_active).await?;
    if updated == 0 {
        return Err(AppError::NotFound("Account not found".to_string()));
    }

    Ok(Json(
        serde_json::json!({ "message": "Account status updated" }),
    ))
}

/// Full-set membership overwrite: callers supply the complete desired role
/// set, and an empty list removes every membership. Already-issued tokens
/// keep their issuance-time role claims until they expire.
pub async fn replace_roles(
    auth: AuthPrincipal,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReplaceRolesRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    db::accounts::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

    let role_ids: Vec<i32> = req.role_ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();

    let known = db::roles::find_by_ids(&state.pool, &role_ids).await?;
    if known.len() != role_ids.len() {
        return Err(AppError::BadRequest("Unknown role id".to_string()));
    }

    let mut tx = state.pool.begin().await?;
    db::memberships::clear(&mut *tx, id).await?;
    for role_id in &role_ids {
        db::memberships::assign(&mut *tx, id, *role_id).await?;
    }
    tx.commit().await?;

    Ok(Json(
        serde_json::json!({ "message": "Account roles updated" }),
    ))
}
