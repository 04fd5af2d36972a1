use sqlx::PgPool;

use crate::auth::password;
use crate::config::Config;
use crate::db::{accounts, memberships, roles};
use crate::error::AppError;
use crate::models::RoleName;

/// Create the configured bootstrap administrator if it does not exist yet.
/// Idempotent; an advisory lock serializes concurrent process starts.
pub async fn ensure_bootstrap_admin(pool: &PgPool, config: &Config) -> Result<(), AppError> {
    let Some(admin) = &config.bootstrap_admin else {
        return Ok(());
    };

    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock(1)")
        .execute(&mut *tx)
        .await?;

    if accounts::find_by_email(&mut *tx, &admin.email)
        .await?
        .is_some()
    {
        return Ok(());
    }

    let pw_hash = password::hash(&admin.password, &config.hashing).map_err(AppError::Internal)?;

    let account = accounts::create(
        &mut *tx,
        &admin.username,
        &admin.email,
        &pw_hash,
        "System",
        "Administrator",
    )
    .await?;

    let role = roles::find_by_name(&mut *tx, RoleName::Admin.as_str())
        .await?
        .ok_or_else(|| AppError::Internal("Admin role not seeded".to_string()))?;

    memberships::assign(&mut *tx, account.id, role.id).await?;

    tx.commit().await?;

    tracing::info!("Bootstrap administrator account created");
    Ok(())
}
