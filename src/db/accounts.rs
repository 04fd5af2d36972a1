use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Account;

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    username: &str,
    email: &str,
    password_hash: &str,
    first_name: &str,
    last_name: &str,
) -> Result<Account, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "INSERT INTO accounts (username, email, password_hash, first_name, last_name)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(first_name)
    .bind(last_name)
    .fetch_one(executor)
    .await
}

pub async fn find_by_email<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    email: &str,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = $1")
        .bind(email)
        .fetch_optional(executor)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>("SELECT * FROM accounts ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

/// Fast-path existence check for profile updates. The UNIQUE constraint is
/// still the authority if a concurrent writer slips past this.
pub async fn email_taken(
    pool: &PgPool,
    email: &str,
    exclude: Uuid,
) -> Result<bool, sqlx::Error> {
    let row: (bool,) = sqlx::query_as(
        "SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1 AND id <> $2)",
    )
    .bind(email)
    .bind(exclude)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

pub async fn username_taken(
    pool: &PgPool,
    username: &str,
    exclude: Uuid,
) -> Result<bool, sqlx::Error> {
    let row: (bool,) = sqlx::query_as(
        "SELECT EXISTS(SELECT 1 FROM accounts WHERE username = $1 AND id <> $2)",
    )
    .bind(username)
    .bind(exclude)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

pub async fn update_username(
    pool: &PgPool,
    id: Uuid,
    username: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE accounts SET username = $2 WHERE id = $1")
        .bind(id)
        .bind(username)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn update_email(pool: &PgPool, id: Uuid, email: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE accounts SET email = $2 WHERE id = $1")
        .bind(id)
        .bind(email)
        .execute(pool)
        .await?;
    Ok(())
}

/// Administrative full update. Returns the updated row, or None when the
/// account does not exist.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    username: &str,
    email: &str,
    first_name: &str,
    last_name: &str,
    is_active: bool,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "UPDATE accounts
         SET username = $2, email = $3, first_name = $4, last_name = $5, is_active = $6
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(username)
    .bind(email)
    .bind(first_name)
    .bind(last_name)
    .bind(is_active)
    .fetch_optional(pool)
    .await
}

/// Returns the number of rows touched so callers can distinguish a missing
/// account.
pub async fn set_active(pool: &PgPool, id: Uuid, is_active: bool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE accounts SET is_active = $2 WHERE id = $1")
        .bind(id)
        .bind(is_active)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn touch_last_login(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE accounts SET last_login_at = now() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
