use sqlx::PgPool;
use uuid::Uuid;

/// Role names an account currently holds, in seeded order. Tokens snapshot
/// this at issuance.
pub async fn names_for_account(pool: &PgPool, account_id: Uuid) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT r.name FROM roles r
         JOIN account_roles ar ON ar.role_id = r.id
         WHERE ar.account_id = $1
         ORDER BY r.id",
    )
    .bind(account_id)
    .fetch_all(pool)
    .await
}

pub async fn assign<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    account_id: Uuid,
    role_id: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO account_roles (account_id, role_id) VALUES ($1, $2)")
        .bind(account_id)
        .bind(role_id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn clear<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    account_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM account_roles WHERE account_id = $1")
        .bind(account_id)
        .execute(executor)
        .await?;
    Ok(())
}
