/*
 * Responsibility
 * - relational binding の疎通確認 (SELECT 1)
 * - PgPool を受け取り、DB エラーは RepoError で返す
 */
use sqlx::PgPool;

use crate::repos::error::RepoError;

pub async fn ping(db: &PgPool) -> Result<i32, RepoError> {
    let one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(db).await?;
    Ok(one)
}
