use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{models::AdminUser, utils::sql};

#[derive(Clone)]
pub struct AdminUserRepository {
    pool: PgPool,
}

impl AdminUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, sqlx::Error> {
        let user = sqlx::query_as::<_, AdminUser>(&sql(r#"
            SELECT
                id,
                username,
                password_hash,
                created_at,
                updated_at
            FROM
                admin_users
            WHERE
                username = ?
        "#))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn create(&self, username: &str, password_hash: &str) -> Result<AdminUser, sqlx::Error> {
        let now = Utc::now();
        let user = sqlx::query_as::<_, AdminUser>(&sql(r#"
            INSERT INTO
                admin_users (
                    username,
                    password_hash,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?)
            RETURNING
                id,
                username,
                password_hash,
                created_at,
                updated_at
        "#))
        .bind(username)
        .bind(password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(&sql(r#"
            UPDATE
                admin_users
            SET
                password_hash = ?,
                updated_at = ?
            WHERE
                id = ?
        "#))
        .bind(password_hash)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
