use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::database::{
    models::{FoundersMessage, FoundersMessageInput, FoundersMessageSaved},
    utils::sql,
};

#[derive(Clone)]
pub struct FoundersMessageRepository {
    pool: PgPool,
}

impl FoundersMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// The single founders message, or `None` when none has been written yet.
    pub async fn find_current(&self) -> Result<Option<FoundersMessage>, sqlx::Error> {
        let message = sqlx::query_as::<_, FoundersMessage>(&sql(r#"
            SELECT
                id,
                message,
                image_url,
                image_alt,
                updated_at
            FROM
                founders_message
            ORDER BY
                updated_at DESC
            LIMIT 1
        "#))
        .fetch_optional(&self.pool)
        .await?;

        Ok(message)
    }

    /// Updates the existing row in place, or inserts the first one.
    pub async fn save(
        tx: &mut Transaction<'_, Postgres>,
        input: FoundersMessageInput,
    ) -> Result<FoundersMessageSaved, sqlx::Error> {
        let existing: Option<Uuid> = sqlx::query_scalar(&sql(r#"
            SELECT
                id
            FROM
                founders_message
            ORDER BY
                updated_at DESC
            LIMIT 1
            FOR UPDATE
        "#))
        .fetch_optional(&mut **tx)
        .await?;

        let now = Utc::now();
        let (founders_message, created) = match existing {
            Some(id) => {
                let updated = sqlx::query_as::<_, FoundersMessage>(&sql(r#"
                    UPDATE
                        founders_message
                    SET
                        message = ?,
                        image_url = ?,
                        image_alt = ?,
                        updated_at = ?
                    WHERE
                        id = ?
                    RETURNING
                        id,
                        message,
                        image_url,
                        image_alt,
                        updated_at
                "#))
                .bind(input.message)
                .bind(input.image_url)
                .bind(input.image_alt)
                .bind(now)
                .bind(id)
                .fetch_one(&mut **tx)
                .await?;
                (updated, false)
            }
            None => {
                let inserted = sqlx::query_as::<_, FoundersMessage>(&sql(r#"
                    INSERT INTO
                        founders_message (
                            message,
                            image_url,
                            image_alt,
                            updated_at
                        )
                    VALUES
                        (?, ?, ?, ?)
                    RETURNING
                        id,
                        message,
                        image_url,
                        image_alt,
                        updated_at
                "#))
                .bind(input.message)
                .bind(input.image_url)
                .bind(input.image_alt)
                .bind(now)
                .fetch_one(&mut **tx)
                .await?;
                (inserted, true)
            }
        };

        Ok(FoundersMessageSaved {
            founders_message,
            created,
        })
    }
}
