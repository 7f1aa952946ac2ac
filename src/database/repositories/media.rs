use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{MediaUpload, MediaUploadInput},
    utils::sql,
};

#[derive(Clone)]
pub struct MediaRepository {
    pool: PgPool,
}

impl MediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<MediaUpload>, sqlx::Error> {
        let media = sqlx::query_as::<_, MediaUpload>(&sql(r#"
            SELECT
                id,
                title,
                description,
                file_type,
                file_url,
                created_at
            FROM
                media_uploads
            ORDER BY
                created_at DESC
        "#))
        .fetch_all(&self.pool)
        .await?;

        Ok(media)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MediaUpload>, sqlx::Error> {
        let media = sqlx::query_as::<_, MediaUpload>(&sql(r#"
            SELECT
                id,
                title,
                description,
                file_type,
                file_url,
                created_at
            FROM
                media_uploads
            WHERE
                id = ?
        "#))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(media)
    }

    pub async fn create(&self, input: MediaUploadInput) -> Result<MediaUpload, sqlx::Error> {
        let media = sqlx::query_as::<_, MediaUpload>(&sql(r#"
            INSERT INTO
                media_uploads (
                    title,
                    description,
                    file_type,
                    file_url,
                    created_at
                )
            VALUES
                (?, ?, ?, ?, ?)
            RETURNING
                id,
                title,
                description,
                file_type,
                file_url,
                created_at
        "#))
        .bind(input.title)
        .bind(input.description)
        .bind(input.file_type)
        .bind(input.file_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(media)
    }

    /// Deletes the row and hands it back so the caller can remove the stored object.
    pub async fn delete(&self, id: Uuid) -> Result<Option<MediaUpload>, sqlx::Error> {
        let media = sqlx::query_as::<_, MediaUpload>(&sql(r#"
            DELETE FROM
                media_uploads
            WHERE
                id = ?
            RETURNING
                id,
                title,
                description,
                file_type,
                file_url,
                created_at
        "#))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(media)
    }
}
