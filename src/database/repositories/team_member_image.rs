use chrono::Utc;
use sqlx::PgPool;

use crate::database::{models::TeamMemberImage, utils::sql};

#[derive(Clone)]
pub struct TeamMemberImageRepository {
    pool: PgPool,
}

impl TeamMemberImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<TeamMemberImage>, sqlx::Error> {
        let images = sqlx::query_as::<_, TeamMemberImage>(&sql(r#"
            SELECT
                id,
                name,
                image_url,
                created_at,
                updated_at
            FROM
                team_member_images
            ORDER BY
                name
        "#))
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    /// Inserts the image for `name`, or replaces the URL if one exists.
    pub async fn upsert(&self, name: &str, image_url: &str) -> Result<TeamMemberImage, sqlx::Error> {
        let now = Utc::now();
        let image = sqlx::query_as::<_, TeamMemberImage>(&sql(r#"
            INSERT INTO
                team_member_images (
                    name,
                    image_url,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?)
            ON CONFLICT (name) DO UPDATE
            SET
                image_url = EXCLUDED.image_url,
                updated_at = EXCLUDED.updated_at
            RETURNING
                id,
                name,
                image_url,
                created_at,
                updated_at
        "#))
        .bind(name)
        .bind(image_url)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(image)
    }

    pub async fn delete_by_name(&self, name: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(&sql("DELETE FROM team_member_images WHERE name = ?"))
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
