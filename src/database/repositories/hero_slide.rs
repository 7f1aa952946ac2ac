use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{HeroSlide, HeroSlideInput},
    utils::sql,
};

const COLUMNS: &str = r#"
    id,
    title,
    subtitle,
    image_url,
    link_url,
    order_index,
    is_active,
    created_at,
    updated_at
"#;

#[derive(Clone)]
pub struct HeroSlideRepository {
    pool: PgPool,
}

impl HeroSlideRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, active_only: bool) -> Result<Vec<HeroSlide>, sqlx::Error> {
        let slides = sqlx::query_as::<_, HeroSlide>(&sql(&format!(
            r#"
            SELECT
                {COLUMNS}
            FROM
                hero_slides
            WHERE
                (? = FALSE OR is_active = TRUE)
            ORDER BY
                order_index ASC,
                created_at ASC
        "#
        )))
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(slides)
    }

    pub async fn create(&self, input: HeroSlideInput) -> Result<HeroSlide, sqlx::Error> {
        let now = Utc::now();
        let slide = sqlx::query_as::<_, HeroSlide>(&sql(&format!(
            r#"
            INSERT INTO
                hero_slides (
                    title,
                    subtitle,
                    image_url,
                    link_url,
                    order_index,
                    is_active,
                    created_at,
                    updated_at
                )
            VALUES
                (
                    ?,
                    ?,
                    ?,
                    ?,
                    COALESCE(?, (SELECT COALESCE(MAX(order_index) + 1, 0) FROM hero_slides)),
                    ?,
                    ?,
                    ?
                )
            RETURNING
                {COLUMNS}
        "#
        )))
        .bind(input.title)
        .bind(input.subtitle)
        .bind(input.image_url)
        .bind(input.link_url)
        .bind(input.order_index)
        .bind(input.is_active.unwrap_or(true))
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(slide)
    }

    pub async fn update(&self, id: Uuid, input: HeroSlideInput) -> Result<Option<HeroSlide>, sqlx::Error> {
        let slide = sqlx::query_as::<_, HeroSlide>(&sql(&format!(
            r#"
            UPDATE
                hero_slides
            SET
                title = ?,
                subtitle = ?,
                image_url = ?,
                link_url = ?,
                order_index = COALESCE(?, order_index),
                is_active = COALESCE(?, is_active),
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                {COLUMNS}
        "#
        )))
        .bind(input.title)
        .bind(input.subtitle)
        .bind(input.image_url)
        .bind(input.link_url)
        .bind(input.order_index)
        .bind(input.is_active)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(slide)
    }

    pub async fn toggle_active(&self, id: Uuid) -> Result<Option<HeroSlide>, sqlx::Error> {
        let slide = sqlx::query_as::<_, HeroSlide>(&sql(&format!(
            r#"
            UPDATE
                hero_slides
            SET
                is_active = NOT is_active,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                {COLUMNS}
        "#
        )))
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(slide)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(&sql("DELETE FROM hero_slides WHERE id = ?"))
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
