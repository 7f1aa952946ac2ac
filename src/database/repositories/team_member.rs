use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{TeamMember, TeamMemberInput},
    utils::sql,
};

const COLUMNS: &str = r#"
    id,
    name,
    title,
    description,
    image_url,
    order_index,
    is_active,
    created_at,
    updated_at
"#;

#[derive(Clone)]
pub struct TeamMemberRepository {
    pool: PgPool,
}

impl TeamMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Members in display order; `active_only` hides deactivated members.
    pub async fn list(&self, active_only: bool) -> Result<Vec<TeamMember>, sqlx::Error> {
        let members = sqlx::query_as::<_, TeamMember>(&sql(&format!(
            r#"
            SELECT
                {COLUMNS}
            FROM
                team_members
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

        Ok(members)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TeamMember>, sqlx::Error> {
        let member = sqlx::query_as::<_, TeamMember>(&sql(&format!(
            r#"
            SELECT
                {COLUMNS}
            FROM
                team_members
            WHERE
                id = ?
        "#
        )))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    pub async fn create(&self, input: TeamMemberInput) -> Result<TeamMember, sqlx::Error> {
        let now = Utc::now();
        let member = sqlx::query_as::<_, TeamMember>(&sql(&format!(
            r#"
            INSERT INTO
                team_members (
                    name,
                    title,
                    description,
                    image_url,
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
                    COALESCE(?, (SELECT COALESCE(MAX(order_index) + 1, 0) FROM team_members)),
                    ?,
                    ?,
                    ?
                )
            RETURNING
                {COLUMNS}
        "#
        )))
        .bind(input.name)
        .bind(input.title)
        .bind(input.description)
        .bind(input.image_url)
        .bind(input.order_index)
        .bind(input.is_active.unwrap_or(true))
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(member)
    }

    /// Absent `image_url`, `order_index` and `is_active` keep their stored
    /// values; images are cleared through `set_image`.
    pub async fn update(
        &self,
        id: Uuid,
        input: TeamMemberInput,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        let member = sqlx::query_as::<_, TeamMember>(&sql(&format!(
            r#"
            UPDATE
                team_members
            SET
                name = ?,
                title = ?,
                description = ?,
                image_url = COALESCE(?, image_url),
                order_index = COALESCE(?, order_index),
                is_active = COALESCE(?, is_active),
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                {COLUMNS}
        "#
        )))
        .bind(input.name)
        .bind(input.title)
        .bind(input.description)
        .bind(input.image_url)
        .bind(input.order_index)
        .bind(input.is_active)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    pub async fn toggle_active(&self, id: Uuid) -> Result<Option<TeamMember>, sqlx::Error> {
        let member = sqlx::query_as::<_, TeamMember>(&sql(&format!(
            r#"
            UPDATE
                team_members
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

        Ok(member)
    }

    /// Replaces (or clears, with `None`) the member's inline image.
    pub async fn set_image(
        &self,
        id: Uuid,
        image_url: Option<String>,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        let member = sqlx::query_as::<_, TeamMember>(&sql(&format!(
            r#"
            UPDATE
                team_members
            SET
                image_url = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                {COLUMNS}
        "#
        )))
        .bind(image_url)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(&sql("DELETE FROM team_members WHERE id = ?"))
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
