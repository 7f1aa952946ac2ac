use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{Article, ArticleInput},
    utils::sql,
};

const COLUMNS: &str = r#"
    id,
    title,
    summary,
    content,
    author,
    file_url,
    is_published,
    created_at,
    updated_at
"#;

#[derive(Clone)]
pub struct ArticleRepository {
    pool: PgPool,
}

impl ArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Newest first; `published_only` is what the public site reads.
    pub async fn list(&self, published_only: bool) -> Result<Vec<Article>, sqlx::Error> {
        let articles = sqlx::query_as::<_, Article>(&sql(&format!(
            r#"
            SELECT
                {COLUMNS}
            FROM
                articles
            WHERE
                (? = FALSE OR is_published = TRUE)
            ORDER BY
                created_at DESC
        "#
        )))
        .bind(published_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(articles)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, sqlx::Error> {
        let article = sqlx::query_as::<_, Article>(&sql(&format!(
            r#"
            SELECT
                {COLUMNS}
            FROM
                articles
            WHERE
                id = ?
        "#
        )))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(article)
    }

    pub async fn create(&self, input: ArticleInput) -> Result<Article, sqlx::Error> {
        let now = Utc::now();
        let article = sqlx::query_as::<_, Article>(&sql(&format!(
            r#"
            INSERT INTO
                articles (
                    title,
                    summary,
                    content,
                    author,
                    file_url,
                    is_published,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                {COLUMNS}
        "#
        )))
        .bind(input.title)
        .bind(input.summary)
        .bind(input.content)
        .bind(input.author)
        .bind(input.file_url)
        .bind(input.is_published.unwrap_or(true))
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(article)
    }

    pub async fn update(&self, id: Uuid, input: ArticleInput) -> Result<Option<Article>, sqlx::Error> {
        let article = sqlx::query_as::<_, Article>(&sql(&format!(
            r#"
            UPDATE
                articles
            SET
                title = ?,
                summary = ?,
                content = ?,
                author = ?,
                file_url = ?,
                is_published = COALESCE(?, is_published),
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                {COLUMNS}
        "#
        )))
        .bind(input.title)
        .bind(input.summary)
        .bind(input.content)
        .bind(input.author)
        .bind(input.file_url)
        .bind(input.is_published)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(article)
    }

    pub async fn toggle_published(&self, id: Uuid) -> Result<Option<Article>, sqlx::Error> {
        let article = sqlx::query_as::<_, Article>(&sql(&format!(
            r#"
            UPDATE
                articles
            SET
                is_published = NOT is_published,
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

        Ok(article)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(&sql("DELETE FROM articles WHERE id = ?"))
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
