use sqlx::PgPool;

use crate::database::{
    models::{ContentCounts, MediaType},
    utils::sql,
};

#[derive(Clone)]
pub struct MetricsRepository {
    pool: PgPool,
}

impl MetricsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count_articles(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(&sql("SELECT COUNT(*) FROM articles"))
            .fetch_one(&self.pool)
            .await
    }

    /// All media rows, or only those of `file_type`.
    pub async fn count_media(&self, file_type: Option<MediaType>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(&sql(r#"
            SELECT
                COUNT(*)
            FROM
                media_uploads
            WHERE
                (?::VARCHAR IS NULL OR file_type = ?)
        "#))
        .bind(file_type)
        .bind(file_type)
        .fetch_one(&self.pool)
        .await
    }

    /// The three dashboard counts, queried concurrently.
    pub async fn content_counts(&self) -> Result<ContentCounts, sqlx::Error> {
        let (articles, media_files, video_links) = tokio::try_join!(
            self.count_articles(),
            self.count_media(None),
            self.count_media(Some(MediaType::VideoLink)),
        )?;

        Ok(ContentCounts {
            articles,
            media_files,
            video_links,
        })
    }
}
