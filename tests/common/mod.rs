#![allow(dead_code)]

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::env;
use tempfile::TempDir;

use iplr_cms::database::{init_database, lazy_pool};
use iplr_cms::services::SessionGate;
use iplr_cms::{AppServices, Config};

/// Nothing listens here, so every query fails fast.
pub const UNREACHABLE_DATABASE_URL: &str = "postgres://postgres@127.0.0.1:1/iplr_cms_unreachable";

pub const BOUNDARY: &str = "----iplr-test-boundary";

pub fn setup_test_env() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// App wiring with a temporary storage directory.
pub struct TestContext {
    pub config: Config,
    pub services: AppServices,
    pub storage_dir: TempDir,
}

impl TestContext {
    /// A context whose database is never reachable. Suitable for anything
    /// that is rejected before a query runs.
    pub fn without_database() -> anyhow::Result<Self> {
        let pool = lazy_pool(UNREACHABLE_DATABASE_URL)?;
        Self::with_pool(pool, UNREACHABLE_DATABASE_URL)
    }

    /// A migrated, emptied database from `TEST_DATABASE_URL`, or `None` when
    /// the variable is unset.
    pub async fn with_database() -> anyhow::Result<Option<Self>> {
        let Ok(url) = env::var("TEST_DATABASE_URL") else {
            return Ok(None);
        };

        let pool = init_database(&url).await?;
        sqlx::query(
            "TRUNCATE team_members, team_member_images, founders_message, articles, \
             media_uploads, hero_slides, admin_users",
        )
        .execute(&pool)
        .await?;

        Ok(Some(Self::with_pool(pool, &url)?))
    }

    fn with_pool(pool: PgPool, database_url: &str) -> anyhow::Result<Self> {
        setup_test_env();
        let storage_dir = TempDir::new()?;

        let mut config = Config::test_config();
        config.database_url = database_url.to_string();
        config.storage_dir = storage_dir.path().display().to_string();

        Ok(Self {
            services: AppServices::new(pool, config.clone()),
            config,
            storage_dir,
        })
    }

    pub fn gate(&self) -> SessionGate {
        SessionGate::from_config(&self.config)
    }

    /// A session token for `username` that started at `login_time`.
    pub fn token_at(&self, username: &str, login_time: DateTime<Utc>) -> String {
        let (token, _) = self
            .gate()
            .issue(username, login_time)
            .expect("token should be issued");
        token
    }

    pub fn admin_token(&self) -> String {
        self.token_at("admin", Utc::now())
    }

    /// Files written under the media bucket.
    pub fn stored_objects(&self) -> Vec<String> {
        let dir = self.storage_dir.path().join("media");
        match std::fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().to_string())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// A multipart body with text fields and one file part.
pub fn multipart_body(
    fields: &[(&str, &str)],
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}
