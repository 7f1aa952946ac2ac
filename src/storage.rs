//! Object storage for uploaded files.
//!
//! Buckets are directories under the storage root; every object is served back
//! at `{public_base_url}/storage/{bucket}/{object_name}`.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::LazyLock,
};
use tokio::{
    fs,
    io::{AsyncWrite, AsyncWriteExt},
};

use crate::config::Config;
use crate::error::AppError;

pub const MEDIA_BUCKET: &str = "media";
pub const PUBLIC_PREFIX: &str = "/storage";

/// 10 MB for article documents.
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

static UNSAFE_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").unwrap());

const DOCUMENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Image,
    Document,
}

impl UploadKind {
    pub fn accepts(&self, content_type: &str) -> bool {
        let content_type = content_type.trim().to_ascii_lowercase();
        match self {
            UploadKind::Image => content_type.starts_with("image/"),
            UploadKind::Document => DOCUMENT_TYPES.contains(&content_type.as_str()),
        }
    }

    fn rejection(&self) -> &'static str {
        match self {
            UploadKind::Image => "Please select an image file",
            UploadKind::Document => "Please select a PDF or Word document",
        }
    }
}

/// What an upload must satisfy before anything is stored.
#[derive(Debug, Clone, Copy)]
pub struct UploadRules {
    pub kind: UploadKind,
    pub max_bytes: usize,
}

impl UploadRules {
    pub fn image(config: &Config) -> Self {
        Self {
            kind: UploadKind::Image,
            max_bytes: config.max_image_bytes,
        }
    }

    pub fn document() -> Self {
        Self {
            kind: UploadKind::Document,
            max_bytes: MAX_DOCUMENT_BYTES,
        }
    }

    pub fn check_content_type(&self, content_type: &str) -> Result<(), AppError> {
        if self.kind.accepts(content_type) {
            Ok(())
        } else {
            Err(AppError::BadRequest(format!(
                "{} (got `{}`)",
                self.kind.rejection(),
                if content_type.is_empty() { "<empty>" } else { content_type }
            )))
        }
    }

    pub fn check_size(&self, size: usize) -> Result<(), AppError> {
        if size > self.max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "File exceeds the {} MB limit",
                self.max_bytes / (1024 * 1024)
            )));
        }
        if size == 0 {
            return Err(AppError::BadRequest("Empty file uploaded".to_string()));
        }
        Ok(())
    }
}

/// `{prefix}-{unix_millis}-{sanitized original name}`
pub fn object_name(prefix: &str, original_name: &str, now: DateTime<Utc>) -> String {
    let base = Path::new(original_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let sanitized = UNSAFE_CHARS.replace_all(base, "-");
    let sanitized = sanitized.trim_matches(|c| c == '-' || c == '.');
    let sanitized = if sanitized.is_empty() { "file" } else { sanitized };

    format!("{}-{}-{}", prefix, now.timestamp_millis(), sanitized)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredObject {
    pub bucket: String,
    pub object_name: String,
    pub public_url: String,
}

/// Writes `bytes` to a freshly created object, deleting it again if the write
/// fails so no partial object is left behind.
async fn write_or_discard<W: AsyncWrite + Unpin>(
    writer: &mut W,
    path: &Path,
    bytes: &[u8],
) -> std::io::Result<()> {
    let written = async {
        writer.write_all(bytes).await?;
        writer.flush().await
    }
    .await;

    if let Err(e) = written {
        if let Err(remove_err) = fs::remove_file(path).await {
            log::warn!(
                "Failed to remove partial object {}: {}",
                path.display(),
                remove_err
            );
        }
        return Err(e);
    }

    Ok(())
}

#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
    public_base_url: String,
}

impl MediaStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.storage_dir, &config.public_base_url)
    }

    pub fn public_url(&self, bucket: &str, object_name: &str) -> String {
        format!(
            "{}{}/{}/{}",
            self.public_base_url, PUBLIC_PREFIX, bucket, object_name
        )
    }

    /// The object name behind a URL this storage produced, if it did.
    pub fn object_name_from_url(&self, bucket: &str, url: &str) -> Option<String> {
        let prefix = format!("{}{}/{}/", self.public_base_url, PUBLIC_PREFIX, bucket);
        url.strip_prefix(&prefix)
            .filter(|name| !name.is_empty() && !name.contains('/') && !name.contains(".."))
            .map(str::to_string)
    }

    /// Writes a new object; existing objects are never overwritten.
    pub async fn upload(
        &self,
        bucket: &str,
        object_name: &str,
        bytes: &[u8],
    ) -> Result<StoredObject, AppError> {
        let dir = self.root.join(bucket);
        fs::create_dir_all(&dir).await?;

        let path = dir.join(object_name);
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(AppError::Conflict(format!(
                    "Object {}/{} already exists",
                    bucket, object_name
                )));
            }
            Err(e) => return Err(e.into()),
        };
        write_or_discard(&mut file, &path, bytes).await?;

        log::info!(
            "Stored {} bytes as {}/{}",
            bytes.len(),
            bucket,
            object_name
        );

        Ok(StoredObject {
            bucket: bucket.to_string(),
            object_name: object_name.to_string(),
            public_url: self.public_url(bucket, object_name),
        })
    }

    /// Returns whether an object was removed.
    pub async fn remove(&self, bucket: &str, object_name: &str) -> Result<bool, AppError> {
        match fs::remove_file(self.root.join(bucket).join(object_name)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
