use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{macros::string_enum, optional, required};

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MediaType {
        Image => "image",
        Video => "video",
        VideoLink => "video_link",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MediaUpload {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub file_type: MediaType,
    pub file_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct MediaUploadInput {
    pub title: String,
    pub description: Option<String>,
    pub file_type: MediaType,
    pub file_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoLinkInput {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
}

impl VideoLinkInput {
    pub fn into_media(self) -> Result<MediaUploadInput, String> {
        let url = self.url.trim().to_string();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err("Video link must be an http(s) URL".to_string());
        }

        Ok(MediaUploadInput {
            title: required("Title", &self.title)?,
            description: optional(self.description),
            file_type: MediaType::VideoLink,
            file_url: url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_round_trips_through_its_column_value() {
        assert_eq!(MediaType::VideoLink.to_string(), "video_link");
        assert_eq!("VIDEO_LINK".parse::<MediaType>().unwrap(), MediaType::VideoLink);
        assert!("audio".parse::<MediaType>().is_err());
        assert_eq!(
            serde_json::to_value(MediaType::Image).unwrap(),
            serde_json::json!("image")
        );
    }

    #[test]
    fn video_links_must_be_web_urls() {
        let bad = VideoLinkInput {
            title: "Workshop".to_string(),
            description: None,
            url: "javascript:alert(1)".to_string(),
        };
        assert!(bad.into_media().is_err());

        let good = VideoLinkInput {
            title: "Workshop".to_string(),
            description: Some("Day one".to_string()),
            url: " https://youtu.be/abc ".to_string(),
        };
        let media = good.into_media().unwrap();
        assert_eq!(media.file_type, MediaType::VideoLink);
        assert_eq!(media.file_url, "https://youtu.be/abc");
    }
}
