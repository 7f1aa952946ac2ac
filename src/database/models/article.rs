use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{optional, required};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    pub author: Option<String>,
    pub file_url: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInput {
    pub title: String,
    pub summary: Option<String>,
    #[serde(default)]
    pub content: String,
    pub author: Option<String>,
    pub file_url: Option<String>,
    pub is_published: Option<bool>,
}

impl ArticleInput {
    pub fn normalized(self) -> Result<Self, String> {
        let content = self.content.trim().to_string();
        let file_url = optional(self.file_url);
        if content.is_empty() && file_url.is_none() {
            return Err("Article needs content or an uploaded document".to_string());
        }

        Ok(Self {
            title: required("Title", &self.title)?,
            summary: optional(self.summary),
            content,
            author: optional(self.author),
            file_url,
            is_published: self.is_published,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_without_content_or_document_is_rejected() {
        let input = ArticleInput {
            title: "Water Rights".to_string(),
            summary: None,
            content: "  ".to_string(),
            author: None,
            file_url: None,
            is_published: None,
        };
        assert!(input.normalized().is_err());
    }

    #[test]
    fn document_only_article_is_accepted() {
        let input = ArticleInput {
            title: " Water Rights ".to_string(),
            summary: Some("".to_string()),
            content: String::new(),
            author: Some("IPLR".to_string()),
            file_url: Some("http://localhost:8080/storage/media/article.pdf".to_string()),
            is_published: Some(false),
        };
        let normalized = input.normalized().unwrap();
        assert_eq!(normalized.title, "Water Rights");
        assert_eq!(normalized.summary, None);
    }
}
