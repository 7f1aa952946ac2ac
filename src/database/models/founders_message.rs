use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{optional, required};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FoundersMessage {
    pub id: Uuid,
    pub message: String,
    pub image_url: Option<String>,
    pub image_alt: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundersMessageInput {
    pub message: String,
    pub image_url: Option<String>,
    pub image_alt: Option<String>,
}

impl FoundersMessageInput {
    pub fn normalized(self) -> Result<Self, String> {
        Ok(Self {
            message: required("Message", &self.message)
                .map_err(|_| "Please enter a message".to_string())?,
            image_url: optional(self.image_url),
            image_alt: optional(self.image_alt),
        })
    }
}

/// Result of a save: the stored row and whether it was newly inserted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundersMessageSaved {
    pub founders_message: FoundersMessage,
    pub created: bool,
}
