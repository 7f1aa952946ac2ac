use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{optional, required};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HeroSlide {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub order_index: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSlideInput {
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub order_index: Option<i32>,
    pub is_active: Option<bool>,
}

impl HeroSlideInput {
    pub fn normalized(self) -> Result<Self, String> {
        Ok(Self {
            title: required("Title", &self.title)?,
            subtitle: optional(self.subtitle),
            image_url: required("Image URL", &self.image_url)?,
            link_url: optional(self.link_url),
            order_index: self.order_index,
            is_active: self.is_active,
        })
    }
}
