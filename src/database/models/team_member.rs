use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{optional, required};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub order_index: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberInput {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image_url: Option<String>,
    /// Appended after the last member when absent.
    pub order_index: Option<i32>,
    pub is_active: Option<bool>,
}

impl TeamMemberInput {
    pub fn normalized(self) -> Result<Self, String> {
        Ok(Self {
            name: required("Name", &self.name)?,
            title: required("Title", &self.title)?,
            description: self.description.trim().to_string(),
            image_url: optional(self.image_url),
            order_index: self.order_index,
            is_active: self.is_active,
        })
    }
}

/// What the public About page shows for one member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicTeamMember {
    pub name: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

impl From<TeamMember> for PublicTeamMember {
    fn from(member: TeamMember) -> Self {
        Self {
            name: member.name,
            title: member.title,
            description: member.description,
            image_url: member.image_url,
        }
    }
}
