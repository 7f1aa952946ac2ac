use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Real row counts behind the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentCounts {
    pub articles: i64,
    pub media_files: i64,
    pub video_links: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_articles: i64,
    pub media_files: i64,
    pub video_links: i64,
    /// Illustrative only.
    pub visitors: u32,
    pub articles_change: u32,
    pub media_change: u32,
    pub video_change: u32,
    /// Percentage.
    pub visitors_change: u32,
    pub refresh_interval_seconds: u64,
    pub generated_at: DateTime<Utc>,
}
