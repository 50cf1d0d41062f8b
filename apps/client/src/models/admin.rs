use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `GET /admin/stats/system` response. Auto-refreshed every 60s while a
/// console view is mounted (see `cache::refresh`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStats {
    pub total_users: u64,
    pub active_users: u64,
    pub total_employees: u64,
    pub total_employers: u64,
    pub total_jobs: u64,
    pub total_applications: u64,
    #[serde(default)]
    pub resumes_processed: u64,
    #[serde(default)]
    pub voice_analyses_processed: u64,
}

/// Query parameters for `GET /admin/users`.
#[derive(Debug, Clone, Default)]
pub struct UserListParams {
    pub user_type: Option<String>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl UserListParams {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(user_type) = &self.user_type {
            params.push(("user_type".to_string(), user_type.clone()));
        }
        if let Some(is_active) = self.is_active {
            params.push(("is_active".to_string(), is_active.to_string()));
        }
        if let Some(search) = &self.search {
            params.push(("search".to_string(), search.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset".to_string(), offset.to_string()));
        }
        params
    }
}

/// One flagged/moderatable item from `GET /admin/content/moderation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationItem {
    pub id: Uuid,
    pub content_type: String,
    pub flagged: bool,
    #[serde(default)]
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// `GET /admin/analytics/trends?days` response. Chart rendering is out of
/// scope; the series arrive as opaque per-day points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsTrends {
    pub days: u32,
    #[serde(default)]
    pub user_registrations: Vec<TrendPoint>,
    #[serde(default)]
    pub job_postings: Vec<TrendPoint>,
    #[serde(default)]
    pub applications: Vec<TrendPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub count: u64,
}

/// `POST /admin/system/cleanup` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupReport {
    pub cleanup_type: String,
    pub items_removed: u64,
    #[serde(default)]
    pub details: Option<String>,
}
