use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A parsed resume as returned by `GET /employee/resumes`.
/// Parsing and skill extraction happen server-side; these fields are read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resume {
    pub id: Uuid,
    pub user_id: Uuid,
    pub filename: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience_years: Option<f64>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

/// A voice analysis record from `GET /employee/voice-analyses`.
/// Scoring is an opaque server-side result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceAnalysis {
    pub id: Uuid,
    pub user_id: Uuid,
    pub filename: String,
    #[serde(default)]
    pub confidence_score: Option<f64>,
    #[serde(default)]
    pub clarity_score: Option<f64>,
    #[serde(default)]
    pub transcript: Option<String>,
    pub analyzed_at: DateTime<Utc>,
}

/// Bytes plus metadata for a multipart upload (resume PDF or voice recording).
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}
