use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Active,
    Paused,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub employer_id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary_min: Option<u64>,
    #[serde(default)]
    pub salary_max: Option<u64>,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body for `POST /employer/jobs`.
#[derive(Debug, Clone, Serialize)]
pub struct JobCreate {
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<u64>,
}

/// Partial body for `PUT /employer/jobs/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Shortlisted,
    Interview,
    Rejected,
    Hired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_id: Uuid,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub resume_id: Option<Uuid>,
    #[serde(default)]
    pub voice_analysis_id: Option<Uuid>,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub match_score: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub interview_date: Option<DateTime<Utc>>,
    pub applied_at: DateTime<Utc>,
}

/// Body for `POST /employee/apply/{jobId}`. All fields optional server-side.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplicationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_analysis_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
}

/// Body for `PUT /employer/applications/{id}/status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body for `POST /employer/applications/{id}/interview`.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewRequest {
    pub interview_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One AI-matched job from `GET /employee/job-recommendations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecommendation {
    pub job: Job,
    pub match_score: f64,
    #[serde(default)]
    pub matching_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
}

/// `GET /employee/skills-analysis` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsAnalysis {
    #[serde(default)]
    pub top_skills: Vec<String>,
    #[serde(default)]
    pub skill_gaps: Vec<String>,
    #[serde(default)]
    pub market_demand: serde_json::Value,
}

/// Query parameters for `GET /employer/candidates/search`.
#[derive(Debug, Clone, Default)]
pub struct CandidateSearch {
    pub skills: Vec<String>,
    pub experience_level: Option<String>,
    pub location: Option<String>,
    pub min_experience_years: Option<u32>,
}

impl CandidateSearch {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if !self.skills.is_empty() {
            params.push(("skills".to_string(), self.skills.join(",")));
        }
        if let Some(level) = &self.experience_level {
            params.push(("experience_level".to_string(), level.clone()));
        }
        if let Some(location) = &self.location {
            params.push(("location".to_string(), location.clone()));
        }
        if let Some(years) = self.min_experience_years {
            params.push(("min_experience_years".to_string(), years.to_string()));
        }
        params
    }
}

/// `GET /employer/dashboard/stats` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_jobs: u64,
    pub active_jobs: u64,
    pub total_applications: u64,
    pub pending_applications: u64,
    #[serde(default)]
    pub interviews_scheduled: u64,
    #[serde(default)]
    pub applications_by_status: serde_json::Value,
}
