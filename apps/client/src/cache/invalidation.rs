//! Mutation → invalidated-keys policy table.
//!
//! This table is the data-freshness contract of the whole client: after a
//! write succeeds, exactly these keys go stale so dependent views refetch.
//! Keep it in one place and exhaustive — a missed entry shows up as silently
//! stale UI, not as an error.

use uuid::Uuid;

use crate::cache::{QueryCache, QueryKey};

/// Logical resource names used as the first part of every [`QueryKey`].
pub mod keys {
    pub const PROFILE: &str = "profile";
    pub const RESUMES: &str = "resumes";
    pub const VOICE_ANALYSES: &str = "voice-analyses";
    pub const APPLICATIONS: &str = "applications";
    pub const JOB_RECOMMENDATIONS: &str = "job-recommendations";
    pub const SKILLS_ANALYSIS: &str = "skills-analysis";
    pub const EMPLOYER_JOBS: &str = "employer-jobs";
    pub const EMPLOYER_JOB: &str = "employer-job";
    pub const JOB_APPLICATIONS: &str = "job-applications";
    pub const CANDIDATE_SEARCH: &str = "candidate-search";
    pub const DASHBOARD_STATS: &str = "dashboard-stats";
    pub const ADMIN_USERS: &str = "admin-users";
    pub const ADMIN_USER: &str = "admin-user";
    pub const ADMIN_SYSTEM_STATS: &str = "admin-system-stats";
    pub const ADMIN_MODERATION: &str = "admin-moderation";
    pub const ADMIN_ANALYTICS_TRENDS: &str = "admin-analytics-trends";
}

/// Every write operation the client can perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Login,
    Register,
    Logout,
    UpdateProfile,
    UploadResume,
    DeleteResume,
    UploadVoice,
    DeleteVoiceAnalysis,
    ApplyToJob,
    CreateJob,
    UpdateJob { id: Uuid },
    DeleteJob,
    UpdateApplicationStatus,
    ScheduleInterview,
    UpdateUserStatus { id: Uuid },
    CleanupSystemData,
}

/// What a successful mutation does to the cache.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEffect {
    /// Consumers re-render from the Session Store; no cached reads change.
    None,
    /// Mark the listed key prefixes stale.
    Invalidate(Vec<QueryKey>),
    /// Drop every entry (logout only).
    ClearAll,
}

impl Mutation {
    pub fn cache_effect(&self) -> CacheEffect {
        use keys::*;
        match self {
            Mutation::Login | Mutation::Register => CacheEffect::None,
            Mutation::Logout => CacheEffect::ClearAll,
            Mutation::UpdateProfile => invalidate(&[PROFILE]),
            Mutation::UploadResume | Mutation::DeleteResume => invalidate(&[RESUMES]),
            Mutation::UploadVoice | Mutation::DeleteVoiceAnalysis => {
                invalidate(&[VOICE_ANALYSES])
            }
            Mutation::ApplyToJob => invalidate(&[APPLICATIONS, JOB_RECOMMENDATIONS]),
            Mutation::CreateJob | Mutation::DeleteJob => {
                invalidate(&[EMPLOYER_JOBS, DASHBOARD_STATS])
            }
            Mutation::UpdateJob { id } => CacheEffect::Invalidate(vec![
                QueryKey::of(EMPLOYER_JOBS),
                QueryKey::of(EMPLOYER_JOB).with(id),
                QueryKey::of(DASHBOARD_STATS),
            ]),
            Mutation::UpdateApplicationStatus | Mutation::ScheduleInterview => {
                invalidate(&[JOB_APPLICATIONS, DASHBOARD_STATS])
            }
            Mutation::UpdateUserStatus { id } => CacheEffect::Invalidate(vec![
                QueryKey::of(ADMIN_USERS),
                QueryKey::of(ADMIN_SYSTEM_STATS),
                QueryKey::of(ADMIN_USER).with(id),
            ]),
            Mutation::CleanupSystemData => {
                invalidate(&[ADMIN_SYSTEM_STATS, ADMIN_ANALYTICS_TRENDS])
            }
        }
    }
}

fn invalidate(names: &[&str]) -> CacheEffect {
    CacheEffect::Invalidate(names.iter().map(|n| QueryKey::of(n)).collect())
}

impl QueryCache {
    /// Applies a successful mutation's declared effect.
    pub fn apply(&self, effect: &CacheEffect) {
        match effect {
            CacheEffect::None => {}
            CacheEffect::Invalidate(prefixes) => self.invalidate(prefixes),
            CacheEffect::ClearAll => self.clear(),
        }
    }
}
