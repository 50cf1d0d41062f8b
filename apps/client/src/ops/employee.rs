//! Employee-side operations: resumes, voice analyses, applications, and the
//! server-computed recommendation/skills reads.

use serde_json::json;
use uuid::Uuid;

use crate::cache::invalidation::{keys, Mutation};
use crate::cache::QueryKey;
use crate::errors::ClientError;
use crate::models::job::{ApplicationRequest, JobApplication, JobRecommendation, SkillsAnalysis};
use crate::models::resume::{Resume, UploadFile, VoiceAnalysis};
use crate::ops::{parse, Confirmed};
use crate::state::AppContext;

pub async fn upload_resume(ctx: &AppContext, file: UploadFile) -> Result<Resume, ClientError> {
    let value = ctx
        .api
        .post_multipart("/employee/resume/upload", "file", file)
        .await?;
    ctx.cache.apply(&Mutation::UploadResume.cache_effect());
    parse(value)
}

pub async fn list_resumes(ctx: &AppContext) -> Result<Vec<Resume>, ClientError> {
    let api = ctx.api.clone();
    let value = ctx
        .cache
        .fetch(&QueryKey::of(keys::RESUMES), || async move {
            api.get("/employee/resumes").await
        })
        .await?;
    parse(value)
}

pub async fn get_resume(ctx: &AppContext, id: Uuid) -> Result<Resume, ClientError> {
    let api = ctx.api.clone();
    let key = QueryKey::of(keys::RESUMES).with(&id);
    let value = ctx
        .cache
        .fetch(&key, || async move {
            api.get(&format!("/employee/resumes/{id}")).await
        })
        .await?;
    parse(value)
}

pub async fn delete_resume(
    ctx: &AppContext,
    id: Uuid,
    _confirm: Confirmed,
) -> Result<(), ClientError> {
    ctx.api.delete(&format!("/employee/resumes/{id}")).await?;
    ctx.cache.apply(&Mutation::DeleteResume.cache_effect());
    Ok(())
}

pub async fn upload_voice(ctx: &AppContext, file: UploadFile) -> Result<VoiceAnalysis, ClientError> {
    let value = ctx
        .api
        .post_multipart("/employee/voice/upload", "file", file)
        .await?;
    ctx.cache.apply(&Mutation::UploadVoice.cache_effect());
    parse(value)
}

pub async fn list_voice_analyses(ctx: &AppContext) -> Result<Vec<VoiceAnalysis>, ClientError> {
    let api = ctx.api.clone();
    let value = ctx
        .cache
        .fetch(&QueryKey::of(keys::VOICE_ANALYSES), || async move {
            api.get("/employee/voice-analyses").await
        })
        .await?;
    parse(value)
}

pub async fn get_voice_analysis(ctx: &AppContext, id: Uuid) -> Result<VoiceAnalysis, ClientError> {
    let api = ctx.api.clone();
    let key = QueryKey::of(keys::VOICE_ANALYSES).with(&id);
    let value = ctx
        .cache
        .fetch(&key, || async move {
            api.get(&format!("/employee/voice-analyses/{id}")).await
        })
        .await?;
    parse(value)
}

pub async fn delete_voice_analysis(
    ctx: &AppContext,
    id: Uuid,
    _confirm: Confirmed,
) -> Result<(), ClientError> {
    ctx.api
        .delete(&format!("/employee/voice-analyses/{id}"))
        .await?;
    ctx.cache
        .apply(&Mutation::DeleteVoiceAnalysis.cache_effect());
    Ok(())
}

pub async fn apply_to_job(
    ctx: &AppContext,
    job_id: Uuid,
    request: &ApplicationRequest,
) -> Result<JobApplication, ClientError> {
    let value = ctx
        .api
        .post(&format!("/employee/apply/{job_id}"), request)
        .await?;
    ctx.cache.apply(&Mutation::ApplyToJob.cache_effect());
    parse(value)
}

pub async fn list_applications(ctx: &AppContext) -> Result<Vec<JobApplication>, ClientError> {
    let api = ctx.api.clone();
    let value = ctx
        .cache
        .fetch(&QueryKey::of(keys::APPLICATIONS), || async move {
            api.get("/employee/applications").await
        })
        .await?;
    parse(value)
}

pub async fn get_application(ctx: &AppContext, id: Uuid) -> Result<JobApplication, ClientError> {
    let api = ctx.api.clone();
    let key = QueryKey::of(keys::APPLICATIONS).with(&id);
    let value = ctx
        .cache
        .fetch(&key, || async move {
            api.get(&format!("/employee/applications/{id}")).await
        })
        .await?;
    parse(value)
}

pub async fn job_recommendations(
    ctx: &AppContext,
    limit: Option<u32>,
    min_score: Option<f64>,
) -> Result<Vec<JobRecommendation>, ClientError> {
    let mut query = Vec::new();
    if let Some(limit) = limit {
        query.push(("limit".to_string(), limit.to_string()));
    }
    if let Some(min_score) = min_score {
        query.push(("min_score".to_string(), min_score.to_string()));
    }
    let key = QueryKey::of(keys::JOB_RECOMMENDATIONS)
        .with(&json!({"limit": limit, "min_score": min_score}));
    let api = ctx.api.clone();
    let value = ctx
        .cache
        .fetch(&key, || async move {
            api.get_query("/employee/job-recommendations", query).await
        })
        .await?;
    parse(value)
}

pub async fn skills_analysis(ctx: &AppContext) -> Result<SkillsAnalysis, ClientError> {
    let api = ctx.api.clone();
    let value = ctx
        .cache
        .fetch(&QueryKey::of(keys::SKILLS_ANALYSIS), || async move {
            api.get("/employee/skills-analysis").await
        })
        .await?;
    parse(value)
}
