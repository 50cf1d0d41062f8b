//! Employer-side operations: job postings, applicant pipeline, candidate
//! search, and the dashboard read.

use futures::future::try_join_all;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::cache::invalidation::{keys, Mutation};
use crate::cache::refresh::{self, RefreshHandle, DASHBOARD_STATS_INTERVAL};
use crate::cache::QueryKey;
use crate::errors::ClientError;
use crate::models::job::{
    CandidateSearch, DashboardStats, InterviewRequest, Job, JobApplication, JobCreate, JobUpdate,
    StatusUpdate,
};
use crate::ops::{parse, Confirmed};
use crate::state::AppContext;
use crate::validation::validate_job;

#[derive(Debug, Clone, Default, Serialize)]
pub struct JobListFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl JobListFilter {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(status) = &self.status_filter {
            query.push(("status_filter".to_string(), status.clone()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset".to_string(), offset.to_string()));
        }
        query
    }
}

pub async fn create_job(ctx: &AppContext, job: &JobCreate) -> Result<Job, ClientError> {
    validate_job(&job.title, &job.description, job.salary_min, job.salary_max)
        .map_err(ClientError::Validation)?;
    let value = ctx.api.post("/employer/jobs", job).await?;
    ctx.cache.apply(&Mutation::CreateJob.cache_effect());
    parse(value)
}

pub async fn list_jobs(ctx: &AppContext, filter: &JobListFilter) -> Result<Vec<Job>, ClientError> {
    let key = QueryKey::of(keys::EMPLOYER_JOBS).with(filter);
    let query = filter.to_query();
    let api = ctx.api.clone();
    let value = ctx
        .cache
        .fetch(&key, || async move {
            api.get_query("/employer/jobs", query).await
        })
        .await?;
    parse(value)
}

pub async fn get_job(ctx: &AppContext, id: Uuid) -> Result<Job, ClientError> {
    let key = QueryKey::of(keys::EMPLOYER_JOB).with(&id);
    let api = ctx.api.clone();
    let value = ctx
        .cache
        .fetch(&key, || async move {
            api.get(&format!("/employer/jobs/{id}")).await
        })
        .await?;
    parse(value)
}

pub async fn update_job(
    ctx: &AppContext,
    id: Uuid,
    update: &JobUpdate,
) -> Result<Job, ClientError> {
    let value = ctx
        .api
        .put(&format!("/employer/jobs/{id}"), update)
        .await?;
    ctx.cache.apply(&Mutation::UpdateJob { id }.cache_effect());
    parse(value)
}

/// N independent concurrent updates joined all-or-nothing: one failed item
/// rejects the whole call even though other items may already have landed
/// server-side. Nothing is invalidated on failure, matching single-item
/// semantics where invalidation only follows success.
pub async fn update_jobs_bulk(
    ctx: &AppContext,
    ids: &[Uuid],
    update: &JobUpdate,
) -> Result<Vec<Job>, ClientError> {
    let jobs = try_join_all(ids.iter().map(|id| async move {
        let value = ctx.api.put(&format!("/employer/jobs/{id}"), update).await?;
        parse::<Job>(value)
    }))
    .await?;
    for id in ids {
        ctx.cache
            .apply(&Mutation::UpdateJob { id: *id }.cache_effect());
    }
    Ok(jobs)
}

pub async fn delete_job(ctx: &AppContext, id: Uuid, _confirm: Confirmed) -> Result<(), ClientError> {
    ctx.api.delete(&format!("/employer/jobs/{id}")).await?;
    ctx.cache.apply(&Mutation::DeleteJob.cache_effect());
    Ok(())
}

pub async fn job_applications(
    ctx: &AppContext,
    job_id: Uuid,
) -> Result<Vec<JobApplication>, ClientError> {
    let key = QueryKey::of(keys::JOB_APPLICATIONS).with(&job_id);
    let api = ctx.api.clone();
    let value = ctx
        .cache
        .fetch(&key, || async move {
            api.get(&format!("/employer/jobs/{job_id}/applications")).await
        })
        .await?;
    parse(value)
}

pub async fn update_application_status(
    ctx: &AppContext,
    application_id: Uuid,
    update: &StatusUpdate,
) -> Result<JobApplication, ClientError> {
    let value = ctx
        .api
        .put(&format!("/employer/applications/{application_id}/status"), update)
        .await?;
    ctx.cache
        .apply(&Mutation::UpdateApplicationStatus.cache_effect());
    parse(value)
}

/// Bulk variant with the same all-or-nothing join as [`update_jobs_bulk`].
pub async fn update_application_statuses_bulk(
    ctx: &AppContext,
    application_ids: &[Uuid],
    update: &StatusUpdate,
) -> Result<Vec<JobApplication>, ClientError> {
    let applications = try_join_all(application_ids.iter().map(|id| async move {
        let value = ctx
            .api
            .put(&format!("/employer/applications/{id}/status"), update)
            .await?;
        parse::<JobApplication>(value)
    }))
    .await?;
    ctx.cache
        .apply(&Mutation::UpdateApplicationStatus.cache_effect());
    Ok(applications)
}

pub async fn schedule_interview(
    ctx: &AppContext,
    application_id: Uuid,
    request: &InterviewRequest,
) -> Result<JobApplication, ClientError> {
    let value = ctx
        .api
        .post(
            &format!("/employer/applications/{application_id}/interview"),
            request,
        )
        .await?;
    ctx.cache.apply(&Mutation::ScheduleInterview.cache_effect());
    parse(value)
}

/// Results are rendered as-is; the match payload shape is owned server-side.
pub async fn search_candidates(
    ctx: &AppContext,
    search: &CandidateSearch,
) -> Result<Value, ClientError> {
    let query = search.to_query();
    let key = QueryKey::of(keys::CANDIDATE_SEARCH).with(&query);
    let api = ctx.api.clone();
    ctx.cache
        .fetch(&key, || async move {
            api.get_query("/employer/candidates/search", query).await
        })
        .await
}

pub async fn dashboard_stats(ctx: &AppContext) -> Result<DashboardStats, ClientError> {
    let api = ctx.api.clone();
    let value = ctx
        .cache
        .fetch(&QueryKey::of(keys::DASHBOARD_STATS), || async move {
            api.get("/employer/dashboard/stats").await
        })
        .await?;
    parse(value)
}

/// 300s poll while the employer dashboard is mounted. Drop the handle on
/// unmount.
pub fn spawn_dashboard_refresh(ctx: &AppContext) -> RefreshHandle {
    let api = ctx.api.clone();
    refresh::spawn(
        ctx.cache.clone(),
        QueryKey::of(keys::DASHBOARD_STATS),
        DASHBOARD_STATS_INTERVAL,
        move || {
            let api = api.clone();
            async move { api.get("/employer/dashboard/stats").await }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::Method;
    use crate::state::test_support::{authenticated_context, job_json};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_job_invalidates_jobs_and_dashboard_stats() {
        let t = authenticated_context();
        let filter = JobListFilter::default();
        let jobs_key = QueryKey::of(keys::EMPLOYER_JOBS).with(&filter);

        // seed both dependent caches
        t.transport.stub(
            Method::Get,
            "/employer/jobs",
            200,
            json!([job_json(Uuid::new_v4(), "Old Role")]),
        );
        let before = list_jobs(&t.ctx, &filter).await.unwrap();
        assert_eq!(before[0].title, "Old Role");
        t.transport.stub(
            Method::Get,
            "/employer/dashboard/stats",
            200,
            json!({
                "total_jobs": 1, "active_jobs": 1,
                "total_applications": 0, "pending_applications": 0,
            }),
        );
        dashboard_stats(&t.ctx).await.unwrap();

        let new_id = Uuid::new_v4();
        t.transport
            .stub(Method::Post, "/employer/jobs", 201, job_json(new_id, "New Role"));
        create_job(
            &t.ctx,
            &JobCreate {
                title: "New Role".to_string(),
                description: "Ships software".to_string(),
                required_skills: vec!["rust".to_string()],
                experience_level: None,
                location: None,
                salary_min: None,
                salary_max: None,
            },
        )
        .await
        .unwrap();

        assert!(t.ctx.cache.is_stale(&jobs_key));
        assert!(t.ctx.cache.is_stale(&QueryKey::of(keys::DASHBOARD_STATS)));

        // next observation refetches instead of serving the pre-mutation array
        t.transport.stub(
            Method::Get,
            "/employer/jobs",
            200,
            json!([
                job_json(Uuid::new_v4(), "Old Role"),
                job_json(new_id, "New Role")
            ]),
        );
        let after = list_jobs(&t.ctx, &filter).await.unwrap();
        assert_eq!(after.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_job_form_makes_zero_network_calls() {
        let t = authenticated_context();
        let calls_before = t.transport.call_count();
        let err = create_job(
            &t.ctx,
            &JobCreate {
                title: String::new(),
                description: "desc".to_string(),
                required_skills: vec![],
                experience_level: None,
                location: None,
                salary_min: None,
                salary_max: None,
            },
        )
        .await
        .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(t.transport.call_count(), calls_before);
    }

    #[tokio::test]
    async fn test_bulk_status_update_rejects_on_single_failure() {
        let t = authenticated_context();
        let ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let application = |id: Uuid| {
            json!({
                "id": id,
                "job_id": Uuid::new_v4(),
                "applicant_id": Uuid::new_v4(),
                "status": "shortlisted",
                "applied_at": "2026-01-10T12:00:00Z",
            })
        };
        t.transport.stub(
            Method::Put,
            &format!("/employer/applications/{}/status", ids[0]),
            200,
            application(ids[0]),
        );
        // item #2 fails server-side
        t.transport.stub(
            Method::Put,
            &format!("/employer/applications/{}/status", ids[1]),
            422,
            json!({"detail": "already hired"}),
        );
        t.transport.stub(
            Method::Put,
            &format!("/employer/applications/{}/status", ids[2]),
            200,
            application(ids[2]),
        );

        let result = update_application_statuses_bulk(
            &t.ctx,
            &ids,
            &StatusUpdate {
                status: crate::models::job::ApplicationStatus::Shortlisted,
                notes: None,
            },
        )
        .await;
        // items #1 and #3 may have landed server-side; the aggregate still rejects
        assert!(matches!(
            result,
            Err(ClientError::Api { status: 422, .. })
        ));
    }

    #[tokio::test]
    async fn test_update_job_invalidates_its_detail_key() {
        let t = authenticated_context();
        let id = Uuid::new_v4();
        t.transport.stub(
            Method::Get,
            &format!("/employer/jobs/{id}"),
            200,
            job_json(id, "Role"),
        );
        get_job(&t.ctx, id).await.unwrap();

        t.transport.stub(
            Method::Put,
            &format!("/employer/jobs/{id}"),
            200,
            job_json(id, "Renamed Role"),
        );
        update_job(
            &t.ctx,
            id,
            &JobUpdate {
                title: Some("Renamed Role".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(t
            .ctx
            .cache
            .is_stale(&QueryKey::of(keys::EMPLOYER_JOB).with(&id)));
    }
}
