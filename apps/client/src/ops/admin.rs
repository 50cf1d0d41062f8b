//! Admin console operations: system stats, user management, moderation,
//! analytics, and cleanup.

use futures::future::try_join_all;
use uuid::Uuid;

use crate::cache::invalidation::{keys, Mutation};
use crate::cache::refresh::{self, RefreshHandle, ANALYTICS_INTERVAL, SYSTEM_STATS_INTERVAL};
use crate::cache::QueryKey;
use crate::errors::ClientError;
use crate::models::admin::{
    AnalyticsTrends, CleanupReport, ModerationItem, SystemStats, UserListParams,
};
use crate::models::user::User;
use crate::ops::{parse, Confirmed};
use crate::state::AppContext;

pub async fn system_stats(ctx: &AppContext) -> Result<SystemStats, ClientError> {
    let api = ctx.api.clone();
    let value = ctx
        .cache
        .fetch(&QueryKey::of(keys::ADMIN_SYSTEM_STATS), || async move {
            api.get("/admin/stats/system").await
        })
        .await?;
    parse(value)
}

/// 60s poll while the admin console is mounted. Drop the handle on unmount.
pub fn spawn_system_stats_refresh(ctx: &AppContext) -> RefreshHandle {
    let api = ctx.api.clone();
    refresh::spawn(
        ctx.cache.clone(),
        QueryKey::of(keys::ADMIN_SYSTEM_STATS),
        SYSTEM_STATS_INTERVAL,
        move || {
            let api = api.clone();
            async move { api.get("/admin/stats/system").await }
        },
    )
}

pub async fn list_users(
    ctx: &AppContext,
    params: &UserListParams,
) -> Result<Vec<User>, ClientError> {
    let query = params.to_query();
    let key = QueryKey::of(keys::ADMIN_USERS).with(&query);
    let api = ctx.api.clone();
    let value = ctx
        .cache
        .fetch(&key, || async move {
            api.get_query("/admin/users", query).await
        })
        .await?;
    parse(value)
}

/// `is_active` travels as a query parameter by backend contract.
pub async fn update_user_status(
    ctx: &AppContext,
    id: Uuid,
    is_active: bool,
) -> Result<User, ClientError> {
    let value = ctx
        .api
        .put_query(
            &format!("/admin/users/{id}/status"),
            vec![("is_active".to_string(), is_active.to_string())],
        )
        .await?;
    ctx.cache
        .apply(&Mutation::UpdateUserStatus { id }.cache_effect());
    parse(value)
}

/// All-or-nothing join over N single-item requests; one failure rejects the
/// aggregate and skips every invalidation.
pub async fn update_user_statuses_bulk(
    ctx: &AppContext,
    ids: &[Uuid],
    is_active: bool,
) -> Result<Vec<User>, ClientError> {
    let users = try_join_all(ids.iter().map(|id| async move {
        let value = ctx
            .api
            .put_query(
                &format!("/admin/users/{id}/status"),
                vec![("is_active".to_string(), is_active.to_string())],
            )
            .await?;
        parse::<User>(value)
    }))
    .await?;
    for id in ids {
        ctx.cache
            .apply(&Mutation::UpdateUserStatus { id: *id }.cache_effect());
    }
    Ok(users)
}

pub async fn moderation_queue(
    ctx: &AppContext,
    content_type: Option<&str>,
    flagged_only: bool,
    limit: Option<u32>,
) -> Result<Vec<ModerationItem>, ClientError> {
    let mut query = Vec::new();
    if let Some(content_type) = content_type {
        query.push(("content_type".to_string(), content_type.to_string()));
    }
    query.push(("flagged_only".to_string(), flagged_only.to_string()));
    if let Some(limit) = limit {
        query.push(("limit".to_string(), limit.to_string()));
    }
    let key = QueryKey::of(keys::ADMIN_MODERATION).with(&query);
    let api = ctx.api.clone();
    let value = ctx
        .cache
        .fetch(&key, || async move {
            api.get_query("/admin/content/moderation", query).await
        })
        .await?;
    parse(value)
}

pub async fn analytics_trends(ctx: &AppContext, days: u32) -> Result<AnalyticsTrends, ClientError> {
    let key = QueryKey::of(keys::ADMIN_ANALYTICS_TRENDS).with(&days);
    let api = ctx.api.clone();
    let value = ctx
        .cache
        .fetch(&key, || async move {
            api.get_query(
                "/admin/analytics/trends",
                vec![("days".to_string(), days.to_string())],
            )
            .await
        })
        .await?;
    parse(value)
}

/// 300s poll for the trends chart while mounted.
pub fn spawn_analytics_refresh(ctx: &AppContext, days: u32) -> RefreshHandle {
    let api = ctx.api.clone();
    refresh::spawn(
        ctx.cache.clone(),
        QueryKey::of(keys::ADMIN_ANALYTICS_TRENDS).with(&days),
        ANALYTICS_INTERVAL,
        move || {
            let api = api.clone();
            async move {
                api.get_query(
                    "/admin/analytics/trends",
                    vec![("days".to_string(), days.to_string())],
                )
                .await
            }
        },
    )
}

pub async fn cleanup_system(
    ctx: &AppContext,
    cleanup_type: &str,
    days_threshold: u32,
    _confirm: Confirmed,
) -> Result<CleanupReport, ClientError> {
    let value = ctx
        .api
        .post_query(
            "/admin/system/cleanup",
            vec![
                ("cleanup_type".to_string(), cleanup_type.to_string()),
                ("days_threshold".to_string(), days_threshold.to_string()),
            ],
        )
        .await?;
    ctx.cache.apply(&Mutation::CleanupSystemData.cache_effect());
    parse(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::Method;
    use crate::models::user::{self, UserType};
    use crate::state::test_support::authenticated_context;
    use serde_json::json;

    fn user_json(id: Uuid, is_active: bool) -> serde_json::Value {
        let mut user = user::fixture(UserType::Employee);
        user.id = id;
        user.is_active = is_active;
        serde_json::to_value(user).unwrap()
    }

    #[tokio::test]
    async fn test_bulk_user_status_update_rejects_when_one_item_fails() {
        let t = authenticated_context();
        let ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        t.transport.stub(
            Method::Put,
            &format!("/admin/users/{}/status", ids[0]),
            200,
            user_json(ids[0], false),
        );
        t.transport.stub(
            Method::Put,
            &format!("/admin/users/{}/status", ids[1]),
            500,
            json!({"detail": "storage failure"}),
        );
        t.transport.stub(
            Method::Put,
            &format!("/admin/users/{}/status", ids[2]),
            200,
            user_json(ids[2], false),
        );

        // seed a cache entry that must NOT be invalidated by the failed bulk
        t.transport.stub(Method::Get, "/admin/stats/system", 200, json!({
            "total_users": 3, "active_users": 3, "total_employees": 2,
            "total_employers": 1, "total_jobs": 0, "total_applications": 0,
        }));
        system_stats(&t.ctx).await.unwrap();

        let result = update_user_statuses_bulk(&t.ctx, &ids, false).await;
        assert!(result.is_err());
        assert!(!t.ctx.cache.is_stale(&QueryKey::of(keys::ADMIN_SYSTEM_STATS)));
    }

    #[tokio::test]
    async fn test_bulk_user_status_update_invalidates_per_item_on_success() {
        let t = authenticated_context();
        let ids = [Uuid::new_v4(), Uuid::new_v4()];
        for id in &ids {
            t.transport.stub(
                Method::Put,
                &format!("/admin/users/{id}/status"),
                200,
                user_json(*id, false),
            );
        }
        let users = update_user_statuses_bulk(&t.ctx, &ids, false).await.unwrap();
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn test_401_on_admin_read_forces_global_logout() {
        let t = authenticated_context();
        assert!(t.ctx.session.is_authenticated());
        let events = t.ctx.api.subscribe_auth_events();
        t.transport.stub(
            Method::Get,
            "/admin/stats/system",
            401,
            json!({"detail": "token expired"}),
        );
        let result = system_stats(&t.ctx).await;
        assert!(matches!(result, Err(ClientError::Unauthorized)));
        assert!(!t.ctx.session.is_authenticated());
        assert!(t.ctx.cache.is_empty());
        assert_eq!(
            *events.borrow(),
            crate::api::AuthEvent::ForcedLogout
        );
    }

    #[tokio::test]
    async fn test_cleanup_invalidates_stats_and_trends() {
        let t = authenticated_context();
        t.transport.stub(Method::Get, "/admin/stats/system", 200, json!({
            "total_users": 1, "active_users": 1, "total_employees": 1,
            "total_employers": 0, "total_jobs": 0, "total_applications": 0,
        }));
        system_stats(&t.ctx).await.unwrap();
        t.transport.stub(
            Method::Get,
            "/admin/analytics/trends",
            200,
            json!({"days": 30}),
        );
        analytics_trends(&t.ctx, 30).await.unwrap();

        t.transport.stub(
            Method::Post,
            "/admin/system/cleanup",
            200,
            json!({"cleanup_type": "stale_jobs", "items_removed": 4}),
        );
        let report = cleanup_system(&t.ctx, "stale_jobs", 90, Confirmed).await.unwrap();
        assert_eq!(report.items_removed, 4);
        assert!(t.ctx.cache.is_stale(&QueryKey::of(keys::ADMIN_SYSTEM_STATS)));
        assert!(t
            .ctx
            .cache
            .is_stale(&QueryKey::of(keys::ADMIN_ANALYTICS_TRENDS).with(&30u32)));
    }
}
