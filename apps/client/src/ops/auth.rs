//! Authentication operations.

use serde_json::json;
use tracing::info;

use crate::cache::invalidation::{keys, Mutation};
use crate::cache::QueryKey;
use crate::errors::ClientError;
use crate::models::user::{TokenVerification, User, UserUpdate};
use crate::ops::{parse, Confirmed};
use crate::state::AppContext;
use crate::validation::{ChangePasswordForm, LoginForm, RegisterForm};

/// Validates, exchanges credentials for a bearer token, and installs the
/// authenticated session. Navigation to the user's dashboard is the caller's
/// responsibility.
pub async fn login(ctx: &AppContext, form: &LoginForm) -> Result<User, ClientError> {
    form.validate().map_err(ClientError::Validation)?;
    let body = json!({"email": form.email, "password": form.password});
    let value = ctx.api.post("/auth/login", &body).await?;
    let response: crate::models::user::LoginResponse = parse(value)?;
    ctx.session
        .login(response.user.clone(), response.access_token);
    ctx.cache.apply(&Mutation::Login.cache_effect());
    info!("Logged in as {}", response.user.email);
    Ok(response.user)
}

/// Creates the account; does not log in. The caller sends the user to the
/// login screen afterwards.
pub async fn register(ctx: &AppContext, form: &RegisterForm) -> Result<User, ClientError> {
    form.validate().map_err(ClientError::Validation)?;
    let value = ctx.api.post("/auth/register", &form.to_payload()).await?;
    ctx.cache.apply(&Mutation::Register.cache_effect());
    parse(value)
}

/// Purely local: clears the session and drops the whole query cache so no
/// per-user data survives into the next session. The backend holds no
/// revocable session state.
pub fn logout(ctx: &AppContext) {
    ctx.session.logout();
    ctx.cache.apply(&Mutation::Logout.cache_effect());
    info!("Logged out");
}

/// `GET /auth/me`, cached under `profile`. A fresh fetch also replaces the
/// session's user so header views stay consistent.
pub async fn fetch_profile(ctx: &AppContext) -> Result<User, ClientError> {
    let api = ctx.api.clone();
    let value = ctx
        .cache
        .fetch(&QueryKey::of(keys::PROFILE), || async move {
            api.get("/auth/me").await
        })
        .await?;
    let user: User = parse(value)?;
    ctx.session.replace_user(user.clone());
    Ok(user)
}

pub async fn update_profile(ctx: &AppContext, partial: &UserUpdate) -> Result<User, ClientError> {
    let value = ctx.api.put("/auth/me", partial).await?;
    let user: User = parse(value)?;
    ctx.session.replace_user(user.clone());
    ctx.cache.apply(&Mutation::UpdateProfile.cache_effect());
    Ok(user)
}

/// Form-encoded by backend contract, unlike every other write.
pub async fn change_password(
    ctx: &AppContext,
    form: &ChangePasswordForm,
) -> Result<(), ClientError> {
    form.validate().map_err(ClientError::Validation)?;
    ctx.api
        .post_form(
            "/auth/change-password",
            vec![
                ("current_password".to_string(), form.current_password.clone()),
                ("new_password".to_string(), form.new_password.clone()),
            ],
        )
        .await?;
    Ok(())
}

/// Deactivates the account server-side, then clears all local state.
pub async fn deactivate_account(ctx: &AppContext, _confirm: Confirmed) -> Result<(), ClientError> {
    ctx.api.delete("/auth/deactivate").await?;
    ctx.session.logout();
    ctx.cache.apply(&Mutation::Logout.cache_effect());
    Ok(())
}

pub async fn verify_token(ctx: &AppContext) -> Result<TokenVerification, ClientError> {
    let value = ctx.api.post_empty("/auth/verify-token").await?;
    parse(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::Method;
    use crate::models::user::{self, UserType};
    use crate::state::test_support::context;
    use serde_json::json;

    fn login_body(user_type: UserType) -> serde_json::Value {
        json!({
            "access_token": "tok-login",
            "token_type": "bearer",
            "user": serde_json::to_value(user::fixture(user_type)).unwrap(),
        })
    }

    #[tokio::test]
    async fn test_login_installs_session() {
        let t = context();
        t.transport
            .stub(Method::Post, "/auth/login", 200, login_body(UserType::Employee));
        let form = LoginForm {
            email: "a@b.com".to_string(),
            password: "hunter22".to_string(),
        };
        let user = login(&t.ctx, &form).await.unwrap();
        assert_eq!(user.email, "a@b.com");
        assert!(t.ctx.session.is_authenticated());
        assert_eq!(t.ctx.session.token().as_deref(), Some("tok-login"));
    }

    #[tokio::test]
    async fn test_short_password_makes_zero_network_calls() {
        let t = context();
        let form = LoginForm {
            email: "a@b.com".to_string(),
            password: "short".to_string(),
        };
        let err = login(&t.ctx, &form).await.unwrap_err();
        assert_eq!(err.user_message(), "Password must be at least 6 characters");
        assert_eq!(t.transport.call_count(), 0);
        assert!(!t.ctx.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_invalid_employer_registration_makes_zero_network_calls() {
        let t = context();
        let form = RegisterForm::Employer {
            common: crate::validation::RegistrationCommon {
                email: "a@b.com".to_string(),
                password: "hunter22".to_string(),
                confirm_password: "hunter22".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
            },
            company_name: String::new(),
            company_website: None,
        };
        let err = register(&t.ctx, &form).await.unwrap_err();
        assert_eq!(err.user_message(), "Company name is required");
        assert_eq!(t.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_logout_clears_session_and_cache() {
        let t = context();
        t.transport
            .stub(Method::Post, "/auth/login", 200, login_body(UserType::Employee));
        t.transport
            .stub(Method::Get, "/employee/resumes", 200, json!([]));
        let form = LoginForm {
            email: "a@b.com".to_string(),
            password: "hunter22".to_string(),
        };
        login(&t.ctx, &form).await.unwrap();
        crate::ops::employee::list_resumes(&t.ctx).await.unwrap();
        assert!(!t.ctx.cache.is_empty());

        logout(&t.ctx);
        assert!(!t.ctx.session.is_authenticated());
        assert!(t.ctx.session.token().is_none());
        assert!(t.ctx.cache.is_empty());
    }

    #[tokio::test]
    async fn test_update_profile_merges_into_session_and_invalidates() {
        let t = context();
        t.transport
            .stub(Method::Post, "/auth/login", 200, login_body(UserType::Employee));
        login(
            &t.ctx,
            &LoginForm {
                email: "a@b.com".to_string(),
                password: "hunter22".to_string(),
            },
        )
        .await
        .unwrap();

        // seed the profile cache so the invalidation is observable
        t.transport.stub(
            Method::Get,
            "/auth/me",
            200,
            serde_json::to_value(user::fixture(UserType::Employee)).unwrap(),
        );
        fetch_profile(&t.ctx).await.unwrap();

        let mut updated = user::fixture(UserType::Employee);
        updated.first_name = "Grace".to_string();
        updated.full_name = "Grace Lovelace".to_string();
        t.transport.stub(
            Method::Put,
            "/auth/me",
            200,
            serde_json::to_value(&updated).unwrap(),
        );
        let user = update_profile(
            &t.ctx,
            &UserUpdate {
                first_name: Some("Grace".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(user.first_name, "Grace");
        assert!(t.ctx.cache.is_stale(&QueryKey::of(keys::PROFILE)));
        let session_user = t.ctx.session.snapshot().user.unwrap();
        assert_eq!(session_user.first_name, "Grace");
        // token untouched by a profile update
        assert!(t.ctx.session.is_authenticated());
    }
}
