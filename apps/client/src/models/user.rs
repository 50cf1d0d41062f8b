use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role. The backend serializes this lowercase in `user_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Employee,
    Employer,
    Admin,
}

impl UserType {
    /// Path segment used for the role's home dashboard (`/{role}/dashboard`).
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Employee => "employee",
            UserType::Employer => "employer",
            UserType::Admin => "admin",
        }
    }

    pub fn dashboard_path(&self) -> String {
        format!("/{}/dashboard", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub user_type: UserType,
    pub is_active: bool,
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_website: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial user record for `PUT /auth/me` and `SessionStore::update_user`.
/// Only present fields are merged; absent fields leave the stored value alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_website: Option<String>,
}

impl User {
    /// Shallow-merge of a partial update, recomputing `full_name`.
    pub fn merged(&self, partial: &UserUpdate) -> User {
        let mut next = self.clone();
        if let Some(first) = &partial.first_name {
            next.first_name = first.clone();
        }
        if let Some(last) = &partial.last_name {
            next.last_name = last.clone();
        }
        if let Some(name) = &partial.company_name {
            next.company_name = Some(name.clone());
        }
        if let Some(site) = &partial.company_website {
            next.company_website = Some(site.clone());
        }
        next.full_name = format!("{} {}", next.first_name, next.last_name);
        next
    }
}

/// `POST /auth/login` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

/// `POST /auth/verify-token` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenVerification {
    pub valid: bool,
    #[serde(default)]
    pub user: Option<User>,
}

#[cfg(test)]
pub(crate) fn fixture(user_type: UserType) -> User {
    User {
        id: Uuid::new_v4(),
        email: "a@b.com".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        full_name: "Ada Lovelace".to_string(),
        user_type,
        is_active: true,
        is_verified: true,
        company_name: match user_type {
            UserType::Employer => Some("Analytical Engines Ltd".to_string()),
            _ => None,
        },
        company_website: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}
