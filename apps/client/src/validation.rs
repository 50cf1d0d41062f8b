//! Client-side form validation.
//!
//! Runs before any transport call; a form that fails here produces zero
//! network traffic. Registration is a tagged union over the account role so
//! the employer-only rules live on the employer variant instead of inside
//! conditional branches of one schema.

use serde::Serialize;
use serde_json::{json, Value};

use crate::models::user::UserType;

pub const MIN_PASSWORD_LEN: usize = 6;

pub const MSG_PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
pub const MSG_COMPANY_NAME_REQUIRED: &str = "Company name is required";
pub const MSG_INVALID_EMAIL: &str = "Invalid email address";
pub const MSG_PASSWORDS_MISMATCH: &str = "Passwords do not match";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

fn check_email(errors: &mut Vec<FieldError>, email: &str) {
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };
    if !well_formed || email.contains(char::is_whitespace) {
        errors.push(FieldError::new("email", MSG_INVALID_EMAIL));
    }
}

fn check_password(errors: &mut Vec<FieldError>, field: &str, password: &str) {
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(field, MSG_PASSWORD_TOO_SHORT));
    }
}

fn check_required(errors: &mut Vec<FieldError>, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, message));
    }
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        check_email(&mut errors, &self.email);
        check_password(&mut errors, "password", &self.password);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Fields shared by both registration variants.
#[derive(Debug, Clone)]
pub struct RegistrationCommon {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Registration form keyed by the chosen role. The employer variant alone
/// carries (and requires) the company fields.
#[derive(Debug, Clone)]
pub enum RegisterForm {
    Employee {
        common: RegistrationCommon,
    },
    Employer {
        common: RegistrationCommon,
        company_name: String,
        company_website: Option<String>,
    },
}

impl RegisterForm {
    pub fn user_type(&self) -> UserType {
        match self {
            RegisterForm::Employee { .. } => UserType::Employee,
            RegisterForm::Employer { .. } => UserType::Employer,
        }
    }

    fn common(&self) -> &RegistrationCommon {
        match self {
            RegisterForm::Employee { common } | RegisterForm::Employer { common, .. } => common,
        }
    }

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        let common = self.common();
        check_email(&mut errors, &common.email);
        check_password(&mut errors, "password", &common.password);
        if common.password != common.confirm_password {
            errors.push(FieldError::new("confirm_password", MSG_PASSWORDS_MISMATCH));
        }
        check_required(
            &mut errors,
            "first_name",
            &common.first_name,
            "First name is required",
        );
        check_required(
            &mut errors,
            "last_name",
            &common.last_name,
            "Last name is required",
        );
        if let RegisterForm::Employer {
            company_name,
            company_website,
            ..
        } = self
        {
            check_required(
                &mut errors,
                "company_name",
                company_name,
                MSG_COMPANY_NAME_REQUIRED,
            );
            if let Some(site) = company_website {
                if !site.is_empty()
                    && !(site.starts_with("http://") || site.starts_with("https://"))
                {
                    errors.push(FieldError::new(
                        "company_website",
                        "Company website must be a valid URL",
                    ));
                }
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// JSON body for `POST /auth/register`.
    pub fn to_payload(&self) -> Value {
        let common = self.common();
        let mut payload = json!({
            "email": common.email,
            "password": common.password,
            "first_name": common.first_name,
            "last_name": common.last_name,
            "user_type": self.user_type(),
        });
        if let RegisterForm::Employer {
            company_name,
            company_website,
            ..
        } = self
        {
            payload["company_name"] = json!(company_name);
            if let Some(site) = company_website {
                payload["company_website"] = json!(site);
            }
        }
        payload
    }
}

#[derive(Debug, Clone)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

impl ChangePasswordForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        check_required(
            &mut errors,
            "current_password",
            &self.current_password,
            "Current password is required",
        );
        check_password(&mut errors, "new_password", &self.new_password);
        if self.new_password != self.confirm_new_password {
            errors.push(FieldError::new(
                "confirm_new_password",
                MSG_PASSWORDS_MISMATCH,
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Pre-submission checks for `POST /employer/jobs` and job edits.
pub fn validate_job(title: &str, description: &str, salary_min: Option<u64>, salary_max: Option<u64>) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    check_required(&mut errors, "title", title, "Job title is required");
    check_required(
        &mut errors,
        "description",
        description,
        "Job description is required",
    );
    if let (Some(min), Some(max)) = (salary_min, salary_max) {
        if min > max {
            errors.push(FieldError::new(
                "salary_max",
                "Maximum salary must not be below the minimum",
            ));
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
