use thiserror::Error;

use crate::validation::FieldError;

/// Fallback toast text when the server omits a `detail`/`message` field.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Client-side error type covering the full §7-style taxonomy:
/// validation (pre-network), authentication (401, handled globally before the
/// caller sees it), API/business failures, and transport failures.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Validation failed: {}", format_fields(.0))]
    Validation(Vec<FieldError>),

    /// A 401 was observed. The forced logout (session + cache clear) has
    /// already been applied by the time this variant reaches a caller.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Response parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Session persistence error: {0}")]
    Persist(#[from] std::io::Error),
}

impl ClientError {
    /// Text suitable for a transient user-facing notification. Business and
    /// network failures read the same to the user; validation lists the first
    /// failing field's message; 401 is never surfaced locally (the shell
    /// reacts to the forced-logout event instead).
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(fields) => fields
                .first()
                .map(|f| f.message.clone())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            ClientError::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Timeout | ClientError::Network(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            ClientError::Parse(_) | ClientError::Persist(_) => GENERIC_FAILURE.to_string(),
        }
    }

    /// True for errors produced before any transport call was made.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}

fn format_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Extracts the server-provided `detail` (FastAPI convention) or `message`
/// field from an error body, falling back to the generic text.
pub fn api_error_message(status: u16, body: &serde_json::Value) -> ClientError {
    let message = body
        .get("detail")
        .or_else(|| body.get("message"))
        .and_then(|v| v.as_str())
        .unwrap_or(GENERIC_FAILURE)
        .to_string();
    ClientError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_error_prefers_detail_field() {
        let err = api_error_message(422, &json!({"detail": "Job title already exists"}));
        assert_eq!(err.user_message(), "Job title already exists");
    }

    #[test]
    fn test_api_error_falls_back_to_message_field() {
        let err = api_error_message(500, &json!({"message": "upstream unavailable"}));
        assert_eq!(err.user_message(), "upstream unavailable");
    }

    #[test]
    fn test_api_error_generic_when_body_opaque() {
        let err = api_error_message(502, &json!("bad gateway"));
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_validation_surfaces_first_field_message() {
        let err = ClientError::Validation(vec![
            FieldError::new("password", "Password must be at least 6 characters"),
            FieldError::new("email", "Invalid email address"),
        ]);
        assert_eq!(
            err.user_message(),
            "Password must be at least 6 characters"
        );
        assert!(err.is_validation());
    }
}
