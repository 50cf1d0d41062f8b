//! Transport seam between the API client and the wire.
//!
//! `ApiClient` is written against `dyn Transport`, so tests script responses
//! without a network and production wires in [`ReqwestTransport`]. Carried in
//! the app context as `Arc<dyn Transport>`.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ClientError;
use crate::models::resume::UploadFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Request payload shapes the backend accepts: JSON everywhere, form-encoding
/// for the change-password call, multipart for the two upload endpoints.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Form(Vec<(String, String)>),
    Multipart { field: String, file: UploadFile },
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path under `/api`, starting with `/` (e.g. `/auth/login`).
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    /// Bearer credential, attached when the session holds one.
    pub bearer: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed JSON body; `Value::Null` for empty bodies, `Value::String` for
    /// non-JSON bodies so error text still reaches the caller.
    pub body: Value,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

/// Production transport over reqwest with the fixed per-request timeout.
pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut req = self.http.request(method, self.url(&request.path));
        if let Some(token) = &request.bearer {
            req = req.bearer_auth(token);
        }
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        req = match request.body {
            RequestBody::Empty => req,
            RequestBody::Json(value) => req.json(&value),
            RequestBody::Form(fields) => req.form(&fields),
            RequestBody::Multipart { field, file } => {
                let part = reqwest::multipart::Part::bytes(file.bytes)
                    .file_name(file.filename)
                    .mime_str(&file.content_type)?;
                req.multipart(reqwest::multipart::Form::new().part(field, part))
            }
        };

        let response = req.send().await.map_err(|err| {
            if err.is_timeout() {
                ClientError::Timeout
            } else {
                ClientError::Network(err)
            }
        })?;

        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };
        Ok(ApiResponse { status, body })
    }
}
